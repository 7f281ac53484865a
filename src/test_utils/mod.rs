mod brute;
mod prefix;
mod random;

pub use self::{
    brute::{brute_force_matches, brute_force_positions, naive_wildcard_positions},
    prefix::prefix_function_positions,
    random::random_symbols,
};
