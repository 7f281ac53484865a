use rand::Rng;

/// `len` symbols drawn uniformly from the first `alphabet` lowercase letters.
pub fn random_symbols(rng: &mut impl Rng, alphabet: u8, len: usize) -> Vec<u8> {
    (0..len).map(|_| b'a' + rng.random_range(0..alphabet)).collect()
}
