use crate::typed_vec::typed_vec_index;

typed_vec_index!(pub ACNodeId, u32);

/// The root state; every automaton has it at index 0.
pub const AC_NODE_ROOT: ACNodeId = ACNodeId::ZERO;
