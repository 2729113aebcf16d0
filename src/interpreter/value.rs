/// Runtime value representation.
///
/// Defines the `Value` enum together with type inspection, default values,
/// the implicit numeric coercion used by declarations and assignments, and
/// the textual form used by the print built-ins.
pub mod core;

/// Array values.
///
/// Construction from initializer lists with the homogeneous leaf-type
/// invariant, default-filled arrays for declarations, shape checks, and
/// bounds-checked element access.
pub mod array;
