/// Numeric conversion helpers.
///
/// The language converts between `int` and `float` with C semantics: widening
/// may round, narrowing truncates toward zero. These helpers keep the casts
/// and their clippy allowances in one place and report values that cannot be
/// represented instead of saturating silently.
pub mod num;
