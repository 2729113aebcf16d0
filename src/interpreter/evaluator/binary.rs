/// Dispatch of binary operators to the operand-type tables below.
pub mod core;

/// `+ - * / %` on ints and floats, and string concatenation.
pub mod arithmetic;

/// `& | ^ << >>` on ints.
pub mod bitwise;

/// Equality and relational operators.
pub mod comparison;

/// `&&` and `||`.
pub mod logic;
