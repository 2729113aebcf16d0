/// Widens an `int` to a `float`.
///
/// Integers beyond `2^53` round to the nearest representable value, as in C.
///
/// # Example
/// ```
/// use clite::util::num::int_to_float;
///
/// assert_eq!(int_to_float(-3), -3.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Narrows a `float` to an `int`, truncating toward zero.
///
/// Returns `None` for NaN, infinities and values outside the `i64` range.
///
/// # Example
/// ```
/// use clite::util::num::float_to_int;
///
/// assert_eq!(float_to_int(2.9), Some(2));
/// assert_eq!(float_to_int(-2.9), Some(-2));
/// assert_eq!(float_to_int(f64::NAN), None);
/// assert_eq!(float_to_int(1e20), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn float_to_int(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Converts a language index into a position within a sequence of `len`
/// elements. Negative and too-large indices give `None`.
///
/// # Example
/// ```
/// use clite::util::num::checked_index;
///
/// assert_eq!(checked_index(2, 3), Some(2));
/// assert_eq!(checked_index(3, 3), None);
/// assert_eq!(checked_index(-1, 3), None);
/// ```
#[must_use]
pub fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

/// Converts a declared array dimension to a length. Only strictly positive
/// dimensions are valid.
#[must_use]
pub fn dimension(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|&d| d > 0)
}

/// Converts a shift count. Counts outside `0..64` give `None`.
#[must_use]
pub fn shift_amount(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|&s| s < i64::BITS)
}

/// Maps `main`'s result to a process exit status, keeping the low 32 bits
/// like a C `int` conversion would.
///
/// # Example
/// ```
/// use clite::util::num::exit_status;
///
/// assert_eq!(exit_status(8), 8);
/// assert_eq!(exit_status(-1), -1);
/// assert_eq!(exit_status(1 << 32 | 5), 5);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub const fn exit_status(code: i64) -> i32 {
    code as i32
}
