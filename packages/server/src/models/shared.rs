use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AppError;

/// Decimal places stored for marks and reported for percentages.
pub const MARKS_SCALE: u32 = 2;

pub const ROLL_NUMBER_MAX_LEN: usize = 20;
pub const NAME_MAX_LEN: usize = 100;
pub const CLASS_NAME_MAX_LEN: usize = 50;
pub const SUBJECT_MAX_LEN: usize = 100;
pub const SEMESTER_MAX_LEN: usize = 20;

/// Largest value a `DECIMAL(5, 2)` column holds.
fn max_marks() -> Decimal {
    Decimal::new(99_999, MARKS_SCALE)
}

/// Trim a text field and check it is non-empty and at most `max` characters.
pub fn clean_text(field: &str, value: &str, max: usize) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} must not be blank"));
    }
    if value.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(value.to_string())
}

/// Round to two decimal places and pad the scale, so `90` renders as `90.00`.
/// A value that rounds to zero loses its sign.
pub fn fixed_scale(value: Decimal) -> Decimal {
    let mut value = value.round_dp_with_strategy(MARKS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(MARKS_SCALE);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

/// Normalize a marks value to the stored precision and check its range.
pub fn clean_marks(field: &str, value: Decimal) -> Result<Decimal, String> {
    let value = fixed_scale(value);
    if value.is_sign_negative() {
        return Err(format!("{field} must not be negative"));
    }
    if value > max_marks() {
        return Err(format!("{field} must be at most {}", max_marks()));
    }
    Ok(value)
}

/// Parse a marks cell such as `45`, `45.5` or `4.55e1`.
pub fn parse_marks(field: &str, raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("{field} must be a number, got '{raw}'"))?;
    clean_marks(field, value)
}

/// `marks_obtained / total_marks * 100`, or `None` when `total_marks` is zero.
pub fn percentage(marks_obtained: Decimal, total_marks: Decimal) -> Option<Decimal> {
    if total_marks.is_zero() {
        return None;
    }
    let ratio = marks_obtained.checked_div(total_marks)?;
    ratio.checked_mul(Decimal::ONE_HUNDRED).map(fixed_scale)
}

/// Unwrap a required JSON field.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
