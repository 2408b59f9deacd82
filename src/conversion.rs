use crate::constants::{Degree, Radian, RADEG};

/// Parse a catalog cell as a finite number.
///
/// Arguments
/// ---------
/// * `field`: the raw cell text (surrounding whitespace allowed)
///
/// Return
/// ------
/// * `Some(value)` for a finite number, `None` for blank text, garbage, `NaN` or infinities
pub fn parse_lenient(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn deg_to_rad(angle: Degree) -> Radian {
    angle * RADEG
}
