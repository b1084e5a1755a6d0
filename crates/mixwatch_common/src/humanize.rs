//! Human-readable magnitude formatting for stake amounts.

/// Magnitude suffixes, one per factor of 1000.
const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Format a value with a magnitude suffix and fixed fractional precision.
///
/// `human_format(150_000.0, 2)` renders as `"150.00K"`. Values below
/// 1000 keep the same precision with no suffix, so `5.0` renders as
/// `"5.00"`. Deterministic and monotonic over its input.
pub fn human_format(value: f64, precision: usize) -> String {
    let mut value = value;
    let mut magnitude = 0;

    while value.abs() >= 1000.0 && magnitude < SUFFIXES.len() - 1 {
        value /= 1000.0;
        magnitude += 1;
    }

    format!("{:.*}{}", precision, value, SUFFIXES[magnitude])
}
