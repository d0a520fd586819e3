//! Textual durations such as `1h30m`, `1.5s` and `300ms`.

use std::time::Duration;

use super::CoercionError;
use crate::value::Value;

const TARGET: &str = "duration";

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Convert `value` into a [`Duration`].
///
/// Strings are parsed with [`parse_duration`]; integers and floats count
/// milliseconds.
///
/// # Errors
///
/// Returns [`CoercionError`] for unparseable text, negative or non-finite
/// numbers and non-scalar values.
pub fn to_duration(value: &Value) -> Result<Duration, CoercionError> {
    match value {
        Value::String(s) => parse_duration(s),
        Value::Integer(ms) => u64::try_from(*ms)
            .map(Duration::from_millis)
            .map_err(|_| CoercionError::negative(ms, TARGET)),
        Value::Float(ms) if *ms < 0.0 => Err(CoercionError::negative(ms, TARGET)),
        Value::Float(ms) => Duration::try_from_secs_f64(ms / 1_000.0)
            .map_err(|_| CoercionError::overflow(ms, TARGET)),
        other => Err(CoercionError::unsupported(other.kind(), TARGET)),
    }
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

/// Parse a duration made of one or more `<number><unit>` terms.
///
/// Numbers may carry a fractional part. Units are `ns`, `us` (or `µs`),
/// `ms`, `s`, `m` and `h`. The bare string `0` is accepted; any other number
/// needs a unit. Negative durations are rejected.
///
/// # Errors
///
/// Returns [`CoercionError`] when the text is malformed, negative, uses an
/// unknown unit or overflows.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use layered_config::coerce::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").ok(), Some(Duration::from_secs(5_400)));
/// assert_eq!(parse_duration("1.5s").ok(), Some(Duration::from_millis(1_500)));
/// assert!(parse_duration("10").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, CoercionError> {
    if input.starts_with('-') {
        return Err(CoercionError::negative(input, TARGET));
    }
    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(CoercionError::parse(input, TARGET, "empty duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        if unit.is_empty() {
            return Err(CoercionError::parse(input, TARGET, "missing unit"));
        }
        let scale = unit_nanos(unit).ok_or_else(|| {
            CoercionError::parse(input, TARGET, format_args!("unknown unit {unit:?}"))
        })?;
        let term = term_nanos(number, scale)
            .ok_or_else(|| CoercionError::parse(input, TARGET, "invalid number"))?;
        total = total
            .checked_add(term)
            .ok_or_else(|| CoercionError::overflow(input, TARGET))?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC)
        .map_err(|_| CoercionError::overflow(input, TARGET))?;
    let nanos = u32::try_from(total % NANOS_PER_SEC)
        .map_err(|_| CoercionError::overflow(input, TARGET))?;
    Ok(Duration::new(secs, nanos))
}

/// Nanoseconds for one `<number>` scaled by `scale`; `None` on bad digits or
/// overflow.
fn term_nanos(number: &str, scale: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().ok()?
    };
    let mut nanos = whole_value.checked_mul(scale)?;
    if !frac.is_empty() {
        // Digits past nanosecond precision cannot contribute.
        let digits = frac.get(..frac.len().min(18))?;
        let frac_value = digits.parse::<u128>().ok()?;
        let denominator = 10_u128.checked_pow(u32::try_from(digits.len()).ok()?)?;
        nanos = nanos.checked_add(frac_value.checked_mul(scale)? / denominator)?;
    }
    Some(nanos)
}

/// Render `duration` in the canonical form read back by [`parse_duration`].
///
/// Sub-second values use the largest fitting unit (`300ms`, `1.5µs`, `12ns`);
/// longer values use hours, minutes and seconds (`1h30m0s`, `1m0.5s`).
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_owned();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", fraction(nanos, NANOS_PER_MICRO, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", fraction(nanos, NANOS_PER_MILLI, 6));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3_600;
    let minutes = (total_secs / 60) % 60;
    let seconds = u128::from(total_secs % 60) * NANOS_PER_SEC
        + u128::from(duration.subsec_nanos());

    let secs = fraction(seconds, NANOS_PER_SEC, 9);
    match (hours, minutes) {
        (0, 0) => format!("{secs}s"),
        (0, _) => format!("{minutes}m{secs}s"),
        _ => format!("{hours}h{minutes}m{secs}s"),
    }
}

fn fraction(value: u128, unit: u128, width: usize) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let digits = format!("{rem:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
