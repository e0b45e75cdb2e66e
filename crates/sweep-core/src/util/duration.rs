//! Go-style signed duration strings (`300ms`, `1h30m`, `1.5h`, `-2s`).

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("time: invalid duration {0:?}")]
    Invalid(String),
    #[error("time: missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("time: unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => NANOSECOND,
        "us" | "µs" | "μs" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        _ => return None,
    })
}

/// Parse a duration into signed nanoseconds. A sequence of decimal numbers,
/// each with optional fraction and a required unit, with an optional leading
/// sign. `"0"` is the only unitless value accepted.
pub fn parse_go_duration(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let whole: u128 = if int_len > 0 {
            rest[..int_len].parse::<u64>().map_err(|_| invalid())? as u128
        } else {
            0
        };
        rest = &rest[int_len..];

        let mut frac: u128 = 0;
        let mut scale: u128 = 1;
        let mut frac_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            // Digits past nanosecond precision of an hour cannot change the result.
            for d in after_dot[..frac_len].bytes().take(18) {
                frac = frac * 10 + u128::from(d - b'0');
                scale *= 10;
            }
            rest = &after_dot[frac_len..];
        }
        if int_len == 0 && frac_len == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map_or(rest.len(), |(i, _)| i);
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let unit = &rest[..unit_len];
        let nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        rest = &rest[unit_len..];

        total = total
            .checked_add(whole * nanos + frac * nanos / scale)
            .ok_or_else(invalid)?;
        if total > 1u128 << 63 {
            return Err(invalid());
        }
    }

    if negative {
        // -(1 << 63) is representable; anything smaller was rejected above.
        Ok((total as i128).wrapping_neg() as i64)
    } else {
        i64::try_from(total).map_err(|_| invalid())
    }
}

/// Warnings and errors collected while validating a config value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate that `value` (the setting named `key`) is a parseable,
/// non-negative duration.
pub fn validate_duration(value: &str, key: &str) -> Validation {
    let mut v = Validation::default();
    let nanos = match parse_go_duration(value) {
        Ok(n) => n,
        Err(e) => {
            v.errors
                .push(format!("{:?} cannot be parsed as a duration: {}", key, e));
            0
        }
    };
    if nanos < 0 {
        v.errors.push(format!("{:?} must be greater than zero", key));
    }
    v
}
