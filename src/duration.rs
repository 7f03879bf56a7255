//! A duration that reads and writes as `"1h30m"`, `"1.5s"`, `"250ms"`.
//!
//! Config files and environment variables carry durations as text. Use
//! [`Duration`] for such fields: it deserializes from those strings, prints
//! without trailing zero units (`"5m"`, not `"5m0s"`), and is opaque to the
//! walker, so a struct can mix durations and file references freely.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::shape::{Shape, Walkable};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Fraction digits beyond this are ignored; they are far below a nanosecond
/// for every unit.
const MAX_FRACTION_DIGITS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseDurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("negative duration {0:?} is not supported")]
    Negative(String),

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// A non-negative duration with a text form.
///
/// Negative inputs such as `"-5s"` are rejected with
/// [`ParseDurationError::Negative`], since the value wraps the unsigned
/// [`std::time::Duration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(pub std::time::Duration);

impl Duration {
    pub const ZERO: Duration = Duration(std::time::Duration::ZERO);

    pub const fn from_secs(secs: u64) -> Self {
        Self(std::time::Duration::from_secs(secs))
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(std::time::Duration::from_millis(millis))
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self(value)
    }
}

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Walkable for Duration {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Opaque
    }
}

impl FromStr for Duration {
    type Err = ParseDurationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut rest = input.strip_prefix('+').unwrap_or(input);
        if rest.starts_with('-') {
            return Err(ParseDurationError::Negative(input.to_string()));
        }
        if rest == "0" {
            return Ok(Self::ZERO);
        }
        if rest.is_empty() {
            return Err(ParseDurationError::Invalid(input.to_string()));
        }

        let mut total: u128 = 0;
        while !rest.is_empty() {
            let (whole, tail) = split_digits(rest);
            let (fraction, tail) = match tail.strip_prefix('.') {
                Some(tail) => split_digits(tail),
                None => ("", tail),
            };
            if whole.is_empty() && fraction.is_empty() {
                return Err(ParseDurationError::Invalid(input.to_string()));
            }

            let unit_len = tail
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(tail.len());
            let (unit, tail) = tail.split_at(unit_len);
            if unit.is_empty() {
                return Err(ParseDurationError::MissingUnit(input.to_string()));
            }
            let scale = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

            let overflow = || ParseDurationError::Overflow(input.to_string());
            let whole = if whole.is_empty() {
                0
            } else {
                whole.parse::<u128>().map_err(|_| overflow())?
            };
            total = whole
                .checked_mul(scale)
                .and_then(|nanos| nanos.checked_add(fraction_nanos(fraction, scale)))
                .and_then(|nanos| total.checked_add(nanos))
                .ok_or_else(overflow)?;

            rest = tail;
        }

        let secs = u64::try_from(total / NANOS_PER_SEC)
            .map_err(|_| ParseDurationError::Overflow(input.to_string()))?;
        // Always below one second, so it fits.
        let nanos = (total % NANOS_PER_SEC) as u32;
        Ok(Self(std::time::Duration::new(secs, nanos)))
    }
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let digits = &digits[..digits.len().min(MAX_FRACTION_DIGITS)];
    if digits.is_empty() {
        return 0;
    }
    // At most 20 ASCII digits, so both parse and the power fit in u128.
    let value: u128 = digits.parse().unwrap_or(0);
    let denominator = 10u128.pow(digits.len() as u32);
    value.saturating_mul(scale) / denominator
}

/// `value / unit` with a trimmed decimal fraction, e.g. `1.5`.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let fraction = format!("{fraction:0width$}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Full form with every unit from the largest present, e.g. `1h0m0s`.
fn long_form(duration: std::time::Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}\u{00b5}s", decimal(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, NANOS_PER_MILLI));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = nanos % NANOS_PER_HOUR / NANOS_PER_MIN;
    let seconds = decimal(nanos % NANOS_PER_MIN, NANOS_PER_SEC);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&seconds);
    out.push('s');
    out
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = long_form(self.0);
        if text.len() > 3 && text.ends_with("m0s") {
            text.truncate(text.len() - 2);
        }
        if text.len() > 3 && text.ends_with("h0m") {
            text.truncate(text.len() - 2);
        }
        f.write_str(&text)
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(|err| {
            serde::de::Error::custom(format_args!("parsing duration '{text}': {err}"))
        })
    }
}
