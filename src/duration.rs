//! Sample interval type.
//!
//! [`Interval`] is a signed nanosecond count. It has a human-readable text
//! form (`"1s"`, `"500ms"`, `"1h30m"`) used by serde and configuration files,
//! and a fixed 9-byte binary form tagged with a version byte.

use crate::error::{Result, SeriesError};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Version byte prefixed to the binary encoding.
pub const INTERVAL_BINARY_VERSION: u8 = 1;

/// Length of the binary encoding: version byte + 8 bytes of nanoseconds.
pub const INTERVAL_BINARY_LEN: usize = 9;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Nominal spacing between samples, in nanoseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Interval(i64);

impl Interval {
    pub const ZERO: Interval = Interval(0);

    pub const fn from_nanos(nanos: i64) -> Self {
        Interval(nanos)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Interval(millis.saturating_mul(MILLISECOND as i64))
    }

    pub const fn from_secs(secs: i64) -> Self {
        Interval(secs.saturating_mul(SECOND as i64))
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// This interval repeated `count` times, saturating at the `i64` bounds.
    pub fn times(self, count: usize) -> Interval {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Interval(self.0.saturating_mul(count))
    }

    /// Encode as the versioned 9-byte binary form.
    pub fn to_bytes(self) -> [u8; INTERVAL_BINARY_LEN] {
        let mut out = [0u8; INTERVAL_BINARY_LEN];
        out[0] = INTERVAL_BINARY_VERSION;
        out[1..].copy_from_slice(&self.0.to_be_bytes());
        out
    }

    /// Decode the versioned 9-byte binary form.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let Some(&version) = data.first() else {
            return Err(SeriesError::IntervalDecode("no data".to_string()));
        };
        if version != INTERVAL_BINARY_VERSION {
            return Err(SeriesError::IntervalDecode(format!(
                "unsupported version {version}"
            )));
        }
        let nanos: [u8; 8] = data[1..].try_into().map_err(|_| {
            SeriesError::IntervalDecode(format!(
                "invalid length {} (expected {INTERVAL_BINARY_LEN})",
                data.len()
            ))
        })?;
        Ok(Interval(i64::from_be_bytes(nanos)))
    }
}

impl From<std::time::Duration> for Interval {
    fn from(d: std::time::Duration) -> Self {
        Interval(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

impl FromStr for Interval {
    type Err = SeriesError;

    /// Parses a duration string, falling back to a bare nanosecond count.
    fn from_str(s: &str) -> Result<Self> {
        let duration_err = match parse_duration(s) {
            Ok(nanos) => return Ok(Interval(nanos)),
            Err(e) => e,
        };
        match s.parse::<i64>() {
            Ok(nanos) => Ok(Interval(nanos)),
            Err(int_err) => Err(SeriesError::InvalidInterval {
                input: s.to_string(),
                reason: format!("{duration_err}; as integer: {int_err}"),
            }),
        }
    }
}

fn unit_scale(unit: &str) -> std::result::Result<u64, String> {
    match unit {
        "ns" => Ok(NANOSECOND),
        "us" | "µs" | "μs" => Ok(MICROSECOND),
        "ms" => Ok(MILLISECOND),
        "s" => Ok(SECOND),
        "m" => Ok(MINUTE),
        "h" => Ok(HOUR),
        "" => Err("missing unit".to_string()),
        other => Err(format!("unknown unit {other:?}")),
    }
}

/// Parses `[-+]?(<decimal><unit>)+`, or a lone `0`.
fn parse_duration(s: &str) -> std::result::Result<i64, String> {
    let overflow = || "duration out of range".to_string();

    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let int_part = &rest[..int_len];
        rest = &rest[int_len..];

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            frac_part = &after_dot[..frac_len];
            rest = &after_dot[frac_len..];
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(format!("expected a number at {rest:?}"));
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let scale = unit_scale(&rest[..unit_len])?;
        rest = &rest[unit_len..];

        let whole: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };
        let mut value = whole.checked_mul(scale).ok_or_else(overflow)?;

        if !frac_part.is_empty() {
            // Digits beyond nanosecond precision of an hour cannot matter.
            let digits = &frac_part[..frac_part.len().min(18)];
            let numerator: u128 = digits.parse().map_err(|_| overflow())?;
            let denominator = 10u128.pow(digits.len() as u32);
            let extra = (numerator * u128::from(scale) / denominator) as u64;
            value = value.checked_add(extra).ok_or_else(overflow)?;
        }

        total = total.checked_add(value).ok_or_else(overflow)?;
    }

    if negative {
        if total > i64::MIN.unsigned_abs() {
            return Err(overflow());
        }
        Ok((total as i64).wrapping_neg())
    } else {
        i64::try_from(total).map_err(|_| overflow())
    }
}

/// Formats `value / scale` with a trimmed fractional part.
fn decimal(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let frac = format!("{frac:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let n = self.0.unsigned_abs();
        if n < MICROSECOND {
            write!(f, "{n}ns")
        } else if n < MILLISECOND {
            write!(f, "{}µs", decimal(n, MICROSECOND))
        } else if n < SECOND {
            write!(f, "{}ms", decimal(n, MILLISECOND))
        } else {
            let hours = n / HOUR;
            let minutes = (n % HOUR) / MINUTE;
            let seconds = decimal(n % MINUTE, SECOND);
            if hours > 0 {
                write!(f, "{hours}h{minutes}m{seconds}s")
            } else if minutes > 0 {
                write!(f, "{minutes}m{seconds}s")
            } else {
                write!(f, "{seconds}s")
            }
        }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interval({self})")
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct IntervalVisitor;

impl<'de> Visitor<'de> for IntervalVisitor {
    type Value = Interval;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a duration string such as \"1s\" or an integer nanosecond count")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Interval, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Interval, E> {
        Ok(Interval(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Interval, E> {
        i64::try_from(v)
            .map(Interval)
            .map_err(|_| E::custom("interval out of range"))
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(IntervalVisitor)
    }
}
