//! Time zone offset handling
//!
//! Players without a notion of time zones write local wall-clock time into
//! the log. The user supplies the offset of that local time to UTC and every
//! listen is shifted back by it.

use crate::error::TimestampError;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;

const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

/// Signed difference between the log's local time and UTC
///
/// Parsed from duration strings such as `0h`, `+1h`, `-5h30m` or `1.5h`.
/// A number without unit is taken as hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOffset {
    duration: TimeDelta,
    text: String,
}

impl TimeOffset {
    /// The zero offset (log already in UTC)
    pub fn utc() -> Self {
        Self {
            duration: TimeDelta::zero(),
            text: "0h".to_string(),
        }
    }

    /// True when no conversion is required, whatever the offset was spelled as
    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }
}

impl Default for TimeOffset {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for TimeOffset {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nanos = parse_duration_nanos(s.trim()).map_err(|reason| {
            TimestampError::InvalidOffset {
                value: s.to_string(),
                reason,
            }
        })?;

        Ok(Self {
            duration: TimeDelta::nanoseconds(nanos),
            text: s.trim().to_string(),
        })
    }
}

/// Parse a signed duration into nanoseconds
fn parse_duration_nanos(text: &str) -> Result<i64, String> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        Some(_) => (false, text),
        None => return Err("empty duration".to_string()),
    };

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err("missing value after sign".to_string());
    }

    // Unit-less values are hours
    let owned;
    let rest = if rest.chars().all(|c| c.is_ascii_digit() || c == '.') {
        owned = format!("{}h", rest);
        owned.as_str()
    } else {
        rest
    };

    let mut total: i128 = 0;
    let mut remaining = rest;

    while !remaining.is_empty() {
        let number_len = remaining
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit after {:?}", remaining))?;
        let (number, tail) = remaining.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            "" => return Err(format!("missing unit after {:?}", number)),
            other => return Err(format!("unknown unit {:?}", other)),
        };

        total += scale_number(number, unit_nanos)?;
        if total > i64::MAX as i128 {
            return Err("duration out of range".to_string());
        }

        remaining = tail;
    }

    let total = if negative { -total } else { total };
    i64::try_from(total).map_err(|_| "duration out of range".to_string())
}

/// Multiply a decimal number such as `1.25` by a unit, exactly
fn scale_number(number: &str, unit_nanos: i128) -> Result<i128, String> {
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(format!("invalid number {:?}", number));
    }
    if fraction.contains('.') {
        return Err(format!("invalid number {:?}", number));
    }

    let whole_value: i128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| format!("invalid number {:?}", number))?
    };

    let mut value = whole_value
        .checked_mul(unit_nanos)
        .ok_or_else(|| "duration out of range".to_string())?;

    // Digits beyond nanosecond precision contribute nothing
    let mut scale = unit_nanos;
    for digit in fraction.bytes() {
        scale /= 10;
        if scale == 0 {
            break;
        }
        value += i128::from(digit - b'0') * scale;
    }

    Ok(value)
}

/// Interpret a raw log field as whole epoch seconds
///
/// Only plain decimal digits are accepted, no sign.
pub fn parse_epoch_seconds(raw: &str) -> Result<i64, TimestampError> {
    let invalid = || TimestampError::InvalidTimestamp {
        value: raw.to_string(),
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    raw.parse().map_err(|_| invalid())
}

/// Shift a local epoch timestamp to UTC by subtracting the offset
///
/// Zones behind UTC (negative offsets) move forward in time, zones ahead of
/// UTC move backward. Sub-second remainders round down. Results before the
/// epoch are out of range.
pub fn to_utc(timestamp: i64, offset: &TimeOffset) -> Result<i64, TimestampError> {
    let local = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .ok_or(TimestampError::OutOfRange { value: timestamp })?;

    let shifted = local
        .checked_sub_signed(offset.duration())
        .ok_or(TimestampError::OutOfRange { value: timestamp })?;

    match shifted.timestamp() {
        utc if utc < 0 => Err(TimestampError::OutOfRange { value: timestamp }),
        utc => Ok(utc),
    }
}

/// Parse a raw timestamp field and convert it to UTC
pub fn correct_timestamp(raw: &str, offset: &TimeOffset) -> Result<i64, TimestampError> {
    let timestamp = parse_epoch_seconds(raw)?;
    to_utc(timestamp, offset)
}
