//! Human-readable companions for the registered timestamp claims.

use chrono::{DateTime, Utc};
use serde_json::Value;

pub const CLAIM_IAT: &str = "iat";
pub const CLAIM_EXP: &str = "exp";
pub const CLAIM_NBF: &str = "nbf";
pub const CLAIM_AUTH_TIME: &str = "auth_time";

const TIMESTAMP_CLAIMS: [&str; 4] = [CLAIM_IAT, CLAIM_EXP, CLAIM_NBF, CLAIM_AUTH_TIME];

/// Unit-less values above this magnitude are read as milliseconds.
pub const MILLIS_THRESHOLD: i64 = 10_000_000_000;

const DATESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Suffix of the synthetic companion key, e.g. `exp_datestamp`.
pub const DATESTAMP_SUFFIX: &str = "_datestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpochUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    /// Seconds or milliseconds, decided by [`MILLIS_THRESHOLD`].
    #[default]
    Unspecified,
}

impl EpochUnit {
    /// Parses a unit token. Anything unrecognised falls back to the heuristic.
    pub fn parse(unit: &str) -> Self {
        match unit.to_ascii_lowercase().as_str() {
            "s" | "seconds" => EpochUnit::Seconds,
            "ms" | "milliseconds" => EpochUnit::Milliseconds,
            "us" | "microseconds" => EpochUnit::Microseconds,
            "ns" | "nanoseconds" => EpochUnit::Nanoseconds,
            _ => EpochUnit::Unspecified,
        }
    }

    fn per_second(self, value: i64) -> i64 {
        match self {
            EpochUnit::Seconds => 1,
            EpochUnit::Milliseconds => 1_000,
            EpochUnit::Microseconds => 1_000_000,
            EpochUnit::Nanoseconds => 1_000_000_000,
            EpochUnit::Unspecified if value.unsigned_abs() > MILLIS_THRESHOLD as u64 => 1_000,
            EpochUnit::Unspecified => 1,
        }
    }
}

/// Controls whether and how timestamp companions are produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpochOptions {
    pub convert: bool,
    pub unit: EpochUnit,
}

impl EpochOptions {
    pub fn new(convert: bool, unit: EpochUnit) -> Self {
        Self { convert, unit }
    }

    /// The datestamp for `key`, if conversion is on and the claim qualifies.
    pub fn datestamp(&self, key: &str, value: &Value) -> Option<String> {
        if !self.convert {
            return None;
        }
        normalize(key, value, self.unit)
    }
}

pub fn is_timestamp_claim(key: &str) -> bool {
    TIMESTAMP_CLAIMS.contains(&key)
}

/// Formats a recognised timestamp claim as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Returns `None` for other keys, non-numeric values and instants chrono
/// cannot represent.
pub fn normalize(key: &str, value: &Value, unit: EpochUnit) -> Option<String> {
    if !is_timestamp_claim(key) {
        return None;
    }

    let timestamp = as_timestamp(value)?;
    let per_second = unit.per_second(timestamp);
    let secs = timestamp.div_euclid(per_second);
    let nanos = timestamp.rem_euclid(per_second) * (1_000_000_000 / per_second);

    let date = DateTime::<Utc>::from_timestamp(secs, u32::try_from(nanos).ok()?)?;
    Some(date.format(DATESTAMP_FORMAT).to_string())
}

/// Integers are taken as-is, floats are truncated toward zero and strings
/// must hold a plain integer.
fn as_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
