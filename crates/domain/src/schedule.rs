//! Scheduled jobs: recurring device-side timers and their timespec.
//!
//! A job runs a list of RPC calls whenever its timespec matches the local
//! wall clock. This system only ever creates single-call jobs whose call
//! carries a provenance tag (`origin`); that tag is how the reconciler tells
//! its own job apart from jobs created by other tools.

use std::fmt;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{ButtonId, JobId};
use crate::time::LocalTime;

/// RPC method the fire job invokes on the device.
pub const BUTTON_TRIGGER_METHOD: &str = "button.trigger";

/// A single RPC call executed by a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCall {
    pub method: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

/// A job as listed by the device.
///
/// The timespec is kept verbatim: jobs created by other tools may use
/// forms this crate does not parse (e.g. sunrise offsets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub id: JobId,
    #[serde(default)]
    pub enable: bool,
    pub timespec: String,
    #[serde(default)]
    pub calls: Vec<JobCall>,
}

impl ScheduledJob {
    /// Whether this job was created by the tool using `origin`.
    ///
    /// Only single-call jobs are considered, and only their first call is
    /// inspected. A single-call job from another tool that happens to carry
    /// the same tag is still claimed.
    #[must_use]
    pub fn is_owned_by(&self, origin: &str) -> bool {
        match self.calls.as_slice() {
            [call] => call.origin.as_deref() == Some(origin),
            _ => false,
        }
    }
}

/// Find the first job owned by `origin`.
#[must_use]
pub fn find_owned<'a>(jobs: &'a [ScheduledJob], origin: &str) -> Option<&'a ScheduledJob> {
    jobs.iter().find(|job| job.is_owned_by(origin))
}

/// Desired configuration for a job, sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSpec {
    pub enable: bool,
    pub timespec: Timespec,
    pub calls: Vec<JobCall>,
}

impl JobSpec {
    /// The fire job: presses `button` with `event` whenever `timespec` matches.
    #[must_use]
    pub fn button_trigger(timespec: Timespec, button: ButtonId, event: &str, origin: &str) -> Self {
        Self {
            enable: true,
            timespec,
            calls: vec![JobCall {
                method: BUTTON_TRIGGER_METHOD.to_string(),
                params: serde_json::json!({ "event": event, "id": button }),
                origin: Some(origin.to_string()),
            }],
        }
    }
}

/// Result of a successful create or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRevision {
    pub id: JobId,
    pub rev: u64,
}

/// Six-field cron expression: `sec min hour day-of-month month day-of-week`.
///
/// Fields accept `*`, numbers, `a-b` ranges, `/step` suffixes and comma
/// lists. Day-of-week is `0..=6` with Sunday as `0` (`7` is also Sunday),
/// or three-letter names. When both day fields are restricted a day matches
/// if either does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timespec {
    raw: String,
    fields: [FieldSet; 6],
}

const SECOND: usize = 0;
const MINUTE: usize = 1;
const HOUR: usize = 2;
const DAY_OF_MONTH: usize = 3;
const MONTH: usize = 4;
const DAY_OF_WEEK: usize = 5;

const BOUNDS: [(u32, u32); 6] = [(0, 59), (0, 59), (0, 23), (1, 31), (1, 12), (0, 7)];

const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

impl Timespec {
    /// Parse and validate a timespec.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimespec`] when the expression does
    /// not have six fields or a field is out of range.
    pub fn parse(spec: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidTimespec {
            spec: spec.to_string(),
            reason,
        };

        let parts: Vec<&str> = spec.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(invalid(format!("expected 6 fields, got {}", parts.len())));
        }

        let mut fields = [FieldSet::default(); 6];
        for (idx, part) in parts.iter().enumerate() {
            let (min, max) = BOUNDS[idx];
            let mut set = FieldSet::parse(part, min, max, idx == DAY_OF_WEEK).map_err(invalid)?;
            if idx == DAY_OF_WEEK && set.contains(7) {
                set.insert(0);
            }
            fields[idx] = set;
        }

        Ok(Self {
            raw: parts.join(" "),
            fields,
        })
    }

    /// The normalised textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the timespec matches `at`, to the second.
    #[must_use]
    pub fn matches(&self, at: &LocalTime) -> bool {
        let f = &self.fields;
        if !(f[SECOND].contains(at.second())
            && f[MINUTE].contains(at.minute())
            && f[HOUR].contains(at.hour())
            && f[MONTH].contains(at.month()))
        {
            return false;
        }

        let dom_restricted = !f[DAY_OF_MONTH].wildcard;
        let dow_restricted = !f[DAY_OF_WEEK].wildcard;
        let dom = f[DAY_OF_MONTH].contains(at.day());
        let dow = f[DAY_OF_WEEK].contains(at.weekday().num_days_from_sunday());
        match (dom_restricted, dow_restricted) {
            (true, true) => dom || dow,
            _ => dom && dow,
        }
    }
}

impl Default for Timespec {
    /// Weekdays at 23:00, i.e. `0 0 23 * * 1,2,3,4,5`.
    fn default() -> Self {
        let only = |values: &[u32]| FieldSet {
            bits: values.iter().fold(0, |bits, value| bits | 1 << value),
            wildcard: false,
        };
        let any = |(min, max): (u32, u32)| FieldSet {
            bits: (min..=max).fold(0, |bits, value| bits | 1 << value),
            wildcard: true,
        };
        Self {
            raw: "0 0 23 * * 1,2,3,4,5".to_string(),
            fields: [
                only(&[0]),
                only(&[0]),
                only(&[23]),
                any(BOUNDS[DAY_OF_MONTH]),
                any(BOUNDS[MONTH]),
                only(&[1, 2, 3, 4, 5]),
            ],
        }
    }
}

impl TryFrom<String> for Timespec {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timespec> for String {
    fn from(value: Timespec) -> Self {
        value.raw
    }
}

impl fmt::Display for Timespec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Set of allowed values for one cron field, as a bitmask over `0..64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct FieldSet {
    bits: u64,
    wildcard: bool,
}

impl FieldSet {
    fn contains(self, value: u32) -> bool {
        value < 64 && self.bits & (1 << value) != 0
    }

    fn insert(&mut self, value: u32) {
        self.bits |= 1 << value;
    }

    fn parse(field: &str, min: u32, max: u32, weekday: bool) -> Result<Self, String> {
        let mut set = Self {
            bits: 0,
            wildcard: field == "*",
        };

        for item in field.split(',') {
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => {
                    let step: u32 = step
                        .parse()
                        .map_err(|_| format!("invalid step `{step}`"))?;
                    if step == 0 {
                        return Err("step must be positive".to_string());
                    }
                    if step > max {
                        return Err(format!("step `{step}` exceeds {max}"));
                    }
                    (range, step)
                }
                None => (item, 1),
            };

            let (start, end) = if range == "*" {
                (min, max)
            } else if let Some((lo, hi)) = range.split_once('-') {
                (
                    parse_value(lo, weekday)?,
                    parse_value(hi, weekday)?,
                )
            } else {
                let value = parse_value(range, weekday)?;
                // `5/15` means "from 5 to the end, every 15"
                let end = if step > 1 { max } else { value };
                (value, end)
            };

            if start < min || end > max || start > end {
                return Err(format!("`{item}` is outside {min}..={max}"));
            }

            let mut value = Some(start);
            while let Some(current) = value.filter(|v| *v <= end) {
                set.insert(current);
                value = current.checked_add(step);
            }
        }

        Ok(set)
    }
}

fn parse_value(text: &str, weekday: bool) -> Result<u32, String> {
    if weekday {
        if let Some(idx) = WEEKDAY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(text))
        {
            return u32::try_from(idx).map_err(|err| err.to_string());
        }
    }
    text.parse().map_err(|_| format!("invalid value `{text}`"))
}
