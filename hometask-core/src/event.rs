//! Event record and draft types.
//!
//! These types mirror the persisted document format: the event store keys
//! records by their primary date, and a multi-day event is stored once with
//! back-references to the other dates it covers.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{HomeTaskError, HomeTaskResult};

/// One stored calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique per stored occurrence, `<unix-millis>-<index>` when generated.
    pub id: String,
    pub title: String,
    /// Primary date: the only store key this record is filed under.
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub alarm: AlarmSetting,
    #[serde(default)]
    pub is_multi_day: bool,
    /// Additional dates this event covers. Back-references only; these
    /// dates do not get their own stored copy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_dates: Vec<NaiveDate>,
}

/// Draft input to the save reconciler.
///
/// `repeat` and `alarm` default to `none` when absent so a sparse draft
/// never fails deserialization. An `id` marks the draft as an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub alarm: AlarmSetting,
}

/// Repeat metadata. Stored as-is, never expanded into occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    None,
    Weekly,
    Biweekly,
    Monthly,
}

impl Repeat {
    pub fn label(&self) -> &'static str {
        match self {
            Repeat::None => "Does not repeat",
            Repeat::Weekly => "Weekly",
            Repeat::Biweekly => "Every 2 weeks",
            Repeat::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Repeat::None => "none",
            Repeat::Weekly => "weekly",
            Repeat::Biweekly => "biweekly",
            Repeat::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Repeat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Repeat::None),
            "weekly" => Ok(Repeat::Weekly),
            "biweekly" => Ok(Repeat::Biweekly),
            "monthly" => Ok(Repeat::Monthly),
            _ => Err(format!(
                "Unknown repeat '{}'. Expected none, weekly, biweekly or monthly",
                s
            )),
        }
    }
}

/// Alarm offset before the event's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlarmSetting {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "at_time")]
    AtTime,
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "15min")]
    FifteenMin,
    #[serde(rename = "30min")]
    ThirtyMin,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "1day")]
    OneDay,
}

impl AlarmSetting {
    /// Offset subtracted from the event start to get the trigger time.
    /// `None` for the no-alarm setting.
    pub fn offset(&self) -> Option<Duration> {
        match self {
            AlarmSetting::None => None,
            AlarmSetting::AtTime => Some(Duration::zero()),
            AlarmSetting::FiveMin => Some(Duration::minutes(5)),
            AlarmSetting::FifteenMin => Some(Duration::minutes(15)),
            AlarmSetting::ThirtyMin => Some(Duration::minutes(30)),
            AlarmSetting::OneHour => Some(Duration::hours(1)),
            AlarmSetting::OneDay => Some(Duration::days(1)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlarmSetting::None => "No Alarm",
            AlarmSetting::AtTime => "At time of event",
            AlarmSetting::FiveMin => "5 minutes before",
            AlarmSetting::FifteenMin => "15 minutes before",
            AlarmSetting::ThirtyMin => "30 minutes before",
            AlarmSetting::OneHour => "1 hour before",
            AlarmSetting::OneDay => "1 day before",
        }
    }
}

impl fmt::Display for AlarmSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlarmSetting::None => "none",
            AlarmSetting::AtTime => "at_time",
            AlarmSetting::FiveMin => "5min",
            AlarmSetting::FifteenMin => "15min",
            AlarmSetting::ThirtyMin => "30min",
            AlarmSetting::OneHour => "1hour",
            AlarmSetting::OneDay => "1day",
        };
        f.write_str(s)
    }
}

impl FromStr for AlarmSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(AlarmSetting::None),
            "at_time" => Ok(AlarmSetting::AtTime),
            "5min" => Ok(AlarmSetting::FiveMin),
            "15min" => Ok(AlarmSetting::FifteenMin),
            "30min" => Ok(AlarmSetting::ThirtyMin),
            "1hour" => Ok(AlarmSetting::OneHour),
            "1day" => Ok(AlarmSetting::OneDay),
            _ => Err(format!(
                "Unknown alarm '{}'. Expected none, at_time, 5min, 15min, 30min, 1hour or 1day",
                s
            )),
        }
    }
}

/// Parse a wall-clock time in `HH:MM` form.
pub fn parse_time(s: &str) -> HomeTaskResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| HomeTaskError::InvalidTime(s.to_string()))
}

/// Serde codec for `HH:MM` times (the persisted documents never carry
/// seconds). Reading tolerates an `HH:MM:SS` suffix.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
