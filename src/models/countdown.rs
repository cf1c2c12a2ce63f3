//! Countdown configuration models

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::models::schedule::{WeekSchedule, Weekday};

// ---- Display mode ----

/// How the banner decides when to show.
///
/// `Simple` countdowns show whenever they are live; `Advanced` ones
/// consult the weekly schedule as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CountdownMode {
    Simple,
    Advanced,
}

impl Default for CountdownMode {
    fn default() -> Self {
        CountdownMode::Simple
    }
}

impl fmt::Display for CountdownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownMode::Simple => f.write_str("simple"),
            CountdownMode::Advanced => f.write_str("advanced"),
        }
    }
}

impl FromStr for CountdownMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(CountdownMode::Simple),
            "advanced" => Ok(CountdownMode::Advanced),
            _ => Err(AppError::Validation(format!("Unknown countdown mode: '{s}'"))),
        }
    }
}

// ---- Configuration ----

/// Everything a merchant can edit about a countdown.
///
/// Identity lives on [`StoredCountdown`]; this struct is the editable
/// payload shared by create and update flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountdownConfig {
    /// Banner title shown to shoppers. Absent in a payload means empty,
    /// which the validity check reports rather than the parser.
    #[serde(default)]
    pub name: String,
    /// Instant the countdown reaches zero
    pub finish_at: DateTime<Utc>,
    /// Optional future instant before which the banner stays hidden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mode: CountdownMode,
    /// Weekly schedule, serialized under the `days` key every consumer
    /// reads, themes included.
    #[serde(default, rename = "days")]
    pub active_days: WeekSchedule,
}

impl CountdownConfig {
    /// Starting point for a brand new countdown, counting down to
    /// `finish_at`.
    pub fn new(name: impl Into<String>, finish_at: DateTime<Utc>) -> Self {
        CountdownConfig {
            name: name.into(),
            finish_at,
            scheduled_at: None,
            mode: CountdownMode::default(),
            active_days: WeekSchedule::default(),
        }
    }

    /// Whether the banner should show at `now`.
    ///
    /// The scheduled/finish bounds are compared as instants; the weekly
    /// schedule is read in `now`'s own timezone, which is how theme code
    /// evaluates it in the shopper's local day.
    pub fn is_visible_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let instant = now.with_timezone(&Utc);
        if let Some(scheduled_at) = self.scheduled_at {
            if instant < scheduled_at {
                return false;
            }
        }
        if instant > self.finish_at {
            return false;
        }

        match self.mode {
            CountdownMode::Simple => true,
            CountdownMode::Advanced => {
                let day = Weekday::from(now.weekday());
                self.active_days.day(day).is_active_at(now.time())
            }
        }
    }
}

/// A countdown that has been persisted and assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredCountdown {
    pub id: String,
    #[serde(flatten)]
    pub config: CountdownConfig,
}

// ---- Tests ----

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{self, ValidationIssue};
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_config() -> CountdownConfig {
        CountdownConfig::new(
            "Summer sale",
            Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_config_serializes_camel_case_without_schedule() {
        let json = serde_json::to_value(sample_config()).unwrap();
        assert_eq!(json["name"], "Summer sale");
        assert_eq!(json["finishAt"], "2024-07-01T12:00:00Z");
        assert_eq!(json["mode"], "simple");
        assert!(json.get("scheduledAt").is_none());
        // the schedule travels under "days", not the field name
        assert!(json["days"]["monday"]["enabled"].as_bool().unwrap());
        assert!(json.get("activeDays").is_none());
    }

    #[test]
    fn test_config_round_trips_scheduled_at() {
        let mut config = sample_config();
        config.scheduled_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["scheduledAt"], "2024-06-01T00:00:00Z");

        let back: CountdownConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_nameless_payload_parses_and_fails_the_validity_check() {
        let config: CountdownConfig =
            serde_json::from_value(json!({ "finishAt": "2024-07-01T12:00:00Z" })).unwrap();

        assert_eq!(config.name, "");
        assert_eq!(form::check_validity(&config), vec![ValidationIssue::MissingName]);
    }

    #[test]
    fn test_stored_countdown_flattens_config() {
        let stored = StoredCountdown {
            id: "c1".into(),
            config: sample_config(),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["name"], "Summer sale");
        assert!(json["days"].is_object());
        assert!(json.get("activeDays").is_none());

        let back: StoredCountdown = serde_json::from_value(json).unwrap();
        assert_eq!(back, stored);
    }

    #[test]
    fn test_mode_parses_known_values_only() {
        assert_eq!("simple".parse::<CountdownMode>().unwrap(), CountdownMode::Simple);
        assert_eq!("advanced".parse::<CountdownMode>().unwrap(), CountdownMode::Advanced);
        assert!("Simple".parse::<CountdownMode>().is_err());
    }

    #[test]
    fn test_visibility_respects_the_window() {
        let mut config = sample_config();
        config.scheduled_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());

        let before = Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap();
        let inside = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 1).unwrap();

        assert!(!config.is_visible_at(&before));
        assert!(config.is_visible_at(&inside));
        assert!(!config.is_visible_at(&after));
        // the finish instant itself still shows
        assert!(config.is_visible_at(&Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_advanced_mode_consults_the_weekly_schedule() {
        let mut config = sample_config();
        config.mode = CountdownMode::Advanced;
        config.active_days.saturday.enabled = false;

        // 2024-06-15 is a Saturday, 2024-06-14 a Friday
        let saturday = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let friday = Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap();
        assert!(!config.is_visible_at(&saturday));
        assert!(config.is_visible_at(&friday));

        config.mode = CountdownMode::Simple;
        assert!(config.is_visible_at(&saturday));
    }
}
