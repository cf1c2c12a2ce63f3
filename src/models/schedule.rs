//! Weekly activity scheduling for countdowns

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---- Time of day ----

/// A wall-clock time within a single day, stored as minutes since midnight.
///
/// Unlike `chrono::NaiveTime`, this admits `24:00` as an exclusive
/// end-of-day bound so a range can cover the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(24 * 60);

    /// Builds a time from a minute count, rejecting anything past `24:00`.
    pub fn from_minutes(minutes: u16) -> Option<TimeOfDay> {
        if minutes <= 24 * 60 {
            Some(TimeOfDay(minutes))
        } else {
            None
        }
    }

    pub fn from_hm(hour: u16, minute: u16) -> Option<TimeOfDay> {
        if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
            return None;
        }
        Some(TimeOfDay(hour * 60 + minute))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::Validation(format!("Invalid time of day: '{s}'"));
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 || hour.is_empty() || hour.len() > 2 {
            return Err(invalid());
        }
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---- Hours range ----

/// Half-open `[start, end)` window within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HoursRange {
    #[schema(value_type = String, example = "09:00")]
    pub start: TimeOfDay,
    #[schema(value_type = String, example = "17:30")]
    pub end: TimeOfDay,
}

impl HoursRange {
    pub const FULL_DAY: HoursRange = HoursRange {
        start: TimeOfDay::MIDNIGHT,
        end: TimeOfDay::END_OF_DAY,
    };

    /// True when `at` falls inside the window. The start bound is
    /// inclusive and the end bound exclusive, so an end of `24:00`
    /// covers every instant up to midnight.
    pub fn contains(&self, at: NaiveTime) -> bool {
        let minutes = (at.hour() * 60 + at.minute()) as u16;
        self.start.minutes() <= minutes && minutes < self.end.minutes()
    }
}

impl Default for HoursRange {
    fn default() -> Self {
        HoursRange::FULL_DAY
    }
}

// ---- Weekdays ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(AppError::Validation(format!("Unknown weekday: '{s}'"))),
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

// ---- Per-day settings ----

/// Activity settings for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDay {
    pub enabled: bool,
    pub all_day: bool,
    pub hours_range: HoursRange,
}

impl ActiveDay {
    /// True when the countdown should show on this day at the given time.
    pub fn is_active_at(&self, at: NaiveTime) -> bool {
        self.enabled && (self.all_day || self.hours_range.contains(at))
    }
}

impl Default for ActiveDay {
    fn default() -> Self {
        ActiveDay {
            enabled: true,
            all_day: true,
            hours_range: HoursRange::FULL_DAY,
        }
    }
}

/// Activity settings for every day of the week.
///
/// One field per weekday, so a schedule can never be missing a day or
/// carry a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekSchedule {
    pub monday: ActiveDay,
    pub tuesday: ActiveDay,
    pub wednesday: ActiveDay,
    pub thursday: ActiveDay,
    pub friday: ActiveDay,
    pub saturday: ActiveDay,
    pub sunday: ActiveDay,
}

impl WeekSchedule {
    pub fn day(&self, day: Weekday) -> &ActiveDay {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut ActiveDay {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &ActiveDay)> {
        Weekday::ALL.iter().map(move |&day| (day, self.day(day)))
    }
}

impl Default for WeekSchedule {
    fn default() -> Self {
        WeekSchedule {
            monday: ActiveDay::default(),
            tuesday: ActiveDay::default(),
            wednesday: ActiveDay::default(),
            thursday: ActiveDay::default(),
            friday: ActiveDay::default(),
            saturday: ActiveDay::default(),
            sunday: ActiveDay::default(),
        }
    }
}

// ---- Tests ----

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_parses_and_formats() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.to_string(), "09:30");

        let t: TimeOfDay = "9:05".parse().unwrap();
        assert_eq!(t.to_string(), "09:05");

        let t: TimeOfDay = "24:00".parse().unwrap();
        assert_eq!(t, TimeOfDay::END_OF_DAY);
        assert_eq!(t.to_string(), "24:00");
    }

    #[test]
    fn test_time_of_day_rejects_out_of_range() {
        assert!("24:01".parse::<TimeOfDay>().is_err());
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12:5".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
        assert!(TimeOfDay::from_minutes(1441).is_none());
    }

    #[test]
    fn test_hours_range_is_half_open() {
        let range = HoursRange {
            start: TimeOfDay::from_hm(9, 0).unwrap(),
            end: TimeOfDay::from_hm(17, 0).unwrap(),
        };
        assert!(range.contains(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(range.contains(NaiveTime::from_hms_opt(16, 59, 59).unwrap()));
        assert!(!range.contains(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
        assert!(!range.contains(NaiveTime::from_hms_opt(8, 59, 0).unwrap()));
    }

    #[test]
    fn test_full_day_range_covers_last_minute() {
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert!(HoursRange::FULL_DAY.contains(last));
        assert!(HoursRange::FULL_DAY.contains(NaiveTime::MIN));
    }

    #[test]
    fn test_disabled_day_is_never_active() {
        let day = ActiveDay {
            enabled: false,
            all_day: true,
            hours_range: HoursRange::FULL_DAY,
        };
        assert!(!day.is_active_at(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_all_day_flag_overrides_hours_range() {
        let day = ActiveDay {
            enabled: true,
            all_day: true,
            hours_range: HoursRange {
                start: TimeOfDay::from_hm(9, 0).unwrap(),
                end: TimeOfDay::from_hm(10, 0).unwrap(),
            },
        };
        assert!(day.is_active_at(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
    }

    #[test]
    fn test_weekday_round_trips_through_strings() {
        for day in Weekday::ALL {
            assert_eq!(day.as_str().parse::<Weekday>().unwrap(), day);
        }
        assert!("funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_week_schedule_serializes_all_seven_days() {
        let json = serde_json::to_value(WeekSchedule::default()).unwrap();
        let days = json.as_object().unwrap();
        assert_eq!(days.len(), 7);
        for day in Weekday::ALL {
            assert!(days.contains_key(day.as_str()), "missing {day}");
        }
    }

    #[test]
    fn test_active_day_serde_uses_camel_case() {
        let json = serde_json::to_value(ActiveDay::default()).unwrap();
        assert_eq!(json["allDay"], serde_json::json!(true));
        assert_eq!(json["hoursRange"]["start"], serde_json::json!("00:00"));
        assert_eq!(json["hoursRange"]["end"], serde_json::json!("24:00"));
    }

    #[test]
    fn test_day_mut_targets_the_named_day() {
        let mut schedule = WeekSchedule::default();
        schedule.day_mut(Weekday::Wednesday).enabled = false;
        assert!(!schedule.wednesday.enabled);
        assert!(schedule.tuesday.enabled);
        assert_eq!(schedule.iter().filter(|(_, d)| d.enabled).count(), 6);
    }
}
