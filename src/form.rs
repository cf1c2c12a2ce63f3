//! Countdown form state machine
//!
//! Drives the admin editing flow: apply changes to a draft config, ask
//! whether it diverged from the loaded state, and collect advisory
//! validation issues before saving.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CountdownConfig, CountdownMode, HoursRange, Weekday};

// ---- Validation ----

/// A reason the current draft cannot be saved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationIssue {
    /// The banner has no title
    MissingName,
    /// The countdown would finish strictly before its scheduled start
    FinishIsSoonerThanStart,
}

impl ValidationIssue {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::MissingName => "missing-name",
            ValidationIssue::FinishIsSoonerThanStart => "finish-is-sooner-than-start",
        }
    }
}

/// Collects every issue with `config`, in a stable order.
///
/// A `scheduled_at` equal to `finish_at` passes; only a finish strictly
/// before the start is refused.
pub fn check_validity(config: &CountdownConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.name.is_empty() {
        issues.push(ValidationIssue::MissingName);
    }

    if let Some(scheduled_at) = config.scheduled_at {
        if config.finish_at < scheduled_at {
            issues.push(ValidationIssue::FinishIsSoonerThanStart);
        }
    }

    issues
}

// ---- Form ----

/// Editable draft of a countdown plus the snapshot it started from.
#[derive(Debug, Clone)]
pub struct CountdownForm {
    config: CountdownConfig,
    snapshot: CountdownConfig,
}

impl CountdownForm {
    /// Starts editing an existing configuration. The snapshot for
    /// touched-tracking is taken here, so a form that has only been
    /// constructed always reports untouched.
    pub fn new(config: CountdownConfig) -> Self {
        CountdownForm {
            snapshot: config.clone(),
            config,
        }
    }

    /// Starts a brand new countdown: no name yet, finishing one week
    /// from `now`, shown every day.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        CountdownForm::new(CountdownConfig::new("", now + Duration::days(7)))
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn into_config(self) -> CountdownConfig {
        self.config
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = name.into();
    }

    /// Moves the finish instant. When the new finish would land strictly
    /// before an existing scheduled start, the start is pulled back to
    /// exactly one day before the new finish so the pair stays coherent.
    pub fn set_finish_at(&mut self, finish_at: DateTime<Utc>) {
        if let Some(scheduled_at) = self.config.scheduled_at {
            if finish_at < scheduled_at {
                self.config.scheduled_at = Some(finish_at - Duration::days(1));
            }
        }
        self.config.finish_at = finish_at;
    }

    pub fn set_scheduled_at(&mut self, scheduled_at: DateTime<Utc>) {
        self.config.scheduled_at = Some(scheduled_at);
    }

    pub fn remove_scheduled_at(&mut self) {
        self.config.scheduled_at = None;
    }

    pub fn set_mode(&mut self, mode: CountdownMode) {
        self.config.mode = mode;
    }

    /// Replaces the enabled set wholesale: the listed days become
    /// enabled and every other day disabled. Ranges and all-day flags
    /// are left alone.
    pub fn set_active_day_enabled_status(&mut self, enabled_days: &[Weekday]) {
        for day in Weekday::ALL {
            self.config.active_days.day_mut(day).enabled = enabled_days.contains(&day);
        }
    }

    pub fn set_active_day_range(&mut self, day: Weekday, range: HoursRange) {
        self.config.active_days.day_mut(day).hours_range = range;
    }

    pub fn set_active_day_all_day_status(&mut self, day: Weekday, all_day: bool) {
        self.config.active_days.day_mut(day).all_day = all_day;
    }

    pub fn check_validity(&self) -> Vec<ValidationIssue> {
        check_validity(&self.config)
    }

    /// True once the draft differs from the snapshot taken at
    /// construction.
    pub fn check_touched_status(&self) -> bool {
        self.config != self.snapshot
    }
}

// ---- Tests ----

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap()
    }

    fn named_form() -> CountdownForm {
        CountdownForm::new(CountdownConfig::new("Launch", at(10, 12)))
    }

    #[test]
    fn test_fresh_form_is_untouched_and_missing_its_name() {
        let form = CountdownForm::fresh(at(1, 0));
        assert!(!form.check_touched_status());
        assert_eq!(form.check_validity(), vec![ValidationIssue::MissingName]);
        assert_eq!(form.config().finish_at, at(8, 0));
    }

    #[test]
    fn test_editing_marks_the_form_touched() {
        let mut form = named_form();
        assert!(!form.check_touched_status());
        form.set_name("Flash sale");
        assert!(form.check_touched_status());
    }

    #[test]
    fn test_undoing_an_edit_clears_touched() {
        let mut form = named_form();
        form.set_scheduled_at(at(5, 0));
        assert!(form.check_touched_status());
        form.remove_scheduled_at();
        assert!(!form.check_touched_status());
    }

    #[test]
    fn test_finish_before_schedule_pulls_schedule_one_day_back() {
        let mut form = named_form();
        form.set_scheduled_at(at(8, 0));
        form.set_finish_at(at(6, 0));
        assert_eq!(form.config().finish_at, at(6, 0));
        assert_eq!(form.config().scheduled_at, Some(at(5, 0)));
        assert!(form.check_validity().is_empty());
    }

    #[test]
    fn test_finish_after_schedule_leaves_schedule_alone() {
        let mut form = named_form();
        form.set_scheduled_at(at(8, 0));
        form.set_finish_at(at(20, 0));
        assert_eq!(form.config().scheduled_at, Some(at(8, 0)));
    }

    #[test]
    fn test_finish_equal_to_schedule_does_not_repair() {
        let mut form = named_form();
        form.set_scheduled_at(at(8, 0));
        form.set_finish_at(at(8, 0));
        assert_eq!(form.config().scheduled_at, Some(at(8, 0)));
        assert!(form.check_validity().is_empty());
    }

    #[test]
    fn test_moving_finish_without_schedule_sets_nothing_else() {
        let mut form = named_form();
        form.set_finish_at(at(2, 0));
        assert_eq!(form.config().scheduled_at, None);
    }

    #[test]
    fn test_validity_reports_issues_in_order() {
        let mut form = named_form();
        form.set_name("");
        form.set_scheduled_at(at(20, 0));
        assert_eq!(
            form.check_validity(),
            vec![
                ValidationIssue::MissingName,
                ValidationIssue::FinishIsSoonerThanStart,
            ]
        );
    }

    #[test]
    fn test_enabled_days_are_replaced_wholesale() {
        let mut form = named_form();
        form.set_active_day_range(
            Weekday::Monday,
            HoursRange {
                start: TimeOfDay::from_hm(9, 0).unwrap(),
                end: TimeOfDay::from_hm(17, 0).unwrap(),
            },
        );
        form.set_active_day_enabled_status(&[Weekday::Monday, Weekday::Friday]);

        let days = &form.config().active_days;
        assert!(days.monday.enabled);
        assert!(days.friday.enabled);
        assert!(!days.tuesday.enabled);
        assert!(!days.sunday.enabled);
        // an earlier range edit survives the enable sweep
        assert_eq!(days.monday.hours_range.start, TimeOfDay::from_hm(9, 0).unwrap());

        form.set_active_day_enabled_status(&[]);
        assert_eq!(form.config().active_days.iter().filter(|(_, d)| d.enabled).count(), 0);
    }

    #[test]
    fn test_per_day_edits_touch_only_their_day() {
        let mut form = named_form();
        form.set_active_day_all_day_status(Weekday::Saturday, false);
        let days = &form.config().active_days;
        assert!(!days.saturday.all_day);
        assert!(days.friday.all_day);
        assert_eq!(days.saturday.hours_range, HoursRange::FULL_DAY);
    }

    #[test]
    fn test_mode_change_round_trips() {
        let mut form = named_form();
        form.set_mode(CountdownMode::Advanced);
        assert_eq!(form.config().mode, CountdownMode::Advanced);
        assert!(form.check_touched_status());
    }

    #[test]
    fn test_issue_codes_serialize_kebab_case() {
        let json = serde_json::to_value([
            ValidationIssue::MissingName,
            ValidationIssue::FinishIsSoonerThanStart,
        ])
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!(["missing-name", "finish-is-sooner-than-start"])
        );
    }
}
