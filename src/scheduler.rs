//! Daily reminder scheduling.
//!
//! The scheduler is polled on a fixed interval and decides whether the
//! reminder prompt should appear. Persistent snooze state lives in
//! [`AppState`]; whether the prompt is showing and whether it was dismissed
//! today are session-only.

use crate::config::DueRule;
use crate::domain::{AppState, ReminderTime};
use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info};

/// Vibration pattern in milliseconds: on, off, on
pub const HAPTIC_PATTERN: [u64; 3] = [200, 100, 200];

/// Logical reminder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPhase {
    Idle,
    ReminderDue,
    Snoozed,
}

/// Emitted when the reminder transitions into ReminderDue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderFired {
    /// The snooze deadline triggered this, not the configured time
    pub from_snooze: bool,
    pub vibrate: bool,
}

#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    rule: DueRule,
    prompt_visible: bool,
    dismissed_on: Option<NaiveDate>,
}

impl ReminderScheduler {
    pub fn new(rule: DueRule) -> Self {
        Self {
            rule,
            prompt_visible: false,
            dismissed_on: None,
        }
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn phase(&self, state: &AppState) -> ReminderPhase {
        if self.prompt_visible {
            ReminderPhase::ReminderDue
        } else if state.is_snoozed {
            ReminderPhase::Snoozed
        } else {
            ReminderPhase::Idle
        }
    }

    /// Whether the configured time-of-day condition holds at `now`
    pub fn time_matches(&self, reminder_time: ReminderTime, now: &DateTime<Local>) -> bool {
        let current = ReminderTime::of(now);
        match self.rule {
            DueRule::Exact => current == reminder_time,
            DueRule::Since => current >= reminder_time,
        }
    }

    /// Check whether the reminder should fire. Returns Some on the transition
    /// into ReminderDue; never fires again while the prompt is already up.
    pub fn poll(&mut self, state: &AppState, now: DateTime<Local>) -> Option<ReminderFired> {
        if self.prompt_visible {
            return None;
        }

        let today = now.date_naive();
        let snooze_expired = state.snooze_expired(now);
        let scheduled = !state.is_snoozed
            && !state.has_log_for(today)
            && self.dismissed_on != Some(today)
            && self.time_matches(state.settings.reminder_time, &now);

        debug!(
            now = %now.format("%H:%M:%S"),
            scheduled,
            snooze_expired,
            "reminder poll"
        );

        if !(scheduled || snooze_expired) {
            return None;
        }

        self.prompt_visible = true;
        info!(
            reminder_time = %state.settings.reminder_time,
            from_snooze = snooze_expired,
            "reminder due"
        );
        Some(ReminderFired {
            from_snooze: snooze_expired,
            vibrate: state.settings.vibration_enabled,
        })
    }

    /// Hide the prompt after a confirm or a snooze
    pub fn acknowledge(&mut self) {
        self.prompt_visible = false;
    }

    /// Close the prompt without acting; it stays quiet until tomorrow
    pub fn dismiss(&mut self, today: NaiveDate) {
        self.prompt_visible = false;
        self.dismissed_on = Some(today);
        info!(%today, "reminder dismissed for the day");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogDraft, Settings};
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 9, 3, h, m, 0).unwrap()
    }

    fn state_with_time(h: u32, m: u32) -> AppState {
        let mut settings = Settings::default_for(at(0, 0).date_naive());
        settings.reminder_time = ReminderTime::new(h, m).unwrap();
        AppState::new(settings)
    }

    #[test]
    fn test_exact_fires_only_on_matching_minute() {
        let state = state_with_time(8, 0);
        let mut scheduler = ReminderScheduler::new(DueRule::Exact);

        assert!(scheduler.poll(&state, at(7, 59)).is_none());
        assert!(scheduler.poll(&state, at(8, 1)).is_none());

        let fired = scheduler.poll(&state, at(8, 0) + Duration::seconds(30)).unwrap();
        assert!(!fired.from_snooze);
        assert!(fired.vibrate);
        assert_eq!(scheduler.phase(&state), ReminderPhase::ReminderDue);
    }

    #[test]
    fn test_since_fires_after_missed_minute() {
        let state = state_with_time(8, 0);
        let mut scheduler = ReminderScheduler::new(DueRule::Since);

        assert!(scheduler.poll(&state, at(7, 59)).is_none());
        assert!(scheduler.poll(&state, at(9, 42)).is_some());
    }

    #[test]
    fn test_no_fire_when_logged_today() {
        let mut state = state_with_time(8, 0);
        state.quick_confirm(at(7, 30));

        for rule in [DueRule::Exact, DueRule::Since] {
            let mut scheduler = ReminderScheduler::new(rule);
            assert!(scheduler.poll(&state, at(8, 0)).is_none());
        }
    }

    #[test]
    fn test_does_not_refire_while_visible() {
        let state = state_with_time(8, 0);
        let mut scheduler = ReminderScheduler::new(DueRule::Exact);

        assert!(scheduler.poll(&state, at(8, 0)).is_some());
        assert!(scheduler.poll(&state, at(8, 0) + Duration::seconds(10)).is_none());
    }

    #[test]
    fn test_snooze_suppresses_then_refires_any_time() {
        let mut state = state_with_time(8, 0);
        let mut scheduler = ReminderScheduler::new(DueRule::Exact);

        assert!(scheduler.poll(&state, at(8, 0)).is_some());
        state.snooze(15, at(8, 0));
        scheduler.acknowledge();
        assert_eq!(scheduler.phase(&state), ReminderPhase::Snoozed);

        assert!(scheduler.poll(&state, at(8, 10)).is_none());

        // 08:15 is not the reminder minute but the deadline has passed
        let fired = scheduler.poll(&state, at(8, 15)).unwrap();
        assert!(fired.from_snooze);
    }

    #[test]
    fn test_snoozed_flag_blocks_schedule_match() {
        let mut state = state_with_time(8, 0);
        state.snooze(60, at(7, 30));
        let mut scheduler = ReminderScheduler::new(DueRule::Since);

        assert!(scheduler.poll(&state, at(8, 0)).is_none());
        assert!(scheduler.poll(&state, at(8, 30)).is_some());
    }

    #[test]
    fn test_confirm_returns_to_idle() {
        let mut state = state_with_time(8, 0);
        let mut scheduler = ReminderScheduler::new(DueRule::Since);

        scheduler.poll(&state, at(8, 0)).unwrap();
        state.save_log(LogDraft::default(), at(8, 1));
        scheduler.acknowledge();

        assert_eq!(scheduler.phase(&state), ReminderPhase::Idle);
        assert!(scheduler.poll(&state, at(8, 2)).is_none());
    }

    #[test]
    fn test_dismiss_quiets_rest_of_day() {
        let state = state_with_time(8, 0);
        let mut scheduler = ReminderScheduler::new(DueRule::Since);

        scheduler.poll(&state, at(8, 0)).unwrap();
        scheduler.dismiss(at(8, 0).date_naive());

        assert!(scheduler.poll(&state, at(8, 1)).is_none());
        assert!(scheduler.poll(&state, at(23, 59)).is_none());

        let tomorrow = at(8, 0) + Duration::days(1);
        assert!(scheduler.poll(&state, tomorrow).is_some());
    }

    #[test]
    fn test_vibrate_follows_settings() {
        let mut state = state_with_time(8, 0);
        state.settings.vibration_enabled = false;
        let mut scheduler = ReminderScheduler::new(DueRule::Exact);

        let fired = scheduler.poll(&state, at(8, 0)).unwrap();
        assert!(!fired.vibrate);
    }
}
