use crate::config::Config;
use crate::domain::{
    cycle, AppState, CongestionLevel, Exercise, LogDraft, RunnyNoseLevel, SneezingLevel, Tab, UiMode,
};
use crate::notifications::{self, Haptics};
use crate::persistence::{PersistenceResult, Store};
use crate::scheduler::{ReminderScheduler, HAPTIC_PATTERN};
use crate::ticker::PollTimer;
use crate::ui::history_pane::history_lines;
use chrono::{DateTime, Duration, Local};
use std::time::Instant;
use tracing::{info, warn};

/// Fields of the log form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    AntiHistamine,
    NasalSpray,
    NasalWash,
    Sneezing,
    RunnyNose,
    Congestion,
    Exercise,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::AntiHistamine,
            FormField::NasalSpray,
            FormField::NasalWash,
            FormField::Sneezing,
            FormField::RunnyNose,
            FormField::Congestion,
            FormField::Exercise,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::AntiHistamine => "Antihistamine",
            FormField::NasalSpray => "Nasal spray",
            FormField::NasalWash => "Nasal wash",
            FormField::Sneezing => "Sneezing",
            FormField::RunnyNose => "Runny nose",
            FormField::Congestion => "Congestion",
            FormField::Exercise => "Exercise",
        }
    }
}

/// Log form state: the draft being edited and the focused field
#[derive(Debug, Clone, Default)]
pub struct LogFormState {
    pub draft: LogDraft,
    pub field: usize,
}

impl LogFormState {
    pub fn focused(&self) -> FormField {
        FormField::all()[self.field]
    }

    /// Text shown for a field's current value
    pub fn value_label(&self, field: FormField) -> String {
        let d = &self.draft;
        let check = |on: bool| if on { "[x]" } else { "[ ]" }.to_string();
        match field {
            FormField::AntiHistamine => check(d.treatments.anti_histamine),
            FormField::NasalSpray => check(d.treatments.nasal_spray),
            FormField::NasalWash => check(d.treatments.nasal_wash),
            FormField::Sneezing => d.symptoms.sneezing.label().to_string(),
            FormField::RunnyNose => d.symptoms.runny_nose.label().to_string(),
            FormField::Congestion => d.symptoms.congestion.label().to_string(),
            FormField::Exercise => d.exercise.label().to_string(),
        }
    }

    /// Toggle a checkbox or step a choice forward/backward
    pub fn change(&mut self, forward: bool) {
        let field = self.focused();
        let d = &mut self.draft;
        match field {
            FormField::AntiHistamine => d.treatments.anti_histamine = !d.treatments.anti_histamine,
            FormField::NasalSpray => d.treatments.nasal_spray = !d.treatments.nasal_spray,
            FormField::NasalWash => d.treatments.nasal_wash = !d.treatments.nasal_wash,
            FormField::Sneezing => {
                d.symptoms.sneezing = cycle(SneezingLevel::all(), d.symptoms.sneezing, forward)
            }
            FormField::RunnyNose => {
                d.symptoms.runny_nose = cycle(RunnyNoseLevel::all(), d.symptoms.runny_nose, forward)
            }
            FormField::Congestion => {
                d.symptoms.congestion = cycle(CongestionLevel::all(), d.symptoms.congestion, forward)
            }
            FormField::Exercise => d.exercise = cycle(Exercise::all(), d.exercise, forward),
        }
    }
}

/// Rows of the settings tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    StartDate,
    ReminderTime,
    Vibration,
    Sound,
    Inventory,
    TotalBottles,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::StartDate,
            SettingsField::ReminderTime,
            SettingsField::Vibration,
            SettingsField::Sound,
            SettingsField::Inventory,
            SettingsField::TotalBottles,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::StartDate => "Treatment start date",
            SettingsField::ReminderTime => "Reminder time",
            SettingsField::Vibration => "Vibration alert",
            SettingsField::Sound => "Sound",
            SettingsField::Inventory => "Bottles left",
            SettingsField::TotalBottles => "Bottle capacity",
        }
    }
}

/// Main application state for the terminal UI
pub struct App {
    pub store: Store,
    pub scheduler: ReminderScheduler,
    haptics: Box<dyn Haptics>,
    pub snooze_options: Vec<u32>,
    pub poll_timer: PollTimer,
    pub tab: Tab,
    pub ui_mode: UiMode,
    pub log_form: Option<LogFormState>,
    pub settings_selected: usize,
    pub history_scroll: usize,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: Store, config: &Config, haptics: Box<dyn Haptics>) -> Self {
        let interval = std::time::Duration::from_secs(config.reminder.poll_interval_secs);
        Self {
            store,
            scheduler: ReminderScheduler::new(config.reminder.rule),
            haptics,
            snooze_options: config.reminder.snooze_options.clone(),
            poll_timer: PollTimer::new(interval),
            tab: Tab::Dashboard,
            ui_mode: UiMode::Normal,
            log_form: None,
            settings_selected: 0,
            history_scroll: 0,
            status_message: None,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Apply a mutation through the store. Write failures are logged and shown
    /// in the status line; the in-memory state is left untouched.
    fn commit<F, T>(&mut self, action: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut AppState) -> T,
    {
        let result: PersistenceResult<T> = self.store.mutate(f);
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(action, error = %e, "failed to save state");
                self.status_message = Some(format!("Could not save ({}): {}", action, e));
                None
            }
        }
    }

    /// Leave the reminder overlay, going back to the form if it's open
    fn close_reminder_overlay(&mut self) {
        self.ui_mode = if self.log_form.is_some() {
            UiMode::LogForm
        } else {
            UiMode::Normal
        };
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// One-tap "took my medication today"
    pub fn quick_confirm(&mut self, now: DateTime<Local>) {
        if let Some(inserted) = self.commit("quick confirm", |s| s.quick_confirm(now)) {
            if inserted {
                info!(date = %now.date_naive(), "medication confirmed");
                self.status_message = Some("Logged today's medication".to_string());
            } else {
                self.status_message = Some("Already logged today".to_string());
            }
            self.scheduler.acknowledge();
            if self.ui_mode == UiMode::Reminder {
                self.close_reminder_overlay();
            }
        }
    }

    pub fn open_log_form(&mut self) {
        if self.log_form.is_none() {
            self.log_form = Some(LogFormState::default());
        }
        self.ui_mode = UiMode::LogForm;
    }

    pub fn log_form_move(&mut self, down: bool) {
        if let Some(form) = &mut self.log_form {
            let len = FormField::all().len();
            form.field = if down {
                (form.field + 1) % len
            } else {
                (form.field + len - 1) % len
            };
        }
    }

    pub fn log_form_change(&mut self, forward: bool) {
        if let Some(form) = &mut self.log_form {
            form.change(forward);
        }
    }

    /// Save the form as today's log, replacing any earlier one
    pub fn submit_log_form(&mut self, now: DateTime<Local>) {
        let Some(form) = self.log_form.clone() else {
            return;
        };

        if self
            .commit("save log", |s| {
                s.save_log(form.draft, now);
            })
            .is_some()
        {
            info!(date = %now.date_naive(), exercise = form.draft.exercise.key(), "log saved");
            self.log_form = None;
            self.scheduler.acknowledge();
            self.ui_mode = UiMode::Normal;
            self.status_message = Some("Saved today's record".to_string());
        }
    }

    pub fn cancel_log_form(&mut self) {
        self.log_form = None;
        self.ui_mode = if self.scheduler.is_prompt_visible() {
            UiMode::Reminder
        } else {
            UiMode::Normal
        };
    }

    /// Run the reminder check if the poll interval has elapsed
    pub fn tick(&mut self, instant: Instant, now: DateTime<Local>) {
        if self.poll_timer.due(instant) {
            self.poll_reminder(now);
        }
    }

    pub fn poll_reminder(&mut self, now: DateTime<Local>) {
        let Some(fired) = self.scheduler.poll(self.store.state(), now) else {
            return;
        };

        self.ui_mode = UiMode::Reminder;
        if fired.vibrate {
            self.haptics.pulse(&HAPTIC_PATTERN);
        }
        let message = if fired.from_snooze {
            "Snooze is over: time for your allergy medication"
        } else {
            "Time for your allergy medication"
        };
        notifications::notify_reminder(message);
    }

    /// Snooze using the n-th configured duration
    pub fn snooze(&mut self, option: usize, now: DateTime<Local>) {
        let Some(minutes) = self.snooze_options.get(option).copied() else {
            return;
        };
        if self.commit("snooze", |s| s.snooze(minutes, now)).is_some() {
            let until = now + Duration::minutes(i64::from(minutes));
            info!(minutes, until = %until.format("%H:%M"), "reminder snoozed");
            self.scheduler.acknowledge();
            self.close_reminder_overlay();
            self.status_message = Some(format!("Snoozed until {}", until.format("%H:%M")));
        }
    }

    /// Close the reminder without confirming or snoozing
    pub fn dismiss_reminder(&mut self, now: DateTime<Local>) {
        self.scheduler.dismiss(now.date_naive());
        if self.store.state().snooze_expired(now) {
            self.commit("clear snooze", |s| s.clear_snooze());
        }
        self.close_reminder_overlay();
    }

    pub fn request_clear_history(&mut self) {
        if !self.store.state().logs.is_empty() {
            self.ui_mode = UiMode::ConfirmClear;
        }
    }

    pub fn confirm_clear_history(&mut self) {
        if self.commit("clear history", |s| s.clear_logs()).is_some() {
            info!("history cleared");
            self.history_scroll = 0;
            self.status_message = Some("History cleared".to_string());
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_clear_history(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Scroll the history list, stopping at its last row
    pub fn scroll_history(&mut self, down: bool) {
        if down {
            let last_row = history_lines(&self.store.state().logs).len().saturating_sub(1);
            self.history_scroll = (self.history_scroll + 1).min(last_row);
        } else {
            self.history_scroll = self.history_scroll.saturating_sub(1);
        }
    }

    pub fn selected_setting(&self) -> SettingsField {
        SettingsField::all()[self.settings_selected]
    }

    pub fn settings_move(&mut self, down: bool) {
        let len = SettingsField::all().len();
        self.settings_selected = if down {
            (self.settings_selected + 1) % len
        } else {
            (self.settings_selected + len - 1) % len
        };
    }

    /// Adjust the selected setting by `steps` units (minutes, days, bottles);
    /// toggles flip regardless of the sign
    pub fn adjust_setting(&mut self, steps: i64) {
        let field = self.selected_setting();
        self.commit("update settings", |s| {
            let settings = &mut s.settings;
            match field {
                SettingsField::StartDate => {
                    if let Some(date) = settings.start_date.checked_add_signed(Duration::days(steps)) {
                        settings.start_date = date;
                    }
                }
                SettingsField::ReminderTime => {
                    settings.reminder_time = settings.reminder_time.shifted(steps);
                }
                SettingsField::Vibration => settings.vibration_enabled = !settings.vibration_enabled,
                SettingsField::Sound => settings.sound_enabled = !settings.sound_enabled,
                SettingsField::Inventory => {
                    for _ in 0..steps.unsigned_abs() {
                        if steps > 0 {
                            settings.increment_inventory();
                        } else {
                            settings.decrement_inventory();
                        }
                    }
                }
                SettingsField::TotalBottles => {
                    let total = (i64::from(settings.total_bottles) + steps).max(0) as u32;
                    settings.set_total_bottles(total);
                }
            }
        });
    }
}
