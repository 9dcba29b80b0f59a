use super::log::{LogDraft, MedicationLog};
use super::settings::Settings;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Root aggregate persisted as one JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Newest first, at most one per date
    pub logs: Vec<MedicationLog>,
    pub settings: Settings,
    pub is_snoozed: bool,
    /// Snooze deadline in epoch milliseconds
    pub snooze_until: Option<i64>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            logs: Vec::new(),
            settings,
            is_snoozed: false,
            snooze_until: None,
        }
    }

    pub fn log_for(&self, date: NaiveDate) -> Option<&MedicationLog> {
        self.logs.iter().find(|log| log.date_string == date)
    }

    pub fn has_log_for(&self, date: NaiveDate) -> bool {
        self.log_for(date).is_some()
    }

    /// Record today's dose with default values. Returns false when today
    /// already had a log, in which case the collection is left alone.
    pub fn quick_confirm(&mut self, now: DateTime<Local>) -> bool {
        self.clear_snooze();
        if self.has_log_for(now.date_naive()) {
            return false;
        }
        self.logs.insert(0, MedicationLog::from_draft(LogDraft::quick(), now));
        true
    }

    /// Write today's log from a filled-in form, replacing any earlier one
    pub fn save_log(&mut self, draft: LogDraft, now: DateTime<Local>) -> &MedicationLog {
        let log = MedicationLog::from_draft(draft, now);
        let today = log.date_string;
        self.logs.retain(|existing| existing.date_string != today);
        self.logs.insert(0, log);
        self.clear_snooze();
        &self.logs[0]
    }

    pub fn snooze(&mut self, minutes: u32, now: DateTime<Local>) {
        self.is_snoozed = true;
        self.snooze_until = Some(now.timestamp_millis() + i64::from(minutes) * 60_000);
    }

    pub fn clear_snooze(&mut self) {
        self.is_snoozed = false;
        self.snooze_until = None;
    }

    /// True once the snooze deadline has been reached
    pub fn snooze_expired(&self, now: DateTime<Local>) -> bool {
        self.snooze_until
            .is_some_and(|deadline| now.timestamp_millis() >= deadline)
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
