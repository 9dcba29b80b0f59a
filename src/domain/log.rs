use super::enums::{CongestionLevel, Exercise, LogStatus, RunnyNoseLevel, Season, SneezingLevel};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Treatments done on the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatments {
    pub anti_histamine: bool,
    pub nasal_spray: bool,
    pub nasal_wash: bool,
}

impl Treatments {
    /// What a one-tap confirmation records: the pill and the spray
    pub fn quick() -> Self {
        Self {
            anti_histamine: true,
            nasal_spray: true,
            nasal_wash: false,
        }
    }
}

/// Symptom ratings for the day. Defaults are the best case of every scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptoms {
    pub sneezing: SneezingLevel,
    pub runny_nose: RunnyNoseLevel,
    pub congestion: CongestionLevel,
}

/// User-supplied part of a log, as filled in by the log form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogDraft {
    pub treatments: Treatments,
    pub symptoms: Symptoms,
    pub exercise: Exercise,
}

impl LogDraft {
    /// Draft used by quick confirm
    pub fn quick() -> Self {
        Self {
            treatments: Treatments::quick(),
            ..Self::default()
        }
    }
}

/// One day's medication record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationLog {
    pub id: Uuid,
    /// Creation instant in epoch milliseconds
    pub timestamp: i64,
    /// Local calendar day the log belongs to. Unique within the collection.
    pub date_string: NaiveDate,
    pub status: LogStatus,
    pub treatments: Treatments,
    pub symptoms: Symptoms,
    pub exercise: Exercise,
    pub season: Season,
}

impl MedicationLog {
    /// Build a log for the local day of `now`
    pub fn from_draft(draft: LogDraft, now: DateTime<Local>) -> Self {
        let date = now.date_naive();
        Self {
            id: Uuid::new_v4(),
            timestamp: now.timestamp_millis(),
            date_string: date,
            status: LogStatus::Taken,
            treatments: draft.treatments,
            symptoms: draft.symptoms,
            exercise: draft.exercise,
            season: Season::from_date(date),
        }
    }

    /// Creation time in local time
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    /// True when any symptom is at the worst end of its scale
    pub fn has_severe_symptom(&self) -> bool {
        self.symptoms.sneezing == SneezingLevel::Dizzying
            || self.symptoms.runny_nose == RunnyNoseLevel::TwoPacks
            || self.symptoms.congestion == CongestionLevel::Blocked
    }

    /// Short labels for the treatments ticked on this log
    pub fn treatment_badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.treatments.anti_histamine {
            badges.push("Antihistamine");
        }
        if self.treatments.nasal_spray {
            badges.push("Spray");
        }
        if self.treatments.nasal_wash {
            badges.push("Wash");
        }
        badges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_from_draft_derives_date_and_season() {
        let now = at(2024, 4, 2);
        let log = MedicationLog::from_draft(LogDraft::default(), now);

        assert_eq!(log.date_string, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(log.season, Season::Spring);
        assert_eq!(log.status, LogStatus::Taken);
        assert_eq!(log.timestamp, now.timestamp_millis());
    }

    #[test]
    fn test_quick_draft_defaults() {
        let draft = LogDraft::quick();
        assert!(draft.treatments.anti_histamine);
        assert!(draft.treatments.nasal_spray);
        assert!(!draft.treatments.nasal_wash);
        assert_eq!(draft.symptoms, Symptoms::default());
        assert_eq!(draft.exercise, Exercise::None);
    }

    #[test]
    fn test_json_shape() {
        let log = MedicationLog::from_draft(LogDraft::quick(), at(2024, 12, 24));
        let value = serde_json::to_value(&log).unwrap();

        assert_eq!(value["dateString"], "2024-12-24");
        assert_eq!(value["status"], "taken");
        assert_eq!(value["season"], "winter");
        assert_eq!(value["treatments"]["antiHistamine"], true);
        assert_eq!(value["symptoms"]["runnyNose"], "dry");
        assert_eq!(value["exercise"], "none");
    }

    #[test]
    fn test_severe_symptom_and_badges() {
        let mut draft = LogDraft::default();
        draft.symptoms.congestion = CongestionLevel::Blocked;
        draft.treatments.nasal_wash = true;
        let log = MedicationLog::from_draft(draft, at(2024, 7, 1));

        assert!(log.has_severe_symptom());
        assert_eq!(log.treatment_badges(), vec!["Wash"]);
    }
}
