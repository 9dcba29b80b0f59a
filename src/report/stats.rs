use crate::domain::{
    CongestionLevel, Exercise, MedicationLog, RunnyNoseLevel, Season, SneezingLevel,
};
use chrono::NaiveDate;

/// Adherence over a date range
#[derive(Debug, PartialEq)]
pub struct AdherenceStats {
    pub days_in_range: i64,
    pub days_logged: usize,
    pub adherence_percent: f64,
    pub longest_streak: u32,
}

/// How often each treatment was recorded
#[derive(Debug, Default, PartialEq)]
pub struct TreatmentStats {
    pub anti_histamine: usize,
    pub nasal_spray: usize,
    pub nasal_wash: usize,
}

/// Number of days at each point of each symptom scale, mildest first
#[derive(Debug, Default, PartialEq)]
pub struct SymptomStats {
    pub sneezing: [usize; 3],
    pub runny_nose: [usize; 3],
    pub congestion: [usize; 3],
    /// Days with at least one symptom at the worst level
    pub severe_days: usize,
}

/// Logs whose date falls within `from..=to`
pub fn logs_in_range(logs: &[MedicationLog], from: NaiveDate, to: NaiveDate) -> Vec<&MedicationLog> {
    logs.iter()
        .filter(|l| l.date_string >= from && l.date_string <= to)
        .collect()
}

pub fn calculate_adherence(logs: &[&MedicationLog], from: NaiveDate, to: NaiveDate) -> AdherenceStats {
    let days_in_range = if to >= from { (to - from).num_days() + 1 } else { 0 };
    let days_logged = logs.len();
    let adherence_percent = if days_in_range > 0 {
        days_logged as f64 / days_in_range as f64 * 100.0
    } else {
        0.0
    };

    let mut dates: Vec<NaiveDate> = logs.iter().map(|l| l.date_string).collect();
    dates.sort();
    dates.dedup();

    let mut longest_streak = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for date in dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        prev = Some(date);
    }

    AdherenceStats {
        days_in_range,
        days_logged,
        adherence_percent,
        longest_streak,
    }
}

pub fn calculate_treatments(logs: &[&MedicationLog]) -> TreatmentStats {
    logs.iter().fold(TreatmentStats::default(), |mut acc, log| {
        acc.anti_histamine += log.treatments.anti_histamine as usize;
        acc.nasal_spray += log.treatments.nasal_spray as usize;
        acc.nasal_wash += log.treatments.nasal_wash as usize;
        acc
    })
}

fn position<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(0)
}

pub fn calculate_symptoms(logs: &[&MedicationLog]) -> SymptomStats {
    let mut stats = SymptomStats::default();
    for log in logs {
        stats.sneezing[position(SneezingLevel::all(), &log.symptoms.sneezing)] += 1;
        stats.runny_nose[position(RunnyNoseLevel::all(), &log.symptoms.runny_nose)] += 1;
        stats.congestion[position(CongestionLevel::all(), &log.symptoms.congestion)] += 1;
        if log.has_severe_symptom() {
            stats.severe_days += 1;
        }
    }
    stats
}

/// Exercise counts in display order, skipping unused types
pub fn calculate_exercise(logs: &[&MedicationLog]) -> Vec<(Exercise, usize)> {
    Exercise::all()
        .iter()
        .map(|e| (*e, logs.iter().filter(|l| l.exercise == *e).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Per-season log count and severe-day count, skipping empty seasons
pub fn calculate_seasons(logs: &[&MedicationLog]) -> Vec<(Season, usize, usize)> {
    Season::all()
        .iter()
        .filter_map(|season| {
            let in_season: Vec<&&MedicationLog> = logs.iter().filter(|l| l.season == *season).collect();
            if in_season.is_empty() {
                return None;
            }
            let severe = in_season.iter().filter(|l| l.has_severe_symptom()).count();
            Some((*season, in_season.len(), severe))
        })
        .collect()
}
