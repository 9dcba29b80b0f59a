use crate::domain::{
    current_streak, day_counter, AppState, CongestionLevel, RunnyNoseLevel, SneezingLevel,
};
use crate::persistence::{atomic_write, report_file};
use crate::report::stats::{
    calculate_adherence, calculate_exercise, calculate_seasons, calculate_symptoms,
    calculate_treatments, logs_in_range,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::info;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn distribution_line(labels: &[&str], counts: &[usize; 3]) -> String {
    labels
        .iter()
        .zip(counts.iter())
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Render the adherence report for `from..=to` as Markdown
pub fn render_report(state: &AppState, from: NaiveDate, to: NaiveDate, now: DateTime<Local>) -> String {
    let logs = logs_in_range(&state.logs, from, to);
    let adherence = calculate_adherence(&logs, from, to);
    let treatments = calculate_treatments(&logs);
    let symptoms = calculate_symptoms(&logs);
    let exercise = calculate_exercise(&logs);
    let seasons = calculate_seasons(&logs);

    let mut report = String::new();

    // Header
    report.push_str(&format!("# Allergy Report - {} to {}\n\n", from, to));

    // Summary Section
    report.push_str("## Summary\n\n");
    report.push_str(&format!(
        "- **Days Logged:** {} of {} ({})\n",
        adherence.days_logged,
        adherence.days_in_range,
        format_percent(adherence.adherence_percent)
    ));
    report.push_str(&format!("- **Longest Streak:** {} days\n", adherence.longest_streak));
    report.push_str(&format!(
        "- **Current Streak:** {} days\n",
        current_streak(&state.logs, now.date_naive())
    ));
    report.push_str(&format!(
        "- **Days Since Treatment Start:** {} (started {})\n",
        day_counter(state.settings.start_date, now),
        state.settings.start_date
    ));
    report.push_str(&format!(
        "- **Bottles Left:** {} of {}\n\n",
        state.settings.inventory_count, state.settings.total_bottles
    ));

    if logs.is_empty() {
        report.push_str("_No logs recorded in this range._\n");
        return report;
    }

    // Treatments Section
    report.push_str("## Treatments\n\n");
    report.push_str(&format!("- Antihistamine: {} days\n", treatments.anti_histamine));
    report.push_str(&format!("- Nasal spray: {} days\n", treatments.nasal_spray));
    report.push_str(&format!("- Nasal wash: {} days\n\n", treatments.nasal_wash));

    // Symptoms Section
    report.push_str("## Symptoms\n\n");
    let sneezing: Vec<&str> = SneezingLevel::all().iter().map(|l| l.label()).collect();
    let runny: Vec<&str> = RunnyNoseLevel::all().iter().map(|l| l.label()).collect();
    let congestion: Vec<&str> = CongestionLevel::all().iter().map(|l| l.label()).collect();
    report.push_str(&format!("- **Sneezing:** {}\n", distribution_line(&sneezing, &symptoms.sneezing)));
    report.push_str(&format!("- **Runny nose:** {}\n", distribution_line(&runny, &symptoms.runny_nose)));
    report.push_str(&format!("- **Congestion:** {}\n", distribution_line(&congestion, &symptoms.congestion)));
    report.push_str(&format!("- **Severe days:** {}\n\n", symptoms.severe_days));

    // Exercise Section
    report.push_str("## Exercise\n\n");
    for (kind, count) in &exercise {
        report.push_str(&format!("- {}: {}\n", kind.label(), count));
    }
    report.push('\n');

    // Seasons Section
    report.push_str("## Seasons\n\n");
    report.push_str("| Season | Days Logged | Severe Days |\n");
    report.push_str("|--------|-------------|-------------|\n");
    for (season, count, severe) in &seasons {
        report.push_str(&format!("| {} | {} | {} |\n", season.name(), count, severe));
    }

    report
}

/// Generate the report and write it to `output`, or to the data directory
pub fn generate_report(
    state: &AppState,
    data_dir: &Path,
    from: NaiveDate,
    to: NaiveDate,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    if from > to {
        anyhow::bail!("Report start date {} is after end date {}", from, to);
    }

    let report = render_report(state, from, to, Local::now());
    let path = output.unwrap_or_else(|| report_file(data_dir, from, to));

    atomic_write(&path, &report)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    info!(path = %path.display(), %from, %to, "report written");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogDraft, Settings};
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 10, 20, 0, 0).unwrap()
    }

    fn sample_state() -> AppState {
        let mut state = AppState::new(Settings::default_for(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        for d in [8, 9, 10] {
            let at = Local.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap();
            state.quick_confirm(at);
        }
        state
    }

    #[test]
    fn test_render_report_sections() {
        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let report = render_report(&sample_state(), from, to, now());

        assert!(report.starts_with("# Allergy Report - 2024-05-01 to 2024-05-10"));
        assert!(report.contains("**Days Logged:** 3 of 10 (30.0%)"));
        assert!(report.contains("**Current Streak:** 3 days"));
        assert!(report.contains("Antihistamine: 3 days"));
        assert!(report.contains("| Spring | 3 | 0 |"));
    }

    #[test]
    fn test_render_report_without_logs() {
        let state = AppState::new(Settings::default_for(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let report = render_report(&state, day, day, now());
        assert!(report.contains("No logs recorded"));
        assert!(!report.contains("## Treatments"));
    }

    #[test]
    fn test_generate_report_writes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let mut state = sample_state();
        state.logs.push(
            crate::domain::MedicationLog::from_draft(LogDraft::default(), now() - chrono::Duration::days(60)),
        );
        let path = generate_report(&state, temp_dir.path(), from, to, None).unwrap();

        assert!(path.ends_with("report-2024-05-01_to_2024-05-10.md"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("3 of 10"));
    }

    #[test]
    fn test_generate_report_rejects_inverted_range() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(generate_report(&sample_state(), temp_dir.path(), from, to, None).is_err());
    }
}
