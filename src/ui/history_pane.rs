use crate::app::App;
use crate::domain::{group_by_season, Exercise, MedicationLog};
use crate::ui::styles::{
    alert_style, badge_style, border_style, default_style, hint_style, season_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Line for one log: date, time, treatment badges
fn create_log_line(log: &MedicationLog) -> Line<'static> {
    let time = log
        .created_at()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(format!("  {} ", log.date_string.format("%a %d %b %Y")), default_style()),
        Span::styled(format!("{:>5}  ", time), hint_style()),
    ];

    for badge in log.treatment_badges() {
        spans.push(Span::styled(format!("[{}] ", badge), badge_style()));
    }

    if log.exercise != Exercise::None {
        spans.push(Span::styled(format!("· {}", log.exercise.label()), hint_style()));
    }

    Line::from(spans)
}

/// Symptom summary under each log, red when any is at its worst
fn create_symptom_line(log: &MedicationLog) -> Line<'static> {
    let style = if log.has_severe_symptom() {
        alert_style()
    } else {
        hint_style()
    };

    Line::from(Span::styled(
        format!(
            "      sneezing: {}  runny nose: {}  congestion: {}",
            log.symptoms.sneezing.label(),
            log.symptoms.runny_nose.label(),
            log.symptoms.congestion.label()
        ),
        style,
    ))
}

/// Flatten the season groups into list rows
pub fn history_lines(logs: &[MedicationLog]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for group in group_by_season(logs) {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", group.season.name(), group.logs.len()),
            season_style(),
        )));
        for log in group.logs {
            lines.push(create_log_line(log));
            lines.push(create_symptom_line(log));
        }
        lines.push(Line::raw(""));
    }
    lines
}

/// Render the history tab
pub fn render_history_pane(f: &mut Frame, app: &App, area: Rect) {
    let logs = &app.state().logs;

    let items: Vec<ListItem> = if logs.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "  No records yet. Press c to confirm today's dose.",
            hint_style(),
        )))]
    } else {
        history_lines(logs)
            .into_iter()
            .skip(app.history_scroll)
            .map(ListItem::new)
            .collect()
    };

    let title = if app.history_scroll > 0 {
        format!(" History ({}) [scrolled +{}] ", logs.len(), app.history_scroll)
    } else {
        format!(" History ({}) ", logs.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogDraft, SneezingLevel};
    use chrono::{Local, TimeZone};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_history_lines_grouped_by_season() {
        let spring = MedicationLog::from_draft(
            LogDraft::quick(),
            Local.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap(),
        );
        let autumn = MedicationLog::from_draft(
            LogDraft::quick(),
            Local.with_ymd_and_hms(2024, 10, 14, 8, 0, 0).unwrap(),
        );

        let lines = history_lines(&[autumn, spring]);
        let texts: Vec<String> = lines.iter().map(line_text).collect();

        assert!(texts[0].starts_with("Spring (1)"));
        assert!(texts.iter().any(|t| t.starts_with("Autumn (1)")));
        assert!(texts[1].contains("[Antihistamine]"));
    }

    #[test]
    fn test_severe_symptoms_use_alert_style() {
        let mut draft = LogDraft::quick();
        draft.symptoms.sneezing = SneezingLevel::Dizzying;
        let log = MedicationLog::from_draft(draft, Local.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap());

        assert_eq!(create_symptom_line(&log).spans[0].style, alert_style());
    }
}
