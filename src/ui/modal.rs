use crate::app::App;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label for a snooze duration: "15 min", "1 h", "1 h 30 min"
pub fn snooze_label(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}

/// Render the medication reminder prompt
pub fn render_reminder_modal(f: &mut Frame, app: &App, now: DateTime<Local>, area: Rect) {
    if app.ui_mode != UiMode::Reminder {
        return;
    }

    let modal_area = create_modal_area(area, 12);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!(
        "  It's {}. Time for your allergy medication.",
        now.format("%H:%M")
    )));
    lines.push(Line::raw("  Have you taken your antihistamine and spray?"));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("  [c]", modal_title_style()),
        Span::raw(" Taken  "),
        Span::styled("[Enter]", modal_title_style()),
        Span::raw(" Log details"),
    ]));

    let mut snooze = vec![Span::raw("  ")];
    for (idx, minutes) in app.snooze_options.iter().enumerate() {
        snooze.push(Span::styled(format!("[{}]", idx + 1), modal_title_style()));
        snooze.push(Span::raw(format!(" Snooze {}  ", snooze_label(*minutes))));
    }
    lines.push(Line::from(snooze));

    lines.push(Line::from(vec![
        Span::styled("  [Esc]", modal_title_style()),
        Span::raw(" Not now"),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "  Dismissing hides the reminder until tomorrow.",
        hint_style(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" \u{1F48A} Reminder ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the clear-history confirmation
pub fn render_confirm_clear_modal(f: &mut Frame, app: &App, area: Rect) {
    if app.ui_mode != UiMode::ConfirmClear {
        return;
    }

    let modal_area = create_modal_area(area, 8);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!(
            "  Delete all {} records? This cannot be undone.",
            app.state().logs.len()
        )),
        Line::raw("  Settings are kept."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear history  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Clear history ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snooze_label() {
        assert_eq!(snooze_label(15), "15 min");
        assert_eq!(snooze_label(60), "1 h");
        assert_eq!(snooze_label(90), "1 h 30 min");
    }
}
