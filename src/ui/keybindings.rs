use crate::domain::{Tab, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current mode and tab
pub fn hints_for(mode: UiMode, tab: Tab) -> Vec<&'static str> {
    match mode {
        UiMode::LogForm => vec![
            "↑/↓ field   ",
            "←/→/Space change   ",
            "Enter save   ",
            "Esc cancel",
        ],
        UiMode::Reminder => vec![
            "c confirm   ",
            "Enter details   ",
            "1-9 snooze   ",
            "Esc dismiss",
        ],
        UiMode::ConfirmClear => vec!["y clear all   ", "n/Esc keep"],
        UiMode::Normal => {
            let mut hints = vec!["Tab/1-3 switch   ", "c confirm today   ", "l log details   "];
            match tab {
                Tab::Dashboard => {}
                Tab::History => hints.extend(["↑/↓ scroll   ", "x clear history   "]),
                Tab::Settings => {
                    hints.extend(["↑/↓ select   ", "←/→ adjust   ", "Shift ±60   "])
                }
            }
            hints.push("q quit");
            hints
        }
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, tab: Tab, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(hints_for(mode, tab).into_iter().map(Span::raw));

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_hints_include_adjust() {
        let hints = hints_for(UiMode::Normal, Tab::Settings);
        assert!(hints.iter().any(|h| h.contains("adjust")));
        assert_eq!(hints.last(), Some(&"q quit"));
    }

    #[test]
    fn test_reminder_hints_have_no_quit() {
        let hints = hints_for(UiMode::Reminder, Tab::Dashboard);
        assert!(!hints.iter().any(|h| h.contains("quit")));
    }
}
