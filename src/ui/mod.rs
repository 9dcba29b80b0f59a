pub mod dashboard_pane;
pub mod history_pane;
pub mod keybindings;
pub mod layout;
pub mod log_form;
pub mod modal;
pub mod settings_pane;
pub mod styles;

use crate::app::App;
use crate::domain::{Tab, UiMode};
use chrono::{DateTime, Local};
use dashboard_pane::render_dashboard_pane;
use history_pane::render_history_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use log_form::render_log_form;
use modal::{render_confirm_clear_modal, render_reminder_modal};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use settings_pane::render_settings_pane;
use styles::{border_style, hint_style, selected_style, title_style};

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(idx, tab)| Line::from(format!("{} {}", idx + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(hint_style())
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" AllerEase ", title_style())),
        );

    f.render_widget(tabs, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.status_message {
        let paragraph = Paragraph::new(Span::styled(format!(" {}", message), title_style()));
        f.render_widget(paragraph, area);
    }
}

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &App, now: DateTime<Local>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, app.tab, layout.keybindings_area);
    render_tabs(f, app, layout.tabs_area);

    match app.tab {
        Tab::Dashboard => render_dashboard_pane(f, app, now, layout.content_area),
        Tab::History => render_history_pane(f, app, layout.content_area),
        Tab::Settings => render_settings_pane(f, app, layout.content_area),
    }

    render_status(f, app, layout.status_area);

    // Overlays, the reminder on top
    if app.log_form.is_some() {
        render_log_form(f, app, size);
    }
    match app.ui_mode {
        UiMode::Reminder => render_reminder_modal(f, app, now, size),
        UiMode::ConfirmClear => render_confirm_clear_modal(f, app, size),
        UiMode::Normal | UiMode::LogForm => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::AppState;
    use crate::notifications::NoHaptics;
    use crate::persistence::Store;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, now: DateTime<Local>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| render(f, app, now)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn create_test_app() -> (App, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::with_state(temp_dir.path().join("state.json"), AppState::default());
        (App::new(store, &Config::default(), Box::new(NoHaptics)), temp_dir)
    }

    #[test]
    fn test_render_every_tab() {
        let (mut app, _dir) = create_test_app();
        let now = Local.with_ymd_and_hms(2024, 10, 14, 9, 0, 0).unwrap();
        app.quick_confirm(now);

        let screen = draw(&app, now);
        assert!(screen.contains("Taken today"));

        app.set_tab(Tab::History);
        assert!(draw(&app, now).contains("Autumn (1)"));

        app.set_tab(Tab::Settings);
        assert!(draw(&app, now).contains("Reminder time"));
    }

    #[test]
    fn test_render_reminder_overlay() {
        let (mut app, _dir) = create_test_app();
        let now = Local.with_ymd_and_hms(2024, 10, 14, 9, 0, 0).unwrap();
        app.ui_mode = UiMode::Reminder;

        let screen = draw(&app, now);
        assert!(screen.contains("Snooze 15 min"));
        assert!(screen.contains("Snooze 1 h"));
    }
}
