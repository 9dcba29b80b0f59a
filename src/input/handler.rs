use crate::app::App;
use crate::domain::{Tab, UiMode};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Large step for settings adjustments (Shift+←/→)
const BIG_STEP: i64 = 60;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent, now: DateTime<Local>) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::LogForm => {
            handle_log_form_mode(app, key, now);
            false
        }
        UiMode::Reminder => {
            handle_reminder_mode(app, key, now);
            false
        }
        UiMode::ConfirmClear => {
            handle_confirm_clear_mode(app, key);
            false
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut App, key: KeyEvent, now: DateTime<Local>) -> bool {
    // Any key press clears the previous status line
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        // Tab switching
        KeyCode::Tab => app.next_tab(),
        KeyCode::Char('1') => app.set_tab(Tab::Dashboard),
        KeyCode::Char('2') => app.set_tab(Tab::History),
        KeyCode::Char('3') => app.set_tab(Tab::Settings),

        // Logging is available from every tab
        KeyCode::Char('c') | KeyCode::Char('C') => app.quick_confirm(now),
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('a') => app.open_log_form(),

        _ => match app.tab {
            Tab::Dashboard => {}
            Tab::History => handle_history_keys(app, key),
            Tab::Settings => handle_settings_keys(app, key),
        },
    }
    false
}

fn handle_history_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.scroll_history(false),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_history(true),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_clear_history(),
        _ => {}
    }
}

fn handle_settings_keys(app: &mut App, key: KeyEvent) {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        BIG_STEP
    } else {
        1
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.settings_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.settings_move(true),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_setting(step),
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_setting(-step),
        KeyCode::Char(' ') | KeyCode::Enter => app.adjust_setting(1),
        _ => {}
    }
}

/// Handle keys while the log form is open
fn handle_log_form_mode(app: &mut App, key: KeyEvent, now: DateTime<Local>) {
    match key.code {
        KeyCode::Esc => app.cancel_log_form(),
        KeyCode::Enter => app.submit_log_form(now),
        KeyCode::Up | KeyCode::BackTab => app.log_form_move(false),
        KeyCode::Down | KeyCode::Tab => app.log_form_move(true),
        KeyCode::Right | KeyCode::Char(' ') => app.log_form_change(true),
        KeyCode::Left => app.log_form_change(false),
        _ => {}
    }
}

/// Handle keys while the reminder prompt is showing
fn handle_reminder_mode(app: &mut App, key: KeyEvent, now: DateTime<Local>) {
    match key.code {
        KeyCode::Enter => app.open_log_form(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.quick_confirm(now),
        KeyCode::Esc | KeyCode::Char('x') => app.dismiss_reminder(now),
        KeyCode::Char(d) if d.is_ascii_digit() && d != '0' => {
            let option = d as usize - '1' as usize;
            app.snooze(option, now);
        }
        _ => {}
    }
}

fn handle_confirm_clear_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_history(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear_history(),
        _ => {}
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

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 10, 14, 8, 0, 0).unwrap()
    }

    fn create_test_app() -> (App, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = Store::with_state(temp_dir.path().join("state.json"), AppState::default());
        (App::new(store, &Config::default(), Box::new(NoHaptics)), temp_dir)
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _dir) = create_test_app();
        assert!(handle_key(&mut app, press(KeyCode::Char('q')), now()));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            now()
        ));
    }

    #[test]
    fn test_tab_switching() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, press(KeyCode::Char('3')), now());
        assert_eq!(app.tab, Tab::Settings);
        handle_key(&mut app, press(KeyCode::Tab), now());
        assert_eq!(app.tab, Tab::Dashboard);
    }

    #[test]
    fn test_confirm_key_logs_today() {
        let (mut app, _dir) = create_test_app();
        assert!(!handle_key(&mut app, press(KeyCode::Char('c')), now()));
        assert_eq!(app.state().logs.len(), 1);
    }

    #[test]
    fn test_reminder_snooze_digit() {
        let (mut app, _dir) = create_test_app();
        app.ui_mode = UiMode::Reminder;
        handle_key(&mut app, press(KeyCode::Char('2')), now());

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(
            app.state().snooze_until,
            Some(now().timestamp_millis() + 60 * 60_000)
        );
    }

    #[test]
    fn test_form_keys() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, press(KeyCode::Char('l')), now());
        assert_eq!(app.ui_mode, UiMode::LogForm);

        handle_key(&mut app, press(KeyCode::Char(' ')), now());
        handle_key(&mut app, press(KeyCode::Enter), now());

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.state().logs[0].treatments.anti_histamine);
    }

    #[test]
    fn test_history_clear_requires_confirmation() {
        let (mut app, _dir) = create_test_app();
        handle_key(&mut app, press(KeyCode::Char('c')), now());
        handle_key(&mut app, press(KeyCode::Char('2')), now());
        handle_key(&mut app, press(KeyCode::Char('x')), now());
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);

        handle_key(&mut app, press(KeyCode::Char('n')), now());
        assert_eq!(app.state().logs.len(), 1);

        handle_key(&mut app, press(KeyCode::Char('x')), now());
        handle_key(&mut app, press(KeyCode::Char('y')), now());
        assert!(app.state().logs.is_empty());
    }
}
