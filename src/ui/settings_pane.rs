use crate::app::{App, SettingsField};
use crate::domain::{Settings, MAX_TOTAL_BOTTLES};
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Current value of a settings row as shown in the tab
pub fn setting_value(settings: &Settings, field: SettingsField) -> String {
    match field {
        SettingsField::StartDate => settings.start_date.format("%Y-%m-%d").to_string(),
        SettingsField::ReminderTime => settings.reminder_time.to_string(),
        SettingsField::Vibration => on_off(settings.vibration_enabled).to_string(),
        SettingsField::Sound => on_off(settings.sound_enabled).to_string(),
        SettingsField::Inventory => settings.inventory_count.to_string(),
        SettingsField::TotalBottles => format!("{} (max {})", settings.total_bottles, MAX_TOTAL_BOTTLES),
    }
}

/// Render the settings tab
pub fn render_settings_pane(f: &mut Frame, app: &App, area: Rect) {
    let settings = &app.state().settings;
    let selected = app.selected_setting();

    let mut items: Vec<ListItem> = SettingsField::all()
        .iter()
        .map(|field| {
            let text = format!("  {:<22} {}", field.label(), setting_value(settings, *field));
            let style = if *field == selected {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    items.push(ListItem::new(Line::raw("")));
    items.push(ListItem::new(Line::from(Span::styled(
        format!(
            "  {} logs stored. Clear them from the History tab.",
            app.state().logs.len()
        ),
        hint_style(),
    ))));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Settings ", title_style())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_setting_values() {
        let settings = Settings::default_for(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(setting_value(&settings, SettingsField::StartDate), "2024-03-01");
        assert_eq!(setting_value(&settings, SettingsField::ReminderTime), "08:00");
        assert_eq!(setting_value(&settings, SettingsField::Vibration), "on");
        assert_eq!(setting_value(&settings, SettingsField::TotalBottles), "10 (max 20)");
    }
}
