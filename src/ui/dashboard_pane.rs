use crate::app::App;
use crate::domain::{
    current_streak, daily_tip, day_counter, inventory_level, inventory_ratio, InventoryLevel,
};
use crate::scheduler::ReminderPhase;
use crate::ui::layout::create_dashboard_layout;
use crate::ui::styles::{
    alert_style, border_style, counter_style, default_style, hint_style, inventory_style,
    taken_style, tip_style, title_style,
};
use chrono::{DateTime, Local, TimeZone};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()))
}

/// Format a millisecond timestamp as local "HH:MM"
fn format_until(ms: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
}

/// Render the overview tab
pub fn render_dashboard_pane(f: &mut Frame, app: &App, now: DateTime<Local>, area: Rect) {
    let layout = create_dashboard_layout(area);
    let state = app.state();
    let settings = &state.settings;
    let today = now.date_naive();

    // Day counter
    let days = day_counter(settings.start_date, now);
    let streak = current_streak(&state.logs, today);
    let counter = Paragraph::new(vec![
        Line::from(Span::styled(format!("Day {}", days), counter_style())),
        Line::from(Span::styled(
            format!("since {}  |  streak {}", settings.start_date, streak),
            hint_style(),
        )),
    ])
    .block(pane_block(" Treatment "));
    f.render_widget(counter, layout.counter_area);

    // Today's status
    let today_line = if state.has_log_for(today) {
        Line::from(Span::styled("✓ Taken today", taken_style()))
    } else {
        Line::from(vec![
            Span::styled("✗ Not yet taken", alert_style()),
            Span::styled("   press c to confirm", hint_style()),
        ])
    };
    let mut today_lines = vec![today_line];
    if let Some(log) = state.log_for(today) {
        let badges = log.treatment_badges();
        if !badges.is_empty() {
            today_lines.push(Line::from(Span::styled(badges.join(" · "), default_style())));
        }
    }
    let today_pane = Paragraph::new(today_lines).block(pane_block(" Today "));
    f.render_widget(today_pane, layout.today_area);

    render_inventory(f, app, layout.inventory_area);

    // Reminder card
    let mut reminder_lines = vec![Line::from(vec![
        Span::raw("Daily at "),
        Span::styled(settings.reminder_time.to_string(), counter_style()),
    ])];
    match app.scheduler.phase(state) {
        ReminderPhase::Snoozed => {
            let until = state
                .snooze_until
                .and_then(format_until)
                .unwrap_or_else(|| "--:--".to_string());
            reminder_lines.push(Line::from(Span::styled(
                format!("Snoozed until {}", until),
                alert_style(),
            )));
        }
        ReminderPhase::ReminderDue => {
            reminder_lines.push(Line::from(Span::styled("Reminder showing", alert_style())));
        }
        ReminderPhase::Idle => {}
    }
    let vibration = if settings.vibration_enabled { "on" } else { "off" };
    reminder_lines.push(Line::from(Span::styled(
        format!("Vibration {}", vibration),
        hint_style(),
    )));
    let reminder = Paragraph::new(reminder_lines).block(pane_block(" Reminder "));
    f.render_widget(reminder, layout.reminder_area);

    // Tip of the day
    let tip = Paragraph::new(Span::styled(daily_tip(today), tip_style()))
        .block(pane_block(" Tip of the day "))
        .wrap(Wrap { trim: true });
    f.render_widget(tip, layout.tip_area);
}

fn render_inventory(f: &mut Frame, app: &App, area: Rect) {
    let settings = &app.state().settings;
    let level = inventory_level(settings);

    let block = pane_block(" Spray stock ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut count_line = vec![
        Span::styled(settings.inventory_count.to_string(), inventory_style(level)),
        Span::raw(format!(" / {} bottles", settings.total_bottles)),
    ];
    match level {
        InventoryLevel::Critical => count_line.push(Span::styled("  last bottle!", alert_style())),
        InventoryLevel::Low => count_line.push(Span::styled("  running low", inventory_style(level))),
        InventoryLevel::Ok => {}
    }
    f.render_widget(Paragraph::new(Line::from(count_line)), chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default())
        .gauge_style(inventory_style(level))
        .percent((inventory_ratio(settings) * 100.0).round() as u16)
        .label("");
    f.render_widget(gauge, chunks[1]);
}
