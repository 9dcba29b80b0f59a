use crate::app::{App, FormField};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the daily log form
pub fn render_log_form(f: &mut Frame, app: &App, area: Rect) {
    if let Some(form) = &app.log_form {
        let modal_area = create_modal_area(area, 16);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));

        for (idx, field) in FormField::all().iter().enumerate() {
            // Blank line between treatments and symptoms, and before exercise
            if *field == FormField::Sneezing || *field == FormField::Exercise {
                lines.push(Line::raw(""));
            }

            let focused = idx == form.field;
            let marker = if focused { "> " } else { "  " };
            let value = form.value_label(*field);
            let value_span = if focused {
                Span::styled(format!("‹ {} ›", value), selected_style())
            } else {
                Span::styled(value, modal_title_style())
            };

            lines.push(Line::from(vec![
                Span::raw(format!("{}{:<15}", marker, field.label())),
                value_span,
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Saving replaces any record already logged today.",
            hint_style(),
        )));
        lines.push(Line::from(vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" Save  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" Cancel"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Today's record ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
