//! Rendering
//!
//! Pure draw functions over [`App`]; no state mutation here.

use ratatui::{prelude::*, widgets::*};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, ToastKind};
use crate::form::{FormField, FormState, Modal};
use crate::table::{SortField, visible};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header / search
            Constraint::Min(1),    // Table (+ optional log pane)
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    if app.show_logs {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);
        draw_table(frame, app, main[0]);
        draw_logs(frame, app, main[1]);
    } else {
        draw_table(frame, app, chunks[1]);
    }

    draw_footer(frame, app, chunks[2]);

    match &app.modal {
        Modal::Form(form) => draw_form(frame, form),
        Modal::ConfirmDelete(dialog) => draw_confirm(frame, dialog),
        Modal::None => {}
    }

    draw_toasts(frame, app);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let (title, style) = if app.searching {
        (" Search ", Style::default().fg(Color::Yellow))
    } else {
        (" Employee Directory ", Style::default().fg(Color::Cyan))
    };

    let text = if app.searching {
        app.search_input.value().to_string()
    } else if app.query.search.is_empty() {
        "Press / to search".to_string()
    } else {
        format!("Filter: {}", app.query.search)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style);
    let paragraph = Paragraph::new(text).style(style).block(block);
    frame.render_widget(paragraph, area);

    if app.searching {
        let width = area.width.max(3) - 3;
        let scroll = app.search_input.visual_scroll(width as usize);
        frame.set_cursor_position((
            area.x + ((app.search_input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn header_cell(app: &App, field: SortField, index: usize) -> Cell<'static> {
    let mut label = format!("[{}] {}", index, field.label());
    if app.query.sort_field == field {
        label.push(' ');
        label.push_str(app.query.sort_order.arrow());
    }
    Cell::from(label).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let page = visible(&app.employees, &app.query);

    let title = if app.loading {
        " Employees (loading...) ".to_string()
    } else {
        format!(
            " Employees ({}) - page {}/{} ",
            page.total, page.page, page.total_pages
        )
    };

    let header = Row::new(vec![
        Cell::from("ID").style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        header_cell(app, SortField::Name, 1),
        header_cell(app, SortField::Email, 2),
        header_cell(app, SortField::Position, 3),
    ])
    .height(1);

    let rows: Vec<Row> = page
        .rows
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.id.to_string()),
                Cell::from(e.name.clone()),
                Cell::from(e.email.clone()),
                Cell::from(e.position.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !page.rows.is_empty() {
        state.select(Some(app.selected.min(page.rows.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);

    if !app.loading && page.rows.is_empty() {
        let message = if app.query.search.is_empty() {
            "No employees yet. Press 'a' to add one."
        } else {
            "No employees match your search."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        let inner = Rect {
            x: area.x + 1,
            y: area.y + area.height / 2,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(empty, inner);
    }
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(Block::default().title(" Logs ").borders(Borders::ALL))
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    frame.render_widget(logs, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hint = match &app.modal {
        Modal::Form(_) => "Tab next field | Enter save | Esc cancel",
        Modal::ConfirmDelete(_) => "y/Enter confirm | n/Esc cancel",
        Modal::None if app.searching => "Enter apply | Esc clear",
        Modal::None => {
            "a add | e edit | d delete | / search | 1/2/3 sort | h/l page | j/k move | L logs | q quit"
        }
    };
    let footer = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

/// Centered popup rect with fixed dimensions, clamped to the frame
fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn form_line(form: &FormState, field: FormField) -> Vec<Line<'_>> {
    let input = match field {
        FormField::Name => &form.name,
        FormField::Email => &form.email,
        FormField::Position => &form.position,
    };
    let focused = form.focus == field;
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!("{:<9}", field.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(input.value().to_string(), value_style),
    ])];

    if let Some(message) = form.error_for(field) {
        lines.push(Line::from(Span::styled(
            format!("            {message}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

fn draw_form(frame: &mut Frame, form: &FormState) {
    let area = popup_area(frame, 60, 12);
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::raw(""));
    lines.extend(form_line(form, FormField::Name));
    lines.extend(form_line(form, FormField::Email));
    lines.extend(form_line(form, FormField::Position));
    lines.push(Line::raw(""));
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Saving...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_confirm(frame: &mut Frame, dialog: &crate::form::DeleteState) {
    let area = popup_area(frame, 50, 7);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::raw(format!(
            "  Delete {} <{}>?",
            dialog.target.name, dialog.target.email
        ))),
        Line::raw(""),
        if dialog.deleting {
            Line::from(Span::styled(
                "  Deleting...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                "  This cannot be undone.",
                Style::default().fg(Color::Red),
            ))
        },
    ];

    let block = Block::default()
        .title(" Confirm Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_toasts(frame: &mut Frame, app: &App) {
    let area = frame.area();
    for (i, toast) in app.toasts.iter().rev().take(3).enumerate() {
        let width = (toast.text.len() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.width.saturating_sub(width + 1),
            y: area.y + 1 + (i as u16 * 3),
            width,
            height: 3,
        };
        if rect.bottom() > area.bottom() {
            break;
        }
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        };
        frame.render_widget(Clear, rect);
        let paragraph = Paragraph::new(toast.text.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(paragraph, rect);
    }
}
