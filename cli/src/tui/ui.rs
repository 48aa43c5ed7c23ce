use macrobudget_core::{weekday_name, Field, KeyValueStore, MacroTotals, WEEK};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(12), // Week grid
            Constraint::Min(7),     // Totals
            Constraint::Length(1),  // Edit / status line
            Constraint::Length(1),  // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("MACRO BUDGET")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    draw_week(f, app, main_chunks[1]);
    draw_totals(f, app, main_chunks[2]);
    draw_status(f, app, main_chunks[3]);

    let help = match app.input_mode {
        InputMode::Normal => "←↓↑→/hjkl: Move | Enter/e: Edit | x: Clear cell | C: Clear all | n: Dismiss | q: Quit",
        InputMode::Editing => "0-9: Type | Backspace: Delete | Enter/Esc: Done",
        InputMode::ConfirmClear => "Clear the budget and the whole week? y: Yes | any other key: No",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);
}

fn draw_week<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let selected_row = app.selected_row();
    let selected_field = app.selected_field();
    let editing = matches!(app.input_mode, InputMode::Editing);

    let cell_style = |row: usize, field: Field| {
        if row == selected_row && field == selected_field {
            let style = Style::default().add_modifier(Modifier::REVERSED);
            if editing {
                style.fg(Color::Yellow)
            } else {
                style
            }
        } else {
            Style::default()
        }
    };

    let mut rows = Vec::with_capacity(1 + WEEK.len());

    let budget = app.tracker.budget();
    let mut budget_cells = vec![Cell::from(Span::styled(
        "Budget",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    ))];
    for field in Field::ALL {
        let cell = match budget.get(field) {
            Some(text) => Cell::from(text.to_string()),
            // derived, read-only
            None => Cell::from(Span::styled(
                format!("{}", app.summary.daily_budget.calories.round() as i64),
                Style::default().fg(Color::Magenta),
            )),
        };
        budget_cells.push(cell.style(cell_style(0, field)));
    }
    rows.push(Row::new(budget_cells));

    for (i, day) in app.summary.days.iter().enumerate() {
        let row_index = i + 1;
        let day_style = if day.filled {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let mut cells = vec![Cell::from(Span::styled(weekday_name(day.day), day_style))];

        for field in Field::ALL {
            let cell = match day.hints.get(field) {
                Some(hint) if !day.entry.get(field).is_empty() => Cell::from(Line::from(vec![
                    Span::raw(day.entry.get(field).to_string()),
                    Span::styled(format!(" ~{}", hint), Style::default().fg(Color::DarkGray)),
                ])),
                Some(hint) => Cell::from(Span::styled(
                    format!("~{}", hint),
                    Style::default().fg(Color::DarkGray),
                )),
                None => Cell::from(day.entry.get(field).to_string()),
            };
            cells.push(cell.style(cell_style(row_index, field)));
        }
        rows.push(Row::new(cells));
    }

    let header_cells: Vec<String> = std::iter::once("Day".to_string())
        .chain(Field::ALL.iter().map(|f| format!("{} ({})", f.label(), f.unit())))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(11), // Day
            Constraint::Length(16), // Calories
            Constraint::Length(14), // Carbs
            Constraint::Length(14), // Protein
            Constraint::Length(14), // Fat
        ],
    )
    .header(Row::new(header_cells).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Week ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn plain(_: f64) -> Style {
    Style::default()
}

fn remaining_style(value: f64) -> Style {
    if value < 0.0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn totals_row(label: &'static str, values: &MacroTotals, style: fn(f64) -> Style) -> Row<'static> {
    let mut cells = vec![Cell::from(label)];
    for field in Field::ALL {
        let value = *values.get(field);
        cells.push(Cell::from(format!("{}", value.round() as i64)).style(style(value)));
    }
    Row::new(cells)
}

fn draw_totals<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let summary = &app.summary;
    let header_cells: Vec<String> = std::iter::once(String::new())
        .chain(Field::ALL.iter().map(|f| f.label().to_string()))
        .collect();

    let rows = vec![
        totals_row("Weekly budget", &summary.weekly_budget, plain),
        totals_row("Logged", &summary.totals, plain),
        totals_row("Remaining", &summary.remaining, remaining_style),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(Row::new(header_cells).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Totals ").borders(Borders::ALL).border_type(BorderType::Rounded));

    f.render_widget(table, area);
}

fn draw_status<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    if let InputMode::Editing = app.input_mode {
        let day = app.selected_day().map(weekday_name).unwrap_or("Budget");
        let prefix = format!(" {} · {}: ", day, app.selected_field().label());
        let value = app.current_value();
        let line = Line::from(vec![
            Span::styled(prefix.clone(), Style::default().fg(Color::Blue)),
            Span::styled(value.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let x = area.x + (prefix.width() + value.width()) as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        return;
    }

    let (text, style) = match (&app.status, app.notification_line()) {
        (Some(status), _) => (status.clone(), Style::default().fg(Color::Red)),
        (None, Some(notification)) => (notification, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        (None, None) => (String::new(), Style::default()),
    };
    f.render_widget(Paragraph::new(format!(" {}", text)).style(style), area);
}
