use crate::application::{App, AppMode, DialogState, SelectAllState};
use crate::domain::{
    DraftField, Role, Shift, SortDirection, SortField, UserDraft, format_date, format_salary,
    format_status, format_total_salary, page_window,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_search_bar(f, app, chunks[1]);
    render_table(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);
    render_status_bar(f, app, chunks[4]);

    match app.mode {
        AppMode::Form => render_form_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.table.selection().len();
    let text = if selected > 0 {
        format!("usertable | {} selected (D: delete selected)", selected)
    } else {
        "usertable | Users".to_string()
    };
    let style = if selected > 0 {
        Style::default().fg(Color::Black).bg(Color::LightBlue)
    } else {
        Style::default().fg(Color::Cyan)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = app.table.search_text();
    let content = if text.is_empty() && app.mode != AppMode::Search {
        Span::styled("Search name or email", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text.to_string())
    };
    let title = if app.table.is_search_pending() { "Search (filtering...)" } else { "Search" };
    let border_style = if app.mode == AppMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let widget = Paragraph::new(Line::from(content))
        .block(Block::default().borders(Borders::ALL).title(title).border_style(border_style));
    f.render_widget(widget, area);
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn header_label(app: &App, index: usize, field: SortField) -> String {
    let marker = if app.table.sort_key() == field {
        match app.table.sort_direction() {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    } else {
        ""
    };
    format!("{} {}{}", index + 1, field.label(), marker)
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let select_all = match app.table.select_all_state() {
        SelectAllState::Checked => "[x]",
        SelectAllState::Indeterminate => "[-]",
        SelectAllState::Unchecked => "[ ]",
    };
    let mut headers = vec![Cell::from(select_all)];
    for (index, field) in SortField::COLUMNS.iter().enumerate() {
        let style = if app.table.sort_key() == *field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        headers.push(Cell::from(header_label(app, index, *field)).style(style));
    }
    let header_row = Row::new(headers).height(1);

    let mut rows = Vec::new();
    for (index, record) in app.table.visible_rows().iter().enumerate() {
        let selected = app.table.is_selected(record.id);
        let style = if index == app.cursor_row && app.mode == AppMode::Normal {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let cells = vec![
            Cell::from(checkbox(selected)),
            Cell::from(record.name.clone()),
            Cell::from(record.email.clone()),
            Cell::from(record.role.label()),
            Cell::from(format_date(&record.dob)),
            Cell::from(format_salary(record.salary)),
            Cell::from(record.shift.as_str()),
            Cell::from(format_status(record.active)),
        ];
        rows.push(Row::new(cells).style(style).height(1));
    }
    for _ in 0..app.table.empty_rows() {
        rows.push(Row::new(vec![Cell::from("")]).height(1));
    }
    if app.table.active_count() == 0 {
        rows.push(Row::new(vec![Cell::from(""), Cell::from("No users")]).height(1));
    }

    let widths = [
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Min(22),
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Length(20),
        Constraint::Length(16),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header_row)
        .block(Block::default().borders(Borders::ALL).title("Users"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let count = app.table.active_count();
    let size = app.table.page_size().rows();
    let window = page_window(count, app.table.page(), size);
    let range = if window.is_empty() {
        format!("0-0 of {}", count)
    } else {
        format!("{}-{} of {}", window.start + 1, window.end, count)
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(32)])
        .split(area);

    let paging = Paragraph::new(format!(
        "Rows per page: {} | {} | Page {}/{}",
        size,
        range,
        app.table.page() + 1,
        app.table.page_count().max(1)
    ));
    let total = Paragraph::new(format_total_salary(app.table.total_salary()))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Right);
    f.render_widget(paging, chunks[0]);
    f.render_widget(total, chunks[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(message) = app.table.toast() {
                message.to_string()
            } else if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "n: create | e: edit | d: delete | Space: select | /: search | 1-7: sort | ?: help | q: quit".to_string()
            }
        }
        AppMode::Search => "Type to filter (Enter/Esc to return to the table)".to_string(),
        AppMode::Form => "Tab/Shift+Tab: field | ←/→: change choice | Enter: submit | Esc: cancel".to_string(),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let style = match app.mode {
        AppMode::Normal if app.table.toast().is_some() => Style::default().fg(Color::Green),
        AppMode::Normal => Style::default(),
        AppMode::Search => Style::default().fg(Color::Yellow),
        AppMode::Form => Style::default().fg(Color::Green),
        AppMode::Help => Style::default().fg(Color::Cyan),
        AppMode::ExportCsv => Style::default().fg(Color::Magenta),
    };
    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(input, area);
}

/// Centered rectangle `width_percent` wide and `height` rows tall, both
/// capped to `area`.
fn popup_area(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn field_value(draft: &UserDraft, field: DraftField) -> String {
    match field {
        DraftField::Name => draft.name.clone(),
        DraftField::Email => draft.email.clone(),
        DraftField::Role => Role::from_key(&draft.role)
            .map(|role| role.label().to_string())
            .unwrap_or_else(|| draft.role.clone()),
        DraftField::Salary => format!("Rs. {}", draft.salary),
        DraftField::DateOfBirth => draft.dob.clone(),
        DraftField::Shift => Shift::from_key(&draft.shift)
            .map(|shift| shift.label().to_string())
            .unwrap_or_else(|| draft.shift.clone()),
        DraftField::Active => checkbox(draft.active).to_string(),
        DraftField::Bio => draft.bio.clone(),
    }
}

fn render_form_popup(f: &mut Frame, app: &App) {
    let dialog = app.table.dialog();
    let (Some(title), Some(draft)) = (dialog.title(), dialog.draft()) else {
        return;
    };
    let errors = dialog.errors();

    let mut lines = Vec::new();
    let verb = if matches!(dialog, DialogState::OpenEdit { .. }) { "edit" } else { "create" };
    lines.push(Line::from(Span::styled(
        format!("To {} this user, please enter all information here.", verb),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    for field in DraftField::ALL {
        let focused = field == app.focused_field;
        let label_style = if focused {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let mut value = field_value(draft, field);
        if focused && field.is_text() {
            value.push('_');
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", field.label()), label_style),
            Span::raw(" "),
            Span::raw(value),
        ]));
        if let Some(message) = errors.and_then(|errors| errors.get(field)) {
            lines.push(Line::from(Span::styled(
                format!("{:<16} {}", "", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let height = lines.len() as u16 + 2;
    let area = popup_area(f.area(), 60, height);
    f.render_widget(Clear, area);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(widget, area);
}

/// Key bindings grouped by what they act on, as shown in the help popup.
const KEY_BINDINGS: &[(&str, &[(&str, &str)])] = &[
    ("Table", &[
        ("↑↓ j/k", "Move the cursor within the page"),
        ("←→ h/l", "Previous / next page"),
        ("p", "Cycle rows per page (5, 10, 25)"),
        ("1-7", "Sort by column; press again to reverse"),
    ]),
    ("Selection", &[
        ("Space", "Select or unselect the row under the cursor"),
        ("a", "Select every matching row on all pages, or clear"),
        ("D", "Delete all selected rows"),
    ]),
    ("Users", &[
        ("n", "Create a user"),
        ("e Enter", "Edit the user under the cursor"),
        ("d Del", "Delete the user under the cursor"),
    ]),
    ("Search", &[
        ("/", "Search name or email, case-insensitive"),
        ("Enter Esc", "Back to the table; filtering runs once typing pauses"),
    ]),
    ("Form", &[
        ("Tab S-Tab", "Next / previous field"),
        ("←→", "Change role or shift, toggle active"),
        ("Enter", "Submit; errors show under each field"),
        ("Esc", "Close without saving"),
    ]),
    ("Other", &[
        ("x", "Export the matching rows to CSV"),
        ("Esc", "Dismiss the notification"),
        ("? F1", "Toggle this help"),
        ("q", "Quit"),
    ]),
];

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);
    let mut lines = Vec::new();
    for (index, (section, bindings)) in KEY_BINDINGS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(*section, heading)));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<12}"), key),
                Span::raw(*action),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Columns: 1 Name  2 Email  3 Role  4 DOB  5 Salary  6 Shift  7 Status",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let lines = help_lines();
    let total = lines.len();
    let area = popup_area(f.area(), 70, total as u16 + 2);
    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll.min(total.saturating_sub(visible));

    f.render_widget(Clear, area);
    let widget = Paragraph::new(lines)
        .scroll((offset as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Keys ({}/{})", offset + 1, total))
                .style(Style::default().fg(Color::White)),
        );
    f.render_widget(widget, area);
}
