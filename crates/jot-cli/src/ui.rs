use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Focus};
use crate::render::styled_lines;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_editor(f, app, chunks[0]);
    draw_tags(f, app, chunks[1]);
    draw_help(f, app, chunks[2]);
}

fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let text = app.document.text();
    let caret = app.document.caret();
    let (line, col) = app.document.line_col(caret);
    let line_start = caret - col;
    let display_col = text[line_start..caret].chars().count();

    // Keep the caret line on screen
    let height = usize::from(area.height.saturating_sub(2)).max(1);
    if line < app.scroll {
        app.scroll = line;
    } else if line >= app.scroll + height {
        app.scroll = line + 1 - height;
    }

    let name = app
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "[scratch]".to_string());
    let title = if app.is_dirty() {
        format!("{name} *")
    } else {
        name
    };

    let editor = Paragraph::new(styled_lines(&text, app.runs()))
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((u16::try_from(app.scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(editor, area);

    if app.focus == Focus::Editor {
        let x = (area.x + 1).saturating_add(u16::try_from(display_col).unwrap_or(u16::MAX));
        let y = (area.y + 1).saturating_add(u16::try_from(line - app.scroll).unwrap_or(u16::MAX));
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
    }
}

fn draw_tags(f: &mut Frame, app: &App, area: Rect) {
    let tag_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans: Vec<Span> = app
        .tags
        .tags()
        .iter()
        .flat_map(|t| [Span::styled(format!("#{t}"), tag_style), Span::raw(" ")])
        .collect();
    spans.push(Span::raw(app.tags.pending()));
    let cursor_x = spans.iter().map(|s| s.width()).sum::<usize>();

    let border = if app.focus == Focus::Tags {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let tags = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("Tags"),
    );
    f.render_widget(tags, area);

    if app.focus == Focus::Tags {
        let x = (area.x + 1).saturating_add(u16::try_from(cursor_x).unwrap_or(u16::MAX));
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(
        "Esc: Quit | Ctrl-S: Save | Tab: Tags | Enter: Continue list",
    )];
    if !app.status.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            app.status.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
