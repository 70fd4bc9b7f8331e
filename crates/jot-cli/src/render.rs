use jot_engine::continuation::lines_with_spans;
use jot_engine::styling::{ColorRole, StyledRun, TextAttributes, Weight};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Terminal colour for a palette role; `None` keeps the terminal default.
pub fn color_for(role: ColorRole) -> Option<Color> {
    match role {
        ColorRole::Label => None,
        ColorRole::Accent => Some(Color::Yellow),
        ColorRole::SecondaryLabel => Some(Color::DarkGray),
        ColorRole::Code => Some(Color::Magenta),
        ColorRole::CodeBackground => Some(Color::Black),
    }
}

/// Terminal style for folded attributes. Font sizes have no terminal
/// equivalent and are dropped.
pub fn style_for(attrs: &TextAttributes) -> Style {
    let mut style = Style::default();
    if let Some(fg) = color_for(attrs.foreground) {
        style = style.fg(fg);
    }
    if let Some(bg) = attrs.background.and_then(color_for) {
        style = style.bg(bg);
    }
    if attrs.font.weight == Weight::Bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if attrs.font.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

/// Splits `text` into display lines styled by `runs`.
///
/// `runs` may be stale (computed for an older text while a rescan is
/// pending); text past the last run renders unstyled and run edges are
/// snapped back onto char boundaries.
pub fn styled_lines<'a>(text: &'a str, runs: &[StyledRun]) -> Vec<Line<'a>> {
    lines_with_spans(text)
        .map(|(span, line)| {
            let content = line.trim_end_matches(['\n', '\r']);
            styled_line(text, span.start, span.start + content.len(), runs)
        })
        .collect()
}

fn styled_line<'a>(text: &'a str, start: usize, end: usize, runs: &[StyledRun]) -> Line<'a> {
    let mut parts = Vec::new();
    let mut pos = start;
    let first = runs.partition_point(|r| r.span.end <= start);

    for run in &runs[first..] {
        if pos >= end {
            break;
        }
        let run_end = floor_char_boundary(text, run.span.end.min(end));
        if run_end <= pos {
            continue;
        }
        parts.push(Span::styled(&text[pos..run_end], style_for(&run.attributes)));
        pos = run_end;
    }

    if pos < end {
        parts.push(Span::raw(&text[pos..end]));
    }
    Line::from(parts)
}

fn floor_char_boundary(text: &str, mut i: usize) -> usize {
    i = i.min(text.len());
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_engine::Highlighter;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_line_is_bold_yellow() {
        let text = "# Hi\nplain";
        let runs = Highlighter::default().style(text);
        let lines = styled_lines(text, &runs);

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].spans,
            vec![Span::styled(
                "# Hi",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            )]
        );
        assert_eq!(lines[1].spans, vec![Span::raw("plain")]);
    }

    #[test]
    fn code_gets_background() {
        let text = "a `b`";
        let runs = Highlighter::default().style(text);
        let lines = styled_lines(text, &runs);

        assert_eq!(
            lines[0].spans,
            vec![
                Span::raw("a "),
                Span::styled("`b`", Style::default().fg(Color::Magenta).bg(Color::Black)),
            ]
        );
    }

    #[test]
    fn stale_runs_leave_new_text_unstyled() {
        let runs = Highlighter::default().style("ab");
        let lines = styled_lines("abc", &runs);
        assert_eq!(lines[0].spans, vec![Span::raw("ab"), Span::raw("c")]);
    }

    #[test]
    fn stale_run_edge_inside_a_char_is_snapped() {
        let runs = Highlighter::default().style("é");
        let lines = styled_lines("xé", &runs);
        assert_eq!(lines[0].spans, vec![Span::raw("x"), Span::raw("é")]);
    }

    #[test]
    fn terminators_are_not_rendered() {
        let text = "a\r\nb\n";
        let runs = Highlighter::default().style(text);
        let lines = styled_lines(text, &runs);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans, vec![Span::raw("a")]);
        assert_eq!(lines[1].spans, vec![Span::raw("b")]);
    }
}
