use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table, Wrap},
};

use super::panel::{Fragment, RenderText};
use crate::ui::formatters::Band;

/// Color for a severity band
pub fn band_color(band: Band) -> Color {
    match band {
        Band::Normal => Color::Cyan,
        Band::Warning => Color::LightYellow,
        Band::Critical => Color::Red,
    }
}

fn fragment_span(fragment: &Fragment) -> Span<'_> {
    let mut style = Style::default();
    if let Some(band) = fragment.band {
        style = style.fg(band_color(band));
        if band == Band::Critical {
            style = style.add_modifier(Modifier::BOLD);
        }
    }
    if fragment.accent {
        style = style.fg(Color::Gray).add_modifier(Modifier::BOLD);
    }
    Span::styled(fragment.text.as_str(), style)
}

fn fragments_line(fragments: &[Fragment]) -> Line<'_> {
    Line::from(fragments.iter().map(fragment_span).collect::<Vec<_>>())
}

/// Draw panel text into `area`, skipping the first `scroll` rows
pub fn render_text(frame: &mut Frame, area: Rect, text: &RenderText, scroll: usize) {
    match text {
        RenderText::Lines(lines) => {
            let lines: Vec<Line> = lines
                .iter()
                .skip(scroll)
                .map(|line| fragments_line(line))
                .collect();
            frame.render_widget(Paragraph::new(lines), area);
        }
        RenderText::Table { header, rows } => {
            if area.height < 2 {
                return;
            }

            let header_row = Row::new(
                header
                    .iter()
                    .map(|h| Cell::from(h.as_str()).style(Style::default().add_modifier(Modifier::BOLD))),
            )
            .height(1);

            let body: Vec<Row> = rows
                .iter()
                .skip(scroll)
                .map(|row| Row::new(row.iter().map(|cell| Cell::from(fragments_line(std::slice::from_ref(cell))))))
                .collect();

            let widths = column_widths(header, rows);
            let table = Table::new(body, widths).header(header_row);
            frame.render_widget(table, area);
        }
        RenderText::Placeholder(message) => {
            let paragraph = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }
}

fn cell_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Size every column to its widest cell; the last one takes the remainder
fn column_widths(header: &[String], rows: &[Vec<Fragment>]) -> Vec<Constraint> {
    let mut widths: Vec<u16> = header.iter().map(|h| cell_width(h)).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell_width(&cell.text);
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let last = widths.len().saturating_sub(1);
    widths
        .into_iter()
        .enumerate()
        .map(|(i, width)| {
            if i == last {
                Constraint::Min(width.min(12))
            } else {
                Constraint::Length(width.min(32))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_differ() {
        assert_ne!(band_color(Band::Normal), band_color(Band::Warning));
        assert_ne!(band_color(Band::Warning), band_color(Band::Critical));
    }

    #[test]
    fn test_column_widths_follow_content() {
        let header = vec!["PID".to_string(), "Name".to_string()];
        let rows = vec![vec![Fragment::plain("12345"), Fragment::plain("x")]];
        assert_eq!(
            column_widths(&header, &rows),
            vec![Constraint::Length(5), Constraint::Min(4)]
        );
    }

    #[test]
    fn test_oversized_cell_saturates_width() {
        let long = "x".repeat(usize::from(u16::MAX) + 4);
        assert_eq!(cell_width(&long), u16::MAX);

        let header = vec!["Cmd".to_string(), "CPU".to_string()];
        let rows = vec![vec![Fragment::plain(long), Fragment::plain("1%")]];
        assert_eq!(
            column_widths(&header, &rows),
            vec![Constraint::Length(32), Constraint::Min(3)]
        );
    }
}
