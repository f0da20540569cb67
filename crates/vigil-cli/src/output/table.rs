#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 5;

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad_cell(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let cell = truncate(cell, *width);
                let padded = pad_cell(&cell, *width, looks_numeric(&cell));
                if options.color {
                    colorize_status(&padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }

    lines.join("\n")
}

/// Shave the widest shrinkable column one character at a time until the row
/// fits, stopping when every column is at the floor.
fn shrink_to_fit(widths: &mut [usize], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;

    loop {
        let total = widths.iter().sum::<usize>() + separators;
        if total <= max_width {
            return;
        }

        let widest = widths
            .iter()
            .enumerate()
            .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, width)| **width);
        let Some((index, _)) = widest else {
            return;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut truncated: String = value.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad_cell(value: &str, width: usize, right_align: bool) -> String {
    let pad = width.saturating_sub(value.chars().count());
    if right_align {
        format!("{}{value}", " ".repeat(pad))
    } else {
        format!("{value}{}", " ".repeat(pad))
    }
}

fn colorize_status(value: &str) -> String {
    let code = match value.trim().to_ascii_lowercase().as_str() {
        "authenticated" | "true" | "confirmed" | "requested" | "ok" => Some("32"),
        "authenticating" | "idle" | "pending" => Some("33"),
        "failed" | "false" | "error" | "expired" | "invalid" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_entity_table, shrink_to_fit, truncate};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_across_mixed_widths() {
        let headers = ["date", "total", "violent"];
        let rows = vec![
            vec!["2025-01".to_string(), "120".to_string(), "30".to_string()],
            vec!["2025-02".to_string(), "98".to_string(), "27".to_string()],
        ];

        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("date"));
        assert!(lines[1].chars().all(|c| c == '-'));
        let expected = lines[0].chars().count();
        assert!(lines[2..].iter().all(|l| l.chars().count() == expected));
    }

    #[test]
    fn numeric_cells_are_right_aligned() {
        let headers = ["count"];
        let rows = vec![vec!["7".to_string()], vec!["12345".to_string()]];

        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[2].starts_with(' '));
        assert!(lines[2].ends_with('7'));
    }

    #[test]
    fn missing_cells_render_as_placeholders() {
        let headers = ["a", "b"];
        let rows = vec![vec!["only-a".to_string()]];

        let table = render_entity_table(&headers, &rows, PLAIN);
        assert!(table.lines().nth(2).is_some_and(|line| line.contains('-')));
    }

    #[test]
    fn truncation_keeps_within_width_and_marks_the_cut() {
        let cell = truncate("a very long category name", 10);
        assert_eq!(cell.chars().count(), 10);
        assert!(cell.ends_with('…'));
    }

    #[test]
    fn shrinking_respects_the_column_floor() {
        let mut widths = vec![30, 6, 6];
        shrink_to_fit(&mut widths, 20);
        assert!(widths.iter().sum::<usize>() + 4 <= 20 || widths.iter().all(|w| *w <= 6));
        assert!(widths.iter().all(|w| *w >= 5));
    }
}
