#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_WIDTH: usize = 6;

/// Render an aligned table. Widths count characters, so accented text lines up.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_len(cell))
                .max()
                .unwrap_or(0)
                .max(display_len(header))
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_len(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize_state(&truncated, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn display_len(value: &str) -> usize {
    value.chars().count()
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    // Shave the widest shrinkable column one character at a time.
    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_len(headers[*idx]).max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_len(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_len(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Color processing states and extraction results. Padding stays outside the escape codes.
fn colorize_state(cell: &str, padded: String) -> String {
    let code = match cell.to_ascii_uppercase().as_str() {
        "PROCESADO" | "TRUE" | "SUCCESS" => "32",
        "LISTO" => "36",
        "EXTRAIDO" => "33",
        "FALSE" | "ERROR" | "FAILED" => "31",
        _ => return padded,
    };
    padded.replacen(cell, &format!("\u{1b}[{code}m{cell}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_entity_table, truncate_text};

    #[test]
    fn columns_align_on_characters_not_bytes() {
        let headers = ["nit", "razon_social"];
        let rows = vec![
            vec!["1".to_string(), "Compañía Ñandú".to_string()],
            vec!["22".to_string(), "Alfa".to_string()],
        ];

        let table = render_entity_table(
            &headers,
            &rows,
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "nit     razon_social");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "     1  Compañía Ñandú");
        assert_eq!(lines[3], "    22  Alfa");
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let headers = ["nit", "razon_social"];
        let rows = vec![vec![
            "900123456".to_string(),
            "Sociedad de Auditores Asociados".to_string(),
        ]];

        let table = render_entity_table(
            &headers,
            &rows,
            TableOptions {
                max_width: Some(30),
                color: false,
            },
        );
        let row = table.lines().nth(2).expect("row line");
        assert_eq!(row.chars().count(), 30);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate_text("LISTO", 6), "LISTO");
        assert_eq!(truncate_text("PROCESADO", 6), "PROCE…");
    }

    #[test]
    fn states_are_colored_without_breaking_padding() {
        let table = render_entity_table(
            &["estado"],
            &[vec!["LISTO".to_string()]],
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let row = table.lines().nth(2).expect("row line");
        assert_eq!(row, "\u{1b}[36mLISTO\u{1b}[0m");
    }
}
