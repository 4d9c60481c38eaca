use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print rows whose table columns follow `headers` exactly.
///
/// JSON and raw output keep the serialized field order; the table is built
/// from `cells` so it does not go through an alphabetized JSON map.
pub fn output_sheet<T: Serialize>(
    value: &T,
    headers: &[&str],
    cells: &[Vec<String>],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Table => render_sheet(headers, cells, table_options()),
        other => render(value, other)?,
    };
    println!("{rendered}");
    Ok(())
}

fn render_sheet(headers: &[&str], cells: &[Vec<String>], options: table::TableOptions) -> String {
    if cells.is_empty() {
        return String::from("(no rows)");
    }
    table::render_entity_table(headers, cells, options)
}

fn table_options() -> table::TableOptions {
    table::TableOptions {
        max_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok()),
        color: std::io::stdout().is_terminal(),
    }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            // Paged responses render their rows; the counters go in a footer.
            if let Some((key, Value::Array(items))) =
                map.iter().find(|(_, value)| value.is_array())
            {
                let mut out = render_array_table(items, options);
                let footer = map
                    .iter()
                    .filter(|(other, value)| *other != key && !value.is_object() && !value.is_array())
                    .map(|(name, value)| format!("{name}={}", value_to_cell(value)))
                    .collect::<Vec<_>>();
                if !footer.is_empty() {
                    out.push('\n');
                    out.push_str(&footer.join("  "));
                }
                return Ok(out);
            }

            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    // Column order follows the first appearance of each field.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
