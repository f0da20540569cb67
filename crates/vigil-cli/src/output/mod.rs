use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };

    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(field, value)| vec![field, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["field", "value"], &rows, options))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    // Column order follows first appearance so series keep their natural
    // field order (date, total, violent, ...) instead of alphabetical.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| "-".to_string(), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        nested => serde_json::to_string(nested).unwrap_or_else(|_| String::from("<unprintable>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use crate::cli::OutputFormat;

    use super::render;

    #[derive(Serialize)]
    struct Example {
        mode: &'static str,
        total: u32,
    }

    #[test]
    fn json_render_is_pretty_and_valid() {
        let out = render(
            &Example {
                mode: "dark",
                total: 7,
            },
            OutputFormat::Json,
        )
        .expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["mode"], "dark");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(
            &Example {
                mode: "dark",
                total: 7,
            },
            OutputFormat::Raw,
        )
        .expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn object_table_lists_fields_as_rows() {
        let out = render(
            &Example {
                mode: "dark",
                total: 7,
            },
            OutputFormat::Table,
        )
        .expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("field")));
        assert!(out.contains("mode"));
        assert!(out.contains("total"));
    }

    #[test]
    fn array_table_preserves_first_row_key_order() {
        let rows = vec![
            serde_json::json!({"date": "2025-01", "total": 120, "violent": 30}),
            serde_json::json!({"date": "2025-02", "total": 98, "violent": 27}),
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("table should have a header");
        let date = header.find("date").expect("date column");
        let total = header.find("total").expect("total column");
        let violent = header.find("violent").expect("violent column");
        assert!(date < total && total < violent);
    }

    #[test]
    fn empty_array_renders_a_placeholder() {
        let rows: Vec<serde_json::Value> = Vec::new();
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
