use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(value: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(value),
    }

    Ok(())
}

fn render_table(value: &Value) {
    let Some(rows) = value.as_array() else {
        println!("{value}");
        return;
    };
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }

    // Column set and order come from the first row's projection.
    let columns: Vec<&str> = match rows[0].as_object() {
        Some(map) => map.keys().map(String::as_str).collect(),
        None => {
            for row in rows {
                println!("{row}");
            }
            return;
        }
    };

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let text = match row.get(*column) {
                        Some(Value::String(s)) => s.clone(),
                        Some(other) => other.to_string(),
                        None => String::new(),
                    };
                    widths[i] = widths[i].max(text.len());
                    text
                })
                .collect()
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column:<width$}", width = widths[i]))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(header.join("  ").len()));

    for row in cells {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}
