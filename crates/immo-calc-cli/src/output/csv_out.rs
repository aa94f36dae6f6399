use serde_json::{Map, Value};
use std::io;

use super::{is_record_list, scalar_text};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// A result envelope becomes `field,value` pairs; a record list inside the
/// result (the projection) follows as a second block with its own header.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => write_record(&mut wtr, result),
            _ => write_record(&mut wtr, map),
        },
        Value::Array(rows) => write_rows(&mut wtr, rows),
        _ => {
            let _ = wtr.write_record([scalar_text(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_record(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    let mut lists: Vec<&Value> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (sub, v) in inner {
                    let _ = wtr.write_record([format!("{}.{}", key, sub), scalar_text(v)]);
                }
            }
            v if is_record_list(v) => lists.push(v),
            v => {
                let _ = wtr.write_record([key.clone(), scalar_text(v)]);
            }
        }
    }

    for list in lists {
        if let Value::Array(rows) = list {
            write_rows(wtr, rows);
        }
    }
}

fn write_rows(wtr: &mut StdoutWriter<'_>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
