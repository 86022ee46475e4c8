//! CSV export and import of entry collections.
//!
//! Every field is wrapped in double quotes and embedded quotes are doubled.
//! Rows are joined with `\n`, the first row is always the header.

use crate::errors::CodecError;
use crate::models::{Entry, Mood};

pub const HEADER: [&str; 6] = ["id", "date", "steps", "sleep", "mood", "notes"];

pub fn encode(entries: &[Entry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADER.join(","));
    for entry in entries {
        let fields = [
            entry.id.clone(),
            entry.date.clone(),
            entry.steps.to_string(),
            entry.sleep.to_string(),
            entry.mood.to_string(),
            entry.notes.clone(),
        ];
        lines.push(
            fields
                .iter()
                .map(|field| quote(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

pub fn decode(text: &str) -> Result<Vec<Entry>, CodecError> {
    let mut rows = parse_rows(text)?.into_iter();

    let header = rows.next().ok_or(CodecError::MissingHeader)?;
    if header.iter().map(String::as_str).ne(HEADER) {
        return Err(CodecError::MissingHeader);
    }

    rows.enumerate()
        .map(|(index, row)| entry_from_row(index + 1, row))
        .collect()
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn entry_from_row(row: usize, fields: Vec<String>) -> Result<Entry, CodecError> {
    let found = fields.len();
    let [id, date, steps, sleep, mood, notes]: [String; 6] = fields
        .try_into()
        .map_err(|_| CodecError::ColumnCount { row, found })?;

    let field_error = |field: &'static str, message: String| CodecError::Field {
        row,
        field,
        message,
    };

    Ok(Entry {
        steps: steps
            .parse::<u64>()
            .map_err(|err| field_error("steps", err.to_string()))?,
        sleep: sleep
            .parse::<f64>()
            .map_err(|err| field_error("sleep", err.to_string()))?,
        mood: mood.parse::<Mood>().map_err(|err| field_error("mood", err))?,
        id,
        date,
        notes,
    })
}

/// Splits CSV text into rows of unquoted fields. Quoted fields may contain
/// commas, doubled quotes and line breaks. A trailing newline and `\r\n`
/// separators are accepted. Blank lines are skipped.
fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, CodecError> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_started = false;
    let mut line = 1;
    let mut quote_line = 0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                row_started = true;
                quote_line = line;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                if row_started || !field.is_empty() {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                row_started = false;
            }
            _ => {
                field.push(ch);
                row_started = true;
            }
        }
    }

    if in_quotes {
        return Err(CodecError::UnterminatedQuote(quote_line));
    }
    if row_started || !field.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
