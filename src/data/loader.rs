//! CSV loading for projected point tables.
//!
//! Expected shape: a header row naming the columns, then one record per line.
//! Only the two coordinate columns and the category column are read; any other
//! columns are ignored.
//!
//! - Empty lines are skipped.
//! - Fields may be double-quoted (`""` escapes a quote inside a quoted field).
//! - Non-numeric coordinates and short rows follow the [`InvalidRecordPolicy`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::dataset::{Dataset, InvalidRecordPolicy, Point};
use crate::error::DataError;

/// Header names of the columns to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumns {
    pub x: String,
    pub y: String,
    pub category: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
            category: "category".to_string(),
        }
    }
}

/// Load a dataset from a CSV file.
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    columns: &CsvColumns,
    policy: InvalidRecordPolicy,
) -> Result<Dataset, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = parse_csv(BufReader::new(file), columns, policy)?;
    log::info!(
        "loaded {} record(s) in {} categor{} from {:?}",
        dataset.len(),
        dataset.categories().len(),
        if dataset.categories().len() == 1 { "y" } else { "ies" },
        path
    );
    Ok(dataset)
}

/// Parse CSV text from any buffered reader.
pub fn parse_csv<R: BufRead>(
    reader: R,
    columns: &CsvColumns,
    policy: InvalidRecordPolicy,
) -> Result<Dataset, DataError> {
    let mut lines = reader.lines().enumerate();

    // header: first non-empty line
    let (header_line, header) = loop {
        match lines.next() {
            Some((i, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break (i + 1, split_fields(&line));
                }
            }
            None => return Err(DataError::Empty),
        }
    };
    let find = |name: &str| -> Result<usize, DataError> {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let x_col = find(&columns.x)?;
    let y_col = find(&columns.y)?;
    let cat_col = find(&columns.category)?;
    let needed = x_col.max(y_col).max(cat_col) + 1;
    log::debug!("CSV header on line {header_line}: x={x_col} y={y_col} category={cat_col}");

    let mut points = Vec::new();
    for (i, line) in lines {
        let line_no = i + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_fields(&line);
        if fields.len() < needed {
            let reason = format!("expected at least {needed} fields, found {}", fields.len());
            match policy {
                InvalidRecordPolicy::Reject => {
                    return Err(DataError::Malformed {
                        line: line_no,
                        reason,
                    })
                }
                InvalidRecordPolicy::WarnAndKeep | InvalidRecordPolicy::Drop => {
                    log::warn!("line {line_no}: {reason}; skipped");
                    continue;
                }
            }
        }

        let x = parse_coordinate(&fields[x_col]);
        let y = parse_coordinate(&fields[y_col]);
        let category = fields[cat_col].trim().to_string();

        let bad = match (x, y) {
            (None, _) => Some((&columns.x, &fields[x_col])),
            (_, None) => Some((&columns.y, &fields[y_col])),
            _ => None,
        };
        if let Some((column, value)) = bad {
            match policy {
                InvalidRecordPolicy::Reject => {
                    return Err(DataError::NonNumeric {
                        line: line_no,
                        column: column.clone(),
                        value: value.clone(),
                    });
                }
                InvalidRecordPolicy::Drop => {
                    log::warn!("line {line_no}: `{column}` is not numeric ({value:?}); dropped");
                    continue;
                }
                InvalidRecordPolicy::WarnAndKeep => {
                    log::warn!("line {line_no}: `{column}` is not numeric ({value:?}); kept");
                }
            }
        }

        points.push(Point {
            x: x.unwrap_or(f64::NAN),
            y: y.unwrap_or(f64::NAN),
            category,
        });
    }

    if points.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(Dataset::new(points))
}

/// A finite number, or `None`. "NaN"/"inf" spellings count as non-numeric.
fn parse_coordinate(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split one CSV line into fields, honouring double quotes.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    fields.push(cur);
    fields
}
