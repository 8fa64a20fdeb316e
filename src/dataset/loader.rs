//! CSV loading for delimited datasets.
//!
//! Supported format:
//! - UTF-8, comma-separated, no header row
//! - Double-quoted fields with embedded commas are handled correctly
//! - Every column but the last is a numeric feature; the last column is the
//!   label, kept as raw text and encoded with `LabelEncoder`
use std::path::Path;

use crate::dataset::encoder::LabelEncoder;
use crate::dataset::record::Record;
use crate::error::{NeuralError, Result};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// What to do with a feature cell that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MalformedPolicy {
    /// Skip the whole row.
    Drop,
    /// Substitute the given value and keep the row.
    Default(f64),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads `path` and returns its records with encoded class targets, plus
/// the encoder holding the distinct raw labels.
pub fn load_csv<P: AsRef<Path>>(path: P, policy: MalformedPolicy) -> Result<(Vec<Record>, LabelEncoder)> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut records = parse_csv(&text, policy)?;
    let encoder = LabelEncoder::fit_records(&mut records);

    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok((records, encoder))
}

/// Parses CSV text into records carrying raw labels.
pub fn parse_csv(text: &str, policy: MalformedPolicy) -> Result<Vec<Record>> {
    let mut records: Vec<Record> = Vec::new();

    for (row_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        if cells.len() < 2 {
            return Err(NeuralError::Csv {
                row: row_idx + 1,
                message: format!("expected at least 2 columns (features + label), got {}", cells.len()),
            });
        }

        let (feature_cells, label_cell) = cells.split_at(cells.len() - 1);
        let features = match parse_floats(feature_cells, policy) {
            Some(f) => f,
            None => {
                log::debug!("row {}: dropped unparsable row", row_idx + 1);
                continue;
            }
        };

        if let Some(first) = records.first() {
            if first.features.len() != features.len() {
                return Err(NeuralError::Csv {
                    row: row_idx + 1,
                    message: format!(
                        "feature count {} does not match first row's {}",
                        features.len(),
                        first.features.len()
                    ),
                });
            }
        }

        records.push(Record::unlabeled(features, label_cell[0].trim().to_string()));
    }

    if records.is_empty() {
        return Err(NeuralError::EmptyDataset);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => {
                if in_quotes && i + 1 < chars.len() && chars[i + 1] == '"' {
                    current.push('"');
                    i += 2;
                    continue;
                }
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
        i += 1;
    }
    fields.push(current);
    fields
}

/// `None` when the row must be dropped under `MalformedPolicy::Drop`.
fn parse_floats(cells: &[String], policy: MalformedPolicy) -> Option<Vec<f64>> {
    cells.iter()
        .map(|c| match (c.trim().parse::<f64>(), policy) {
            (Ok(v), _) => Some(v),
            (Err(_), MalformedPolicy::Default(d)) => Some(d),
            (Err(_), MalformedPolicy::Drop) => None,
        })
        .collect()
}
