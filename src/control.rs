//! Control block calculation
//!
//! The control block lets a consumer of the export verify it received what
//! was sampled: row and column counts, the smallest and largest primary-key
//! value, and an order-independent checksum.
//!
//! # Checksum
//!
//! - each row's primary-key value adds its integer value when its text form
//!   is numeric, otherwise its length in characters;
//! - each non-NULL, non-numeric cell of every column adds its length in
//!   characters (numeric cells add nothing).
//!
//! `min_id`/`max_id` compare the primary-key values as strings, so `"10"`
//! sorts before `"9"`. Downstream consumers depend on this exact behaviour.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{RowSet, TableSchema};

static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$")
        .expect("numeric pattern is valid")
});

/// Integrity and summary record embedded in the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBlock {
    pub row_count: usize,
    pub column_count: usize,
    pub min_id: String,
    pub max_id: String,
    pub checksum: i64,
}

/// Whether a value's text form is a number (integer, decimal or exponent form)
pub fn is_numeric(text: &str) -> bool {
    NUMERIC.is_match(text)
}

/// Integer value of a numeric string, truncated toward zero
///
/// Values outside the `i64` range saturate. Returns `None` for non-numeric
/// text.
pub fn numeric_value(text: &str) -> Option<i64> {
    if !is_numeric(text) {
        return None;
    }
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if let Ok(n) = unsigned.parse::<i64>() {
        return Some(n);
    }
    // `as` truncates toward zero and saturates at the i64 bounds
    unsigned.parse::<f64>().ok().map(|f| f as i64)
}

impl ControlBlock {
    /// Compute the control block for a sample
    pub fn compute(schema: &TableSchema, rows: &RowSet) -> Self {
        let pk = schema.primary_key_column();
        let pk_values: Vec<String> = rows
            .iter()
            .map(|row| row.value(pk).as_text().unwrap_or_default())
            .collect();

        let min_id = pk_values.iter().min().cloned().unwrap_or_default();
        let max_id = pk_values.iter().max().cloned().unwrap_or_default();

        let mut checksum: i64 = 0;

        for value in &pk_values {
            let contribution = match numeric_value(value) {
                Some(n) => n,
                None => char_len(value),
            };
            checksum = checksum.saturating_add(contribution);
        }

        for row in rows {
            for column in schema.columns() {
                let Some(text) = row.value(column).as_text() else {
                    continue;
                };
                if is_numeric(&text) {
                    continue;
                }
                checksum = checksum.saturating_add(char_len(&text));
            }
        }

        Self {
            row_count: rows.len(),
            column_count: schema.column_count(),
            min_id,
            max_id,
            checksum,
        }
    }
}

fn char_len(text: &str) -> i64 {
    i64::try_from(text.chars().count()).unwrap_or(i64::MAX)
}
