//! Tabular payloads parsed from nflverse CSV release assets.

use std::collections::HashSet;
use std::io::Read;

use rusqlite::types::{ToSql, ToSqlOutput, Value};

use crate::{cli::types::time::Season, error::ExportError, Result};

/// Column name every snapshot table is keyed on.
pub const SEASON_COLUMN: &str = "season";

/// A single typed value from a CSV payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Parse a raw CSV field. `NA` and empty fields are null, matching how
    /// nflverse writes missing values.
    ///
    /// Numbers are recognised after trimming; anything kept as text is
    /// stored exactly as written.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "NA" {
            return Cell::Null;
        }

        // Zero-padded identifiers ("00", "0021") and explicit signs ("+5") stay text
        let zero_padded = trimmed.len() > 1
            && trimmed.starts_with('0')
            && trimmed.bytes().all(|b| b.is_ascii_digit());
        if !zero_padded && !trimmed.starts_with('+') {
            if let Ok(i) = trimmed.parse::<i64>() {
                return Cell::Integer(i);
            }
            if let Ok(f) = trimmed.parse::<f64>() {
                if f.is_finite() {
                    return Cell::Real(f);
                }
            }
        }
        Cell::Text(raw.to_string())
    }

    /// Interpret the cell as a season year.
    pub fn as_season(&self) -> Option<u16> {
        match self {
            Cell::Integer(i) => u16::try_from(*i).ok(),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Null => ToSqlOutput::Owned(Value::Null),
            Cell::Integer(i) => ToSqlOutput::from(*i),
            Cell::Real(f) => ToSqlOutput::from(*f),
            Cell::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// SQLite column affinity inferred from a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Integer,
    Real,
    Text,
}

impl Affinity {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Affinity::Integer => "INTEGER",
            Affinity::Real => "REAL",
            Affinity::Text => "TEXT",
        }
    }
}

/// Column names plus rows of typed cells. Every row has one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Build a frame, padding short rows with nulls and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Parse a CSV payload with a header row.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = unique_column_names(csv_reader.headers()?);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row = (0..columns.len())
                .map(|i| record.get(i).map(Cell::parse).unwrap_or(Cell::Null))
                .collect();
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Narrowest affinity that holds every non-null value in the column.
    /// All-null columns are `TEXT`.
    pub fn affinity(&self, column: usize) -> Affinity {
        let mut affinity: Option<Affinity> = None;
        for row in &self.rows {
            let cell_affinity = match row.get(column) {
                Some(Cell::Integer(_)) => Affinity::Integer,
                Some(Cell::Real(_)) => Affinity::Real,
                Some(Cell::Text(_)) => return Affinity::Text,
                Some(Cell::Null) | None => continue,
            };
            affinity = Some(match (affinity, cell_affinity) {
                (None, a) => a,
                (Some(Affinity::Integer), Affinity::Integer) => Affinity::Integer,
                _ => Affinity::Real,
            });
        }
        affinity.unwrap_or(Affinity::Text)
    }

    /// Keep only rows belonging to `season`. Used for assets that hold every
    /// season in one file.
    pub fn retain_season(&mut self, dataset: &str, season: Season) -> Result<()> {
        let idx = self
            .column_index(SEASON_COLUMN)
            .ok_or_else(|| ExportError::MissingColumn {
                dataset: dataset.to_string(),
                column: SEASON_COLUMN.to_string(),
            })?;
        self.rows
            .retain(|row| row.get(idx).and_then(Cell::as_season) == Some(season.as_u16()));
        Ok(())
    }

    /// Add a `season` column filled with `season` if the payload lacks one.
    pub fn ensure_season(&mut self, season: Season) {
        if self.column_index(SEASON_COLUMN).is_some() {
            return;
        }
        self.columns.push(SEASON_COLUMN.to_string());
        for row in &mut self.rows {
            row.push(Cell::Integer(i64::from(season.as_u16())));
        }
    }
}

/// SQLite rejects duplicate column names (compared case-insensitively), so
/// repeated or blank headers get positional suffixes.
fn unique_column_names(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let base = match header.trim() {
                "" => format!("column_{}", i + 1),
                name => name.to_string(),
            };
            let mut name = base.clone();
            let mut n = 2;
            while !seen.insert(name.to_ascii_lowercase()) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}
