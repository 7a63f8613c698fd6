//! Protein dataset ingestion
//!
//! Reads `ProteinRecord`s from CSV, TSV, JSON, YAML or TOML. Every entry must
//! carry the five fields `region_start`, `region_end`, `name`, `psite` and
//! `protein_length`; the first entry that does not aborts the whole load with
//! [`IdrError::MalformedRecord`].
//!
//! JSON and YAML accept either objects or 5-element tuples in field order:
//!
//! ```json
//! [
//!   {"region_start": 265, "region_end": 330, "name": "CHK1", "psite": 296, "protein_length": 476},
//!   [87, 106, "SASH1", 90, 1247]
//! ]
//! ```
//!
//! TOML uses one `[[protein]]` table per record.

use idrplot_common::{GeometryAdvisory, IdrError, Position, ProteinRecord, Result, MAX_POSITION};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Title of the bundled dataset
pub const BUILTIN_TITLE: &str = "Phosphorylation Sites Plotted on IDRs of 14-3-3 Client Proteins";

const BUILTIN_CSV: &str = include_str!("../../../data/14-3-3_clients.csv");

/// Field names, also the tuple order
pub const FIELDS: [&str; 5] = [
    "region_start",
    "region_end",
    "name",
    "psite",
    "protein_length",
];

const NAME: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Tsv,
    Json,
    Yaml,
    Toml,
}

impl DatasetFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                IdrError::UnsupportedFormat(format!(
                    "'{}' has no extension; pass the format explicitly",
                    path.display()
                ))
            })?;

        extension.parse()
    }
}

impl std::str::FromStr for DatasetFormat {
    type Err = IdrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(DatasetFormat::Csv),
            "tsv" | "tab" => Ok(DatasetFormat::Tsv),
            "json" => Ok(DatasetFormat::Json),
            "yaml" | "yml" => Ok(DatasetFormat::Yaml),
            "toml" => Ok(DatasetFormat::Toml),
            other => Err(IdrError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetFormat::Csv => write!(f, "csv"),
            DatasetFormat::Tsv => write!(f, "tsv"),
            DatasetFormat::Json => write!(f, "json"),
            DatasetFormat::Yaml => write!(f, "yaml"),
            DatasetFormat::Toml => write!(f, "toml"),
        }
    }
}

/// An advisory tied to the record it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordAdvisory {
    /// 1-based position in the dataset
    pub index: usize,
    pub name: String,
    pub advisory: GeometryAdvisory,
}

/// An ordered batch of protein records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<ProteinRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ProteinRecord>) -> Self {
        Self { records }
    }

    /// The 14-3-3 client proteins shipped with idrplot
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CSV, DatasetFormat::Csv)
    }

    /// Load a file, picking the format from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_path_with_format(path, DatasetFormat::from_path(path)?)
    }

    pub fn from_path_with_format(path: impl AsRef<Path>, format: DatasetFormat) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let dataset = Self::parse(&text, format)?;

        info!(
            path = %path.display(),
            format = %format,
            records = dataset.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse dataset text in the given format
    pub fn parse(text: &str, format: DatasetFormat) -> Result<Self> {
        let rows = match format {
            DatasetFormat::Csv => delimited_rows(text, b',')?,
            DatasetFormat::Tsv => delimited_rows(text, b'\t')?,
            DatasetFormat::Json => {
                let value: Value = serde_json::from_str(text)?;
                structured_rows(value)?
            },
            DatasetFormat::Yaml => {
                let value: Value = serde_yaml::from_str(text)
                    .map_err(|e| IdrError::Parse(format!("invalid YAML: {}", e)))?;
                structured_rows(value)?
            },
            DatasetFormat::Toml => {
                let table: toml::Table = toml::from_str(text)
                    .map_err(|e| IdrError::Parse(format!("invalid TOML: {}", e)))?;
                structured_rows(serde_json::to_value(table)?)?
            },
        };

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.into_record(i + 1))
            .collect::<Result<Vec<_>>>()?;

        debug!(format = %format, records = records.len(), "Parsed dataset");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ProteinRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProteinRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fail with [`IdrError::EmptyDataset`] when there is nothing to show
    pub fn require_non_empty(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(IdrError::EmptyDataset);
        }
        Ok(())
    }

    /// Names used by more than one record, in first-seen order
    pub fn duplicate_names(&self) -> Vec<String> {
        duplicate_names(&self.records)
    }

    /// Geometry advisories of every record, in dataset order
    pub fn advisories(&self) -> Vec<RecordAdvisory> {
        self.records
            .iter()
            .enumerate()
            .flat_map(|(i, record)| {
                record
                    .advisories()
                    .into_iter()
                    .map(move |advisory| RecordAdvisory {
                        index: i + 1,
                        name: record.name.clone(),
                        advisory,
                    })
            })
            .collect()
    }
}

/// Names used by more than one of `records`, in first-seen order
pub fn duplicate_names(records: &[ProteinRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.name.as_str()).or_default() += 1;
    }

    let mut duplicates = Vec::new();
    for record in records {
        if counts.get(record.name.as_str()).is_some_and(|&n| n > 1)
            && !duplicates.contains(&record.name)
        {
            duplicates.push(record.name.clone());
        }
    }
    duplicates
}

/// One entry as read, before type checking; cells follow [`FIELDS`]
#[derive(Debug, Default)]
struct RawRow {
    cells: [Option<String>; 5],
    /// Set when the entry had the wrong shape altogether
    shape_error: Option<String>,
}

impl RawRow {
    fn into_record(self, index: usize) -> Result<ProteinRecord> {
        let name = self.cells[NAME]
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        if let Some(reason) = self.shape_error {
            return Err(IdrError::malformed(index, name.as_deref(), reason));
        }

        let name =
            name.ok_or_else(|| IdrError::malformed(index, None, "missing field `name`"))?;

        let position = |field: usize| -> Result<Position> {
            let cell = self.cells[field]
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or_else(|| {
                    IdrError::malformed(
                        index,
                        Some(&name),
                        format!("missing field `{}`", FIELDS[field]),
                    )
                })?;

            let value = cell.parse::<Position>().map_err(|_| {
                IdrError::malformed(
                    index,
                    Some(&name),
                    format!("field `{}` is not an integer: '{}'", FIELDS[field], cell),
                )
            })?;

            if !(0..=MAX_POSITION).contains(&value) {
                return Err(IdrError::malformed(
                    index,
                    Some(&name),
                    format!(
                        "field `{}` is out of range: {} (expected 0..={})",
                        FIELDS[field], value, MAX_POSITION
                    ),
                ));
            }
            Ok(value)
        };

        Ok(ProteinRecord {
            region_start: position(0)?,
            region_end: position(1)?,
            psite: position(3)?,
            protein_length: position(4)?,
            name,
        })
    }
}

fn delimited_rows(text: &str, delimiter: u8) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| IdrError::Parse(format!("unreadable header row: {}", e)))?
        .clone();

    let mut columns = [0usize; 5];
    for (slot, field) in columns.iter_mut().zip(FIELDS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(field))
            .ok_or_else(|| IdrError::Parse(format!("header is missing column `{}`", field)))?;
    }

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            IdrError::malformed(i + 1, None, format!("unreadable row: {}", e))
        })?;

        let mut row = RawRow::default();
        for (cell, &column) in row.cells.iter_mut().zip(columns.iter()) {
            *cell = record.get(column).map(str::to_string);
        }
        rows.push(row);
    }

    Ok(rows)
}

fn structured_rows(value: Value) -> Result<Vec<RawRow>> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("protein").or_else(|| map.remove("proteins")) {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(IdrError::Parse(
                    "`protein` must be a list of records".to_string(),
                ))
            },
            None => Vec::new(),
        },
        Value::Null => Vec::new(),
        _ => {
            return Err(IdrError::Parse(
                "expected a list of protein records".to_string(),
            ))
        },
    };

    Ok(entries.into_iter().map(structured_row).collect())
}

fn structured_row(entry: Value) -> RawRow {
    let mut row = RawRow::default();

    match entry {
        Value::Object(map) => {
            for (cell, field) in row.cells.iter_mut().zip(FIELDS) {
                *cell = map.get(field).and_then(cell_text);
            }
        },
        Value::Array(values) => {
            if values.len() != FIELDS.len() {
                row.shape_error = Some(format!(
                    "expected {} values [{}], found {}",
                    FIELDS.len(),
                    FIELDS.join(", "),
                    values.len()
                ));
            }
            for (cell, value) in row.cells.iter_mut().zip(values.iter()) {
                *cell = cell_text(value);
            }
        },
        other => {
            row.shape_error = Some(format!(
                "expected an object or a {}-element list, found {}",
                FIELDS.len(),
                other
            ));
        },
    }

    row
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
