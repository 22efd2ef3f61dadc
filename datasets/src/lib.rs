//! `flushot-datasets` loads the flu vaccination survey and ships a small sample of it for tests and examples.
//!
//! ## The Big Picture
//!
//! `flushot-datasets` is a crate in the `flushot` workspace. It turns the two survey tables, one
//! with the answers of every respondent and one with their vaccination status, into
//! [`LabeledRecords`](flushot::dataset::LabeledRecords) ready for splitting and preprocessing.
//!
//! ## Current State
//!
//! The loader reads
//!
//! * a features table with a `respondent_id` column and one column per survey question
//! * a labels table with a `respondent_id` column and the `h1n1_vaccine` and `seasonal_vaccine` targets
//!
//! either as plain CSV or gzip compressed CSV. Empty cells are kept as missing answers, columns
//! which are not part of the [`Schema`](flushot::dataset::Schema) are skipped.
//!
//! ## Using the sample
//!
//! ```ignore
//! let (train, valid) = flushot_datasets::sample()?
//!     .split_with_ratio(0.8);
//! /// ...
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use flushot::dataset::{
    Column, FieldKind, FieldSpec, LabeledRecords, Labels, RecordSet, Schema, ID_COLUMN,
    SEASONAL_TARGET,
};
use flushot::DataIntegrityError;
use thiserror::Error;
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("column `{0}` not found in the header")]
    MissingColumn(String),
    /// `row` counts data rows from zero, the header excluded
    #[error("invalid value `{value}` for field `{field}` in row {row}")]
    InvalidValue {
        field: String,
        row: usize,
        value: String,
    },
    #[error(transparent)]
    FlushotError(#[from] flushot::Error),
}

/// Parse an integral cell in `min..=max`, accepting both `3` and `3.0`
fn parse_level(field: &str, row: usize, cell: &str, min: u32, max: u32) -> Result<Option<u32>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    let invalid = || DatasetError::InvalidValue {
        field: field.to_string(),
        row,
        value: cell.to_string(),
    };
    let value: f64 = cell.parse().map_err(|_| invalid())?;
    if value.fract() != 0.0 || value < f64::from(min) || value > f64::from(max) {
        return Err(invalid());
    }

    Ok(Some(value as u32))
}

fn parse_levels<'a, I>(field: &str, cells: I, min: u32, max: u32) -> Result<Vec<Option<u32>>>
where
    I: Iterator<Item = &'a str>,
{
    cells
        .enumerate()
        .map(|(row, cell)| parse_level(field, row, cell, min, max))
        .collect()
}

fn parse_column<'a, I>(field: &FieldSpec, cells: I) -> Result<Column>
where
    I: Iterator<Item = &'a str>,
{
    let name = field.name();
    let column = match field.kind() {
        FieldKind::Binary => Column::binary(
            parse_levels(name, cells, 0, 1)?
                .into_iter()
                .map(|x| x.map(|x| x == 1)),
        ),
        FieldKind::Ordinal { min, max } => Column::ordinal(
            parse_levels(name, cells, min.into(), max.into())?
                .into_iter()
                .map(|x| x.map(|x| x as u8)),
        ),
        FieldKind::Count => Column::count(parse_levels(name, cells, 0, u32::MAX)?),
        FieldKind::Categorical => {
            Column::categorical(cells.map(|cell| Some(cell).filter(|x| !x.trim().is_empty())))
        }
    };

    Ok(column)
}

/// Read the features table of the survey
///
/// The header has to contain the `respondent_id` column. Schema fields missing from the header
/// are left out of the result, so that the preprocessor can report them, and columns which are
/// not part of the schema are skipped.
pub fn read_features<R: Read>(reader: R, schema: &Schema) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let header = reader.headers()?.clone();
    let position = |name: &str| header.iter().position(|x| x == name);

    let id_idx =
        position(ID_COLUMN).ok_or_else(|| DatasetError::MissingColumn(ID_COLUMN.to_string()))?;
    let fields = schema
        .fields()
        .iter()
        .filter_map(|field| position(field.name()).map(|idx| (field, idx)))
        .collect::<Vec<_>>();

    if fields.len() < schema.len() {
        debug!(
            absent = schema.len() - fields.len(),
            "schema fields not found in the header"
        );
    }

    let rows = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, _>>()?;
    let ids = rows
        .iter()
        .map(|row| row[id_idx].trim())
        .collect::<Vec<_>>();

    let mut records = RecordSet::new(ids)?;
    for (field, idx) in fields {
        let column = parse_column(field, rows.iter().map(|row| &row[idx]))?;
        records = records.with_column(field.name(), column)?;
    }

    Ok(records)
}

/// Read the `target` column of the labels table
///
/// Labels are accepted as `0`, `1`, `0.0` or `1.0`, anything else is an invalid label.
pub fn read_labels<R: Read>(reader: R, target: &str) -> Result<Labels> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let header = reader.headers()?.clone();
    let column = |name: &str| {
        header
            .iter()
            .position(|x| x == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let (id_idx, target_idx) = (column(ID_COLUMN)?, column(target)?);

    let mut pairs = Vec::new();
    for row in reader.records() {
        let row = row?;
        let (id, value) = (row[id_idx].trim(), row[target_idx].trim());
        let label = match value {
            "0" | "0.0" => 0,
            "1" | "1.0" => 1,
            _ => {
                return Err(flushot::Error::from(DataIntegrityError::InvalidLabel {
                    id: id.to_string(),
                    value: value.to_string(),
                })
                .into())
            }
        };
        pairs.push((id.to_string(), label));
    }

    Ok(Labels::new(target, pairs)?)
}

fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);

    // unzip file
    if path.extension().and_then(|ext| ext.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Load and join the features and labels tables from disk
///
/// Files ending in `.gz` are decompressed on the fly. Both files are fully read and closed
/// before the respondents are joined with their labels.
pub fn load<P, Q>(features: P, labels: Q, schema: &Schema, target: &str) -> Result<LabeledRecords>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let records = read_features(open(features.as_ref())?, schema)?;
    let labels = read_labels(open(labels.as_ref())?, target)?;
    let data = LabeledRecords::join(records, labels)?;

    info!(
        nsamples = data.nsamples(),
        nfields = data.records().field_names().count(),
        label = target,
        "loaded survey"
    );

    Ok(data)
}

/// Read in the bundled sample of the survey
///
/// The sample holds 60 respondents with the fields of [`Schema::seasonal_flu_default`] and the
/// `seasonal_vaccine` target.
pub fn sample() -> Result<LabeledRecords> {
    let features = include_bytes!("../data/training_set_features.csv.gz");
    let labels = include_bytes!("../data/training_set_labels.csv.gz");

    let records = read_features(
        GzDecoder::new(&features[..]),
        &Schema::seasonal_flu_default(),
    )?;
    let labels = read_labels(GzDecoder::new(&labels[..]), SEASONAL_TARGET)?;

    Ok(LabeledRecords::join(records, labels)?)
}
