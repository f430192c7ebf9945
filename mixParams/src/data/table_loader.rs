use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::constants::PLANT_TYPE_COUNT;
use crate::config::plant_type::PlantType;
use crate::models::errors::{ParameterError, ValidationError};
use crate::models::parameter_table::{CapacityFactor, ParameterTable, PlantTypeParameters};

#[derive(Debug)]
pub enum TableLoadError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    UnknownPlantType(String),
    Layout(String),
    Invalid(ValidationError),
}

impl From<std::io::Error> for TableLoadError {
    fn from(err: std::io::Error) -> Self {
        TableLoadError::IoError(err)
    }
}

impl From<serde_json::Error> for TableLoadError {
    fn from(err: serde_json::Error) -> Self {
        TableLoadError::JsonError(err)
    }
}

impl From<ParameterError> for TableLoadError {
    fn from(err: ParameterError) -> Self {
        match err {
            ParameterError::UnknownPlantType(name) => TableLoadError::UnknownPlantType(name),
            other => TableLoadError::Layout(other.to_string()),
        }
    }
}

impl From<ValidationError> for TableLoadError {
    fn from(err: ValidationError) -> Self {
        TableLoadError::Invalid(err)
    }
}

impl std::fmt::Display for TableLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableLoadError::IoError(e) => write!(f, "IO error: {}", e),
            TableLoadError::JsonError(e) => write!(f, "JSON error: {}", e),
            TableLoadError::UnknownPlantType(s) => write!(f, "Unknown plant type: {}", s),
            TableLoadError::Layout(s) => write!(f, "Invalid table layout: {}", s),
            TableLoadError::Invalid(e) => write!(f, "Invalid table: {}", e),
        }
    }
}

impl std::error::Error for TableLoadError {}

/// One `plant_types` entry of a table file
#[derive(Debug, Serialize, Deserialize)]
struct TableEntry {
    name: String,
    avg_pmax: f64,
    capacity_factor: CapacityFactor, // null or -1.0 when not applicable
    target_energy_mix_pct: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    plant_count: usize,
    average_load: f64,
    plant_types: Vec<TableEntry>,
}

impl TryFrom<&ParameterTable> for TableFile {
    type Error = ParameterError;

    fn try_from(table: &ParameterTable) -> Result<Self, Self::Error> {
        Ok(Self {
            plant_count: table.plant_count(),
            average_load: table.average_load(),
            plant_types: table
                .rows()?
                .into_iter()
                .map(|row| TableEntry {
                    name: row.plant_type.name().to_string(),
                    avg_pmax: row.avg_pmax,
                    capacity_factor: row.capacity_factor,
                    target_energy_mix_pct: row.target_energy_mix_pct,
                })
                .collect(),
        })
    }
}

fn build_table(file: TableFile) -> Result<ParameterTable, TableLoadError> {
    if file.plant_types.len() != PLANT_TYPE_COUNT {
        return Err(TableLoadError::Layout(format!(
            "expected {} plant types, found {}",
            PLANT_TYPE_COUNT,
            file.plant_types.len()
        )));
    }

    let mut rows = Vec::with_capacity(PLANT_TYPE_COUNT);
    for (index, entry) in file.plant_types.into_iter().enumerate() {
        let plant_type = entry.name.parse::<PlantType>()?;
        if plant_type.index() != index {
            return Err(TableLoadError::Layout(format!(
                "entry {} is '{}', expected '{}'",
                index,
                plant_type,
                PlantType::ALL[index]
            )));
        }
        rows.push(PlantTypeParameters {
            plant_type,
            avg_pmax: entry.avg_pmax,
            capacity_factor: entry.capacity_factor,
            target_energy_mix_pct: entry.target_energy_mix_pct,
        });
    }

    Ok(ParameterTable::from_rows(file.plant_count, file.average_load, &rows))
}

/// Parse a table from JSON text and validate it.
pub fn parse_table(json: &str) -> Result<ParameterTable, TableLoadError> {
    let file: TableFile = serde_json::from_str(json)?;
    let table = build_table(file)?;
    table.validate()?;
    Ok(table)
}

/// Read a table file, checking only its layout. Invariants are left to the caller.
pub fn read_table(path: impl AsRef<Path>) -> Result<ParameterTable, TableLoadError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let file: TableFile = serde_json::from_reader(reader)?;
    let table = build_table(file)?;
    info!(path = %path.display(), plant_count = table.plant_count(), "Read parameter table");
    Ok(table)
}

/// Load a table file and validate it.
pub fn load_table(path: impl AsRef<Path>) -> Result<ParameterTable, TableLoadError> {
    let table = read_table(path)?;
    table.validate()?;
    Ok(table)
}

/// Render a table in the file format. Tables missing a row are rejected rather than truncated.
pub fn table_to_json(table: &ParameterTable) -> Result<String, TableLoadError> {
    Ok(serde_json::to_string_pretty(&TableFile::try_from(table)?)?)
}

pub fn save_table(table: &ParameterTable, path: impl AsRef<Path>) -> Result<(), TableLoadError> {
    let file = TableFile::try_from(table)?;
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &file)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
