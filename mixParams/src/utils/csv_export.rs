use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::analysis::energy_mix::MixReport;
use crate::models::parameter_table::ParameterTable;

pub const PARAMETER_TABLE_FILE: &str = "parameter_table.csv";
pub const ENERGY_MIX_FILE: &str = "energy_mix.csv";

#[derive(Debug, Serialize)]
struct ParameterRow<'a> {
    index: usize,
    name: &'a str,
    avg_pmax_mw: f64,
    capacity_factor_pct: Option<f64>, // empty cell when not applicable
    target_energy_mix_pct: f64,
}

#[derive(Debug, Serialize)]
struct MixRow<'a> {
    name: &'a str,
    target_energy_mix_pct: f64,
    target_production_mw: f64,
    expected_output_per_plant_mw: Option<f64>,
    required_installed_capacity_mw: Option<f64>,
    implied_plant_count: Option<u64>,
}

/// Writes tables and reports into a timestamped run directory
pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvExporter {
    /// Create `<output_dir>/<YYYYmmdd_HHMMSS>/`
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(&timestamp);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn export_parameter_table(&self, table: &ParameterTable) -> Result<PathBuf, Box<dyn Error>> {
        let rows = table.rows()?;
        let path = self.output_dir.join(PARAMETER_TABLE_FILE);
        let mut writer = csv::Writer::from_path(&path)?;

        for row in rows {
            writer.serialize(ParameterRow {
                index: row.plant_type.index(),
                name: row.plant_type.name(),
                avg_pmax_mw: row.avg_pmax,
                capacity_factor_pct: row.capacity_factor.percent(),
                target_energy_mix_pct: row.target_energy_mix_pct,
            })?;
        }
        writer.flush()?;

        info!(path = %path.display(), "Exported parameter table");
        Ok(path)
    }

    pub fn export_energy_mix(&self, report: &MixReport) -> Result<PathBuf, Box<dyn Error>> {
        let path = self.output_dir.join(ENERGY_MIX_FILE);
        let mut writer = csv::Writer::from_path(&path)?;

        for entry in &report.entries {
            writer.serialize(MixRow {
                name: entry.plant_type.name(),
                target_energy_mix_pct: entry.target_energy_mix_pct,
                target_production_mw: entry.target_production_mw,
                expected_output_per_plant_mw: entry.expected_output_per_plant_mw,
                required_installed_capacity_mw: entry.required_installed_capacity_mw,
                implied_plant_count: entry.implied_plant_count,
            })?;
        }
        writer.flush()?;

        info!(path = %path.display(), "Exported energy mix");
        Ok(path)
    }
}
