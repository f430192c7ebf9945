use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::analysis::energy_mix::MixReport;
use crate::config::experiment_config::ExperimentConfig;
use crate::data::table_loader::{read_table, table_to_json};
use crate::models::errors::ValidationError;
use crate::models::parameter_table::{self, ParameterTable};
use crate::utils::csv_export::CsvExporter;

/// Everything one run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub table: ParameterTable,
    pub validation: Result<(), ValidationError>,
    pub report: Option<MixReport>,
    pub json: Option<String>,
    pub export_dir: Option<PathBuf>,
}

pub fn run(config: &ExperimentConfig) -> Result<RunOutcome> {
    let table = match &config.table_path {
        Some(path) => read_table(path)?,
        None => parameter_table::global().clone(),
    };

    let validation = table.validate();
    if let Err(err) = &validation {
        if config.fail_on_invalid {
            bail!("{}", err);
        }
        warn!(violations = err.violations.len(), "Continuing with an invalid parameter table");
    }

    let report = config.run_analysis.then(|| MixReport::from_table(&table));

    let json = if config.print_json {
        Some(table_to_json(&table)?)
    } else {
        None
    };

    let export_dir = match &config.export_dir {
        Some(dir) => {
            let exporter = CsvExporter::new(dir).map_err(|e| anyhow::anyhow!("{}", e))?;
            exporter
                .export_parameter_table(&table)
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            if let Some(report) = &report {
                exporter
                    .export_energy_mix(report)
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
            }
            Some(exporter.output_dir().to_path_buf())
        }
        None => None,
    };

    info!(
        plant_types = table.plant_type_count(),
        valid = validation.is_ok(),
        "Run complete"
    );

    Ok(RunOutcome {
        table,
        validation,
        report,
        json,
        export_dir,
    })
}
