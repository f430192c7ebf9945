use std::path::PathBuf;

use clap::Parser;

use crate::config::experiment_config::ExperimentConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and validate the energy-mix parameter table", long_about = None)]
pub struct Args {
    #[arg(short, long, help = "JSON table file to use instead of the standard table")]
    table: Option<PathBuf>,

    #[arg(short, long, help = "Directory for CSV exports (a timestamped sub-directory is created)")]
    export_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Print the table as JSON")]
    json: bool,

    #[arg(long, default_value_t = false, help = "Skip the energy mix report")]
    no_analysis: bool,

    #[arg(long, default_value_t = false, help = "Continue when the table violates its invariants")]
    allow_invalid: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    pub fn table(&self) -> Option<&PathBuf> {
        self.table.as_ref()
    }

    pub fn export_dir(&self) -> Option<&PathBuf> {
        self.export_dir.as_ref()
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn no_analysis(&self) -> bool {
        self.no_analysis
    }

    pub fn allow_invalid(&self) -> bool {
        self.allow_invalid
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn to_config(&self) -> ExperimentConfig {
        ExperimentConfig {
            table_path: self.table.clone(),
            export_dir: self.export_dir.clone(),
            fail_on_invalid: !self.allow_invalid,
            run_analysis: !self.no_analysis,
            print_json: self.json,
        }
    }
}
