use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Run-time options for a parameter-table run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub table_path: Option<PathBuf>,     // JSON override; standard table when absent
    pub export_dir: Option<PathBuf>,     // CSV output root
    pub fail_on_invalid: bool,
    pub run_analysis: bool,
    pub print_json: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            export_dir: None,
            fail_on_invalid: true,
            run_analysis: true,
            print_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ExperimentConfig = serde_json::from_str(r#"{"export_dir": "out"}"#).unwrap();
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
        assert!(config.fail_on_invalid);
        assert!(config.run_analysis);
        assert!(config.table_path.is_none());
    }
}
