// Module declarations for the energy-mix parameter crate

// Core run orchestration
pub mod core {
    pub mod runner;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod experiment_config;
    pub mod plant_type;
}

// Model definitions
pub mod models {
    pub mod errors;
    pub mod parameter_table;
}

// Data loaders
pub mod data {
    pub mod table_loader;
}

// Analysis
pub mod analysis {
    pub mod energy_mix;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::config::plant_type::PlantType;
pub use crate::models::errors::{ParameterError, ValidationError, Violation};
pub use crate::models::parameter_table::{CapacityFactor, ParameterTable, PlantTypeParameters};
