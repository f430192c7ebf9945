// Plant Type module - the fixed set of generation technologies in the parameter table
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::constants::{PLANT_TYPE_COUNT, PLANT_TYPE_NAMES};
use crate::models::errors::ParameterError;

/// Generation technology, declared in table index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    Hydro,
    Nuclear,
    Solar,
    Thermal,
    Wind,
}

impl PlantType {
    /// All plant types, position i holding the type with index i.
    pub const ALL: [PlantType; PLANT_TYPE_COUNT] = [
        PlantType::Hydro,
        PlantType::Nuclear,
        PlantType::Solar,
        PlantType::Thermal,
        PlantType::Wind,
    ];

    /// Stable table index of this type
    pub fn index(&self) -> usize {
        match self {
            PlantType::Hydro => 0,
            PlantType::Nuclear => 1,
            PlantType::Solar => 2,
            PlantType::Thermal => 3,
            PlantType::Wind => 4,
        }
    }

    /// Lowercase identifier used in the table and in table files
    pub fn name(&self) -> &'static str {
        PLANT_TYPE_NAMES[self.index()]
    }

    /// Look up the type stored at `index`. Out-of-range indices are an error, never clamped.
    pub fn from_index(index: usize) -> Result<Self, ParameterError> {
        Self::ALL.get(index).copied().ok_or(ParameterError::OutOfRange {
            index,
            len: PLANT_TYPE_COUNT,
        })
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlantType {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PlantType::ALL
            .iter()
            .copied()
            .find(|plant_type| plant_type.name() == wanted)
            .ok_or_else(|| ParameterError::UnknownPlantType(s.to_string()))
    }
}
