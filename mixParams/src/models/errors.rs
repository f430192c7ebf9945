use std::fmt;

use crate::config::plant_type::PlantType;

/// Failure of a single table lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Index outside `0..len`
    OutOfRange { index: usize, len: usize },
    UnknownPlantType(String),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::OutOfRange { index, len } => {
                write!(f, "Plant type index {} out of range (valid: 0..{})", index, len)
            }
            ParameterError::UnknownPlantType(name) => write!(f, "Unknown plant type: {}", name),
        }
    }
}

impl std::error::Error for ParameterError {}

/// One broken table invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    LengthMismatch { field: &'static str, expected: usize, found: usize },
    UnknownName { index: usize, name: String },
    NameOrder { index: usize, expected: PlantType, found: String },
    DuplicateName { name: String },
    MixSum { total: f64 },
    NegativeMix { name: String, value: f64 },
    CapacityFactorOutOfRange { name: String, value: f64 },
    NonPositivePmax { name: String, value: f64 },
    NonPositiveLoad { value: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::LengthMismatch { field, expected, found } => {
                write!(f, "{} has {} entries, expected {}", field, found, expected)
            }
            Violation::UnknownName { index, name } => {
                write!(f, "unknown plant type '{}' at index {}", name, index)
            }
            Violation::NameOrder { index, expected, found } => {
                write!(f, "index {} holds '{}', expected '{}'", index, found, expected)
            }
            Violation::DuplicateName { name } => write!(f, "plant type '{}' appears more than once", name),
            Violation::MixSum { total } => {
                write!(f, "target energy mix sums to {:.6}%, expected 100%", total)
            }
            Violation::NegativeMix { name, value } => {
                write!(f, "target energy mix for {} is negative ({})", name, value)
            }
            Violation::CapacityFactorOutOfRange { name, value } => {
                write!(f, "capacity factor for {} is {}, expected 0..=100 or not applicable", name, value)
            }
            Violation::NonPositivePmax { name, value } => {
                write!(f, "average pmax for {} must be positive, got {}", name, value)
            }
            Violation::NonPositiveLoad { value } => {
                write!(f, "average load must be positive, got {}", value)
            }
        }
    }
}

/// Every violation found by a validation pass, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn contains(&self, predicate: impl Fn(&Violation) -> bool) -> bool {
        self.violations.iter().any(predicate)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invariant violation(s): ", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
