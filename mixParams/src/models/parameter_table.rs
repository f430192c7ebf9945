use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::constants::{
    AVERAGE_LOAD, AVG_PMAXS, CAPACITY_FACTORS, CAPACITY_FACTOR_NOT_APPLICABLE, MAX_CAPACITY_FACTOR,
    MIN_CAPACITY_FACTOR, MIX_SUM_TOLERANCE, PLANT_COUNT, PLANT_TYPE_COUNT, PLANT_TYPE_NAMES,
    TARGET_ENERGY_MIX, TARGET_MIX_TOTAL,
};
use crate::config::plant_type::PlantType;
use crate::models::errors::{ParameterError, ValidationError, Violation};

lazy_static! {
    static ref STANDARD_TABLE: ParameterTable = ParameterTable::standard();
}

/// Process-wide standard table, built on first access and never mutated.
pub fn global() -> &'static ParameterTable {
    &STANDARD_TABLE
}

/// Capacity factor of a plant type, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum CapacityFactor {
    Percent(f64),
    /// No capacity-factor constraint is defined for this type
    NotApplicable,
}

impl CapacityFactor {
    /// Decode the raw numeric form, where -1.0 marks "not applicable".
    pub fn from_raw(value: f64) -> Self {
        if value == CAPACITY_FACTOR_NOT_APPLICABLE {
            CapacityFactor::NotApplicable
        } else {
            CapacityFactor::Percent(value)
        }
    }

    /// Raw numeric form, -1.0 for not applicable
    pub fn as_raw(&self) -> f64 {
        match self {
            CapacityFactor::Percent(value) => *value,
            CapacityFactor::NotApplicable => CAPACITY_FACTOR_NOT_APPLICABLE,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            CapacityFactor::Percent(value) => Some(*value),
            CapacityFactor::NotApplicable => None,
        }
    }

    /// Capacity factor as a fraction of pmax (0.0-1.0)
    pub fn fraction(&self) -> Option<f64> {
        self.percent().map(|value| value / 100.0)
    }

    fn is_valid(&self) -> bool {
        match self {
            CapacityFactor::Percent(value) => (MIN_CAPACITY_FACTOR..=MAX_CAPACITY_FACTOR).contains(value),
            CapacityFactor::NotApplicable => true,
        }
    }
}

impl From<Option<f64>> for CapacityFactor {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CapacityFactor::NotApplicable, CapacityFactor::from_raw)
    }
}

impl From<CapacityFactor> for Option<f64> {
    fn from(value: CapacityFactor) -> Self {
        value.percent()
    }
}

/// By-value view of one row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantTypeParameters {
    #[serde(rename = "name")]
    pub plant_type: PlantType,
    pub avg_pmax: f64,                    // MW
    pub capacity_factor: CapacityFactor,
    pub target_energy_mix_pct: f64,       // % of total production
}

/// Immutable plant-type parameters and system scalars, stored as index-aligned columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    plant_count: usize,
    average_load: f64,
    names: Vec<String>,
    avg_pmaxs: Vec<f64>,
    capacity_factors: Vec<CapacityFactor>,
    target_energy_mix: Vec<f64>,
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ParameterTable {
    /// The experiment's reference table.
    pub fn standard() -> Self {
        Self {
            plant_count: PLANT_COUNT,
            average_load: AVERAGE_LOAD,
            names: PLANT_TYPE_NAMES.iter().map(|name| name.to_string()).collect(),
            avg_pmaxs: AVG_PMAXS.to_vec(),
            capacity_factors: CAPACITY_FACTORS.iter().copied().map(CapacityFactor::from_raw).collect(),
            target_energy_mix: TARGET_ENERGY_MIX.to_vec(),
        }
    }

    /// Build a table from raw columns. Nothing is checked here; call [`ParameterTable::validate`].
    pub fn from_parts(
        plant_count: usize,
        average_load: f64,
        names: Vec<String>,
        avg_pmaxs: Vec<f64>,
        capacity_factors: Vec<CapacityFactor>,
        target_energy_mix: Vec<f64>,
    ) -> Self {
        Self {
            plant_count,
            average_load,
            names,
            avg_pmaxs,
            capacity_factors,
            target_energy_mix,
        }
    }

    /// Build a table from one record per plant type, in the order given.
    pub fn from_rows(plant_count: usize, average_load: f64, rows: &[PlantTypeParameters]) -> Self {
        Self {
            plant_count,
            average_load,
            names: rows.iter().map(|row| row.plant_type.name().to_string()).collect(),
            avg_pmaxs: rows.iter().map(|row| row.avg_pmax).collect(),
            capacity_factors: rows.iter().map(|row| row.capacity_factor).collect(),
            target_energy_mix: rows.iter().map(|row| row.target_energy_mix_pct).collect(),
        }
    }

    pub fn plant_type_count(&self) -> usize {
        PLANT_TYPE_COUNT
    }

    pub fn plant_count(&self) -> usize {
        self.plant_count
    }

    pub fn average_load(&self) -> f64 {
        self.average_load
    }

    pub fn plant_type_name(&self, index: usize) -> Result<&str, ParameterError> {
        self.column(&self.names, index).map(String::as_str)
    }

    pub fn avg_pmax(&self, index: usize) -> Result<f64, ParameterError> {
        self.column(&self.avg_pmaxs, index).copied()
    }

    /// Raw capacity factor in percent; -1.0 when not applicable.
    pub fn capacity_factor(&self, index: usize) -> Result<f64, ParameterError> {
        self.capacity_factor_kind(index).map(|cf| cf.as_raw())
    }

    pub fn capacity_factor_kind(&self, index: usize) -> Result<CapacityFactor, ParameterError> {
        self.column(&self.capacity_factors, index).copied()
    }

    pub fn target_energy_mix_pct(&self, index: usize) -> Result<f64, ParameterError> {
        self.column(&self.target_energy_mix, index).copied()
    }

    /// Index of the plant type called `name` in this table
    pub fn plant_type_index(&self, name: &str) -> Result<usize, ParameterError> {
        let wanted = name.trim().to_lowercase();
        self.names
            .iter()
            .take(PLANT_TYPE_COUNT)
            .position(|candidate| *candidate == wanted)
            .ok_or_else(|| ParameterError::UnknownPlantType(name.to_string()))
    }

    /// Full record for one plant type
    pub fn parameters(&self, plant_type: PlantType) -> Result<PlantTypeParameters, ParameterError> {
        let index = plant_type.index();
        Ok(PlantTypeParameters {
            plant_type,
            avg_pmax: self.avg_pmax(index)?,
            capacity_factor: self.capacity_factor_kind(index)?,
            target_energy_mix_pct: self.target_energy_mix_pct(index)?,
        })
    }

    /// Records in index order. Rows a malformed table cannot supply are skipped with a warning.
    pub fn iter(&self) -> impl Iterator<Item = PlantTypeParameters> + '_ {
        PlantType::ALL.iter().filter_map(move |plant_type| match self.parameters(*plant_type) {
            Ok(row) => Some(row),
            Err(error) => {
                warn!(%plant_type, %error, "Skipping plant type missing from table");
                None
            }
        })
    }

    /// Every record in index order, failing on the first row the table cannot supply.
    pub fn rows(&self) -> Result<Vec<PlantTypeParameters>, ParameterError> {
        PlantType::ALL
            .iter()
            .map(|plant_type| self.parameters(*plant_type))
            .collect()
    }

    pub fn total_target_mix_pct(&self) -> f64 {
        self.target_energy_mix.iter().sum()
    }

    /// Check every table invariant, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        let columns = [
            ("plant_type_names", self.names.len()),
            ("avg_pmax", self.avg_pmaxs.len()),
            ("capacity_factor", self.capacity_factors.len()),
            ("target_energy_mix_pct", self.target_energy_mix.len()),
        ];
        for (field, found) in columns {
            if found != PLANT_TYPE_COUNT {
                violations.push(Violation::LengthMismatch {
                    field,
                    expected: PLANT_TYPE_COUNT,
                    found,
                });
            }
        }

        let mut seen = HashSet::new();
        for (index, name) in self.names.iter().enumerate() {
            if !seen.insert(name.as_str()) {
                violations.push(Violation::DuplicateName { name: name.clone() });
            }
            match PlantType::ALL.iter().find(|plant_type| plant_type.name() == name.as_str()) {
                Some(plant_type) if index < PLANT_TYPE_COUNT && plant_type.index() != index => {
                    violations.push(Violation::NameOrder {
                        index,
                        expected: PlantType::ALL[index],
                        found: name.clone(),
                    });
                }
                Some(_) => {}
                None => violations.push(Violation::UnknownName {
                    index,
                    name: name.clone(),
                }),
            }
        }

        let label = |index: usize| -> String {
            self.names
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("#{}", index))
        };

        for (index, value) in self.avg_pmaxs.iter().enumerate() {
            if !(value.is_finite() && *value > 0.0) {
                violations.push(Violation::NonPositivePmax {
                    name: label(index),
                    value: *value,
                });
            }
        }

        for (index, cf) in self.capacity_factors.iter().enumerate() {
            if !cf.is_valid() {
                violations.push(Violation::CapacityFactorOutOfRange {
                    name: label(index),
                    value: cf.as_raw(),
                });
            }
        }

        for (index, value) in self.target_energy_mix.iter().enumerate() {
            if *value < 0.0 {
                violations.push(Violation::NegativeMix {
                    name: label(index),
                    value: *value,
                });
            }
        }

        let total = self.total_target_mix_pct();
        if !((total - TARGET_MIX_TOTAL).abs() <= MIX_SUM_TOLERANCE) {
            violations.push(Violation::MixSum { total });
        }

        if !(self.average_load.is_finite() && self.average_load > 0.0) {
            violations.push(Violation::NonPositiveLoad {
                value: self.average_load,
            });
        }

        if violations.is_empty() {
            debug!(plant_types = PLANT_TYPE_COUNT, "Parameter table validated");
            Ok(())
        } else {
            for violation in &violations {
                warn!(%violation, "Parameter table invariant violated");
            }
            Err(ValidationError { violations })
        }
    }

    fn column<'a, T>(&self, column: &'a [T], index: usize) -> Result<&'a T, ParameterError> {
        if index >= PLANT_TYPE_COUNT {
            return Err(ParameterError::OutOfRange {
                index,
                len: PLANT_TYPE_COUNT,
            });
        }
        column.get(index).ok_or(ParameterError::OutOfRange {
            index,
            len: column.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: [(&str, f64, f64, f64); 5] = [
        ("hydro", 250.0, 30.0, 9.0),
        ("nuclear", 400.0, 95.0, 36.0),
        ("solar", 46.650, 15.0, 17.0),
        ("thermal", 140.910, -1.0, 2.0),
        ("wind", 48.0, 25.0, 36.0),
    ];

    #[test]
    fn standard_table_matches_reference_values() {
        let table = ParameterTable::standard();
        for (i, (name, pmax, cf, mix)) in REFERENCE.iter().enumerate() {
            assert_eq!(table.plant_type_name(i).unwrap(), *name);
            assert_eq!(table.avg_pmax(i).unwrap(), *pmax);
            assert_eq!(table.capacity_factor(i).unwrap(), *cf);
            assert_eq!(table.target_energy_mix_pct(i).unwrap(), *mix);
        }
    }

    #[test]
    fn scalars() {
        let table = global();
        assert_eq!(table.plant_type_count(), 5);
        assert_eq!(table.plant_count(), 62);
        assert_eq!(table.average_load(), 2800.0);
    }

    #[test]
    fn every_indexed_accessor_rejects_index_five() {
        let table = ParameterTable::standard();
        let expected = ParameterError::OutOfRange { index: 5, len: 5 };
        assert_eq!(table.plant_type_name(5), Err(expected.clone()));
        assert_eq!(table.avg_pmax(5), Err(expected.clone()));
        assert_eq!(table.capacity_factor(5), Err(expected.clone()));
        assert_eq!(table.capacity_factor_kind(5), Err(expected.clone()));
        assert_eq!(table.target_energy_mix_pct(5), Err(expected));
    }

    #[test]
    fn thermal_capacity_factor_is_not_applicable() {
        let table = ParameterTable::standard();
        assert_eq!(table.capacity_factor_kind(3).unwrap(), CapacityFactor::NotApplicable);
        assert_eq!(table.capacity_factor(3).unwrap(), -1.0);
        assert_eq!(table.capacity_factor_kind(1).unwrap(), CapacityFactor::Percent(95.0));
    }

    #[test]
    fn standard_table_is_valid() {
        let table = ParameterTable::standard();
        assert!(table.validate().is_ok());
        assert!((table.total_target_mix_pct() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn lookup_by_name_and_type() {
        let table = ParameterTable::standard();
        assert_eq!(table.plant_type_index("Solar").unwrap(), 2);
        assert!(matches!(
            table.plant_type_index("geothermal"),
            Err(ParameterError::UnknownPlantType(_))
        ));
        let wind = table.parameters(PlantType::Wind).unwrap();
        assert_eq!(wind.avg_pmax, 48.0);
        assert_eq!(wind.target_energy_mix_pct, 36.0);
        assert_eq!(table.iter().count(), 5);
    }

    #[test]
    fn capacity_factor_raw_round_trip() {
        assert_eq!(CapacityFactor::from_raw(-1.0), CapacityFactor::NotApplicable);
        assert_eq!(CapacityFactor::from_raw(25.0).fraction(), Some(0.25));
        assert_eq!(CapacityFactor::from(None), CapacityFactor::NotApplicable);
        assert_eq!(Option::<f64>::from(CapacityFactor::Percent(15.0)), Some(15.0));
    }

    #[test]
    fn validate_reports_every_violation() {
        let table = ParameterTable::from_parts(
            62,
            2800.0,
            vec!["hydro".into(), "nuclear".into(), "solar".into(), "thermal".into(), "wind".into()],
            vec![250.0, 400.0, 46.65, 140.91],
            vec![
                CapacityFactor::Percent(30.0),
                CapacityFactor::Percent(120.0),
                CapacityFactor::Percent(-2.0),
                CapacityFactor::NotApplicable,
                CapacityFactor::Percent(25.0),
            ],
            vec![9.0, 36.0, 17.0, 2.0, 35.0],
        );

        let err = table.validate().unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::LengthMismatch { field: "avg_pmax", found: 4, .. })));
        assert!(err.contains(|v| matches!(v, Violation::CapacityFactorOutOfRange { name, .. } if name == "nuclear")));
        assert!(err.contains(|v| matches!(v, Violation::CapacityFactorOutOfRange { name, .. } if name == "solar")));
        assert!(err.contains(|v| matches!(v, Violation::MixSum { .. })));
        assert_eq!(err.violations.len(), 4);
    }

    #[test]
    fn validate_rejects_misordered_and_duplicate_names() {
        let mut rows: Vec<PlantTypeParameters> = ParameterTable::standard().iter().collect();
        rows.swap(0, 1);
        rows[4].plant_type = PlantType::Hydro;
        let table = ParameterTable::from_rows(62, 2800.0, &rows);

        let err = table.validate().unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::DuplicateName { name } if name == "hydro")));
        assert!(err.contains(|v| matches!(v, Violation::NameOrder { index: 0, expected: PlantType::Hydro, .. })));
    }

    fn standard_names() -> Vec<String> {
        PLANT_TYPE_NAMES.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn validate_requires_exact_lowercase_names() {
        let mut names = standard_names();
        names[0] = "HYDRO".into();
        names[1] = "Nuclear".into();
        let table = ParameterTable::from_parts(
            62,
            2800.0,
            names,
            AVG_PMAXS.to_vec(),
            CAPACITY_FACTORS.iter().copied().map(CapacityFactor::from_raw).collect(),
            TARGET_ENERGY_MIX.to_vec(),
        );

        let err = table.validate().unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::UnknownName { index: 0, name } if name == "HYDRO")));
        assert!(err.contains(|v| matches!(v, Violation::UnknownName { index: 1, name } if name == "Nuclear")));
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut names = standard_names();
        names[2] = "geothermal".into();
        let table = ParameterTable::from_parts(
            62,
            0.0,
            names,
            vec![250.0, f64::NAN, 46.65, 0.0, 48.0],
            CAPACITY_FACTORS.iter().copied().map(CapacityFactor::from_raw).collect(),
            vec![9.0, 36.0, 17.0, -2.0, 40.0],
        );

        let err = table.validate().unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::UnknownName { index: 2, name } if name == "geothermal")));
        assert!(err.contains(|v| matches!(v, Violation::NonPositivePmax { name, value } if name == "nuclear" && value.is_nan())));
        assert!(err.contains(|v| matches!(v, Violation::NonPositivePmax { name, value } if name == "thermal" && *value == 0.0)));
        assert!(err.contains(|v| matches!(v, Violation::NegativeMix { name, value } if name == "thermal" && *value == -2.0)));
        assert!(err.contains(|v| matches!(v, Violation::NonPositiveLoad { value } if *value == 0.0)));
        assert!(!err.contains(|v| matches!(v, Violation::MixSum { .. })));
    }

    #[test]
    fn extra_names_are_a_length_problem_not_an_order_problem() {
        let mut names = standard_names();
        names.push("wind".into());
        let table = ParameterTable::from_parts(
            62,
            2800.0,
            names,
            AVG_PMAXS.to_vec(),
            CAPACITY_FACTORS.iter().copied().map(CapacityFactor::from_raw).collect(),
            TARGET_ENERGY_MIX.to_vec(),
        );

        let err = table.validate().unwrap_err();
        assert!(err.contains(|v| matches!(v, Violation::LengthMismatch { field: "plant_type_names", found: 6, .. })));
        assert!(err.contains(|v| matches!(v, Violation::DuplicateName { name } if name == "wind")));
        assert!(!err.contains(|v| matches!(v, Violation::NameOrder { .. })));
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn rows_fails_where_iter_skips() {
        let table = ParameterTable::from_parts(
            62,
            2800.0,
            standard_names(),
            AVG_PMAXS[..3].to_vec(),
            CAPACITY_FACTORS.iter().copied().map(CapacityFactor::from_raw).collect(),
            TARGET_ENERGY_MIX.to_vec(),
        );
        assert_eq!(table.iter().count(), 3);
        assert_eq!(table.rows(), Err(ParameterError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(ParameterTable::standard().rows().unwrap().len(), 5);
    }

    #[test]
    fn short_table_reports_out_of_range_against_its_length() {
        let table = ParameterTable::from_parts(62, 2800.0, vec!["hydro".into()], vec![], vec![], vec![]);
        assert_eq!(table.plant_type_name(0).unwrap(), "hydro");
        assert_eq!(table.avg_pmax(0), Err(ParameterError::OutOfRange { index: 0, len: 0 }));
        assert_eq!(table.iter().count(), 0);
    }
}
