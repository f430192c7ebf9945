use serde::Serialize;
use tracing::{debug, info};

use crate::config::plant_type::PlantType;
use crate::models::parameter_table::ParameterTable;

// Guards ceil() against representation noise just above a whole number
const PLANT_COUNT_EPSILON: f64 = 1e-9;

/// Whole plants needed to deliver `target_mw`; `None` when output is zero or the count is beyond u64.
fn plants_needed(target_mw: f64, output_per_plant_mw: f64) -> Option<u64> {
    if !(output_per_plant_mw > 0.0) {
        return None;
    }
    let count = ((target_mw / output_per_plant_mw) - PLANT_COUNT_EPSILON).ceil().max(0.0);
    (count.is_finite() && count < u64::MAX as f64).then(|| count as u64)
}

/// Sizing figures derived for one plant type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantTypeMix {
    pub plant_type: PlantType,
    pub target_energy_mix_pct: f64,
    pub target_production_mw: f64,
    pub expected_output_per_plant_mw: Option<f64>,
    pub required_installed_capacity_mw: Option<f64>,
    pub implied_plant_count: Option<u64>,
}

/// Energy-mix breakdown of a parameter table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixReport {
    pub average_load: f64,
    pub plant_count: usize,
    pub entries: Vec<PlantTypeMix>,
    pub total_target_production_mw: f64,
    pub implied_plant_total: u64,
    /// `plant_count - implied_plant_total`; negative when the targets need more plants
    pub plant_count_gap: i64,
    /// Types left out of the implied total: no capacity factor, zero output or a count beyond u64
    pub unsized_types: Vec<PlantType>,
}

impl MixReport {
    pub fn from_table(table: &ParameterTable) -> Self {
        let average_load = table.average_load();
        let mut entries = Vec::with_capacity(table.plant_type_count());

        for row in table.iter() {
            let target_production_mw = average_load * row.target_energy_mix_pct / 100.0;
            let expected_output_per_plant_mw = row
                .capacity_factor
                .percent()
                .map(|cf| row.avg_pmax * cf / 100.0);
            let required_installed_capacity_mw = row
                .capacity_factor
                .fraction()
                .filter(|fraction| *fraction > 0.0)
                .map(|fraction| target_production_mw / fraction);
            let implied_plant_count =
                expected_output_per_plant_mw.and_then(|output| plants_needed(target_production_mw, output));

            debug!(
                plant_type = %row.plant_type,
                target_production_mw,
                ?implied_plant_count,
                "Derived plant type mix"
            );

            entries.push(PlantTypeMix {
                plant_type: row.plant_type,
                target_energy_mix_pct: row.target_energy_mix_pct,
                target_production_mw,
                expected_output_per_plant_mw,
                required_installed_capacity_mw,
                implied_plant_count,
            });
        }

        let total_target_production_mw: f64 = entries.iter().map(|e| e.target_production_mw).sum();
        let implied_plant_total = entries
            .iter()
            .filter_map(|e| e.implied_plant_count)
            .fold(0u64, u64::saturating_add);
        let unsized_types = entries
            .iter()
            .filter(|e| e.implied_plant_count.is_none())
            .map(|e| e.plant_type)
            .collect();
        let plant_count_gap = i64::try_from(table.plant_count())
            .unwrap_or(i64::MAX)
            .saturating_sub(i64::try_from(implied_plant_total).unwrap_or(i64::MAX));

        info!(
            total_target_production_mw,
            implied_plant_total,
            plant_count_gap,
            "Energy mix report built"
        );

        Self {
            average_load,
            plant_count: table.plant_count(),
            entries,
            total_target_production_mw,
            implied_plant_total,
            plant_count_gap,
            unsized_types,
        }
    }

    pub fn entry(&self, plant_type: PlantType) -> Option<&PlantTypeMix> {
        self.entries.iter().find(|e| e.plant_type == plant_type)
    }

    /// Plain-text table for terminal output
    pub fn render(&self) -> String {
        let na = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v));

        let mut out = String::new();
        out.push_str(&format!(
            "Energy mix for average load {:.1} MW ({} plants modeled)\n",
            self.average_load, self.plant_count
        ));
        out.push_str(&format!(
            "{:<8} {:>7} {:>12} {:>12} {:>14} {:>7}\n",
            "type", "mix %", "target MW", "MW/plant", "installed MW", "plants"
        ));
        for e in &self.entries {
            out.push_str(&format!(
                "{:<8} {:>7.1} {:>12.2} {:>12} {:>14} {:>7}\n",
                e.plant_type.name(),
                e.target_energy_mix_pct,
                e.target_production_mw,
                na(e.expected_output_per_plant_mw),
                na(e.required_installed_capacity_mw),
                e.implied_plant_count.map_or_else(|| "n/a".to_string(), |c| c.to_string()),
            ));
        }
        out.push_str(&format!(
            "Total target production: {:.2} MW, implied plants: {} (gap to {}: {})\n",
            self.total_target_production_mw, self.implied_plant_total, self.plant_count, self.plant_count_gap
        ));
        if !self.unsized_types.is_empty() {
            let names: Vec<&str> = self.unsized_types.iter().map(|t| t.name()).collect();
            out.push_str(&format!("Not sized: {}\n", names.join(", ")));
        }
        out
    }
}
