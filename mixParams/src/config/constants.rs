// System Constants
pub const PLANT_COUNT: usize = 62;                   // Individual plants modeled
pub const PLANT_TYPE_COUNT: usize = 5;
pub const AVERAGE_LOAD: f64 = 2800.0;                // MW

// Plant Type Table (index-aligned: hydro, nuclear, solar, thermal, wind)
pub const PLANT_TYPE_NAMES: [&str; PLANT_TYPE_COUNT] = ["hydro", "nuclear", "solar", "thermal", "wind"];
pub const AVG_PMAXS: [f64; PLANT_TYPE_COUNT] = [250.0, 400.0, 46.650, 140.910, 48.0];  // MW
pub const CAPACITY_FACTORS: [f64; PLANT_TYPE_COUNT] = [30.0, 95.0, 15.0, -1.0, 25.0]; // %, -1.0 = n/a
pub const TARGET_ENERGY_MIX: [f64; PLANT_TYPE_COUNT] = [9.0, 36.0, 17.0, 2.0, 36.0]; // % of production

// Capacity Factor Bounds
pub const CAPACITY_FACTOR_NOT_APPLICABLE: f64 = -1.0;
pub const MIN_CAPACITY_FACTOR: f64 = 0.0;
pub const MAX_CAPACITY_FACTOR: f64 = 100.0;

// Validation
pub const TARGET_MIX_TOTAL: f64 = 100.0;
pub const MIX_SUM_TOLERANCE: f64 = 1e-9;
