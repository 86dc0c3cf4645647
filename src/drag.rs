/// Drag coefficient lookup against the built-in G1/G7 velocity tables
use crate::DragModel;

/// Drag table data structure
///
/// Rows are `(velocity_fps, cd)` stored from highest to lowest velocity.
#[derive(Debug, Clone, Copy)]
pub struct DragTable {
    pub rows: &'static [(f64, f64)],
}

/// G1 reference table (flat-base projectile)
pub const G1_TABLE: DragTable = DragTable {
    rows: &[
        (4500.0, 0.230),
        (4000.0, 0.229),
        (3500.0, 0.230),
        (3000.0, 0.238),
        (2500.0, 0.256),
        (2000.0, 0.310),
        (1800.0, 0.348),
        (1600.0, 0.415),
        (1400.0, 0.485),
        (1200.0, 0.520),
        (1000.0, 0.500),
        (800.0, 0.460),
        (600.0, 0.420),
    ],
};

/// G7 reference table (long boat-tail projectile)
pub const G7_TABLE: DragTable = DragTable {
    rows: &[
        (4500.0, 0.120),
        (4000.0, 0.119),
        (3500.0, 0.118),
        (3000.0, 0.120),
        (2500.0, 0.126),
        (2000.0, 0.145),
        (1800.0, 0.158),
        (1600.0, 0.175),
        (1400.0, 0.195),
        (1200.0, 0.215),
        (1000.0, 0.225),
        (800.0, 0.220),
        (600.0, 0.210),
    ],
};

impl DragTable {
    pub fn for_model(model: DragModel) -> &'static DragTable {
        match model {
            DragModel::G1 => &G1_TABLE,
            DragModel::G7 => &G7_TABLE,
        }
    }

    pub fn max_velocity(&self) -> f64 {
        self.rows.first().map(|r| r.0).unwrap_or(0.0)
    }

    pub fn min_velocity(&self) -> f64 {
        self.rows.last().map(|r| r.0).unwrap_or(0.0)
    }

    /// Interpolate the drag coefficient for a velocity in ft/s.
    ///
    /// Inside the table the coefficient is linear between the bracketing
    /// rows. Outside it the end coefficient is held flat; retardation curves
    /// do not extrapolate meaningfully and a sloped extension can go
    /// negative past the subsonic end.
    pub fn interpolate(&self, velocity_fps: f64) -> f64 {
        for pair in self.rows.windows(2) {
            let (v_high, cd_high) = pair[0];
            let (v_low, cd_low) = pair[1];

            if velocity_fps >= v_low && velocity_fps <= v_high {
                let t = (velocity_fps - v_low) / (v_high - v_low);
                return cd_low + t * (cd_high - cd_low);
            }
        }

        match (self.rows.first(), self.rows.last()) {
            (Some(&(v_max, cd_max)), _) if velocity_fps > v_max => cd_max,
            (_, Some(&(_, cd_min))) => cd_min,
            _ => 0.0,
        }
    }
}

/// Get the drag coefficient for a velocity (ft/s) under the given model.
pub fn drag_coefficient(velocity_fps: f64, model: DragModel) -> f64 {
    DragTable::for_model(model).interpolate(velocity_fps)
}
