//! Vehicle name lookup

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entry of the vehicle lookup sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleEntry {
    pub asset: String,
    pub vehicle_name: String,
}

/// Asset → vehicle-name directory with trim-normalized keys.
///
/// When the lookup sheet lists an asset twice, the later entry wins; a
/// hand-maintained sheet puts the correction at the bottom.
#[derive(Debug, Default)]
pub struct VehicleDirectory {
    vehicles: HashMap<String, String>,
}

impl VehicleDirectory {
    pub fn from_entries(entries: Vec<VehicleEntry>) -> Self {
        let vehicles = entries
            .into_iter()
            .map(|e| (e.asset.trim().to_string(), e.vehicle_name.trim().to_string()))
            .collect();
        Self { vehicles }
    }

    /// Look up the human-readable name for an asset id.
    ///
    /// Returns None when the asset is not in the lookup sheet.
    pub fn name_for(&self, asset: &str) -> Option<&str> {
        self.vehicles.get(asset.trim()).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
