//! Loader for the asset-to-vehicle-name lookup sheet
//!
//! A headerless two-column CSV maintained by hand: asset id, vehicle name.

use std::path::Path;

use joballoc_domain::model::{VehicleDirectory, VehicleEntry};
use joballoc_types::Result;
use log::debug;

/// Load the vehicle lookup from a headerless CSV.
///
/// Only the first two fields of each line are read; lines with fewer
/// than two fields are skipped. When an asset appears twice the later
/// line wins, matching a sheet where corrections are appended at the
/// bottom.
pub fn load_lookup(path: &Path) -> Result<VehicleDirectory> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let (Some(asset), Some(name)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if asset.is_empty() {
            continue;
        }
        entries.push(VehicleEntry {
            asset: asset.to_string(),
            vehicle_name: name.to_string(),
        });
    }

    debug!("{}: {} lookup entries", path.display(), entries.len());
    Ok(VehicleDirectory::from_entries(entries))
}
