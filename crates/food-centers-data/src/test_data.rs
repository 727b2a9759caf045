use std::io::Write;

use tempfile::NamedTempFile;
use tracing::info;

use super::error::Result;
use crate::{FoodCenter, FoodCenterStatus};

/// A fixed set of food centers around Philadelphia and Springfield.
///
/// Coordinates are derived, ids are `fc-1`..`fc-8`. `fc-7` has no location at all and
/// `fc-8` carries a three-element coordinate array, so neither can match a distance search.
pub fn sample_food_centers() -> Vec<FoodCenter> {
    use FoodCenterStatus::{Deleted, Listed, Unlisted};

    let base_data = [
        ("Center City Pantry", "1400 Spring Garden St", "Philadelphia", "PA", -75.1617, 39.9625, Listed, "user-1"),
        ("Fishtown Community Fridge", "200 E Girard Ave", "Philadelphia", "PA", -75.1307, 39.9686, Listed, "user-1"),
        ("Camden Food Bank", "501 Cooper St", "Camden", "NJ", -75.1196, 39.9489, Unlisted, "user-2"),
        ("Wilmington Meals", "800 N French St", "Wilmington", "DE", -75.5467, 39.7447, Listed, "user-2"),
        ("Old Springfield Kitchen", "12 Main St", "Springfield", "IL", -89.6501, 39.7817, Listed, "user-3"),
        ("Lancaster Soup Line", "35 Springhouse Rd", "Lancaster", "PA", -76.3055, 40.0379, Deleted, "user-3"),
    ];

    let mut centers: Vec<FoodCenter> = base_data
        .into_iter()
        .enumerate()
        .map(|(i, (name, address, city, state, lon, lat, status, user))| {
            let mut center = FoodCenter::new(name)
                .with_address(address, city, state)
                .with_location(lon, lat)
                .with_status(status)
                .with_capacity(25 * (i as u32 + 1))
                .with_user(user);
            center.id = Some(format!("fc-{}", i + 1));
            center.contact_number = Some(format!("555-01{i:02}"));
            center.derive_coordinates();
            center
        })
        .collect();

    let mut unlocated = FoodCenter::new("Harrisburg Pantry")
        .with_address("1 Market Sq", "Harrisburg", "PA")
        .with_user("user-1");
    unlocated.id = Some("fc-7".to_string());
    centers.push(unlocated);

    let mut odd = FoodCenter::new("Trenton Table")
        .with_address("10 State St", "Trenton", "NJ")
        .with_location(-74.7597, 40.2206);
    if let Some(location) = odd.location.as_mut() {
        location.coordinates.push(15.0);
    }
    odd.id = Some("fc-8".to_string());
    odd.derive_coordinates();
    centers.push(odd);

    centers
}

/// Write [`sample_food_centers`] to a temporary JSON file.
pub fn create_test_data() -> Result<NamedTempFile> {
    let records = sample_food_centers();
    info!(count = records.len(), "Creating food center test data");

    let mut file = NamedTempFile::new()?;
    serde_json::to_writer_pretty(&mut file, &records)?;
    file.flush()?;
    Ok(file)
}
