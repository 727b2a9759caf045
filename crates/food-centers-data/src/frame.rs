//! Columnar projection of food center records.
//!
//! Only the columns a search predicate reads are projected. The `row` column holds the
//! position of each record in the source slice so matches can be mapped back.

use polars::prelude::*;
use tracing::debug;

use crate::{FoodCenter, error::Result};

pub const ROW: &str = "row";
pub const STATUS: &str = "status";
pub const ADDRESS: &str = "address";
pub const CITY: &str = "city";
pub const STATE: &str = "state";
pub const LONGITUDE: &str = "longitude";
pub const LATITUDE: &str = "latitude";
pub const USER_ID: &str = "user_id";

/// Build the query frame for `records`, one row per record in slice order.
pub fn records_to_frame(records: &[FoodCenter]) -> Result<DataFrame> {
    let rows: Vec<u32> = (0..records.len() as u32).collect();
    let statuses: Vec<&str> = records.iter().map(|r| r.status.as_str()).collect();
    let addresses: Vec<Option<String>> = records.iter().map(|r| r.address.clone()).collect();
    let cities: Vec<Option<String>> = records.iter().map(|r| r.city.clone()).collect();
    let states: Vec<Option<String>> = records.iter().map(|r| r.state.clone()).collect();
    let longitudes: Vec<Option<f64>> = records.iter().map(|r| r.longitude).collect();
    let latitudes: Vec<Option<f64>> = records.iter().map(|r| r.latitude).collect();
    let user_ids: Vec<Option<String>> = records.iter().map(|r| r.user_id.clone()).collect();

    let df = df!(
        ROW => rows,
        STATUS => statuses,
        ADDRESS => addresses,
        CITY => cities,
        STATE => states,
        LONGITUDE => longitudes,
        LATITUDE => latitudes,
        USER_ID => user_ids
    )?;

    debug!(rows = df.height(), "Built food center frame");
    Ok(df)
}

/// Read the `row` column of a filtered frame back into record positions.
pub fn matched_rows(df: &DataFrame) -> Result<Vec<usize>> {
    Ok(df
        .column(ROW)?
        .u32()?
        .into_iter()
        .flatten()
        .map(|row| row as usize)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FoodCenterStatus;

    #[test]
    fn test_frame_shape_and_nulls() {
        let mut located = FoodCenter::new("Located")
            .with_address("1 Main St", "Springfield", "IL")
            .with_location(-89.65, 39.78);
        located.derive_coordinates();
        let bare = FoodCenter::new("Bare").with_status(FoodCenterStatus::Unlisted);

        let df = records_to_frame(&[located, bare]).unwrap();

        assert_eq!(df.height(), 2);
        let columns: Vec<&str> = df.get_column_names().into_iter().map(|c| c.as_str()).collect();
        assert_eq!(
            columns,
            [ROW, STATUS, ADDRESS, CITY, STATE, LONGITUDE, LATITUDE, USER_ID]
        );
        assert_eq!(df.column(STATUS).unwrap().str().unwrap().get(1), Some("UNLISTED"));
        assert_eq!(df.column(LONGITUDE).unwrap().f64().unwrap().get(0), Some(-89.65));
        assert_eq!(df.column(LATITUDE).unwrap().f64().unwrap().get(1), None);
        assert_eq!(df.column(CITY).unwrap().str().unwrap().get(1), None);
    }

    #[test]
    fn test_matched_rows_follow_filter() {
        let records = vec![
            FoodCenter::new("A"),
            FoodCenter::new("B").with_status(FoodCenterStatus::Deleted),
            FoodCenter::new("C"),
        ];
        let df = records_to_frame(&records)
            .unwrap()
            .lazy()
            .filter(col(STATUS).eq(lit("LISTED")))
            .collect()
            .unwrap();

        assert_eq!(matched_rows(&df).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_empty_records() {
        let df = records_to_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert!(matched_rows(&df).unwrap().is_empty());
    }
}
