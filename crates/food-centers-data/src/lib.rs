//! Food center records and the data plumbing around them.
//!
//! This crate owns the record model ([`FoodCenter`], [`FoodCenterStatus`], [`GeoPoint`]),
//! the polars projection that search predicates run against, and JSON record files.

pub mod files;
pub mod frame;
pub mod record;
pub mod test_data;

mod error;

pub use error::{DataError, Result};
pub use files::{read_records, write_records};
pub use frame::{matched_rows, records_to_frame};
pub use record::{FoodCenter, FoodCenterPatch, FoodCenterStatus, GeoPoint};
pub use test_data::{create_test_data, sample_food_centers};
