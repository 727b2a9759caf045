//! Food Centers - search and filtering for food center locations
//!
//! Food centers are physical sites (pantries, community fridges, soup kitchens) with an
//! address, an optional geographic point and a visibility status. This crate turns the
//! optional parameters of a search (free text, coordinates and radius, statuses) into a
//! single [`FilterPredicate`] and evaluates it for both listing and counting, so the two
//! always agree.
//!
//! # Quick Start
//!
//! ```rust
//! use food_centers::{FoodCenterStore, SearchRequest, build_filter, data::sample_food_centers};
//!
//! let store = FoodCenterStore::from_records(sample_food_centers(), Default::default())?;
//!
//! // Text search over state, city and address, listed centers only
//! let request = SearchRequest::new().query("spring");
//! let predicate = build_filter(&request);
//! assert!(predicate.text_match().is_some());
//!
//! let centers = store.find(&predicate)?;
//! assert_eq!(centers.len(), store.count(&predicate)?);
//! # Ok::<(), food_centers::error::FoodCenterError>(())
//! ```
//!
//! # Search rules
//!
//! - **Status**: only `LISTED` centers unless the request names statuses, which then
//!   replace the default entirely.
//! - **Distance**: `lat` and `long` together select centers within `radius` miles
//!   (default 5) and the text query is ignored.
//! - **Text**: otherwise `q` matches any of state, city or address, case-insensitively.
use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
pub mod error;
mod filter;
mod query;
mod store;

pub use store::FoodCenterStore;

pub use config::{DEFAULT_RADIUS_MILES, EARTH_RADIUS_MILES, FilterConfig, FilterConfigBuilder};
pub use filter::{
    FilterPredicate, MatchClause, SearchRequest, SpatialClause, TextMatch, build_filter,
    build_filter_with_config,
};
pub use food_centers_data as data;
pub use food_centers_data::{FoodCenter, FoodCenterPatch, FoodCenterStatus, GeoPoint};
pub use polars;
pub use query::{QueryError, predicate_expr};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the food centers library.
///
/// `RUST_LOG` takes precedence when set; otherwise `level` is used. Only the first call
/// installs a subscriber, later calls are no-ops.
///
/// # Examples
///
/// ```rust
/// use food_centers::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), food_centers::error::FoodCenterError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::FoodCenterError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("polars=warn".parse()?);

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_logging_init_is_idempotent() {
        setup_test_env();
        assert!(init_logging(tracing::Level::DEBUG).is_ok());
    }

    #[test]
    fn test_store_creation() {
        setup_test_env();

        let store = FoodCenterStore::from_records(data::sample_food_centers(), FilterConfig::default());
        assert!(store.is_ok(), "Should be able to create a store from sample data");
    }

    #[test]
    fn test_configured_store_uses_its_config() {
        setup_test_env();

        let config = FilterConfigBuilder::new().radius(100.0).unwrap().build();
        let store = FoodCenterStore::from_records(data::sample_food_centers(), config).unwrap();

        let predicate = store.filter_for(&SearchRequest::new().near("39.95", "-75.16"));
        assert_eq!(predicate.spatial().unwrap().radius_miles, 100.0);
        // Center City, Fishtown and Wilmington are listed and within 100 miles.
        assert_eq!(store.count(&predicate).unwrap(), 3);
    }
}
