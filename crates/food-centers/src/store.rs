//! The food center store.
//!
//! [`FoodCenterStore`] holds food center records together with their polars projection and
//! answers the two search operations, listing and counting, from the same
//! [`FilterPredicate`]. It also carries the record write path: saving derives the flat
//! coordinates from `location.coordinates` before the record becomes searchable.
//!
//! # Quick Start
//!
//! ```rust
//! use food_centers::{FoodCenterStore, SearchRequest, data::sample_food_centers};
//!
//! let store = FoodCenterStore::from_records(sample_food_centers(), Default::default())?;
//!
//! // Listed centers within 5 miles of Center City, Philadelphia
//! let request = SearchRequest::new().near("39.95", "-75.16");
//! let centers = store.search(&request)?;
//! assert_eq!(centers.len(), store.search_count(&request)?);
//! # Ok::<(), food_centers::error::FoodCenterError>(())
//! ```

use std::path::Path;

use ahash::AHashMap as HashMap;
use food_centers_data::{
    FoodCenter, FoodCenterPatch, read_records, records_to_frame, write_records,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    config::FilterConfig,
    error::{FoodCenterError, Result},
    filter::{FilterPredicate, SearchRequest, build_filter_with_config},
    query::{matching_rows, user_rows},
};

/// In-memory food center collection with filter evaluation.
///
/// Reads take `&self` and can run from any number of threads; writes take `&mut self`
/// and rebuild the search frame before returning.
#[derive(Debug, Clone)]
pub struct FoodCenterStore {
    records: Vec<FoodCenter>,
    positions: HashMap<String, usize>,
    frame: DataFrame,
    config: FilterConfig,
}

impl FoodCenterStore {
    /// Create an empty store.
    pub fn new(config: FilterConfig) -> Result<Self> {
        Self::from_records(Vec::new(), config)
    }

    /// Create a store over existing records, kept exactly as given.
    ///
    /// Fails with [`FoodCenterError::DuplicateId`] if two records share an id.
    #[instrument(name = "Create FoodCenterStore", level = "info", skip_all, fields(records = records.len()))]
    pub fn from_records(records: Vec<FoodCenter>, config: FilterConfig) -> Result<Self> {
        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            let Some(id) = &record.id else { continue };
            if positions.insert(id.clone(), pos).is_some() {
                warn!(%id, "Food center id appears more than once");
                return Err(FoodCenterError::DuplicateId(id.clone()));
            }
        }
        let frame = records_to_frame(&records)?;
        info!(records = records.len(), "Food center store ready");

        Ok(Self {
            records,
            positions,
            frame,
            config,
        })
    }

    /// Load a store from a JSON record file written by [`FoodCenterStore::persist`].
    pub fn load(path: impl AsRef<Path>, config: FilterConfig) -> Result<Self> {
        Self::from_records(read_records(path)?, config)
    }

    /// Write every record to a JSON file.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        write_records(path, &self.records)?;
        Ok(())
    }

    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn records(&self) -> &[FoodCenter] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build the filter for `request` with this store's configuration.
    pub fn filter_for(&self, request: &SearchRequest) -> FilterPredicate {
        build_filter_with_config(request, &self.config)
    }

    /// All food centers matching `request`.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<FoodCenter>> {
        self.find(&self.filter_for(request))
    }

    /// Number of food centers [`FoodCenterStore::search`] would return for `request`.
    pub fn search_count(&self, request: &SearchRequest) -> Result<usize> {
        self.count(&self.filter_for(request))
    }

    /// All records matching `predicate`, in insertion order.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, predicate: &FilterPredicate) -> Result<Vec<FoodCenter>> {
        let rows = matching_rows(&self.frame, predicate)?;
        Ok(self.records_at(rows))
    }

    /// Number of records matching `predicate`.
    #[instrument(level = "debug", skip(self))]
    pub fn count(&self, predicate: &FilterPredicate) -> Result<usize> {
        Ok(matching_rows(&self.frame, predicate)?.len())
    }

    pub fn get(&self, id: &str) -> Option<&FoodCenter> {
        self.positions.get(id).map(|&pos| &self.records[pos])
    }

    /// Every record owned by `user_id`, whatever its status.
    pub fn find_by_user(&self, user_id: &str) -> Result<Vec<FoodCenter>> {
        let rows = user_rows(&self.frame, user_id)?;
        Ok(self.records_at(rows))
    }

    /// Insert or replace a food center.
    ///
    /// A record without an id gets a new UUID. Flat coordinates are derived from
    /// `location.coordinates` before the record is stored.
    #[instrument(level = "debug", skip_all, fields(id = ?center.id))]
    pub fn save(&mut self, mut center: FoodCenter) -> Result<FoodCenter> {
        center.derive_coordinates();
        let id = center
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        if let Some(&pos) = self.positions.get(&id) {
            debug!(%id, "Replacing food center");
            self.records[pos] = center.clone();
        } else {
            debug!(%id, "Adding food center");
            self.positions.insert(id, self.records.len());
            self.records.push(center.clone());
        }

        self.rebuild_frame()?;
        Ok(center)
    }

    /// Apply `patch` to the record with `id`, re-deriving its flat coordinates.
    #[instrument(level = "debug", skip(self, patch))]
    pub fn update(&mut self, id: &str, patch: FoodCenterPatch) -> Result<FoodCenter> {
        let pos = *self
            .positions
            .get(id)
            .ok_or_else(|| FoodCenterError::NotFound(id.to_string()))?;

        let center = &mut self.records[pos];
        patch.apply_to(center);
        center.derive_coordinates();
        let updated = center.clone();

        self.rebuild_frame()?;
        Ok(updated)
    }

    fn records_at(&self, rows: Vec<usize>) -> Vec<FoodCenter> {
        rows.into_iter()
            .map(|row| self.records[row].clone())
            .collect()
    }

    fn rebuild_frame(&mut self) -> Result<()> {
        self.frame = records_to_frame(&self.records)?;
        Ok(())
    }
}
