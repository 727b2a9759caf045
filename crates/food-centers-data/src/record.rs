//! Food center records as they are stored and returned.
//!
//! A [`FoodCenter`] carries its position twice: the structured [`GeoPoint`] supplied by
//! writers, and flat `longitude`/`latitude` scalars derived from it on every write so
//! that distance queries can read plain numeric columns.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Visibility of a food center.
///
/// Only [`FoodCenterStatus::Listed`] centers appear in a search that does not ask
/// for specific statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FoodCenterStatus {
    /// Publicly visible, returned by default searches
    #[default]
    Listed,
    /// Hidden from default searches
    Unlisted,
    /// Soft-deleted
    Deleted,
}

impl FoodCenterStatus {
    pub const ALL: [Self; 3] = [Self::Listed, Self::Unlisted, Self::Deleted];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listed => "LISTED",
            Self::Unlisted => "UNLISTED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for FoodCenterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCenterStatus {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DataError::UnknownStatus(s.to_string()))
    }
}

/// `GeoJSON`-style point. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "GeoPoint::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    fn default_kind() -> String {
        "Point".to_string()
    }

    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: Self::default_kind(),
            coordinates: vec![longitude, latitude],
        }
    }

    /// `(longitude, latitude)` when the point holds exactly two coordinates.
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [longitude, latitude] => Some((*longitude, *latitude)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodCenter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
    pub location: Option<GeoPoint>,
    #[serde(rename = "long")]
    pub longitude: Option<f64>,
    #[serde(rename = "lat")]
    pub latitude: Option<f64>,
    pub contact_number: Option<String>,
    pub status: FoodCenterStatus,
    pub user_id: Option<String>,
}

impl FoodCenter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        self.address = Some(address.into());
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    pub fn with_location(mut self, longitude: f64, latitude: f64) -> Self {
        self.location = Some(GeoPoint::point(longitude, latitude));
        self
    }

    pub const fn with_status(mut self, status: FoodCenterStatus) -> Self {
        self.status = status;
        self
    }

    pub const fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Copy `location.coordinates` into the flat `longitude`/`latitude` fields.
    ///
    /// Only a pair of exactly two numbers is used; any other length leaves the
    /// scalar fields as they were.
    pub fn derive_coordinates(&mut self) {
        if let Some((longitude, latitude)) = self.location.as_ref().and_then(GeoPoint::lon_lat) {
            self.longitude = Some(longitude);
            self.latitude = Some(latitude);
        }
    }
}

/// Partial update of a [`FoodCenter`]. Only the fields that are set are written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodCenterPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<u32>,
    pub location: Option<GeoPoint>,
    pub contact_number: Option<String>,
    pub status: Option<FoodCenterStatus>,
}

impl FoodCenterPatch {
    pub fn apply_to(self, center: &mut FoodCenter) {
        let Self {
            name,
            address,
            city,
            state,
            capacity,
            location,
            contact_number,
            status,
        } = self;

        if name.is_some() {
            center.name = name;
        }
        if address.is_some() {
            center.address = address;
        }
        if city.is_some() {
            center.city = city;
        }
        if state.is_some() {
            center.state = state;
        }
        if capacity.is_some() {
            center.capacity = capacity;
        }
        if location.is_some() {
            center.location = location;
        }
        if contact_number.is_some() {
            center.contact_number = contact_number;
        }
        if let Some(status) = status {
            center.status = status;
        }
    }
}
