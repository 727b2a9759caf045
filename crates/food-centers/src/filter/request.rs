use serde::Deserialize;

/// The optional search parameters of a food center listing or count.
///
/// Every field is the raw string handed over by the caller (usually query parameters),
/// and no combination of them is rejected. See [`build_filter`](crate::build_filter)
/// for how they are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Free-text query matched against state, city and address
    pub q: Option<String>,
    /// Latitude in decimal degrees
    pub lat: Option<String>,
    /// Longitude in decimal degrees
    pub long: Option<String>,
    /// Search radius in miles
    pub radius: Option<String>,
    /// Comma separated status tokens, e.g. `LISTED,UNLISTED`
    pub status: Option<String>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn near(mut self, lat: impl Into<String>, long: impl Into<String>) -> Self {
        self.lat = Some(lat.into());
        self.long = Some(long.into());
        self
    }

    pub fn radius(mut self, radius: impl Into<String>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub(crate) fn q(&self) -> Option<&str> {
        non_empty(self.q.as_ref())
    }

    /// `(latitude, longitude)` strings, only when both are present and non-empty.
    pub(crate) fn coordinates(&self) -> Option<(&str, &str)> {
        non_empty(self.lat.as_ref()).zip(non_empty(self.long.as_ref()))
    }

    pub(crate) fn status_tokens(&self) -> Option<&str> {
        non_empty(self.status.as_ref())
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}
