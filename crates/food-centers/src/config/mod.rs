use food_centers_data::FoodCenterStatus;

use crate::error::FoodCenterError;

/// Earth's mean radius in miles, the divisor that turns a radius in miles into an angle.
pub const EARTH_RADIUS_MILES: f64 = 3963.2;

/// Radius used when a distance search does not supply a usable one.
pub const DEFAULT_RADIUS_MILES: f64 = 5.0;

/// Settings for turning a [`SearchRequest`](crate::SearchRequest) into a
/// [`FilterPredicate`](crate::FilterPredicate).
///
/// The defaults reproduce the public search behaviour: 5 mile radius, listed centers only,
/// and the text query used as a raw pattern fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Radius in miles when the request has none, or an unparseable one
    pub default_radius_miles: f64,
    /// Sphere radius used for the miles to angle conversion
    pub earth_radius_miles: f64,
    /// Statuses searched when the request does not name any
    pub default_statuses: Vec<FoodCenterStatus>,
    /// Escape pattern metacharacters in the text query so it matches literally
    pub escape_text_query: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: DEFAULT_RADIUS_MILES,
            earth_radius_miles: EARTH_RADIUS_MILES,
            default_statuses: vec![FoodCenterStatus::Listed],
            escape_text_query: false,
        }
    }
}

impl FilterConfig {
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::new()
    }
}

/// Builder for [`FilterConfig`]
#[derive(Debug, Clone, Default)]
pub struct FilterConfigBuilder {
    config: FilterConfig,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FilterConfig::default(),
        }
    }

    /// Treat the text query as literal text rather than a pattern fragment
    pub fn strict() -> Self {
        let mut builder = Self::new();
        builder.config.escape_text_query = true;
        builder
    }

    /// Set the fallback search radius in miles
    pub fn radius(mut self, miles: f64) -> Result<Self, FoodCenterError> {
        if !miles.is_finite() || miles < 0.0 {
            return Err(FoodCenterError::ConfigError(format!(
                "Default radius must be a finite, non-negative number of miles, got {miles}"
            )));
        }
        self.config.default_radius_miles = miles;
        Ok(self)
    }

    /// Set the sphere radius used for the miles to angle conversion
    pub fn earth_radius(mut self, miles: f64) -> Result<Self, FoodCenterError> {
        if !miles.is_finite() || miles <= 0.0 {
            return Err(FoodCenterError::ConfigError(format!(
                "Earth radius must be a finite, positive number of miles, got {miles}"
            )));
        }
        self.config.earth_radius_miles = miles;
        Ok(self)
    }

    /// Set the statuses searched when a request names none
    pub fn default_statuses(
        mut self,
        statuses: impl IntoIterator<Item = FoodCenterStatus>,
    ) -> Result<Self, FoodCenterError> {
        let statuses: Vec<_> = statuses.into_iter().collect();
        if statuses.is_empty() {
            return Err(FoodCenterError::ConfigError(
                "At least one default status is required".to_string(),
            ));
        }
        self.config.default_statuses = statuses;
        Ok(self)
    }

    pub fn escape_text_query(mut self, enabled: bool) -> Self {
        self.config.escape_text_query = enabled;
        self
    }

    pub fn build(self) -> FilterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let config = FilterConfigBuilder::new().build();
        assert_eq!(config.default_radius_miles, 5.0);
        assert_eq!(config.earth_radius_miles, 3963.2);
        assert_eq!(config.default_statuses, vec![FoodCenterStatus::Listed]);
        assert!(!config.escape_text_query);
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_strict_preset() {
        let config = FilterConfigBuilder::strict().build();
        assert!(config.escape_text_query);
        assert_eq!(config.default_radius_miles, 5.0);
    }

    #[test]
    fn test_method_chaining() {
        let config = FilterConfig::builder()
            .radius(12.5)
            .unwrap()
            .default_statuses([FoodCenterStatus::Listed, FoodCenterStatus::Unlisted])
            .unwrap()
            .escape_text_query(true)
            .build();

        assert_eq!(config.default_radius_miles, 12.5);
        assert_eq!(config.default_statuses.len(), 2);
        assert!(config.escape_text_query);
    }

    #[test]
    fn test_validation() {
        assert!(FilterConfigBuilder::new().radius(-1.0).is_err());
        assert!(FilterConfigBuilder::new().radius(f64::NAN).is_err());
        assert!(FilterConfigBuilder::new().radius(0.0).is_ok());
        assert!(FilterConfigBuilder::new().earth_radius(0.0).is_err());
        assert!(FilterConfigBuilder::new().earth_radius(6371.0).is_ok());
        assert!(FilterConfigBuilder::new().default_statuses([]).is_err());
    }
}
