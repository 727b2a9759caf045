use itertools::Itertools;
use tracing::{debug, instrument, warn};

use super::{FilterPredicate, MatchClause, SearchRequest, SpatialClause, TextMatch};
use crate::config::FilterConfig;

/// Build the filter for `request` with the default [`FilterConfig`].
///
/// See [`build_filter_with_config`].
pub fn build_filter(request: &SearchRequest) -> FilterPredicate {
    build_filter_with_config(request, &FilterConfig::default())
}

/// Turn a search request into a [`FilterPredicate`].
///
/// This never fails:
/// - `status` replaces the default statuses outright when non-empty. Tokens are split on
///   `,` and kept verbatim, duplicates dropped.
/// - When both `lat` and `long` are non-empty the predicate gets a distance clause and
///   `q` is ignored entirely.
/// - Otherwise a non-empty `q` becomes a text clause over state, city and address.
/// - Unparseable coordinates become `NaN` (matching nothing). An unparseable or `NaN`
///   radius falls back to the configured default. Infinite radii are kept: `inf` matches
///   every located record and `-inf`, like any negative radius, matches nothing.
///
/// # Examples
///
/// ```rust
/// use food_centers::{SearchRequest, build_filter};
///
/// let request = SearchRequest::new().near("40.0", "-75.0").radius("10").query("ignored");
/// let predicate = build_filter(&request);
///
/// let spatial = predicate.spatial().expect("coordinates give a distance clause");
/// assert_eq!(spatial.center, [-75.0, 40.0]);
/// assert!(predicate.text_match().is_none());
/// assert_eq!(predicate.status_in, vec!["LISTED"]);
/// ```
#[instrument(level = "debug", skip(config))]
pub fn build_filter_with_config(request: &SearchRequest, config: &FilterConfig) -> FilterPredicate {
    let status_in = status_clause(request.status_tokens(), config);

    let clause = if let Some((lat, long)) = request.coordinates() {
        if request.q().is_some() {
            debug!("Coordinates supplied, ignoring text query");
        }
        Some(MatchClause::Spatial(spatial_clause(
            lat,
            long,
            request.radius.as_deref(),
            config,
        )))
    } else {
        request
            .q()
            .map(|q| MatchClause::Text(TextMatch::new(q, config.escape_text_query)))
    };

    let predicate = FilterPredicate { status_in, clause };
    debug!(?predicate, "Built food center filter");
    predicate
}

fn status_clause(tokens: Option<&str>, config: &FilterConfig) -> Vec<String> {
    match tokens {
        Some(tokens) => tokens.split(',').map(str::to_string).unique().collect(),
        None => config
            .default_statuses
            .iter()
            .map(|status| status.as_str().to_string())
            .unique()
            .collect(),
    }
}

fn spatial_clause(lat: &str, long: &str, radius: Option<&str>, config: &FilterConfig) -> SpatialClause {
    let radius_miles = parse_radius(radius, config.default_radius_miles);
    SpatialClause {
        center: [
            parse_coordinate("long", long),
            parse_coordinate("lat", lat),
        ],
        radius_miles,
        angular_radius: radius_miles / config.earth_radius_miles,
    }
}

fn parse_coordinate(parameter: &'static str, raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or_else(|_| {
        warn!(
            parameter,
            value = raw,
            "Unparseable coordinate, distance search will match nothing"
        );
        f64::NAN
    })
}

fn parse_radius(raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return default;
    };
    match raw.parse::<f64>() {
        Ok(radius) if !radius.is_nan() => radius,
        _ => {
            warn!(value = raw, default, "Unusable radius, using default");
            default
        }
    }
}
