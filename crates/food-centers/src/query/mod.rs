//! Evaluation of a [`FilterPredicate`] against the food center frame.
//!
//! The predicate is translated into a single polars expression: the status clause AND
//! whichever of the distance or text clause is present. Listing and counting both go
//! through [`matching_rows`], so they can never disagree.

use std::f64::consts::PI;

use food_centers_data::frame::{LATITUDE, LONGITUDE, ROW, STATUS, USER_ID, matched_rows};
pub use error::QueryError;
use error::Result;
use polars::prelude::*;
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::filter::{FilterPredicate, MatchClause, SpatialClause, TextMatch};

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum QueryError {
        #[error("DataFrame error: {0}")]
        DataFrame(#[from] polars::prelude::PolarsError),
        #[error("Data error: {0}")]
        Data(#[from] food_centers_data::DataError),
        #[error("Invalid text query {query:?}: {source}")]
        InvalidPattern {
            query: String,
            #[source]
            source: regex::Error,
        },
    }
    pub type Result<T> = std::result::Result<T, QueryError>;
}

const DEG_TO_RAD: f64 = PI / 180.0;

/// Positions of the records in `frame` matched by `predicate`, in frame order.
#[instrument(level = "debug", skip(frame), fields(rows = frame.height()))]
pub fn matching_rows(frame: &DataFrame, predicate: &FilterPredicate) -> Result<Vec<usize>> {
    let expr = predicate_expr(predicate)?;
    rows_where(frame, expr)
}

/// Positions of the records owned by `user_id`, whatever their status.
pub fn user_rows(frame: &DataFrame, user_id: &str) -> Result<Vec<usize>> {
    rows_where(frame, col(USER_ID).eq(lit(user_id)))
}

fn rows_where(frame: &DataFrame, expr: Expr) -> Result<Vec<usize>> {
    let df = frame.clone().lazy().filter(expr).select([col(ROW)]).collect()?;
    let rows = matched_rows(&df)?;
    debug!(matched = rows.len(), "Evaluated food center filter");
    Ok(rows)
}

/// The polars expression equivalent of `predicate`.
pub fn predicate_expr(predicate: &FilterPredicate) -> Result<Expr> {
    let status = status_expr(&predicate.status_in);
    let clause = match &predicate.clause {
        Some(MatchClause::Spatial(spatial)) => spatial_expr(spatial),
        Some(MatchClause::Text(text)) => text_expr(text)?,
        None => return Ok(status),
    };
    Ok(status.and(clause))
}

fn status_expr(tokens: &[String]) -> Expr {
    tokens
        .iter()
        .map(|token| col(STATUS).eq(lit(token.as_str())))
        .reduce(|acc, expr| acc.or(expr))
        .unwrap_or_else(|| lit(false))
}

/// Haversine test of each record against the clause centre.
///
/// A record is inside when its central angle to the centre is at most
/// `angular_radius`, i.e. when `hav(angle) <= sin²(angular_radius / 2)`. A `NaN` centre
/// or a negative or `NaN` radius matches nothing, as do records without coordinates.
fn spatial_expr(spatial: &SpatialClause) -> Expr {
    let (lon0, lat0) = (spatial.longitude(), spatial.latitude());
    let theta = spatial.angular_radius;
    if !lon0.is_finite() || !lat0.is_finite() || theta.is_nan() || theta < 0.0 {
        trace!(?spatial, "Distance clause cannot match");
        return lit(false);
    }

    let threshold = if theta >= PI {
        f64::INFINITY
    } else {
        (theta / 2.0).sin().powi(2)
    };
    let (phi0, lambda0) = (lat0 * DEG_TO_RAD, lon0 * DEG_TO_RAD);

    let phi = col(LATITUDE) * lit(DEG_TO_RAD);
    let lambda = col(LONGITUDE) * lit(DEG_TO_RAD);
    let sin_half_dphi = ((phi.clone() - lit(phi0)) * lit(0.5)).sin();
    let sin_half_dlambda = ((lambda - lit(lambda0)) * lit(0.5)).sin();

    let hav = sin_half_dphi.clone() * sin_half_dphi
        + lit(phi0.cos()) * phi.cos() * sin_half_dlambda.clone() * sin_half_dlambda;
    hav.lt_eq(lit(threshold))
}

fn text_expr(text: &TextMatch) -> Result<Expr> {
    let pattern = text.pattern();
    Regex::new(&pattern).map_err(|source| QueryError::InvalidPattern {
        query: text.query().to_string(),
        source,
    })?;

    Ok(TextMatch::FIELDS
        .iter()
        .map(|field| col(*field).str().contains(lit(pattern.as_str()), false))
        .reduce(|acc, expr| acc.or(expr))
        .unwrap_or_else(|| lit(false)))
}

#[cfg(test)]
mod tests {
    use food_centers_data::{FoodCenter, FoodCenterStatus, records_to_frame};

    use super::*;
    use crate::filter::{SearchRequest, build_filter};

    fn center(name: &str, city: &str, lon: f64, lat: f64) -> FoodCenter {
        let mut center = FoodCenter::new(name)
            .with_address("1 Main St", city, "PA")
            .with_location(lon, lat);
        center.derive_coordinates();
        center
    }

    fn frame() -> DataFrame {
        records_to_frame(&[
            center("Here", "Philadelphia", -75.0, 40.0),
            // ~3.4 miles north
            center("Near", "Philadelphia", -75.0, 40.05),
            // ~34 miles north
            center("Far", "Allentown", -75.0, 40.5),
            center("Hidden", "Philadelphia", -75.0, 40.0).with_status(FoodCenterStatus::Unlisted),
            FoodCenter::new("Nowhere").with_address("1 Main St", "Philadelphia", "PA"),
        ])
        .unwrap()
    }

    fn rows(request: &SearchRequest) -> Vec<usize> {
        matching_rows(&frame(), &build_filter(request)).unwrap()
    }

    #[test]
    fn test_status_only() {
        assert_eq!(rows(&SearchRequest::new()), vec![0, 1, 2, 4]);
        assert_eq!(rows(&SearchRequest::new().status("UNLISTED")), vec![3]);
        assert!(rows(&SearchRequest::new().status("BOGUS")).is_empty());
    }

    #[test]
    fn test_radius_boundary() {
        let near = SearchRequest::new().near("40.0", "-75.0");
        assert_eq!(rows(&near.clone().radius("3")), vec![0]);
        assert_eq!(rows(&near.clone().radius("4")), vec![0, 1]);
        assert_eq!(rows(&near.clone()), vec![0, 1]);
        assert_eq!(rows(&near.radius("40")), vec![0, 1, 2]);
    }

    #[test]
    fn test_coordinate_order() {
        // Swapping latitude and longitude puts the centre in Antarctica.
        let swapped = SearchRequest::new().near("-75.0", "40.0").radius("50");
        assert!(rows(&swapped).is_empty());
    }

    #[test]
    fn test_degenerate_spatial_clauses_match_nothing() {
        assert!(rows(&SearchRequest::new().near("abc", "-75.0")).is_empty());
        assert!(rows(&SearchRequest::new().near("40.0", "-75.0").radius("-1")).is_empty());
    }

    #[test]
    fn test_whole_sphere_radius() {
        let everything = SearchRequest::new().near("0", "0").radius("20000");
        // The record without coordinates still never matches.
        assert_eq!(rows(&everything), vec![0, 1, 2]);
    }

    #[test]
    fn test_text_is_case_insensitive_over_fields() {
        assert_eq!(rows(&SearchRequest::new().query("allen")), vec![2]);
        assert_eq!(rows(&SearchRequest::new().query("main st")), vec![0, 1, 2, 4]);
        assert_eq!(rows(&SearchRequest::new().query("pa")), vec![0, 1, 2, 4]);
        assert!(rows(&SearchRequest::new().query("Pittsburgh")).is_empty());
    }

    #[test]
    fn test_text_matches_with_missing_fields() {
        let mut city_only = FoodCenter::new("City only");
        city_only.city = Some("Springfield".to_string());
        let mut address_only = FoodCenter::new("Address only");
        address_only.address = Some("12 Spring St".to_string());
        let mut state_only = FoodCenter::new("State only");
        state_only.state = Some("SPRINGLAND".to_string());
        let blank = FoodCenter::new("Spring Pantry");

        let frame = records_to_frame(&[city_only, address_only, state_only, blank]).unwrap();
        let predicate = build_filter(&SearchRequest::new().query("spring"));

        // A null field never hides a hit in another one, and the name is never searched.
        assert_eq!(matching_rows(&frame, &predicate).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_infinite_radius() {
        let near = SearchRequest::new().near("40.0", "-75.0");
        assert_eq!(rows(&near.clone().radius("inf")), vec![0, 1, 2]);
        assert_eq!(rows(&near.clone().radius("Infinity")), vec![0, 1, 2]);
        assert!(rows(&near.radius("-inf")).is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let predicate = build_filter(&SearchRequest::new().query("("));
        let err = matching_rows(&frame(), &predicate).unwrap_err();
        assert!(matches!(err, QueryError::InvalidPattern { ref query, .. } if query == "("));
    }

    #[test]
    fn test_user_rows() {
        let frame = records_to_frame(&[
            FoodCenter::new("A").with_user("u1"),
            FoodCenter::new("B").with_user("u2"),
            FoodCenter::new("C")
                .with_user("u1")
                .with_status(FoodCenterStatus::Deleted),
        ])
        .unwrap();
        assert_eq!(user_rows(&frame, "u1").unwrap(), vec![0, 2]);
        assert!(user_rows(&frame, "u3").unwrap().is_empty());
    }
}
