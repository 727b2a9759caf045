use std::borrow::Cow;

use food_centers_data::frame::{ADDRESS, CITY, STATE};

/// Storage-neutral description of which food centers match a search.
///
/// Built fresh for every request by [`build_filter`](crate::build_filter) and shared by
/// listing and counting, so both always agree. A predicate carries at most one of a
/// distance clause or a text clause.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    /// Status tokens a record must have one of. Never empty.
    pub status_in: Vec<String>,
    pub clause: Option<MatchClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchClause {
    Spatial(SpatialClause),
    Text(TextMatch),
}

impl FilterPredicate {
    pub const fn spatial(&self) -> Option<&SpatialClause> {
        match &self.clause {
            Some(MatchClause::Spatial(spatial)) => Some(spatial),
            _ => None,
        }
    }

    pub const fn text_match(&self) -> Option<&TextMatch> {
        match &self.clause {
            Some(MatchClause::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub const fn is_status_only(&self) -> bool {
        self.clause.is_none()
    }
}

/// Records within `angular_radius` of `center` on the sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialClause {
    /// `[longitude, latitude]` in degrees, longitude first
    pub center: [f64; 2],
    pub radius_miles: f64,
    /// `radius_miles` divided by the earth radius, in radians
    pub angular_radius: f64,
}

impl SpatialClause {
    pub const fn longitude(&self) -> f64 {
        self.center[0]
    }

    pub const fn latitude(&self) -> f64 {
        self.center[1]
    }
}

/// Case-insensitive substring match against any of state, city or address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    query: String,
    literal: bool,
}

impl TextMatch {
    /// Record fields the query is tested against. Any one matching is enough.
    pub const FIELDS: [&'static str; 3] = [STATE, CITY, ADDRESS];

    pub(crate) fn new(query: &str, literal: bool) -> Self {
        Self {
            query: query.to_string(),
            literal,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether pattern metacharacters in the query are escaped
    pub const fn is_literal(&self) -> bool {
        self.literal
    }

    /// The wildcarded, case-insensitive pattern every field is tested with.
    ///
    /// Unless the match is literal the query is inserted as is, so metacharacters keep
    /// their pattern meaning.
    pub fn pattern(&self) -> String {
        let fragment = if self.literal {
            Cow::Owned(regex::escape(&self.query))
        } else {
            Cow::Borrowed(self.query.as_str())
        };
        format!("(?i).*{fragment}.*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_raw_and_literal() {
        assert_eq!(TextMatch::new("Spring", false).pattern(), "(?i).*Spring.*");
        assert_eq!(TextMatch::new("St. (N)", false).pattern(), "(?i).*St. (N).*");
        assert_eq!(
            TextMatch::new("St. (N)", true).pattern(),
            r"(?i).*St\. \(N\).*"
        );
    }

    #[test]
    fn test_clause_accessors() {
        let predicate = FilterPredicate {
            status_in: vec!["LISTED".to_string()],
            clause: Some(MatchClause::Text(TextMatch::new("Spring", false))),
        };
        assert!(predicate.spatial().is_none());
        assert_eq!(predicate.text_match().map(TextMatch::query), Some("Spring"));
        assert!(!predicate.is_status_only());
    }
}
