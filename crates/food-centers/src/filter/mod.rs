//! Search request to filter predicate construction.
//!
//! A [`SearchRequest`] carries the raw, optional search parameters. [`build_filter`] turns
//! it into a [`FilterPredicate`]: a status clause, plus at most one of a distance clause or
//! a text clause. The same predicate feeds both listing and counting.

mod builder;
mod predicate;
mod request;

pub use builder::{build_filter, build_filter_with_config};
pub use predicate::{FilterPredicate, MatchClause, SpatialClause, TextMatch};
pub use request::SearchRequest;
