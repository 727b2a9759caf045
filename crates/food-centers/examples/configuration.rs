//! Filter configuration
//!
//! This example compares the default filter settings with customised ones:
//! a wider fallback radius, different default statuses and literal text matching.

use food_centers::{
    FilterConfig, FilterConfigBuilder, FoodCenterStatus, FoodCenterStore, SearchRequest,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let near_center_city = SearchRequest::new().near("39.95", "-75.16");
    let pattern_query = SearchRequest::new().query("Spring.*St");

    println!("Comparing filter configurations:\n");

    let default_config = FilterConfig::default();
    report("Default", default_config, &near_center_city, &pattern_query)?;

    let wide = FilterConfigBuilder::new()
        .radius(50.0)?
        .default_statuses([FoodCenterStatus::Listed, FoodCenterStatus::Unlisted])?
        .build();
    report("Wide, unlisted", wide, &near_center_city, &pattern_query)?;

    let strict = FilterConfigBuilder::strict().build();
    report("Literal text", strict, &near_center_city, &pattern_query)?;

    Ok(())
}

fn report(
    label: &str,
    config: FilterConfig,
    distance: &SearchRequest,
    text: &SearchRequest,
) -> food_centers::error::Result<()> {
    let radius = config.default_radius_miles;
    let store = FoodCenterStore::from_records(food_centers::data::sample_food_centers(), config)?;

    println!(
        "  {label:<15} {} within {radius} miles, {} matching {:?}",
        store.search_count(distance)?,
        store.search_count(text)?,
        text.q.as_deref().unwrap_or_default()
    );
    Ok(())
}
