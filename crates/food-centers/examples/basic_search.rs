//! Basic food center search
//!
//! This example demonstrates the search operations:
//! - Creating a store from sample records
//! - Status, text and distance searches
//! - Counting with the same request

use food_centers::{FilterConfigBuilder, FoodCenter, FoodCenterStore, SearchRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = FoodCenterStore::from_records(
        food_centers::data::sample_food_centers(),
        FilterConfigBuilder::new().build(),
    )?;

    println!("All listed food centers:");
    run(&store, &SearchRequest::new())?;

    println!("\nText search for 'spring', any visible status:");
    run(
        &store,
        &SearchRequest::new().query("spring").status("LISTED,UNLISTED"),
    )?;

    // The text query is ignored once coordinates are supplied.
    println!("\nWithin 10 miles of Center City, Philadelphia:");
    run(
        &store,
        &SearchRequest::new()
            .near("39.95", "-75.16")
            .radius("10")
            .query("spring"),
    )?;

    Ok(())
}

fn run(store: &FoodCenterStore, request: &SearchRequest) -> food_centers::error::Result<()> {
    let centers = store.search(request)?;
    print_centers(&centers);
    println!("  count: {}", store.search_count(request)?);
    Ok(())
}

fn print_centers(centers: &[FoodCenter]) {
    for (i, center) in centers.iter().enumerate() {
        println!(
            "  {}. {} - {}, {} ({})",
            i + 1,
            center.name.as_deref().unwrap_or("Unknown"),
            center.city.as_deref().unwrap_or("?"),
            center.state.as_deref().unwrap_or("?"),
            center.status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = food_centers::init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_basic_search_example() {
        setup_test_env();
        assert!(
            main().is_ok(),
            "Basic search example should run successfully"
        );
    }
}
