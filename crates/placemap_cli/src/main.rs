//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `placemap_core` linkage without the UI shell.
//! - Print a deterministic summary of the built-in sample collection.

use placemap_core::seed::sample_locations;
use placemap_core::{
    compute_view, init_logging_from_config, to_geojson_string, CoreConfig, SortOption,
    ViewCriteria,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("placemap_core ping={}", placemap_core::ping());
    println!("placemap_core version={}", placemap_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }
    println!("api base url={}", config.api_base_url);

    let locations = sample_locations();
    let criteria = ViewCriteria::new("", [], Some(SortOption::NameAsc));
    let view = compute_view(&locations, &criteria);
    let first = view.first().map_or("-", |location| location.name.as_str());
    println!("sample locations={} first={first}", view.len());

    match to_geojson_string(&locations) {
        Ok(text) => {
            println!("sample export bytes={}", text.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("sample export failed: {err}");
            ExitCode::FAILURE
        }
    }
}
