//! Check command handler
//!
//! Validates a curriculum table without writing anything: unknown edge
//! endpoints and cycles are errors, term-order inversions are warnings.

use curriculum_graph::config::Config;
use curriculum_graph::core::pipeline::load_catalog;
use curriculum_graph::core::validate::{check_acyclic, term_order_violations};
use logger::error;

/// Run the check command
pub fn run(year: Option<u16>, config: &Config) -> Result<(), String> {
    let year = year.unwrap_or(config.defaults.year);
    let catalog = load_catalog(config, year).map_err(|e| {
        error!("Failed to load curriculum {year}: {e}");
        format!("✗ Failed to load curriculum {year}: {e}")
    })?;

    let mut problems = 0;

    for edge in catalog.unknown_edges() {
        println!("✗ Edge {edge} references an unknown discipline");
        problems += 1;
    }

    let ids = catalog.disciplines.iter().map(|d| &d.id);
    if let Err(e) = check_acyclic(ids, &catalog.edges) {
        println!("✗ {e}");
        problems += 1;
    }

    for edge in term_order_violations(&catalog) {
        println!("⚠ Edge {edge} points from a later term to an earlier one");
    }

    if problems > 0 {
        return Err(format!("✗ Curriculum {year} has {problems} problem(s)"));
    }

    println!(
        "✓ Curriculum {year}: {} disciplines, {} edges, no problems found",
        catalog.disciplines.len(),
        catalog.edges.len()
    );
    Ok(())
}
