//! Genealogy Benchmark
//!
//! Times parent linking and projection over a generated family tree.

use genealogy::names::generate_family_tree;
use genealogy::{link_parents, project, QueryState, SearchParams};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_POPULATION: usize = 100_000;

/// Parameter sets exercised per run
const SCENARIOS: &[&str] = &[
    "",
    "sex=f",
    "query=van",
    "centuries=17&centuries=18",
    "sort=name",
    "sort=born&order=desc",
    "sex=m&query=jan&centuries=18&sort=died",
];

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let population = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<usize>()?,
        None => DEFAULT_POPULATION,
    };

    info!("Generating family tree of {} people...", population);
    let people = generate_family_tree(population);

    let start = Instant::now();
    let linked = link_parents(&people);
    let resolved = linked.iter().filter(|p| p.mother.is_some()).count();
    info!(
        "Linked parents in {:?} ({} of {} mothers resolved)",
        start.elapsed(),
        resolved,
        people.iter().filter(|p| p.mother_name.is_some()).count()
    );

    for scenario in SCENARIOS {
        let params = SearchParams::parse(scenario);
        let state = QueryState::from_params(&params);

        let start = Instant::now();
        let visible = project(&linked, &state);
        info!(
            "Projection {:<45} {:>8} rows in {:?}",
            format!("?{}", scenario),
            visible.len(),
            start.elapsed()
        );
    }

    let memory_mb = memory_stats::memory_stats()
        .map(|stats| stats.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0);
    info!("Process memory: {:.1} MiB", memory_mb);

    Ok(())
}
