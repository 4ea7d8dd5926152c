//! `people-page` prints the people table for a page location.
//!
//! ```text
//! people-page [list] [LOCATION]      render the table (default)
//! people-page links [LOCATION]       filter panel and sort header locations
//! people-page export PATH [LOCATION] save the visible people as a snapshot
//! people-page config                 print the effective configuration
//! ```
//!
//! `LOCATION` looks like `/people/emma-de-milliano-1876?sex=f&sort=born`.

mod commands;
mod config;
mod render;
mod state;

use std::path::Path;

use genealogy::route::{parse_location, PEOPLE_PATH};
use tracing_subscriber::FmtSubscriber;

use config::{OutputFormat, PageConfig};
use state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = PageConfig::from_env();
    if let Some(pos) = args.iter().position(|a| a == "--json") {
        args.remove(pos);
        config.output = OutputFormat::Json;
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("people-page: logging disabled: {}", e);
    }

    let sub = args.first().map(String::as_str).unwrap_or("list");
    let result = match sub {
        "list" => run_list(config, args.get(1).map(String::as_str)),
        "links" => run_links(config, args.get(1).map(String::as_str)),
        "export" => match args.get(1) {
            Some(path) => run_export(config, Path::new(path), args.get(2).map(String::as_str)),
            None => Err(anyhow::anyhow!("export needs a PATH")),
        },
        "config" => commands::config::show_config(&config).map(|out| println!("{}", out)),
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        location if location.starts_with('/') || location.starts_with('?') => {
            run_list(config, Some(location))
        }
        other => Err(anyhow::anyhow!(
            "unknown command '{}'. Use: people-page list | links | export | config | help",
            other
        )),
    };

    if let Err(e) = result {
        eprintln!("people-page {}: {:#}", sub, e);
        std::process::exit(1);
    }
}

fn mount(config: PageConfig, location: Option<&str>) -> anyhow::Result<AppState> {
    let route = parse_location(location.unwrap_or(PEOPLE_PATH));
    let mut state = AppState::mount(config, route)?;

    if state.page.is_loading() {
        eprintln!("{}", commands::people::list_people(&state)?);
        state.page.wait_loaded();
    }
    Ok(state)
}

fn run_list(config: PageConfig, location: Option<&str>) -> anyhow::Result<()> {
    let state = mount(config, location)?;
    println!("{}", commands::people::list_people(&state)?);
    Ok(())
}

fn run_links(config: PageConfig, location: Option<&str>) -> anyhow::Result<()> {
    let route = parse_location(location.unwrap_or(PEOPLE_PATH));
    println!("{}", commands::links::show_links(&route, config.output)?);
    Ok(())
}

fn run_export(config: PageConfig, path: &Path, location: Option<&str>) -> anyhow::Result<()> {
    let state = mount(config, location)?;
    let stats = commands::people::export_people(&state, path)?;
    println!("Exported {} people to {}", stats.population, path.display());
    Ok(())
}

fn print_help() {
    println!("People Page v{}", VERSION);
    println!();
    println!("Usage: people-page [COMMAND] [--json]");
    println!();
    println!("Commands:");
    println!("  list [LOCATION]         Render the people table (default)");
    println!("  links [LOCATION]        Print filter and sort header locations");
    println!("  export PATH [LOCATION]  Save the people matching LOCATION as a snapshot");
    println!("  config                  Print the effective configuration");
    println!("  help                    Print this help message");
    println!();
    println!("LOCATION defaults to {}.", PEOPLE_PATH);
    println!("Configure via PEOPLE_API_URL, PEOPLE_FILE, PEOPLE_TIMEOUT_SECS,");
    println!("PEOPLE_LOG_LEVEL and PEOPLE_OUTPUT.");
}
