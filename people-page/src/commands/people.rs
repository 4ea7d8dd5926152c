use anyhow::Context;
use std::path::Path;
use tracing::info;

use genealogy::page::PageView;
use genealogy::persistence::{save_people, SaveStats};

use crate::render::render_view;
use crate::state::AppState;

/// Render the page at the current location.
pub fn list_people(state: &AppState) -> anyhow::Result<String> {
    let slug = state.person_slug.as_deref();
    state.page.render(&state.location, slug, |view| {
        render_view(view, &state.current_location(), state.config.output)
    })
}

/// Write the people visible at the current location to a snapshot file.
pub fn export_people(state: &AppState, path: &Path) -> anyhow::Result<SaveStats> {
    let slug = state.person_slug.as_deref();
    let stats = state.page.render(&state.location, slug, |view| match view {
        PageView::Table(table) => save_people(table.people.iter().map(|p| &p.person), path)
            .with_context(|| format!("writing {}", path.display())),
        PageView::Error(message) => Err(anyhow::anyhow!("{}", message)),
        PageView::Loading | PageView::NoPeople => save_people(std::iter::empty(), path)
            .with_context(|| format!("writing {}", path.display())),
    })?;

    info!("Exported {} people ({} bytes) to {}", stats.population, stats.file_bytes, path.display());
    Ok(stats)
}
