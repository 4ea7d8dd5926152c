//! Terminal rendering of a page view.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use genealogy::page::{PageView, TableView, NO_PEOPLE_MESSAGE};
use genealogy::query::{sort_indicator, SortIndicator, SORT_COLUMNS};
use genealogy::{EnrichedPerson, Person, Sex};

use crate::config::OutputFormat;
use crate::state::PageOutput;

const LOADING_MESSAGE: &str = "Loading...";

/// Render `view` in the configured format.
pub fn render_view(view: &PageView<'_>, location: &str, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = PageOutput::from_view(view, location.to_string());
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Table => Ok(render_text(view, location)),
    }
}

fn render_text(view: &PageView<'_>, location: &str) -> String {
    let body = match view {
        PageView::Table(table) => match table.empty_message() {
            Some(message) => message.to_string(),
            None => people_table(table).to_string(),
        },
        PageView::Loading => LOADING_MESSAGE.to_string(),
        PageView::Error(message) => format!("error: {}", message),
        PageView::NoPeople => NO_PEOPLE_MESSAGE.to_string(),
    };
    format!("People Page  {}\n\n{}", location, body)
}

fn sort_arrow(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::Unsorted => "↕",
        SortIndicator::Ascending => "↑",
        SortIndicator::Descending => "↓",
    }
}

pub fn people_table(view: &TableView<'_>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header: Vec<Cell> = SORT_COLUMNS
        .iter()
        .map(|key| {
            Cell::new(format!("{} {}", key.label(), sort_arrow(sort_indicator(view.params, *key))))
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center)
        })
        .collect();
    header.push(Cell::new("Mother").add_attribute(Attribute::Bold));
    header.push(Cell::new("Father").add_attribute(Attribute::Bold));
    table.set_header(header);

    for person in &view.people {
        table.add_row(person_row(person, view.is_selected(person)));
    }

    table
}

fn name_cell(person: &Person) -> Cell {
    let cell = Cell::new(&person.name);
    match person.sex {
        Sex::Female => cell.fg(Color::Red),
        Sex::Male => cell,
    }
}

/// Resolved parent, raw name when unresolved, `-` when absent.
fn parent_cell(name: Option<&str>, resolved: Option<&Person>) -> Cell {
    match (resolved, name) {
        (Some(parent), _) => name_cell(parent),
        (None, Some(name)) if !name.is_empty() => Cell::new(name).add_attribute(Attribute::Italic),
        _ => Cell::new("-"),
    }
}

fn person_row(person: &EnrichedPerson, selected: bool) -> Vec<Cell> {
    let mut name = name_cell(person);
    if selected {
        name = name.add_attribute(Attribute::Bold);
    }

    let mut cells = vec![
        name,
        Cell::new(person.sex.as_str()).set_alignment(CellAlignment::Center),
        Cell::new(person.born).set_alignment(CellAlignment::Right),
        Cell::new(person.died).set_alignment(CellAlignment::Right),
        parent_cell(person.mother_name.as_deref(), person.mother.as_ref()),
        parent_cell(person.father_name.as_deref(), person.father.as_ref()),
    ];

    if selected {
        cells = cells.into_iter().map(|c| c.bg(Color::DarkGrey)).collect();
    }
    cells
}
