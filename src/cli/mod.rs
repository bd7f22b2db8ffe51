//! Command-line front ends

pub mod play;

use crate::lint::{self, Diagnostic};
use crate::town::TownData;
use std::path::Path;

/// Lint every NPC in a town file. Returns whether any error was found.
pub fn run_lint(path: &Path) -> anyhow::Result<bool> {
    let town = TownData::load(path)?;
    let actors = town.actor_names();

    let diagnostics: Vec<Diagnostic> = town
        .npcs
        .iter()
        .flat_map(|npc| lint::check_entries(&npc.name, &npc.talking, &actors))
        .collect();

    for diagnostic in &diagnostics {
        println!("{diagnostic}");
    }

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;
    println!(
        "{}: {} NPC(s), {} error(s), {} warning(s)",
        path.display(),
        town.npcs.len(),
        errors,
        warnings
    );

    Ok(errors > 0)
}
