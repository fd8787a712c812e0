use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::views::{self, Palette};
use anyhow::Result;
use chromastats_normalize::{MatchMode, dependents_of, find_modules, importers_of};
use serde_json::json;
use std::path::PathBuf;

/// Raw stats are normalized in memory first, so concatenated modules are
/// traceable without rewriting the file.
pub fn handle(
    ctx: &ExecutionContext,
    path: PathBuf,
    query: String,
    partial: bool,
    dependents: bool,
) -> Result<()> {
    let path = ctx.resolve_stats_path(&path)?;
    let document = ctx.normalizer().normalize(ctx.load_stats(&path)?);
    let mode = if partial {
        MatchMode::Partial
    } else {
        MatchMode::Exact
    };

    if dependents {
        let found = dependents_of(&document, &query, mode);
        match ctx.format {
            OutputFormat::Json => {
                let output = json!({"query": query, "dependents": found});
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Plain if found.is_empty() => {
                println!("No modules are imported by '{}'", query);
            }
            OutputFormat::Plain => views::print_dependents(&Palette::for_stdout(), &query, &found),
        }
        return Ok(());
    }

    let found = find_modules(&document, &query, mode);
    match ctx.format {
        OutputFormat::Json => {
            let output = json!({
                "query": query,
                "matches": found,
                "importers": importers_of(&document, &query, mode),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain if found.is_empty() => {
            println!("No modules match '{}'", query);
        }
        OutputFormat::Plain => views::print_importers(&Palette::for_stdout(), &found),
    }

    Ok(())
}
