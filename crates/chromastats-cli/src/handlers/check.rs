use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::views::{self, Palette};
use anyhow::Result;
use chromastats_normalize::check_contract;
use serde_json::json;
use std::path::PathBuf;

pub fn handle(ctx: &ExecutionContext, path: PathBuf) -> Result<()> {
    let path = ctx.resolve_stats_path(&path)?;
    let document = ctx.load_stats(&path)?;
    let report = check_contract(&document);

    match ctx.format {
        OutputFormat::Json => {
            let output = json!({
                "path": path.display().to_string(),
                "ok": report.is_ok(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => views::print_contract_report(&Palette::for_stdout(), &path, &report),
    }

    if !report.is_ok() {
        anyhow::bail!(
            "{} contract violation(s) in {}",
            report.violations.len(),
            path.display()
        );
    }

    Ok(())
}
