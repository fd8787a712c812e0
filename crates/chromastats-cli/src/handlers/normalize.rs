use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use crate::views::{self, Palette};
use anyhow::{Context, Result};
use chromastats_normalize::NormalizeSummary;
use chromastats_types::{render_stats, write_stats_file};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct FileSummary {
    path: String,
    #[serde(flatten)]
    summary: NormalizeSummary,
}

pub fn handle(
    ctx: &ExecutionContext,
    path: PathBuf,
    output: Option<PathBuf>,
    in_place: bool,
    compact: bool,
) -> Result<()> {
    let pretty = ctx.config.pretty && !compact;

    if path.is_dir() {
        if !in_place {
            anyhow::bail!(
                "{} is a directory; pass --in-place to rewrite every {} below it",
                path.display(),
                ctx.config.stats_file_name
            );
        }
        return handle_dir(ctx, &path, pretty);
    }

    let document = ctx.load_stats(&path)?;
    let (normalized, summary) = ctx.normalizer().normalize_with_summary(document);

    let destination = if in_place { Some(path.clone()) } else { output };

    let Some(destination) = destination else {
        println!("{}", render_stats(&normalized, pretty)?);
        // stdout carries the document, so the summary goes to stderr
        if ctx.format == OutputFormat::Plain {
            eprintln!("{}", views::summary_line(&Palette::for_stderr(), &path, &summary));
        }
        return Ok(());
    };

    if summary.normalizable || destination != path {
        write_stats_file(&destination, &normalized, pretty)
            .with_context(|| format!("Failed to write {}", destination.display()))?;
    } else {
        tracing::warn!(path = %path.display(), "no modules array, leaving file untouched");
    }

    report(ctx, &[(destination, summary)])
}

fn handle_dir(ctx: &ExecutionContext, dir: &Path, pretty: bool) -> Result<()> {
    let files = ctx.find_stats_files(dir);
    if files.is_empty() {
        anyhow::bail!(
            "No {} found under {}",
            ctx.config.stats_file_name,
            dir.display()
        );
    }

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let document = ctx.load_stats(&file)?;
        let (normalized, summary) = ctx.normalizer().normalize_with_summary(document);

        if summary.normalizable {
            write_stats_file(&file, &normalized, pretty)
                .with_context(|| format!("Failed to write {}", file.display()))?;
        } else {
            tracing::warn!(path = %file.display(), "no modules array, leaving file untouched");
        }
        results.push((file, summary));
    }

    report(ctx, &results)
}

fn report(ctx: &ExecutionContext, results: &[(PathBuf, NormalizeSummary)]) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            let summaries: Vec<FileSummary> = results
                .iter()
                .map(|(path, summary)| FileSummary {
                    path: path.display().to_string(),
                    summary: summary.clone(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Plain => {
            let palette = Palette::for_stdout();
            for (path, summary) in results {
                println!("{}", views::summary_line(&palette, path, summary));
            }
        }
    }
    Ok(())
}
