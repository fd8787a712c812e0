use chromastats_normalize::{ContractReport, ModuleMatch, NormalizeSummary};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::path::Path;

/// Colours only when the stream is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn for_stdout() -> Self {
        Self {
            enabled: std::io::stdout().is_terminal(),
        }
    }

    pub fn for_stderr() -> Self {
        Self {
            enabled: std::io::stderr().is_terminal(),
        }
    }

    pub fn ok(&self, text: &str) -> String {
        if self.enabled {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warn(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn name(&self, text: &str) -> String {
        if self.enabled {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn summary_line(palette: &Palette, path: &Path, summary: &NormalizeSummary) -> String {
    if !summary.normalizable {
        return format!(
            "{} {}",
            palette.warn("unchanged"),
            palette.dim(&format!("{} (no modules array)", path.display()))
        );
    }

    format!(
        "{} {}: {} modules, +{} added ({} promoted stubs)",
        palette.ok("normalized"),
        path.display(),
        summary.original_modules,
        summary.added_modules,
        summary.promoted_stubs
    )
}

pub fn print_contract_report(palette: &Palette, path: &Path, report: &ContractReport) {
    println!("File: {}", path.display());
    println!("Modules: {}", report.modules);

    if report.is_ok() {
        println!("Status: {}", palette.ok("✓ Contract satisfied"));
    } else {
        println!("Status: {}", palette.error("✗ Contract violated"));
        println!();
        println!("Violations:");
        for violation in &report.violations {
            println!("  - {}", violation);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("{}", palette.warn("Warnings:"));
        for warning in &report.warnings {
            println!("  - {}", palette.dim(&warning.to_string()));
        }
    }
}

fn print_match(palette: &Palette, module: &ModuleMatch) {
    let id = module.id.as_deref().unwrap_or("null");
    println!(
        "[{}] {} {}",
        module.index,
        palette.name(&module.name),
        palette.dim(&format!("(id: {})", id))
    );
}

pub fn print_importers(palette: &Palette, matches: &[ModuleMatch]) {
    for module in matches {
        print_match(palette, module);
        if module.reasons.is_empty() {
            println!("    {}", palette.dim("no importers"));
        }
        for reason in &module.reasons {
            println!("    <- {}", reason);
        }
    }
}

pub fn print_dependents(palette: &Palette, importer: &str, dependents: &[ModuleMatch]) {
    println!("Imported by {}:", palette.name(importer));
    for module in dependents {
        print!("  ");
        print_match(palette, module);
    }
}
