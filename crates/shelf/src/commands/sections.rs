//! `shelf sections` command implementation.
//!
//! Runs a single scan and prints the index, which is handy for checking a
//! documents tree before serving it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use shelf_config::{CliSettings, Config};
use shelf_storage_fs::{CollectingDiagnostics, DiagnosticsSink, Scanner, Section};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sections command.
#[derive(Args)]
pub(crate) struct SectionsArgs {
    /// Path to configuration file (default: auto-discover shelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documents root directory (overrides config).
    #[arg(short, long, env = "SHELF_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Print the index as JSON.
    #[arg(long)]
    json: bool,
}

impl SectionsArgs {
    /// Execute the sections command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the documents root cannot
    /// be scanned.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let sections = Scanner::new(config.docs_resolved.source_dir.clone())
            .with_general_label(config.docs_resolved.general_label.clone())
            .with_diagnostics(Arc::clone(&diagnostics) as Arc<dyn DiagnosticsSink>)
            .scan()?;

        for message in diagnostics.messages() {
            output.warning(&format!("Warning: {message}"));
        }

        if self.json {
            output.raw(&serde_json::to_string_pretty(&sections)?);
        } else {
            print_sections(&output, &sections);
        }

        Ok(())
    }
}

fn print_sections(output: &Output, sections: &[Section]) {
    if sections.is_empty() {
        output.info("No documents found.");
        return;
    }

    for section in sections {
        output.heading(&summary(section));
        for doc in &section.documents {
            output.item(&format!("  {}", doc.name), Some(&doc.url));
        }
    }
}

/// Heading line for a section, e.g. `HR/2025 (2 documents, README)`.
fn summary(section: &Section) -> String {
    let count = section.documents.len();
    let noun = if count == 1 { "document" } else { "documents" };
    if section.has_readme() {
        format!("{} ({count} {noun}, README)", section.name)
    } else {
        format!("{} ({count} {noun})", section.name)
    }
}
