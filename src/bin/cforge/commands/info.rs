use std::io::{self, Write};

use anyhow::Result;
use comp_forge::Featurizer;

use crate::cli::InfoArgs;
use crate::config::load_catalog;
use crate::display::print_catalog_summary;

pub fn run_info(args: InfoArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let source = args
        .catalog
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());

    let mut out = io::stdout().lock();

    writeln!(out, "Citation:")?;
    for line in Featurizer::citations() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;
    writeln!(out, "Implementors: {}", Featurizer::implementors().join(", "))?;
    writeln!(out)?;

    print_catalog_summary(&mut out, &catalog, &source);
    out.flush()?;

    Ok(())
}
