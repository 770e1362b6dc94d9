use std::io::{self, Write};

use anyhow::Result;

use crate::cli::LabelsArgs;
use crate::config::build_featurizer;

pub fn run_labels(args: LabelsArgs) -> Result<()> {
    let featurizer = build_featurizer(&args.descriptors)?;

    let mut out = io::stdout().lock();
    for (i, label) in featurizer.feature_labels().iter().enumerate() {
        writeln!(out, "{:>3}  {}", i, label)?;
    }
    out.flush()?;

    Ok(())
}
