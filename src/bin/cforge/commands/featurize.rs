use std::io::{self, Write};

use anyhow::{Context, Result};
use comp_forge::io::{Dataset, Format, write_dataset};
use comp_forge::{FeatureVector, Featurizer};
use serde_json::{Map, Value};

use crate::cli::{FeaturizeArgs, ReportFormat};
use crate::config::build_featurizer;
use crate::util::text::format_value;

pub fn run_featurize(args: FeaturizeArgs) -> Result<()> {
    let featurizer = build_featurizer(&args.descriptors)?;

    let results = args
        .formulas
        .iter()
        .map(|formula| {
            featurizer
                .featurize_formula(formula)
                .with_context(|| format!("Failed to featurize '{formula}'"))
                .map(|vector| (formula.as_str(), vector))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut out = io::stdout().lock();
    match args.format {
        ReportFormat::Table => write_listing(&mut out, &featurizer, &results)?,
        ReportFormat::Json => write_records(&mut out, &featurizer, &results, Format::Json)?,
        ReportFormat::Csv => write_records(&mut out, &featurizer, &results, Format::Csv)?,
    }
    out.flush()?;

    Ok(())
}

fn write_listing(
    out: &mut impl Write,
    featurizer: &Featurizer,
    results: &[(&str, FeatureVector)],
) -> Result<()> {
    let key_w = featurizer
        .feature_labels()
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    for (i, (formula, vector)) in results.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{formula}")?;
        for (label, value) in vector.iter() {
            writeln!(out, "  {label:>key_w$}: {:>14}", format_value(Some(value)))?;
        }
    }

    Ok(())
}

fn write_records(
    out: &mut impl Write,
    featurizer: &Featurizer,
    results: &[(&str, FeatureVector)],
    format: Format,
) -> Result<()> {
    let mut columns = vec![comp_forge::batch::DEFAULT_COMPOSITION_COLUMN.to_string()];
    columns.extend(featurizer.feature_labels().iter().cloned());

    let mut dataset = Dataset::new(columns);
    for (formula, vector) in results {
        let mut row = Map::new();
        row.insert(
            comp_forge::batch::DEFAULT_COMPOSITION_COLUMN.to_string(),
            Value::from(*formula),
        );
        for (label, value) in vector.iter() {
            row.insert(label.to_string(), Value::from(value));
        }
        dataset.push_row(row);
    }

    write_dataset(out, &dataset, format).context("Failed to write feature records")?;
    Ok(())
}
