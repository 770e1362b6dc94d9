use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use comp_forge::Featurizer;
use comp_forge::batch::{BatchReport, RowFailure, featurize_dataset_with_progress};
use comp_forge::io::{Dataset, Format, read_dataset, write_dataset};

use crate::cli::BatchArgs;
use crate::config::{build_batch_options, build_featurizer};
use crate::display::{
    Context as DisplayContext, Progress, print_batch_summary, print_dataset_info, print_failures,
};
use crate::io::{create_output, infer_table_format, open_input, stdin_is_tty, stdout_is_tty};

const TOTAL_STEPS: u8 = 4;

pub fn run_batch(args: BatchArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: cforge batch -i <INPUT> or pipe data via stdin."
        );
    }
    if args.io.output.is_none() && stdout_is_tty() {
        bail!(
            "No output file specified and stdout is a terminal.\n\nUsage: cforge batch -i <INPUT> -o <OUTPUT> or pipe output."
        );
    }

    let input_format = resolve_format(
        args.input_format.map(Into::into),
        args.io.input.as_deref(),
        "--infmt",
    )?;
    let output_format = resolve_format(
        args.output_format.map(Into::into),
        args.io.output.as_deref(),
        "--outfmt",
    )?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading property catalog");
    let featurizer = build_featurizer(&args.descriptors)?;
    progress.complete_step("Loading property catalog", &catalog_substeps(&args, &featurizer));

    progress.step("Reading dataset");
    let dataset = read_input(args.io.input.as_deref(), input_format)?;
    progress.complete_step(
        "Reading dataset",
        &[format!("Parse {} ({} rows)", input_format, dataset.len())],
    );

    if ctx.interactive {
        print_dataset_info(dataset.len(), dataset.columns(), input_format);
    }

    progress.step("Featurizing compositions");
    let options = build_batch_options(&args.rows);
    let ticker = progress.rows(dataset.len());
    let report = featurize_dataset_with_progress(&featurizer, &dataset, &options, &|| {
        ticker.tick()
    })
    .context("Batch featurization failed")?;
    progress.complete_step(
        "Featurizing compositions",
        &featurize_substeps(&report, &options.column),
    );

    if ctx.interactive {
        print_batch_summary(&report, featurizer.feature_labels().len());
        print_failures(&report.failures);
    } else if !ctx.quiet {
        report_failures_plain(&report.failures);
    }

    progress.step("Writing output");
    write_output(args.io.output.as_deref(), &report.dataset, output_format)?;
    progress.complete_step(
        "Writing output",
        &[format!(
            "Write {} → {}",
            output_format,
            display_target(args.io.output.as_deref())
        )],
    );

    progress.finish();

    Ok(())
}

fn resolve_format(explicit: Option<Format>, path: Option<&Path>, flag: &str) -> Result<Format> {
    if let Some(fmt) = explicit {
        return Ok(fmt);
    }

    match path {
        Some(path) => infer_table_format(path).with_context(|| {
            format!(
                "Cannot infer format from '{}'. Use {flag} to specify.",
                path.display()
            )
        }),
        None => bail!("Streaming through stdin/stdout requires {flag}"),
    }
}

fn read_input(path: Option<&Path>, format: Format) -> Result<Dataset> {
    let reader = open_input(path)?;
    read_dataset(reader, format)
        .with_context(|| format!("Failed to read {} dataset from {}", format, display_target(path)))
}

fn write_output(path: Option<&Path>, dataset: &Dataset, format: Format) -> Result<()> {
    let mut writer = create_output(path)?;
    write_dataset(&mut writer, dataset, format)
        .with_context(|| format!("Failed to write {} dataset to {}", format, display_target(path)))?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

fn catalog_substeps(args: &BatchArgs, featurizer: &Featurizer) -> Vec<String> {
    let source = match &args.descriptors.catalog {
        Some(path) => format!("Catalog {}", file_name(path)),
        None => "Embedded catalog".to_string(),
    };

    vec![
        format!("{} ({} elements)", source, featurizer.catalog().len()),
        format!(
            "{} features ({} properties, {} ionization stages)",
            featurizer.feature_labels().len(),
            featurizer.config().properties.len(),
            featurizer.config().ionization_depth
        ),
    ]
}

fn featurize_substeps(report: &BatchReport, column: &str) -> Vec<String> {
    let mut steps = vec![format!("Parse formulas from '{column}'")];
    steps.push(format!(
        "Featurized {} of {} rows",
        report.featurized(),
        report.dataset.len()
    ));
    if !report.failures.is_empty() {
        steps.push(format!("Skipped {} rows with null features", report.failures.len()));
    }
    steps
}

fn report_failures_plain(failures: &[RowFailure]) {
    for failure in failures {
        eprintln!(
            "cforge: skipped row {} ({}): {}",
            failure.index,
            failure.formula.as_deref().unwrap_or("no formula"),
            failure.error
        );
    }
}

fn display_target(path: Option<&Path>) -> String {
    path.map(file_name).unwrap_or_else(|| "stdio".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
