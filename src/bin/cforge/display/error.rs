use std::error::Error as StdError;
use std::io::{self, Write};

use anyhow::Error;
use comp_forge::batch::{Error as BatchError, RowError};
use comp_forge::catalog::{Error as CatalogError, ParsePropertyError};
use comp_forge::io::formula::MAX_NESTING_DEPTH;
use comp_forge::io::{Error as IoError, Format};
use comp_forge::{CompositionError, FeaturizeError, ParseFormulaError};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Gathers hints from every typed error in the cause chain, falling back to
/// keyword matching on the top-level message when none is recognized.
#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    typed: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        for cause in err.chain() {
            collector.visit(cause);
        }
        if !collector.typed {
            collector.collect_fallback_hints(&err.to_string());
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        let hint = hint.into();
        if !self.hints.contains(&hint) {
            self.hints.push(hint);
        }
    }

    fn visit(&mut self, cause: &(dyn StdError + 'static)) {
        if let Some(e) = cause.downcast_ref::<BatchError>() {
            self.typed = true;
            self.collect_batch_hints(e);
        } else if let Some(e) = cause.downcast_ref::<RowError>() {
            self.typed = true;
            self.collect_row_hints(e);
        } else if let Some(e) = cause.downcast_ref::<FeaturizeError>() {
            self.typed = true;
            self.collect_featurize_hints(e);
        } else if let Some(e) = cause.downcast_ref::<ParseFormulaError>() {
            self.typed = true;
            self.collect_formula_hints(e);
        } else if let Some(e) = cause.downcast_ref::<CompositionError>() {
            self.typed = true;
            self.collect_composition_hints(e);
        } else if let Some(e) = cause.downcast_ref::<CatalogError>() {
            self.typed = true;
            self.collect_catalog_hints(e);
        } else if cause.downcast_ref::<ParsePropertyError>().is_some() {
            self.typed = true;
            self.add("Valid property keys: nvalence, atomic_radius, covalent_radius,");
            self.add("electronegativity_pauling, density, thermal_conductivity, melting_point");
            self.add("Run `cforge labels` to see the resulting feature columns");
        } else if let Some(e) = cause.downcast_ref::<IoError>() {
            self.typed = true;
            self.collect_io_hints(e);
        } else if let Some(e) = cause.downcast_ref::<std::io::Error>() {
            self.typed = true;
            self.collect_std_io_hints(e);
        }
    }

    fn collect_batch_hints(&mut self, err: &BatchError) {
        match err {
            BatchError::Row { index, .. } => {
                self.add(format!("Row {index} is zero-based, excluding the CSV header"));
                self.add("Pass --ignore-errors to skip bad rows and report them instead");
            }
            BatchError::ColumnCollision(name) => {
                self.add(format!("The input already contains a '{name}' column"));
                self.add("Rename or drop that column before featurizing");
            }
            BatchError::ThreadPool(_) => {
                self.add("Try a smaller --jobs value");
            }
        }
    }

    fn collect_row_hints(&mut self, err: &RowError) {
        match err {
            RowError::MissingValue(column) | RowError::NotAFormula { column, .. } => {
                self.add(format!("Every row needs a formula string in '{column}'"));
                self.add("Use --column to read formulas from a different column");
            }
            RowError::Featurize(_) => {}
        }
    }

    fn collect_featurize_hints(&mut self, err: &FeaturizeError) {
        match err {
            FeaturizeError::UnresolvedElement { element } => {
                self.add(format!("The property catalog has no entry for {element}"));
                self.add("Supply a catalog covering it with --catalog <file.toml>");
                self.add("Run `cforge info` to see which elements are covered");
            }
            FeaturizeError::MissingProperty { element, property } => {
                self.add(format!("{element} has no '{property}' value in the catalog"));
                if property.starts_with("ionization_energies") {
                    self.add("Use --variant extended to treat missing stages as 0.0");
                    self.add("Or lower --ionization-depth");
                } else {
                    self.add("Select other properties with --properties");
                    self.add("Or add the value to a custom --catalog file");
                }
            }
            FeaturizeError::MalformedComposition(_) | FeaturizeError::Formula(_) => {}
        }
    }

    fn collect_formula_hints(&mut self, err: &ParseFormulaError) {
        match err {
            ParseFormulaError::UnknownElement { symbol, .. } => {
                self.add(format!("'{symbol}' is not an element symbol"));
                self.add("Symbols are case sensitive: Co is cobalt, CO is carbon + oxygen");
            }
            ParseFormulaError::Unclosed { .. } | ParseFormulaError::Unmatched { .. } => {
                self.add("Check that every '(' or '[' has a matching closer");
            }
            ParseFormulaError::TooDeep { .. } => {
                self.add(format!(
                    "Groups may nest at most {MAX_NESTING_DEPTH} levels deep"
                ));
            }
            ParseFormulaError::BadAmount { .. } => {
                self.add("Amounts are decimals with an optional exponent, e.g. 0.5 or 2e-1");
            }
            ParseFormulaError::Empty | ParseFormulaError::ZeroTotal => {
                self.add("A formula needs at least one element with a positive amount");
            }
            ParseFormulaError::UnexpectedChar { .. } => {
                self.add("Formulas contain element symbols, amounts and ( ) [ ] groups only");
            }
            ParseFormulaError::Composition(_) => {}
        }
    }

    fn collect_composition_hints(&mut self, err: &CompositionError) {
        match err {
            CompositionError::FractionSum { .. } => {
                self.add("Fractions must sum to 1; build with Composition::from_amounts to normalize");
            }
            CompositionError::NegativeAmount { .. } | CompositionError::NonFiniteAmount { .. } => {
                self.add("Amounts must be finite and non-negative");
            }
            CompositionError::NonFiniteTotal => {
                self.add("Amounts are too large to sum; divide them by a common factor");
            }
            CompositionError::Empty | CompositionError::DuplicateElement(_) => {}
        }
    }

    fn collect_catalog_hints(&mut self, err: &CatalogError) {
        match err {
            CatalogError::Parse(_) => {
                self.add("The catalog must be TOML with one [elements.<Symbol>] table per element");
                self.add("Unknown keys inside an element table are rejected");
            }
            CatalogError::UnknownElement(symbol) => {
                self.add(format!("Rename the [elements.{symbol}] table to a valid symbol"));
            }
            CatalogError::NonFiniteValue { .. } => {
                self.add("Replace NaN or inf with a real value, or remove the key");
            }
        }
    }

    fn collect_io_hints(&mut self, err: &IoError) {
        match err {
            IoError::Io { source } => self.collect_std_io_hints(source),
            IoError::Parse { format, line, .. } => {
                self.add(format!("Inspect the {format} input around line {line}"));
                self.add("Pass --infmt if the extension does not match the content");
                match format {
                    Format::Json => self.add("JSON input must be an array of objects"),
                    Format::Csv => self.add("CSV input needs a header row and equal-length rows"),
                }
            }
            IoError::Write { .. } => {
                self.add("Feature values must be finite to be written");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File not found; check the path spelling");
            }
            ErrorKind::PermissionDenied => {
                self.add("Permission denied; check file permissions with `ls -la`");
            }
            ErrorKind::BrokenPipe => {
                self.add("The output consumer exited early (e.g. `| head`)");
            }
            ErrorKind::WriteZero | ErrorKind::StorageFull => {
                self.add("Check available disk space");
            }
            _ => {
                self.add("Check file path, permissions and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, msg: &str) {
        let msg = msg.to_lowercase();

        if msg.contains("stdin") {
            self.add("Pass -i <FILE> or pipe a dataset with --infmt json|csv");
        } else if msg.contains("stdout") {
            self.add("Pass -o <FILE> or pipe the output with --outfmt json|csv");
        } else if msg.contains("infer") || msg.contains("format") {
            self.add("Supported dataset extensions: .json, .csv");
            self.add("Use --infmt / --outfmt to override detection");
        }
    }
}
