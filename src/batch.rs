//! Featurization of whole datasets.
//!
//! Each row's composition column is parsed and featurized independently on a
//! rayon pool; results are reassembled in input order with one new column per
//! feature label. Row failures either abort the batch (reporting the lowest
//! failing row) or, with [`BatchOptions::ignore_errors`], leave `null`
//! features and are listed in the [`BatchReport`].

use crate::featurize::{self, Featurizer};
use crate::io::Dataset;
use crate::model::features::FeatureVector;
use rayon::prelude::*;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_COMPOSITION_COLUMN: &str = "composition";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Column holding the formula strings.
    pub column: String,
    /// Record failing rows instead of aborting.
    pub ignore_errors: bool,
    /// Worker threads; 0 lets rayon decide.
    pub jobs: usize,
    /// Keep the formula column in the output.
    pub keep_source_column: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            column: DEFAULT_COMPOSITION_COLUMN.to_string(),
            ignore_errors: false,
            jobs: 0,
            keep_source_column: true,
        }
    }
}

/// Why a single row could not be featurized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("column '{0}' is missing or null")]
    MissingValue(String),

    #[error("column '{column}' holds {found}, expected a formula string")]
    NotAFormula { column: String, found: &'static str },

    #[error(transparent)]
    Featurize(#[from] featurize::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Zero-based row index in the input dataset.
    pub index: usize,
    /// The formula text, when the row had one.
    pub formula: Option<String>,
    pub error: RowError,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("row {index} ({}): {source}", .formula.as_deref().unwrap_or("no formula"))]
    Row {
        index: usize,
        formula: Option<String>,
        #[source]
        source: RowError,
    },

    #[error("input already has a column named '{0}'; it would be overwritten by a feature")]
    ColumnCollision(String),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

impl From<RowFailure> for Error {
    fn from(f: RowFailure) -> Self {
        Error::Row {
            index: f.index,
            formula: f.formula,
            source: f.error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Input columns followed by one column per feature label.
    pub dataset: Dataset,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    pub fn featurized(&self) -> usize {
        self.dataset.len() - self.failures.len()
    }
}

pub fn featurize_dataset(
    featurizer: &Featurizer,
    input: &Dataset,
    options: &BatchOptions,
) -> Result<BatchReport, Error> {
    featurize_dataset_with_progress(featurizer, input, options, &|| {})
}

/// As [`featurize_dataset`], calling `on_row` once per finished row from
/// whichever worker finished it.
pub fn featurize_dataset_with_progress(
    featurizer: &Featurizer,
    input: &Dataset,
    options: &BatchOptions,
    on_row: &(dyn Fn() + Sync),
) -> Result<BatchReport, Error> {
    let labels = featurizer.feature_labels();
    if let Some(clash) = labels.iter().find(|l| input.has_column(l)) {
        return Err(Error::ColumnCollision(clash.clone()));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let results: Vec<Result<FeatureVector, RowFailure>> = pool.install(|| {
        input
            .rows()
            .par_iter()
            .enumerate()
            .map(|(index, row)| {
                let result = featurize_row(featurizer, row, &options.column, index);
                on_row();
                result
            })
            .collect()
    });

    let mut columns: Vec<String> = input
        .columns()
        .iter()
        .filter(|c| options.keep_source_column || **c != options.column)
        .cloned()
        .collect();
    columns.extend(labels.iter().cloned());

    let mut dataset = Dataset::new(columns);
    let mut failures = Vec::new();

    for (row, result) in input.rows().iter().zip(results) {
        let mut out = row.clone();
        if !options.keep_source_column {
            out.shift_remove(&options.column);
        }

        match result {
            Ok(vector) => {
                for (label, value) in vector.iter() {
                    out.insert(label.to_string(), Value::from(value));
                }
            }
            Err(failure) if options.ignore_errors => {
                for label in labels {
                    out.insert(label.clone(), Value::Null);
                }
                failures.push(failure);
            }
            Err(failure) => return Err(failure.into()),
        }

        dataset.push_row(out);
    }

    Ok(BatchReport { dataset, failures })
}

fn featurize_row(
    featurizer: &Featurizer,
    row: &Map<String, Value>,
    column: &str,
    index: usize,
) -> Result<FeatureVector, RowFailure> {
    let fail = |formula: Option<String>, error: RowError| RowFailure {
        index,
        formula,
        error,
    };

    let formula = match row.get(column) {
        None | Some(Value::Null) => {
            return Err(fail(None, RowError::MissingValue(column.to_string())));
        }
        Some(Value::String(s)) => s,
        Some(other) => {
            let found = match other {
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::Array(_) => "an array",
                _ => "an object",
            };
            return Err(fail(
                None,
                RowError::NotAFormula {
                    column: column.to_string(),
                    found,
                },
            ));
        }
    };

    featurizer
        .featurize_formula(formula)
        .map_err(|e| fail(Some(formula.clone()), e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Property, PropertyCatalog};
    use crate::featurize::Variant;
    use crate::io::formula::ParseFormulaError;
    use crate::model::element::Element;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn featurizer() -> Featurizer {
        Featurizer::with_variant(PropertyCatalog::embedded(), Variant::Extended)
    }

    fn dataset(value: Value) -> Dataset {
        let rows = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        Dataset::from_records(rows)
    }

    #[test]
    fn appends_feature_columns_in_order() {
        let input = dataset(json!([
            {"composition": "Fe1.00Ni0.00", "id": 1},
            {"composition": "Fe0.5Ni0.5", "id": 2},
        ]));
        let report = featurize_dataset(&featurizer(), &input, &BatchOptions::default()).unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(report.featurized(), 2);
        let columns = report.dataset.columns();
        assert_eq!(columns[0], "composition");
        assert_eq!(columns[1], "id");
        assert_eq!(&columns[2..], featurizer().feature_labels());

        assert_eq!(
            report.dataset.cell(0, "valence electron concentration"),
            Some(&json!(8.0))
        );
        assert_eq!(report.dataset.cell(1, "id"), Some(&json!(2)));
        let entropy = report.dataset.cell(1, "mixing entropy").unwrap().as_f64().unwrap();
        assert!((entropy - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn aborts_on_lowest_failing_row() {
        let input = dataset(json!([
            {"composition": "Fe"},
            {"composition": "FeOg"},
            {"composition": "Xx"},
        ]));
        let err = featurize_dataset(&featurizer(), &input, &BatchOptions::default()).unwrap_err();
        match err {
            Error::Row {
                index,
                formula,
                source,
            } => {
                assert_eq!(index, 1);
                assert_eq!(formula.as_deref(), Some("FeOg"));
                assert_eq!(
                    source,
                    RowError::Featurize(featurize::Error::missing_property(
                        Element::Og,
                        Property::AtomicRadius
                    ))
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ignore_errors_null_fills_and_reports() {
        let input = dataset(json!([
            {"composition": "Fe", "id": "a"},
            {"composition": "Fe(Ni", "id": "b"},
            {"id": "c"},
            {"composition": 42, "id": "d"},
        ]));
        let options = BatchOptions {
            ignore_errors: true,
            jobs: 2,
            ..Default::default()
        };
        let report = featurize_dataset(&featurizer(), &input, &options).unwrap();

        assert_eq!(report.dataset.len(), 4);
        assert_eq!(report.featurized(), 1);
        let indices: Vec<_> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);

        assert_eq!(report.dataset.cell(1, "id"), Some(&json!("b")));
        assert_eq!(report.dataset.cell(1, "mixing entropy"), Some(&Value::Null));
        assert!(matches!(
            report.failures[0].error,
            RowError::Featurize(featurize::Error::Formula(_))
        ));
        assert_eq!(
            report.failures[1].error,
            RowError::MissingValue("composition".to_string())
        );
        assert_eq!(
            report.failures[2].error,
            RowError::NotAFormula {
                column: "composition".to_string(),
                found: "a number"
            }
        );
    }

    #[test]
    fn deeply_nested_formula_is_a_row_failure() {
        let nested = format!("{}Fe{}", "(".repeat(20_000), ")".repeat(20_000));
        let input = dataset(json!([
            {"composition": "Fe0.5Ni0.5"},
            {"composition": nested},
            {"composition": "Cu"},
        ]));
        let options = BatchOptions {
            ignore_errors: true,
            jobs: 2,
            ..Default::default()
        };
        let report = featurize_dataset(&featurizer(), &input, &options).unwrap();

        assert_eq!(report.featurized(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert!(matches!(
            report.failures[0].error,
            RowError::Featurize(featurize::Error::Formula(ParseFormulaError::TooDeep { .. }))
        ));
        assert_eq!(report.dataset.cell(1, "mixing entropy"), Some(&Value::Null));
        assert_eq!(
            report.dataset.cell(2, "valence electron concentration"),
            Some(&json!(11.0))
        );
    }

    #[test]
    fn custom_column_and_drop_source() {
        let input = dataset(json!([{"formula": "Cu", "id": 9}]));
        let options = BatchOptions {
            column: "formula".to_string(),
            keep_source_column: false,
            ..Default::default()
        };
        let report = featurize_dataset(&featurizer(), &input, &options).unwrap();
        assert!(!report.dataset.has_column("formula"));
        assert_eq!(report.dataset.columns()[0], "id");
        assert_eq!(
            report.dataset.cell(0, "valence electron concentration"),
            Some(&json!(11.0))
        );
    }

    #[test]
    fn rejects_column_collision() {
        let input = dataset(json!([{"composition": "Fe", "mixing entropy": 0.1}]));
        let err = featurize_dataset(&featurizer(), &input, &BatchOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ColumnCollision(ref c) if c == "mixing entropy"));
    }

    #[test]
    fn progress_callback_runs_once_per_row() {
        let input = dataset(json!([
            {"composition": "Fe"},
            {"composition": "Ni"},
            {"composition": "Og"},
        ]));
        let counter = AtomicUsize::new(0);
        let options = BatchOptions {
            ignore_errors: true,
            ..Default::default()
        };
        featurize_dataset_with_progress(&featurizer(), &input, &options, &|| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn empty_dataset_yields_label_columns_only() {
        let input = Dataset::new(vec!["composition".to_string()]);
        let report = featurize_dataset(&featurizer(), &input, &BatchOptions::default()).unwrap();
        assert!(report.dataset.is_empty());
        assert_eq!(report.dataset.columns().len(), 1 + featurizer().feature_labels().len());
    }
}
