use std::sync::Arc;

/// An ordered descriptor vector, position-aligned with its labels.
///
/// Labels are shared with the [`Featurizer`](crate::Featurizer) that produced
/// the vector, so cloning a vector never copies the label table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    labels: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new(labels: Arc<[String]>, values: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Looks up a value by its label.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
