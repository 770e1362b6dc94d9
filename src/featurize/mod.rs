mod config;
mod error;
pub mod stats;

pub use config::{FeaturizerConfig, MissingPolicy, Variant};
pub use error::Error;

use crate::catalog::{ElementProperties, PropertyCatalog};
use crate::io::formula::parse_formula;
use crate::model::composition::{Composition, CompositionError, SUM_TOLERANCE};
use crate::model::element::Element;
use crate::model::features::FeatureVector;
use std::sync::Arc;

const CITATION_BIB: &str = include_str!("../../resources/rao2022.bib");

const IMPLEMENTORS: [&str; 3] = ["Zhang Hongyu", "Wang Xiaobing", "GUO Qilin"];

/// Maps fractional compositions to composition-weighted elemental
/// descriptors.
///
/// A featurizer owns a shared, read-only [`PropertyCatalog`] and a
/// [`FeaturizerConfig`]. It keeps no per-call state, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct Featurizer {
    catalog: Arc<PropertyCatalog>,
    config: FeaturizerConfig,
    labels: Arc<[String]>,
}

impl Featurizer {
    pub fn new(catalog: Arc<PropertyCatalog>, config: FeaturizerConfig) -> Self {
        let labels = config.labels().into();
        Self {
            catalog,
            config,
            labels,
        }
    }

    pub fn with_variant(catalog: Arc<PropertyCatalog>, variant: Variant) -> Self {
        Self::new(catalog, FeaturizerConfig::for_variant(variant))
    }

    pub fn config(&self) -> &FeaturizerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    /// Labels of the values returned by [`featurize`](Self::featurize),
    /// position for position.
    pub fn feature_labels(&self) -> &[String] {
        &self.labels
    }

    /// Computes the descriptor vector of `composition`.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedComposition`] if the composition is empty or its
    ///   fractions do not sum to 1
    /// - [`Error::UnresolvedElement`] if an element is not in the catalog
    /// - [`Error::MissingProperty`] if a configured property is absent for
    ///   an element, or an ionization stage is absent under
    ///   [`MissingPolicy::Fail`]
    pub fn featurize(&self, composition: &Composition) -> Result<FeatureVector, Error> {
        if composition.is_empty() {
            return Err(CompositionError::Empty.into());
        }

        let (elements, fractions): (Vec<Element>, Vec<f64>) = composition.iter().unzip();
        let sum: f64 = fractions.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(CompositionError::FractionSum { sum }.into());
        }

        let records = self.resolve(&elements)?;
        let mut values = Vec::with_capacity(self.labels.len());

        for &prop in &self.config.properties {
            let per_element = elements
                .iter()
                .zip(&records)
                .map(|(&el, props)| {
                    prop.value(props)
                        .ok_or_else(|| Error::missing_property(el, prop))
                })
                .collect::<Result<Vec<_>, _>>()?;
            values.push(stats::weighted_average(&fractions, &per_element));
        }

        for stage in 0..self.config.ionization_depth {
            let per_element = elements
                .iter()
                .zip(&records)
                .map(|(&el, props)| self.ionization_energy(el, props, stage))
                .collect::<Result<Vec<_>, _>>()?;
            values.push(stats::weighted_average(&fractions, &per_element));
        }

        if self.config.mixing_entropy {
            values.push(stats::mixing_entropy(&fractions));
        }
        if self.config.size_difference {
            values.push(stats::size_difference(&fractions));
        }

        Ok(FeatureVector::new(Arc::clone(&self.labels), values))
    }

    /// Parses `formula` (e.g. `"Fe0.6Ni0.4"`) and featurizes the result.
    ///
    /// # Errors
    ///
    /// [`Error::Formula`] for unparsable input, otherwise as
    /// [`featurize`](Self::featurize).
    pub fn featurize_formula(&self, formula: &str) -> Result<FeatureVector, Error> {
        let composition = parse_formula(formula)?;
        self.featurize(&composition)
    }

    /// BibTeX lines of the publication these descriptors follow.
    pub fn citations() -> Vec<String> {
        CITATION_BIB
            .lines()
            .map(|line| line.trim().to_string())
            .collect()
    }

    pub fn implementors() -> &'static [&'static str] {
        &IMPLEMENTORS
    }

    fn resolve(&self, elements: &[Element]) -> Result<Vec<&ElementProperties>, Error> {
        elements
            .iter()
            .map(|&element| {
                self.catalog
                    .get(element)
                    .ok_or(Error::UnresolvedElement { element })
            })
            .collect()
    }

    fn ionization_energy(
        &self,
        element: Element,
        props: &ElementProperties,
        stage: usize,
    ) -> Result<f64, Error> {
        match (props.ionization_energy(stage), self.config.missing_ionization) {
            (Some(energy), _) => Ok(energy),
            (None, MissingPolicy::Zero) => Ok(0.0),
            (None, MissingPolicy::Fail) => Err(Error::missing_ionization_energy(element, stage)),
        }
    }
}
