//! Configuration types for composition featurization.
//!
//! - [`FeaturizerConfig`] — Which features are computed, in which order
//! - [`Variant`] — The two standard descriptor sets
//! - [`MissingPolicy`] — How absent ionization energies are treated

use crate::catalog::Property;
use std::fmt;

/// The two standard descriptor sets.
///
/// | | base | extended |
/// |---|---|---|
/// | thermal conductivity, melting point | yes | no |
/// | mixing entropy, atomic size difference | no | yes |
/// | missing ionization energy | error | 0.0 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    Base,
    #[default]
    Extended,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Base => write!(f, "base"),
            Variant::Extended => write!(f, "extended"),
        }
    }
}

/// Treatment of an element whose ionization-energy list is too short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Fail with [`Error::MissingProperty`](super::Error::MissingProperty).
    Fail,
    /// Substitute 0.0 for the missing stage.
    #[default]
    Zero,
}

/// Feature selection for a [`Featurizer`](super::Featurizer).
///
/// Output order is always: `properties` in list order, then
/// `ionization_depth` ionization energies, then mixing entropy and atomic
/// size difference when enabled.
///
/// # Examples
///
/// ```
/// use comp_forge::{FeaturizerConfig, MissingPolicy, Property, Variant};
///
/// // The extended descriptor set (default)
/// let extended = FeaturizerConfig::default();
/// assert_eq!(extended, FeaturizerConfig::for_variant(Variant::Extended));
///
/// // Electronegativity plus first ionization energy only
/// let narrow = FeaturizerConfig {
///     properties: vec![Property::PaulingElectronegativity],
///     ionization_depth: 1,
///     missing_ionization: MissingPolicy::Fail,
///     ..FeaturizerConfig::extended()
/// };
/// assert_eq!(narrow.feature_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturizerConfig {
    /// Scalar properties averaged over the composition.
    pub properties: Vec<Property>,

    /// Number of ionization stages averaged, starting from the first.
    pub ionization_depth: usize,

    /// Behavior when an element records fewer stages than requested.
    pub missing_ionization: MissingPolicy,

    /// Append −Σ cᵢ ln cᵢ.
    pub mixing_entropy: bool,

    /// Append the fraction-spread statistic labelled "atomic size difference".
    pub size_difference: bool,
}

const COMMON_PROPERTIES: [Property; 5] = [
    Property::ValenceElectrons,
    Property::AtomicRadius,
    Property::CovalentRadius,
    Property::PaulingElectronegativity,
    Property::Density,
];

impl FeaturizerConfig {
    pub fn base() -> Self {
        let mut properties = COMMON_PROPERTIES.to_vec();
        properties.extend([Property::ThermalConductivity, Property::MeltingPoint]);
        Self {
            properties,
            ionization_depth: 3,
            missing_ionization: MissingPolicy::Fail,
            mixing_entropy: false,
            size_difference: false,
        }
    }

    pub fn extended() -> Self {
        Self {
            properties: COMMON_PROPERTIES.to_vec(),
            ionization_depth: 3,
            missing_ionization: MissingPolicy::Zero,
            mixing_entropy: true,
            size_difference: true,
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Base => Self::base(),
            Variant::Extended => Self::extended(),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.properties.len()
            + self.ionization_depth
            + usize::from(self.mixing_entropy)
            + usize::from(self.size_difference)
    }

    pub(crate) fn labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.feature_count());
        labels.extend(self.properties.iter().map(|p| p.label().to_string()));
        labels.extend(
            (1..=self.ionization_depth).map(|n| format!("{} ionization energy", ordinal(n))),
        );
        if self.mixing_entropy {
            labels.push("mixing entropy".to_string());
        }
        if self.size_difference {
            labels.push("atomic size difference".to_string());
        }
        labels
    }
}

impl Default for FeaturizerConfig {
    fn default() -> Self {
        Self::extended()
    }
}

fn ordinal(n: usize) -> String {
    const WORDS: [&str; 10] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth",
    ];
    match WORDS.get(n.wrapping_sub(1)) {
        Some(word) => word.to_string(),
        None => format!("{n}th"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_extended() {
        let config = FeaturizerConfig::default();
        assert_eq!(config, FeaturizerConfig::extended());
        assert_eq!(config.missing_ionization, MissingPolicy::Zero);
        assert!(config.mixing_entropy);
        assert!(config.size_difference);
        assert_eq!(Variant::default(), Variant::Extended);
    }

    #[test]
    fn base_config_values() {
        let config = FeaturizerConfig::base();
        assert_eq!(config.properties.len(), 7);
        assert_eq!(config.properties[5], Property::ThermalConductivity);
        assert_eq!(config.properties[6], Property::MeltingPoint);
        assert_eq!(config.missing_ionization, MissingPolicy::Fail);
        assert!(!config.mixing_entropy);
        assert!(!config.size_difference);
        assert_eq!(config.feature_count(), 10);
    }

    #[test]
    fn extended_labels_in_canonical_order() {
        let labels = FeaturizerConfig::extended().labels();
        assert_eq!(
            labels,
            vec![
                "valence electron concentration",
                "atomic radius (empirical)",
                "covalent radius",
                "Pauling electronegativity",
                "mass density",
                "first ionization energy",
                "second ionization energy",
                "third ionization energy",
                "mixing entropy",
                "atomic size difference",
            ]
        );
    }

    #[test]
    fn base_labels_in_canonical_order() {
        let labels = FeaturizerConfig::base().labels();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[5], "thermal conductivity");
        assert_eq!(labels[6], "melting point");
        assert_eq!(labels[9], "third ionization energy");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(10), "tenth");
        assert_eq!(ordinal(12), "12th");
    }
}
