//! Error types for composition featurization.
//!
//! Errors are never caught inside the featurizer: each one aborts the
//! current composition and is returned to the caller untouched.

use crate::catalog::Property;
use crate::io::formula::ParseFormulaError;
use crate::model::composition::CompositionError;
use crate::model::element::Element;
use thiserror::Error;

/// Errors that can occur while featurizing a composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The composition is empty, has negative or non-finite amounts, or its
    /// fractions do not sum to 1.
    #[error("malformed composition: {0}")]
    MalformedComposition(#[from] CompositionError),

    /// An element of the composition is absent from the property catalog.
    #[error("element {element} is not present in the property catalog")]
    UnresolvedElement {
        /// The element that could not be resolved.
        element: Element,
    },

    /// A required property is missing for an element that the catalog does
    /// list.
    #[error("element {element} has no value for required property '{property}'")]
    MissingProperty {
        /// The element lacking the value.
        element: Element,
        /// Catalog key of the missing property.
        property: String,
    },

    /// The formula string could not be parsed into a composition.
    #[error("invalid formula: {0}")]
    Formula(#[from] ParseFormulaError),
}

impl Error {
    /// Creates a [`MissingProperty`](Error::MissingProperty) error for a
    /// scalar property.
    pub fn missing_property(element: Element, property: Property) -> Self {
        Self::MissingProperty {
            element,
            property: property.key().to_string(),
        }
    }

    /// Creates a [`MissingProperty`](Error::MissingProperty) error for the
    /// ionization energy at zero-based stage `index`.
    pub fn missing_ionization_energy(element: Element, index: usize) -> Self {
        Self::MissingProperty {
            element,
            property: format!("ionization_energies[{index}]"),
        }
    }
}
