use thiserror::Error;

/// Errors raised while loading a [`PropertyCatalog`](super::PropertyCatalog).
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog TOML could not be parsed.
    #[error("failed to parse property catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// A catalog table is keyed by something that is not an element symbol.
    #[error("property catalog lists unknown element symbol '{0}'")]
    UnknownElement(String),

    /// A property value is NaN or infinite.
    #[error("property catalog has a non-finite {property} for element {element}")]
    NonFiniteValue {
        /// Element symbol.
        element: String,
        /// Catalog key of the offending property.
        property: &'static str,
    },
}

impl Error {
    pub fn non_finite(element: impl Into<String>, property: &'static str) -> Self {
        Self::NonFiniteValue {
            element: element.into(),
            property,
        }
    }
}
