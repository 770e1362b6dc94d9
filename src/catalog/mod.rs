//! Elemental reference data.
//!
//! A [`PropertyCatalog`] maps each [`Element`] to its [`ElementProperties`].
//! The default table ships inside the crate (`resources/elements.toml`) and is
//! parsed once per process; callers hand the resulting catalog to a
//! [`Featurizer`](crate::Featurizer) explicitly. Custom tables use the same
//! TOML layout:
//!
//! ```toml
//! [elements.Fe]
//! nvalence = 8
//! atomic_radius = 140.0
//! ionization_energies = [7.902, 16.199, 30.651]
//! ```
//!
//! Every property is optional; absent values surface during featurization,
//! never while loading.

mod error;
mod property;

pub use error::Error;
pub use property::{ParsePropertyError, Property};

use crate::model::element::Element;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

const DEFAULT_CATALOG_TOML: &str = include_str!("../../resources/elements.toml");

static DEFAULT_CATALOG: OnceLock<Arc<PropertyCatalog>> = OnceLock::new();

/// Per-element scalar properties. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementProperties {
    #[serde(default)]
    pub nvalence: Option<u32>,
    /// Empirical atomic radius (pm).
    #[serde(default)]
    pub atomic_radius: Option<f64>,
    /// Single-bond covalent radius (pm).
    #[serde(default)]
    pub covalent_radius: Option<f64>,
    #[serde(default)]
    pub electronegativity_pauling: Option<f64>,
    /// Mass density (g/cm³).
    #[serde(default)]
    pub density: Option<f64>,
    /// W/(m·K).
    #[serde(default)]
    pub thermal_conductivity: Option<f64>,
    /// K.
    #[serde(default)]
    pub melting_point: Option<f64>,
    /// Successive ionization energies (eV), first stage first.
    #[serde(default)]
    pub ionization_energies: Vec<f64>,
}

impl ElementProperties {
    /// Ionization energy at zero-based stage `index`, if recorded.
    pub fn ionization_energy(&self, index: usize) -> Option<f64> {
        self.ionization_energies.get(index).copied()
    }

    fn validate(&self, symbol: &str) -> Result<(), Error> {
        for prop in Property::ALL {
            if prop.value(self).is_some_and(|v| !v.is_finite()) {
                return Err(Error::non_finite(symbol, prop.key()));
            }
        }
        if self.ionization_energies.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite(symbol, "ionization_energies"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    elements: BTreeMap<String, ElementProperties>,
}

/// Read-only lookup from element to its reference properties.
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    entries: HashMap<Element, ElementProperties>,
}

impl PropertyCatalog {
    /// The built-in catalog, parsed on first use and shared afterwards.
    pub fn embedded() -> Arc<PropertyCatalog> {
        DEFAULT_CATALOG
            .get_or_init(|| {
                Arc::new(
                    Self::from_toml_str(DEFAULT_CATALOG_TOML)
                        .expect("Failed to parse embedded element catalog. This is a library bug."),
                )
            })
            .clone()
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed TOML or unknown keys,
    /// [`Error::UnknownElement`] when a table is not keyed by an element
    /// symbol, and [`Error::NonFiniteValue`] for NaN or infinite values.
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        let file: CatalogFile = toml::from_str(toml)?;

        let mut entries = HashMap::with_capacity(file.elements.len());
        for (symbol, props) in file.elements {
            let element: Element = symbol
                .parse()
                .map_err(|_| Error::UnknownElement(symbol.clone()))?;
            props.validate(&symbol)?;
            entries.insert(element, props);
        }

        Ok(Self { entries })
    }

    /// Builds a catalog from in-memory records; later duplicates win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Element, ElementProperties)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, element: Element) -> Option<&ElementProperties> {
        self.entries.get(&element)
    }

    pub fn contains(&self, element: Element) -> bool {
        self.entries.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Covered elements in atomic-number order.
    pub fn elements(&self) -> Vec<Element> {
        let mut elements: Vec<_> = self.entries.keys().copied().collect();
        elements.sort_unstable();
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_covers_common_alloy_elements() {
        let catalog = PropertyCatalog::embedded();
        for el in [
            Element::Al,
            Element::Ti,
            Element::Cr,
            Element::Fe,
            Element::Co,
            Element::Ni,
            Element::Cu,
            Element::Mo,
            Element::W,
        ] {
            assert!(catalog.contains(el), "missing {el}");
        }
    }

    #[test]
    fn embedded_catalog_lists_every_element() {
        let catalog = PropertyCatalog::embedded();
        assert_eq!(catalog.len(), 118);
        assert_eq!(catalog.elements(), Element::all().collect::<Vec<_>>());
    }

    #[test]
    fn superheavy_entries_carry_only_established_values() {
        let catalog = PropertyCatalog::embedded();
        let og = catalog.get(Element::Og).unwrap();
        assert_eq!(og.nvalence, Some(8));
        assert_eq!(og.covalent_radius, Some(157.0));
        assert!(og.atomic_radius.is_none());
        assert!(og.melting_point.is_none());
        assert!(og.ionization_energies.is_empty());

        let gd = catalog.get(Element::Gd).unwrap();
        assert_eq!(gd.nvalence, Some(10));
        assert_eq!(gd.ionization_energies.len(), 3);
    }

    #[test]
    fn embedded_catalog_is_shared() {
        let a = PropertyCatalog::embedded();
        let b = PropertyCatalog::embedded();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn embedded_iron_values() {
        let catalog = PropertyCatalog::embedded();
        let fe = catalog.get(Element::Fe).unwrap();
        assert_eq!(fe.nvalence, Some(8));
        assert_eq!(fe.atomic_radius, Some(140.0));
        assert_eq!(fe.electronegativity_pauling, Some(1.83));
        assert_eq!(fe.ionization_energy(0), Some(7.902));
        assert_eq!(fe.ionization_energies.len(), 3);
    }

    #[test]
    fn embedded_catalog_records_partial_data() {
        let catalog = PropertyCatalog::embedded();
        let h = catalog.get(Element::H).unwrap();
        assert_eq!(h.ionization_energies.len(), 1);
        assert_eq!(h.ionization_energy(1), None);

        let he = catalog.get(Element::He).unwrap();
        assert!(he.electronegativity_pauling.is_none());
        assert!(he.melting_point.is_none());
    }

    #[test]
    fn custom_catalog_parses_valid_toml() {
        let custom = r#"
            [elements.Fe]
            nvalence = 8
            density = 7.874

            [elements.Ni]
            ionization_energies = [7.64, 18.169]
        "#;
        let catalog = PropertyCatalog::from_toml_str(custom).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.elements(), vec![Element::Fe, Element::Ni]);
        assert_eq!(catalog.get(Element::Fe).unwrap().density, Some(7.874));
        assert!(catalog.get(Element::Ni).unwrap().nvalence.is_none());
    }

    #[test]
    fn errors_on_unknown_symbol() {
        let err = PropertyCatalog::from_toml_str("[elements.Xx]\nnvalence = 1\n").unwrap_err();
        assert!(matches!(err, Error::UnknownElement(ref s) if s == "Xx"));
    }

    #[test]
    fn errors_on_unknown_property_key() {
        let err =
            PropertyCatalog::from_toml_str("[elements.Fe]\nboiling_point = 3134.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn errors_on_non_finite_value() {
        let err = PropertyCatalog::from_toml_str("[elements.Fe]\ndensity = nan\n").unwrap_err();
        assert!(matches!(
            err,
            Error::NonFiniteValue { ref element, property: "density" } if element == "Fe"
        ));
    }

    #[test]
    fn errors_on_invalid_toml() {
        assert!(PropertyCatalog::from_toml_str("not valid [[[toml").is_err());
    }

    #[test]
    fn from_entries_builds_lookup() {
        let catalog = PropertyCatalog::from_entries([(
            Element::Cu,
            ElementProperties {
                nvalence: Some(11),
                ..Default::default()
            },
        )]);
        assert_eq!(catalog.get(Element::Cu).unwrap().nvalence, Some(11));
        assert!(catalog.get(Element::Fe).is_none());
    }
}
