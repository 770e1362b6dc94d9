//! A pure Rust library for composition-based materials descriptors.
//! It turns a chemical composition such as `Fe0.6Ni0.4` into a fixed-length
//! vector of composition-weighted elemental properties, ready to feed
//! statistical or machine-learning models of material properties.
//!
//! # Features
//!
//! - **Weighted elemental properties** — Valence electron concentration,
//!   atomic and covalent radii, Pauling electronegativity, mass density,
//!   thermal conductivity, melting point and successive ionization energies,
//!   each averaged as Σ cᵢ·pᵢ over the element fractions
//! - **Composition statistics** — Ideal mixing entropy and the fraction
//!   spread statistic used as "atomic size difference"
//! - **Two descriptor sets** — A base set with thermal data and strict
//!   missing-data handling, and an extended set with mixing statistics that
//!   tolerates missing ionization energies
//! - **Formula parsing** — Decimal amounts, nested groups, normalization
//! - **Batch processing** — Parallel featurization of JSON or CSV datasets
//!   with per-row skip-or-abort error handling
//!
//! # Quick Start
//!
//! Build a [`Featurizer`] from a [`PropertyCatalog`] and a [`Variant`], then
//! featurize a [`Composition`]:
//!
//! ```
//! use comp_forge::{Composition, Element, Featurizer, FeaturizeError, PropertyCatalog, Variant};
//!
//! let featurizer = Featurizer::with_variant(PropertyCatalog::embedded(), Variant::Extended);
//!
//! let alloy = Composition::from_fractions([(Element::Fe, 0.5), (Element::Ni, 0.5)])?;
//! let features = featurizer.featurize(&alloy)?;
//!
//! // One value per label, in label order
//! assert_eq!(features.len(), featurizer.feature_labels().len());
//!
//! // Valence electron concentration: 0.5 × 8 + 0.5 × 10
//! assert_eq!(features.get("valence electron concentration"), Some(9.0));
//!
//! // Equimolar binary: mixing entropy is ln 2
//! let entropy = features.get("mixing entropy").unwrap();
//! assert!((entropy - std::f64::consts::LN_2).abs() < 1e-12);
//!
//! // Formulas work too; zero amounts vanish
//! let iron = featurizer.featurize_formula("Fe1.00Ni0.00")?;
//! assert_eq!(iron, featurizer.featurize(&Composition::pure(Element::Fe))?);
//! # Ok::<(), FeaturizeError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`featurize`] — The [`Featurizer`], its configuration and statistics
//! - [`catalog`] — Elemental reference data
//! - [`io`] — Formula parsing and JSON/CSV dataset I/O
//! - [`batch`] — Parallel featurization of datasets
//!
//! # Data Types
//!
//! - [`Element`] — Chemical element (H through Og)
//! - [`Composition`] — Validated fractional composition
//! - [`FeatureVector`] — Descriptor values with their labels
//! - [`ElementProperties`] — Per-element reference values
//! - [`Property`] — Selectable scalar property
//!
//! ## Configuration
//!
//! - [`FeaturizerConfig`] — Property list, ionization depth, statistics
//! - [`Variant`] — Base or extended preset
//! - [`MissingPolicy`] — Error or zero for absent ionization energies

mod model;

pub mod batch;
pub mod catalog;
pub mod featurize;
pub mod io;

pub use model::composition::{AMOUNT_TOLERANCE, Composition, CompositionError, SUM_TOLERANCE};
pub use model::element::{Element, ParseElementError};
pub use model::features::FeatureVector;

pub use catalog::{ElementProperties, Property, PropertyCatalog};

pub use featurize::{Featurizer, FeaturizerConfig, MissingPolicy, Variant};

pub use featurize::Error as FeaturizeError;

pub use io::formula::{ParseFormulaError, parse_formula};
