//! Core data structures flowing through `comp-forge`.
//!
//! - [`element`] – Periodic table elements and symbol parsing.
//! - [`composition`] – Validated fractional compositions keyed by element.
//! - [`features`] – Descriptor vectors paired with their labels.
//!
//! The data model separates the chemical input ([`Composition`]) from the
//! numeric output ([`FeatureVector`]), allowing the [`crate::featurize`]
//! pipeline to map one onto the other without hidden state.
//!
//! [`Composition`]: composition::Composition
//! [`FeatureVector`]: features::FeatureVector

pub mod composition;
pub mod element;
pub mod features;
