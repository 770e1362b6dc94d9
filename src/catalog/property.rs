use super::ElementProperties;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown elemental property: '{0}'")]
pub struct ParsePropertyError(String);

/// A scalar elemental property that can be composition-averaged.
///
/// Each variant resolves through [`Property::value`], a plain getter on
/// [`ElementProperties`]; absent data comes back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    ValenceElectrons,
    AtomicRadius,
    CovalentRadius,
    PaulingElectronegativity,
    Density,
    ThermalConductivity,
    MeltingPoint,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::ValenceElectrons,
        Property::AtomicRadius,
        Property::CovalentRadius,
        Property::PaulingElectronegativity,
        Property::Density,
        Property::ThermalConductivity,
        Property::MeltingPoint,
    ];

    pub fn value(&self, props: &ElementProperties) -> Option<f64> {
        match self {
            Property::ValenceElectrons => props.nvalence.map(f64::from),
            Property::AtomicRadius => props.atomic_radius,
            Property::CovalentRadius => props.covalent_radius,
            Property::PaulingElectronegativity => props.electronegativity_pauling,
            Property::Density => props.density,
            Property::ThermalConductivity => props.thermal_conductivity,
            Property::MeltingPoint => props.melting_point,
        }
    }

    /// Key used in catalog TOML tables.
    pub fn key(&self) -> &'static str {
        match self {
            Property::ValenceElectrons => "nvalence",
            Property::AtomicRadius => "atomic_radius",
            Property::CovalentRadius => "covalent_radius",
            Property::PaulingElectronegativity => "electronegativity_pauling",
            Property::Density => "density",
            Property::ThermalConductivity => "thermal_conductivity",
            Property::MeltingPoint => "melting_point",
        }
    }

    /// Human-readable feature label of the composition-weighted average.
    pub fn label(&self) -> &'static str {
        match self {
            Property::ValenceElectrons => "valence electron concentration",
            Property::AtomicRadius => "atomic radius (empirical)",
            Property::CovalentRadius => "covalent radius",
            Property::PaulingElectronegativity => "Pauling electronegativity",
            Property::Density => "mass density",
            Property::ThermalConductivity => "thermal conductivity",
            Property::MeltingPoint => "melting point",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Property {
    type Err = ParsePropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| ParsePropertyError(s.to_string()))
    }
}
