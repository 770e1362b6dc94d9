use super::element::Element;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use thiserror::Error;

/// Amounts below this are treated as absent and dropped on construction.
pub const AMOUNT_TOLERANCE: f64 = 1e-8;

/// Maximum deviation of the fraction sum from 1 accepted by
/// [`Composition::from_fractions`].
pub const SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("composition is empty: at least one element with a positive amount is required")]
    Empty,

    #[error("negative amount {amount} for element {element}")]
    NegativeAmount { element: Element, amount: f64 },

    #[error("non-finite amount for element {element}")]
    NonFiniteAmount { element: Element },

    #[error("element {0} is listed more than once")]
    DuplicateElement(Element),

    #[error("fractions sum to {sum}, expected 1 (tolerance {SUM_TOLERANCE})")]
    FractionSum { sum: f64 },

    #[error("total amount overflows; rescale the amounts")]
    NonFiniteTotal,
}

/// A fractional composition: element → amount, amounts summing to 1.
///
/// Entries are kept in atomic-number order, so iteration is canonical no
/// matter how the composition was built. Zero (or sub-[`AMOUNT_TOLERANCE`])
/// entries never survive construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    fractions: BTreeMap<Element, f64>,
}

impl Composition {
    /// Builds a composition from amounts that are already fractional.
    ///
    /// # Errors
    ///
    /// Returns a [`CompositionError`] when an amount is negative or
    /// non-finite, an element repeats, nothing positive remains, or the
    /// fractions do not sum to 1.
    pub fn from_fractions<I>(entries: I) -> Result<Self, CompositionError>
    where
        I: IntoIterator<Item = (Element, f64)>,
    {
        let mut seen = BTreeMap::new();
        let mut sum = 0.0;

        for (element, amount) in entries {
            check_amount(element, amount)?;
            match seen.entry(element) {
                Entry::Occupied(_) => return Err(CompositionError::DuplicateElement(element)),
                Entry::Vacant(slot) => {
                    slot.insert(amount);
                }
            }
            sum += amount;
        }

        let fractions: BTreeMap<_, _> = seen
            .into_iter()
            .filter(|(_, amount)| *amount >= AMOUNT_TOLERANCE)
            .collect();

        if fractions.is_empty() {
            return Err(CompositionError::Empty);
        }
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(CompositionError::FractionSum { sum });
        }

        Ok(Self { fractions })
    }

    /// Builds a composition from raw amounts (e.g. formula subscripts),
    /// normalizing them to fractions. Repeated elements accumulate.
    ///
    /// # Errors
    ///
    /// Returns a [`CompositionError`] when an amount is negative or
    /// non-finite, or when the total amount is zero or overflows.
    pub fn from_amounts<I>(entries: I) -> Result<Self, CompositionError>
    where
        I: IntoIterator<Item = (Element, f64)>,
    {
        let mut totals: BTreeMap<Element, f64> = BTreeMap::new();
        for (element, amount) in entries {
            check_amount(element, amount)?;
            *totals.entry(element).or_insert(0.0) += amount;
        }

        totals.retain(|_, amount| *amount >= AMOUNT_TOLERANCE);
        let total: f64 = totals.values().sum();
        if !total.is_finite() {
            return Err(CompositionError::NonFiniteTotal);
        }
        if totals.is_empty() || total <= 0.0 {
            return Err(CompositionError::Empty);
        }

        let fractions = totals
            .into_iter()
            .map(|(element, amount)| (element, amount / total))
            .filter(|(_, fraction)| *fraction >= AMOUNT_TOLERANCE)
            .collect::<BTreeMap<_, _>>();

        if fractions.is_empty() {
            return Err(CompositionError::Empty);
        }

        Ok(Self { fractions })
    }

    /// A composition made of a single element.
    pub fn pure(element: Element) -> Self {
        Self {
            fractions: BTreeMap::from([(element, 1.0)]),
        }
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    pub fn fraction(&self, element: Element) -> Option<f64> {
        self.fractions.get(&element).copied()
    }

    pub fn contains(&self, element: Element) -> bool {
        self.fractions.contains_key(&element)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.fractions.iter().map(|(e, f)| (*e, *f))
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.fractions.keys().copied()
    }

    pub fn fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.fractions.values().copied()
    }
}

fn check_amount(element: Element, amount: f64) -> Result<(), CompositionError> {
    if !amount.is_finite() {
        return Err(CompositionError::NonFiniteAmount { element });
    }
    if amount < 0.0 {
        return Err(CompositionError::NegativeAmount { element, amount });
    }
    Ok(())
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, fraction) in self.iter() {
            let amount = format!("{:.6}", fraction);
            let amount = amount.trim_end_matches('0').trim_end_matches('.');
            write!(f, "{}{}", element, amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn from_fractions_orders_by_atomic_number() {
        let comp =
            Composition::from_fractions([(Element::Ni, 0.4), (Element::Fe, 0.6)]).unwrap();
        let elements: Vec<_> = comp.elements().collect();
        assert_eq!(elements, vec![Element::Fe, Element::Ni]);
        assert_eq!(comp.fraction(Element::Fe), Some(0.6));
        assert_eq!(comp.len(), 2);
    }

    #[test]
    fn from_fractions_drops_zero_entries() {
        let comp = Composition::from_fractions([(Element::Fe, 1.0), (Element::Ni, 0.0)]).unwrap();
        assert_eq!(comp, Composition::pure(Element::Fe));
        assert!(!comp.contains(Element::Ni));
    }

    #[test]
    fn from_fractions_rejects_bad_sum() {
        let err = Composition::from_fractions([(Element::Fe, 0.5), (Element::Ni, 0.4)])
            .unwrap_err();
        match err {
            CompositionError::FractionSum { sum } => assert!(approx_eq(sum, 0.9, 1e-12)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_fractions_rejects_negative_and_non_finite() {
        assert_eq!(
            Composition::from_fractions([(Element::Fe, 1.5), (Element::Ni, -0.5)]),
            Err(CompositionError::NegativeAmount {
                element: Element::Ni,
                amount: -0.5
            })
        );
        assert_eq!(
            Composition::from_fractions([(Element::Fe, f64::NAN)]),
            Err(CompositionError::NonFiniteAmount {
                element: Element::Fe
            })
        );
    }

    #[test]
    fn from_fractions_rejects_duplicates_and_empty() {
        assert_eq!(
            Composition::from_fractions([(Element::Fe, 0.5), (Element::Fe, 0.5)]),
            Err(CompositionError::DuplicateElement(Element::Fe))
        );
        assert_eq!(
            Composition::from_fractions(std::iter::empty()),
            Err(CompositionError::Empty)
        );
        assert_eq!(
            Composition::from_fractions([(Element::Fe, 0.0)]),
            Err(CompositionError::Empty)
        );
    }

    #[test]
    fn from_amounts_normalizes_and_accumulates() {
        let comp = Composition::from_amounts([
            (Element::Fe, 2.0),
            (Element::Ni, 4.0),
            (Element::Fe, 0.0),
        ])
        .unwrap();
        assert!(approx_eq(comp.fraction(Element::Fe).unwrap(), 1.0 / 3.0, 1e-12));
        assert!(approx_eq(comp.fraction(Element::Ni).unwrap(), 2.0 / 3.0, 1e-12));
        assert!(approx_eq(comp.fractions().sum::<f64>(), 1.0, 1e-12));

        let doubled = Composition::from_amounts([(Element::O, 1.0), (Element::O, 1.0), (Element::H, 2.0)])
            .unwrap();
        assert!(approx_eq(doubled.fraction(Element::O).unwrap(), 0.5, 1e-12));
    }

    #[test]
    fn from_amounts_rejects_all_zero() {
        assert_eq!(
            Composition::from_amounts([(Element::Fe, 0.0), (Element::Ni, 0.0)]),
            Err(CompositionError::Empty)
        );
    }

    #[test]
    fn from_amounts_rejects_overflowing_total() {
        assert_eq!(
            Composition::from_amounts([(Element::Fe, 1e308), (Element::Ni, 1e308)]),
            Err(CompositionError::NonFiniteTotal)
        );
        assert_eq!(
            Composition::from_amounts([(Element::Fe, f64::MAX), (Element::Fe, f64::MAX)]),
            Err(CompositionError::NonFiniteTotal)
        );
    }

    #[test]
    fn display_writes_fractional_formula() {
        let comp = Composition::from_amounts([(Element::Fe, 3.0), (Element::Ni, 2.0)]).unwrap();
        assert_eq!(comp.to_string(), "Fe0.6Ni0.4");
        assert_eq!(Composition::pure(Element::Cu).to_string(), "Cu1");
    }
}
