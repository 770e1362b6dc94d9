use std::fmt;
use std::str::FromStr;
use strum::{EnumCount, EnumIter, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

/// Chemical element, H through Og, ordered by atomic number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, IntoStaticStr,
)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Element {
    H = 1, He, Li, Be, B, C, N, O, F, Ne,
    Na, Mg, Al, Si, P, S, Cl, Ar, K, Ca,
    Sc, Ti, V, Cr, Mn, Fe, Co, Ni, Cu, Zn,
    Ga, Ge, As, Se, Br, Kr, Rb, Sr, Y, Zr,
    Nb, Mo, Tc, Ru, Rh, Pd, Ag, Cd, In, Sn,
    Sb, Te, I, Xe, Cs, Ba, La, Ce, Pr, Nd,
    Pm, Sm, Eu, Gd, Tb, Dy, Ho, Er, Tm, Yb,
    Lu, Hf, Ta, W, Re, Os, Ir, Pt, Au, Hg,
    Tl, Pb, Bi, Po, At, Rn, Fr, Ra, Ac, Th,
    Pa, U, Np, Pu, Am, Cm, Bk, Cf, Es, Fm,
    Md, No, Lr, Rf, Db, Sg, Bh, Hs, Mt, Ds,
    Rg, Cn, Nh, Fl, Mc, Lv, Ts, Og,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        (*self).into()
    }

    pub fn from_atomic_number(z: u8) -> Option<Self> {
        if z == 0 {
            return None;
        }
        Self::iter().nth(usize::from(z) - 1)
    }

    /// All elements in atomic-number order.
    pub fn all() -> impl Iterator<Item = Element> {
        Self::iter()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|e| e.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}
