//! Chemical formula parsing.
//!
//! Accepts the usual formula notation with decimal amounts: `Fe0.6Ni0.4`,
//! `Al2O3`, `(FeNi)0.5Cr0.5`, `Ca[OH]2`, `Fe1.00Ni0.00`. A missing amount
//! means 1; groups in parentheses or brackets multiply their contents;
//! repeated elements accumulate. The result is normalized to fractions and
//! zero amounts are dropped.

use crate::model::composition::{Composition, CompositionError};
use crate::model::element::Element;
use thiserror::Error;

/// Deepest bracket nesting accepted by [`parse_formula`].
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseFormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("unknown element symbol '{symbol}' at offset {offset}")]
    UnknownElement { symbol: String, offset: usize },

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("'{open}' at offset {offset} is never closed")]
    Unclosed { open: char, offset: usize },

    #[error("unmatched '{close}' at offset {offset}")]
    Unmatched { close: char, offset: usize },

    #[error("brackets nested deeper than {MAX_NESTING_DEPTH} levels at offset {offset}")]
    TooDeep { offset: usize },

    #[error("malformed amount '{text}' at offset {offset}")]
    BadAmount { text: String, offset: usize },

    #[error("formula has no element with a positive amount")]
    ZeroTotal,

    #[error(transparent)]
    Composition(CompositionError),
}

/// Parses a formula string into a fractional [`Composition`].
///
/// # Examples
///
/// ```
/// use comp_forge::{Element, parse_formula};
///
/// let comp = parse_formula("Fe2Ni4").unwrap();
/// assert!((comp.fraction(Element::Ni).unwrap() - 2.0 / 3.0).abs() < 1e-12);
///
/// // Zero amounts disappear.
/// let pure = parse_formula("Fe1.00Ni0.00").unwrap();
/// assert_eq!(pure.len(), 1);
/// ```
///
/// # Errors
///
/// Returns a [`ParseFormulaError`] describing the first problem found,
/// with its byte offset where one applies.
pub fn parse_formula(input: &str) -> Result<Composition, ParseFormulaError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };

    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(ParseFormulaError::Empty);
    }

    let amounts = parser.parse_sequence(None)?;
    Composition::from_amounts(amounts).map_err(|e| match e {
        CompositionError::Empty => ParseFormulaError::ZeroTotal,
        other => ParseFormulaError::Composition(other),
    })
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    /// Brackets currently open.
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Parses groups until end of input, or until the bracket matching
    /// `open` (a char and its offset) is consumed.
    fn parse_sequence(
        &mut self,
        open: Option<(char, usize)>,
    ) -> Result<Vec<(Element, f64)>, ParseFormulaError> {
        let mut amounts = Vec::new();

        loop {
            self.skip_whitespace();
            let offset = self.pos;

            match self.peek() {
                None => {
                    return match open {
                        Some((open, offset)) => Err(ParseFormulaError::Unclosed { open, offset }),
                        None => Ok(amounts),
                    };
                }
                Some(close @ (')' | ']')) => {
                    return match open {
                        Some((o, _)) if closing_for(o) == close => {
                            self.bump();
                            Ok(amounts)
                        }
                        _ => Err(ParseFormulaError::Unmatched { close, offset }),
                    };
                }
                Some(bracket @ ('(' | '[')) => {
                    if self.depth == MAX_NESTING_DEPTH {
                        return Err(ParseFormulaError::TooDeep { offset });
                    }
                    self.bump();
                    self.depth += 1;
                    let inner = self.parse_sequence(Some((bracket, offset)))?;
                    self.depth -= 1;
                    let factor = self.parse_amount()?;
                    amounts.extend(inner.into_iter().map(|(el, n)| (el, n * factor)));
                }
                Some(c) if c.is_ascii_uppercase() => {
                    let element = self.parse_symbol()?;
                    let amount = self.parse_amount()?;
                    amounts.push((element, amount));
                }
                Some(found) => return Err(ParseFormulaError::UnexpectedChar { found, offset }),
            }
        }
    }

    fn parse_symbol(&mut self) -> Result<Element, ParseFormulaError> {
        let start = self.pos;
        self.bump();
        self.eat_while(|c| c.is_ascii_lowercase());
        let symbol = &self.src[start..self.pos];
        symbol
            .parse()
            .map_err(|_| ParseFormulaError::UnknownElement {
                symbol: symbol.to_string(),
                offset: start,
            })
    }

    /// Optional amount: `2`, `0.5`, `.25`, `3.`, `1e-3`. Absent means 1.
    fn parse_amount(&mut self) -> Result<f64, ParseFormulaError> {
        self.skip_whitespace();
        let start = self.pos;

        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if self.pos == start {
            return Ok(1.0);
        }
        if self.peek() == Some('e') && self.exponent_follows() {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.eat_while(|c| c.is_ascii_digit());
        }

        let text = &self.src[start..self.pos];
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseFormulaError::BadAmount {
                text: text.to_string(),
                offset: start,
            }),
        }
    }

    fn exponent_follows(&self) -> bool {
        let mut rest = self.src[self.pos..].chars().skip(1);
        match rest.next() {
            Some('+' | '-') => rest.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }
}

fn closing_for(open: char) -> char {
    match open {
        '[' => ']',
        _ => ')',
    }
}
