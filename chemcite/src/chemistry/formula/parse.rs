use std::{num::NonZeroU32, ops::Range, str::FromStr};

use context_error::*;

use crate::{
    chemistry::{ELEMENT_PARSE_LIST, MolecularFormula},
    helper_functions::explain_number_error,
};

impl MolecularFormula {
    /// Parse an element count formula, as used in HRMS lines. A formula is a sequence of
    /// element symbols (a capital letter optionally followed by a lowercase letter), each
    /// optionally followed by a positive count. For example `C10H13N2O` or `C6H5Br`.
    ///
    /// # Errors
    /// If the formula is empty, contains a symbol that is not in the element table, contains a
    /// count of zero, or contains any other character.
    ///
    /// ```rust
    /// use chemcite::chemistry::MolecularFormula;
    /// assert!(MolecularFormula::parse("C10H13N2O").is_ok());
    /// assert!(MolecularFormula::parse("C10H13N2O+").is_err());
    /// assert!(MolecularFormula::parse("C0H4").is_err());
    /// assert!(MolecularFormula::parse("Xx2").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, BoxedError<'_, BasicKind>> {
        Self::parse_inner(&Context::none().lines(0, value), value, 0..value.len())
    }

    /// This parses a substring of the given string as a molecular formula. Additionally, this
    /// allows passing a base context to allow to set the line index and source and other
    /// properties. Note that the base context is assumed to contain the full line at line index 0.
    ///
    /// # Errors
    /// It fails when the string is not a valid molecular formula, see [`Self::parse`].
    pub fn parse_inner<'a>(
        base_context: &Context<'a>,
        value: &'a str,
        range: Range<usize>,
    ) -> Result<Self, BoxedError<'a, BasicKind>> {
        if range.is_empty() {
            return Err(BoxedError::new(
                BasicKind::Error,
                "Invalid molecular formula",
                "The formula is empty",
                base_context
                    .clone()
                    .add_highlight(Highlight::from((0, range.start.min(value.len()), 1))),
            ));
        }

        let bytes = value.as_bytes();
        let mut index = range.start;
        let mut result = Self::default();
        'main_parse_loop: while index < range.end {
            for (symbol, element) in ELEMENT_PARSE_LIST {
                if value[index..range.end].starts_with(symbol) {
                    index += symbol.len();
                    let length = bytes[index..range.end]
                        .iter()
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    let count = if length == 0 {
                        NonZeroU32::MIN
                    } else {
                        value[index..index + length]
                            .parse::<NonZeroU32>()
                            .map_err(|err| {
                                BoxedError::new(
                                    BasicKind::Error,
                                    "Invalid molecular formula",
                                    format!("The element count {}", explain_number_error(&err)),
                                    base_context.clone().add_highlight(Highlight::from((0, index, length))),
                                )
                            })?
                    };
                    result.elements.push((*element, count));
                    index += length;
                    continue 'main_parse_loop;
                }
            }
            return Err(if bytes[index].is_ascii_uppercase() {
                let length = 1 + bytes[index + 1..range.end]
                    .iter()
                    .take_while(|b| b.is_ascii_lowercase())
                    .count();
                BoxedError::new(
                    BasicKind::Error,
                    "Invalid molecular formula",
                    format!("Unknown element '{}'", &value[index..index + length]),
                    base_context.clone().add_highlight(Highlight::from((0, index, length))),
                )
            } else {
                BoxedError::new(
                    BasicKind::Error,
                    "Invalid molecular formula",
                    "Not a valid character in formula",
                    base_context.clone().add_highlight(Highlight::from((
                        0,
                        index,
                        value[index..]
                            .chars()
                            .next()
                            .map(char::len_utf8)
                            .unwrap_or_default(),
                    ))),
                )
            });
        }
        Ok(result)
    }
}

impl FromStr for MolecularFormula {
    type Err = BoxedError<'static, BasicKind>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(BoxedError::to_owned)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::num::NonZeroU32;

    use context_error::StaticErrorContent;

    use crate::chemistry::{Element, MolecularFormula};

    #[test]
    fn parse_pairs() {
        let formula = MolecularFormula::parse("C10H13N2O").unwrap();
        assert_eq!(
            formula.elements(),
            &[
                (Element::C, NonZeroU32::new(10).unwrap()),
                (Element::H, NonZeroU32::new(13).unwrap()),
                (Element::N, NonZeroU32::new(2).unwrap()),
                (Element::O, NonZeroU32::MIN),
            ]
        );
    }

    #[test]
    fn two_letter_elements() {
        let formula = MolecularFormula::parse("C6H5BrNaCl2").unwrap();
        assert_eq!(formula.count(Element::Br), 1);
        assert_eq!(formula.count(Element::Na), 1);
        assert_eq!(formula.count(Element::Cl), 2);
        assert_eq!(formula.count(Element::B), 0);
        // Case decides between cobalt and carbon monoxide
        assert_eq!(MolecularFormula::parse("CO").unwrap().count(Element::O), 1);
        assert_eq!(MolecularFormula::parse("Co").unwrap().count(Element::Co), 1);
    }

    #[test]
    fn invalid() {
        assert!(MolecularFormula::parse("").is_err());
        assert!(MolecularFormula::parse("C10H13N2O+").is_err());
        assert!(MolecularFormula::parse("c10").is_err());
        assert!(MolecularFormula::parse("C 10").is_err());
        assert!(MolecularFormula::parse("10C").is_err());
        assert!(MolecularFormula::parse("C10Xx2").is_err());
        assert!(!MolecularFormula::is_valid("H2O2-"));
        assert!(MolecularFormula::is_valid("H2O2"));
    }

    #[test]
    fn error_messages() {
        let zero = MolecularFormula::parse("C0H4").unwrap_err();
        assert_eq!(
            zero.get_long_description(),
            "The element count is zero, which is not allowed here"
        );
        let unknown = MolecularFormula::parse("C2Xx").unwrap_err();
        assert_eq!(unknown.get_long_description(), "Unknown element 'Xx'");
    }

    #[test]
    fn from_str() {
        let formula: MolecularFormula = "C2H6O".parse().unwrap();
        assert_eq!(formula.canonical_string(), "C2H6O");
        assert!("C2H6O?".parse::<MolecularFormula>().is_err());
    }
}
