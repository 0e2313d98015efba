mod formula;
mod parse;

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::chemistry::Element;

/// A molecular formula: an ordered list of elements with their counts. The order is kept as
/// written so the formula renders the way the author wrote it. Every count is at least one.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MolecularFormula {
    elements: Vec<(Element, NonZeroU32)>,
}

impl MolecularFormula {
    /// Create a formula from the given pairs
    pub fn new(elements: impl IntoIterator<Item = (Element, NonZeroU32)>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// The element count pairs in the order they were written
    pub fn elements(&self) -> &[(Element, NonZeroU32)] {
        &self.elements
    }

    /// The total count of the given element, summed over all pairs
    pub fn count(&self, element: Element) -> u32 {
        self.elements
            .iter()
            .filter(|(e, _)| *e == element)
            .map(|(_, n)| n.get())
            .sum()
    }

    /// Check if the formula has no elements at all
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl std::fmt::Display for MolecularFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}
