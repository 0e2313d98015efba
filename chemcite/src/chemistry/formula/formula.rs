use std::fmt::Write;

use crate::{annotation::RichText, chemistry::MolecularFormula};

impl MolecularFormula {
    /// The monoisotopic mass in Dalton, using the most abundant isotope of every element
    pub fn monoisotopic_mass(&self) -> f64 {
        self.elements()
            .iter()
            .map(|(e, n)| e.monoisotopic_mass() * f64::from(n.get()))
            .sum()
    }

    /// The formula as plain text, in the order it was written, counts of one are left out
    pub fn canonical_string(&self) -> String {
        let mut buffer = String::new();
        for (element, count) in self.elements() {
            buffer.push_str(element.symbol());
            if count.get() != 1 {
                write!(buffer, "{count}").unwrap();
            }
        }
        buffer
    }

    /// The formula with all counts marked for subscript rendering
    pub fn formatted(&self) -> RichText {
        let mut text = RichText::new();
        for (element, count) in self.elements() {
            text = text.text(element.symbol());
            if count.get() != 1 {
                text = text.subscript(count.to_string());
            }
        }
        text
    }

    /// Check if the text is a valid molecular formula
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }
}
