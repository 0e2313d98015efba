#![doc = include_str!("../README.md")]

mod helper_functions;

/// Annotations, tagged rendering spans, and localized messages.
pub mod annotation;
/// Contains all things related to the underlying chemistry: elements and molecular formulas.
pub mod chemistry;
mod citation;
/// The strict and lenient grammars used to cut raw text into records and tokens.
pub mod grammar;
/// Validation of high resolution mass spectrometry lines.
pub mod hrms;
/// Parsing and correction of ¹H NMR peak lists.
pub mod nmr;
mod settings;

pub use citation::*;
pub use settings::*;

/// A subset of the types and traits that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::annotation::{
        AnnotatedText, Annotation, Classification, IssueKind, Language, RichText, Span,
    };
    pub use crate::chemistry::{Element, MolecularFormula};
    pub use crate::citation::{CitableRecord, Citation, Replacement, cite_h1, cite_hrms};
    pub use crate::grammar::GrammarVariant;
    pub use crate::hrms::{CounterIon, HrmsRecord, IonSource};
    pub use crate::nmr::{H1Record, Multiplicity, PeakEntry, ShiftValue, SpectrumMetadata};
    pub use crate::settings::ParseSettings;
}
