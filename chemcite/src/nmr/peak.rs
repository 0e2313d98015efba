use std::ops::Range;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    annotation::{AnnotatedText, Annotation, IssueKind, Language, Message, RichText},
    grammar::{H1Grammar, PeakMatch},
    nmr::Multiplicity,
};

/// A number as reported, with the parsed value
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Reported {
    /// The value
    pub value: f64,
    /// The text as written
    pub text: String,
}

impl Reported {
    fn parse(text: &str) -> Option<Self> {
        text.parse::<f64>().ok().map(|value| Self {
            value,
            text: text.to_string(),
        })
    }
}

/// The chemical shift of a peak
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ShiftValue {
    /// A single shift
    Single(Reported),
    /// A range of shifts, in the order written
    Range(Reported, Reported),
    /// A range that has to be filled in by hand
    Placeholder,
}

impl ShiftValue {
    /// The text to show for the placeholder range
    pub const PLACEHOLDER: &str = "x.xx – x.xx";
}

impl std::fmt::Display for ShiftValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(shift) => write!(f, "{}", shift.text),
            Self::Range(first, second) => write!(f, "{} – {}", first.text, second.text),
            Self::Placeholder => write!(f, "{}", Self::PLACEHOLDER),
        }
    }
}

/// A single peak of a 1H NMR peak list
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PeakEntry {
    /// The chemical shift in ppm
    pub shift: ShiftValue,
    /// The multiplicity
    pub multiplicity: Multiplicity,
    /// The coupling constants in Hz, none if the peak was written without
    pub couplings: Option<Vec<Reported>>,
    /// The number of hydrogens, always positive
    pub hydrogens: u32,
    /// The most severe annotation on this peak
    pub annotation: Option<Annotation>,
    /// The text of the peak as written
    pub original: String,
    /// The location of the peak in the input
    pub location: Range<usize>,
    pub(super) corrected: bool,
}

impl PeakEntry {
    /// Attach an annotation, an annotation is only replaced by a strictly more severe one
    pub fn annotate(&mut self, annotation: Annotation) {
        if self
            .annotation
            .as_ref()
            .is_none_or(|a| a.classification < annotation.classification)
        {
            self.annotation = Some(annotation);
        }
    }

    /// Check if the corrector has already been applied to this peak
    pub const fn is_corrected(&self) -> bool {
        self.corrected
    }

    /// The peak as plain text, for example `7.26 (d, J = 8.0 Hz, 2H)`
    pub fn plain(&self) -> String {
        self.rich_unmarked().plain()
    }

    /// The peak as rich text, marked with its annotation if there is one
    pub fn rich(&self) -> RichText {
        let text = self.rich_unmarked();
        match &self.annotation {
            Some(annotation) => text.marked(annotation.clone()),
            None => text,
        }
    }

    fn rich_unmarked(&self) -> RichText {
        let mut text = RichText::new().text(format!(
            "{} ({}, ",
            self.shift,
            self.multiplicity.symbol()
        ));
        if let Some(couplings) = self.couplings.as_ref().filter(|c| !c.is_empty()) {
            text = text.italic("J").text(format!(
                " = {} Hz, ",
                couplings.iter().map(|c| c.text.as_str()).join(", ")
            ));
        }
        text.text(format!("{}H)", self.hydrogens))
    }
}

/// Parse a single peak token. The with-couplings grammar is tried first, then the one without.
/// A coupling count that does not match the multiplicity and a shift range that is not
/// written low to high are annotated on the returned peak. Tokens that cannot be read at all
/// are returned as annotated text.
///
/// # Errors
/// If the token does not match any peak grammar or has a hydrogen count of zero.
pub fn parse_peak_token(
    token: &str,
    location: Range<usize>,
    grammar: &H1Grammar,
    language: Language,
) -> Result<PeakEntry, AnnotatedText> {
    let fail = |kind: IssueKind, message: Message<'_>| AnnotatedText {
        text: token.to_string(),
        annotation: Annotation::issue(kind, location.clone(), message.localize(language)),
    };
    let captures = match grammar.match_peak(token) {
        PeakMatch::Matched(captures) => captures,
        PeakMatch::Unterminated => return Err(fail(IssueKind::Format, Message::PeakUnterminated)),
        PeakMatch::Malformed => return Err(fail(IssueKind::Format, Message::PeakFormat)),
    };
    log::trace!("peak token '{token}' matched {captures:?}");

    let hydrogens = captures
        .hydrogens
        .parse::<u32>()
        .ok()
        .filter(|h| *h > 0)
        .ok_or_else(|| fail(IssueKind::Data, Message::HydrogenCount))?;
    let first = Reported::parse(captures.first).ok_or_else(|| fail(IssueKind::Format, Message::PeakFormat))?;
    let shift = match captures.second {
        Some(second) => ShiftValue::Range(
            first,
            Reported::parse(second).ok_or_else(|| fail(IssueKind::Format, Message::PeakFormat))?,
        ),
        None => ShiftValue::Single(first),
    };
    let couplings = captures
        .couplings
        .as_ref()
        .map(|c| {
            c.iter()
                .map(|j| Reported::parse(j).ok_or_else(|| fail(IssueKind::Format, Message::PeakFormat)))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;
    let multiplicity = Multiplicity::from_symbol(captures.multiplicity);

    let mut entry = PeakEntry {
        shift,
        multiplicity,
        couplings,
        hydrogens,
        annotation: None,
        original: token.to_string(),
        location: location.clone(),
        corrected: false,
    };

    let found = entry.couplings.as_ref().map(Vec::len);
    if let (Some(found), Some(expected)) = (found, entry.multiplicity.expected_couplings())
        && found != expected
    {
        let message = Message::CouplingCount {
            symbol: captures.multiplicity,
            expected,
            found,
        };
        entry.annotate(Annotation::issue(
            IssueKind::PeakType,
            location.clone(),
            message.localize(language),
        ));
    }
    if matches!(&entry.shift, ShiftValue::Range(first, second) if first.value >= second.value) {
        entry.annotate(Annotation::issue(
            IssueKind::Format,
            location,
            Message::RangeOrder.localize(language),
        ));
    }
    Ok(entry)
}
