use std::ops::Range;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    ParseSettings,
    annotation::{AnnotatedText, Annotation, RichText},
    grammar::{RawRecord, split_records},
    hrms::HrmsRecord,
    nmr::H1Record,
};

/// A piece of the input together with the text that should replace it in the citation
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Replacement {
    /// The text as written
    pub original: String,
    /// The location of the original text in the input
    pub location: Range<usize>,
    /// The replacement as plain text
    pub plain: String,
    /// The replacement as tagged text, with annotations marked
    pub rich: RichText,
}

impl Replacement {
    /// Keep the annotated text as is, only marking it
    pub fn unchanged(text: &AnnotatedText) -> Self {
        Self {
            original: text.text.clone(),
            location: text.annotation.target.clone(),
            plain: text.text.clone(),
            rich: text.rich(),
        }
    }
}

/// A record type that can be parsed from a single line and turned into citation replacements
pub trait CitableRecord: Sized {
    /// Parse the record
    /// # Errors
    /// If the record cannot be parsed, the full line is returned annotated.
    fn parse(record: &RawRecord<'_>, settings: &ParseSettings) -> Result<Self, AnnotatedText>;
    /// The replacements in the order they appear in the line
    fn replacements(&self) -> Vec<Replacement>;
    /// All annotations on this record
    fn annotations(&self) -> Vec<&Annotation>;
}

/// A single line of the input, parsed into a record with its replacements
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Citation<T> {
    /// The zero based line index
    pub line_index: usize,
    /// The location of the line in the input, without surrounding whitespace
    pub location: Range<usize>,
    /// The line as written
    pub original: String,
    /// The parsed record, or the annotated line if it could not be parsed
    pub record: Result<T, AnnotatedText>,
    /// The replacements, ordered by location
    pub replacements: Vec<Replacement>,
}

impl<T: CitableRecord> Citation<T> {
    /// Parse a single record
    pub fn new(record: &RawRecord<'_>, settings: &ParseSettings) -> Self {
        let parsed = T::parse(record, settings);
        let mut replacements = match &parsed {
            Ok(parsed) => parsed.replacements(),
            Err(text) => vec![Replacement::unchanged(text)],
        };
        replacements.sort_by_key(|r| r.location.start);
        Self {
            line_index: record.line_index,
            location: record.range(),
            original: record.text.to_string(),
            record: parsed,
            replacements,
        }
    }

    /// All annotations of this citation
    pub fn annotations(&self) -> Vec<&Annotation> {
        match &self.record {
            Ok(record) => record.annotations(),
            Err(text) => vec![&text.annotation],
        }
    }

    /// A citation is ready when it was parsed and carries no danger annotation
    pub fn is_ready(&self) -> bool {
        self.record.is_ok()
            && self.annotations().iter().all(|a| !a.is_danger())
            && self
                .replacements
                .iter()
                .all(|r| r.rich.annotations().iter().all(|a| !a.is_danger()))
    }

    /// The line with all replacements applied, as plain text
    pub fn plain(&self) -> String {
        self.rich().plain()
    }

    /// The line with all replacements applied, as tagged text
    pub fn rich(&self) -> RichText {
        let mut text = RichText::new();
        let mut position = self.location.start;
        for replacement in &self.replacements {
            if replacement.location.start < position {
                continue;
            }
            if replacement.location.start > position {
                text = text.text(self.slice(position..replacement.location.start));
            }
            text = text.append(replacement.rich.clone());
            position = replacement.location.end;
        }
        if position < self.location.end {
            text = text.text(self.slice(position..self.location.end));
        }
        text
    }

    fn slice(&self, range: Range<usize>) -> &str {
        let start = range.start - self.location.start;
        let end = range.end - self.location.start;
        self.original.get(start..end).unwrap_or_default()
    }
}

fn cite<T: CitableRecord + Send>(text: &str, settings: &ParseSettings) -> Vec<Citation<T>> {
    let records = split_records(text);
    log::debug!("citing {} records", records.len());
    #[cfg(feature = "rayon")]
    let iter = records.par_iter();
    #[cfg(not(feature = "rayon"))]
    let iter = records.iter();
    iter.map(|record| Citation::new(record, settings)).collect()
}

/// Parse every non blank line of the text as a 1H NMR description
pub fn cite_h1(text: &str, settings: &ParseSettings) -> Vec<Citation<H1Record>> {
    cite(text, settings)
}

/// Parse every non blank line of the text as a HRMS description
pub fn cite_hrms(text: &str, settings: &ParseSettings) -> Vec<Citation<HrmsRecord>> {
    cite(text, settings)
}
