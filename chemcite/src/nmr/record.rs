use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{
    CitableRecord, ParseSettings, Replacement,
    annotation::{AnnotatedText, Annotation, IssueKind, Message},
    grammar::{H1Grammar, RawRecord},
    nmr::{PeakEntry, Solvent, SpectrumKind, SpectrumMetadata, fix_peak_data, parse_peak_token},
};

/// A full 1H NMR description: header and peak list
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct H1Record {
    /// The header as written
    pub header: String,
    /// The location of the header in the input
    pub header_location: Range<usize>,
    /// The metadata from the header
    pub metadata: SpectrumMetadata,
    /// All peaks in the order written, peaks that could not be read are kept as annotated text
    pub peaks: Vec<Result<PeakEntry, AnnotatedText>>,
}

impl H1Record {
    /// Parse a single record. Every peak is parsed and then corrected once.
    ///
    /// # Errors
    /// If the header does not match the grammar, the frequency is not a positive number, the
    /// solvent is not known, or no peaks follow the header. In all cases the whole record is
    /// returned as annotated text.
    pub fn parse(record: &RawRecord<'_>, settings: &ParseSettings) -> Result<Self, AnnotatedText> {
        let grammar = H1Grammar::get(settings.grammar());
        let language = settings.language;
        let line = record.text;
        let whole = |kind: IssueKind, message: Message<'_>| AnnotatedText {
            text: line.to_string(),
            annotation: Annotation::issue(kind, record.range(), message.localize(language)),
        };

        let Some(header) = grammar.match_header(line) else {
            log::debug!("line {} is not a 1H NMR description", record.line_index + 1);
            return Err(whole(IssueKind::Format, Message::H1Format));
        };
        let frequency_text = &line[header.frequency.clone()];
        let frequency = frequency_text
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .ok_or_else(|| whole(IssueKind::Data, Message::InvalidFrequency(frequency_text)))?;
        let solvent_text = &line[header.solvent.clone()];
        let solvent = Solvent::from_name(solvent_text)
            .ok_or_else(|| whole(IssueKind::Data, Message::UnknownSolvent(solvent_text)))?;

        let tokens = grammar.peak_tokens(line, header.range.end);
        if tokens.is_empty() {
            return Err(whole(IssueKind::Format, Message::NoPeaks));
        }
        log::debug!(
            "line {}: {frequency} MHz in {solvent} with {} peaks",
            record.line_index + 1,
            tokens.len()
        );
        let peaks = tokens
            .into_iter()
            .map(|range| {
                parse_peak_token(&line[range.clone()], record.absolute(range), grammar, language)
                    .map(|peak| fix_peak_data(peak, frequency, settings))
            })
            .collect();

        Ok(Self {
            header: line[header.range.clone()].to_string(),
            header_location: record.absolute(header.range),
            metadata: SpectrumMetadata {
                kind: SpectrumKind::H1,
                frequency,
                frequency_text: frequency_text.to_string(),
                solvent,
            },
            peaks,
        })
    }

    /// Check if all peaks could be read and none carries a danger annotation
    pub fn is_ready(&self) -> bool {
        self.annotations().iter().all(|a| !a.is_danger())
    }
}

impl CitableRecord for H1Record {
    fn parse(record: &RawRecord<'_>, settings: &ParseSettings) -> Result<Self, AnnotatedText> {
        Self::parse(record, settings)
    }

    fn replacements(&self) -> Vec<Replacement> {
        let mut replacements = vec![Replacement {
            original: self.header.clone(),
            location: self.header_location.clone(),
            plain: self.metadata.plain(),
            rich: self.metadata.rich(),
        }];
        replacements.extend(self.peaks.iter().map(|peak| match peak {
            Ok(peak) => Replacement {
                original: peak.original.clone(),
                location: peak.location.clone(),
                plain: peak.plain(),
                rich: peak.rich(),
            },
            Err(text) => Replacement::unchanged(text),
        }));
        replacements
    }

    fn annotations(&self) -> Vec<&Annotation> {
        self.peaks
            .iter()
            .filter_map(|peak| match peak {
                Ok(peak) => peak.annotation.as_ref(),
                Err(text) => Some(&text.annotation),
            })
            .collect()
    }
}
