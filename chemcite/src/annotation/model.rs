use std::ops::Range;

use context_error::*;
use serde::{Deserialize, Serialize};

use crate::annotation::{Language, RichText};

/// How an annotation should be presented, ordered from least to most severe
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Classification {
    /// The annotated item was checked and is correct
    #[default]
    Success,
    /// The item was accepted, but something was changed or should be looked at
    Warning,
    /// The item is wrong, the record is not ready to be cited
    Danger,
}

impl ErrorKind for Classification {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        match self {
            Self::Success => "note",
            Self::Warning => "warning",
            Self::Danger => "error",
        }
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        *self == Self::Danger
    }
}

/// The kind of problem an annotation reports
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IssueKind {
    /// The text does not match the grammar, the record could not be parsed
    Format,
    /// The grammar matched but a vocabulary item (element, solvent, source, ion) is not known
    Data,
    /// A number was reported with the wrong number of decimals
    DecimalPrecision,
    /// The found mass deviates too much from the reported exact mass
    Tolerance,
    /// The reported exact mass does not match the mass calculated from the formula
    Consistency,
    /// The multiplicity, shift and coupling constants of a peak do not agree
    PeakType,
    /// Coupling constants were rounded to the digital resolution of the spectrometer
    Quantization,
}

impl IssueKind {
    /// The classification that this kind of issue always carries
    pub const fn classification(self) -> Classification {
        match self {
            Self::Quantization => Classification::Warning,
            _ => Classification::Danger,
        }
    }

    /// A short title for this kind of issue
    pub const fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Format, Language::English) => "Format error",
            (Self::Data, Language::English) => "Data error",
            (Self::DecimalPrecision, Language::English) => "Decimal precision error",
            (Self::Tolerance, Language::English) => "Tolerance error",
            (Self::Consistency, Language::English) => "Consistency error",
            (Self::PeakType, Language::English) => "Peak type error",
            (Self::Quantization, Language::English) => "Coupling constant rounded",
            (Self::Format, Language::Chinese) => "格式错误",
            (Self::Data, Language::Chinese) => "数据错误",
            (Self::DecimalPrecision, Language::Chinese) => "小数位数错误",
            (Self::Tolerance, Language::Chinese) => "误差超限",
            (Self::Consistency, Language::Chinese) => "数据不一致",
            (Self::PeakType, Language::Chinese) => "峰型错误",
            (Self::Quantization, Language::Chinese) => "耦合常数已修约",
        }
    }
}

/// A classified, localized message about a span of the input text. Byte offsets in `target`
/// are relative to the full text handed to the parser.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Annotation {
    /// The severity
    pub classification: Classification,
    /// The kind of issue, none for success annotations
    pub issue: Option<IssueKind>,
    /// The localized message
    pub message: String,
    /// The annotated span in the input text
    pub target: Range<usize>,
}

impl Annotation {
    /// Annotate a span with the given classification and message
    pub fn new(
        target: Range<usize>,
        classification: Classification,
        message: impl Into<String>,
    ) -> Self {
        Self {
            classification,
            issue: None,
            message: message.into(),
            target,
        }
    }

    /// Annotate a span with an issue, the classification follows from the issue kind
    pub fn issue(kind: IssueKind, target: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            classification: kind.classification(),
            issue: Some(kind),
            message: message.into(),
            target,
        }
    }

    /// Check if this annotation blocks the record from being cited
    pub fn is_danger(&self) -> bool {
        self.classification == Classification::Danger
    }

    /// Turn this annotation into an error pointing at the annotated span of the source text.
    /// The source has to be the same text that was given to the parser.
    pub fn to_error<'a>(
        &self,
        source: &'a str,
        language: Language,
    ) -> BoxedError<'a, Classification> {
        let start = self.target.start.min(source.len());
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[start..].find('\n').map_or(source.len(), |i| start + i);
        let line = source[line_start..line_end].trim_end_matches('\r');
        let line_index = source[..line_start].matches('\n').count();
        let offset = start - line_start;
        let length = self
            .target
            .end
            .min(line_start + line.len())
            .saturating_sub(start);
        let short = self.issue.map_or(
            match language {
                Language::English => "Verified",
                Language::Chinese => "校验通过",
            },
            |issue| issue.title(language),
        );
        BoxedError::new(
            self.classification,
            short,
            self.message.clone(),
            Context::line(
                u32::try_from(line_index).ok(),
                line,
                offset,
                length.max(usize::from(offset < line.len())),
            ),
        )
    }
}

/// A piece of input text that could not be turned into a record, together with the reason
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AnnotatedText {
    /// The original text
    pub text: String,
    /// Why this text could not be used
    pub annotation: Annotation,
}

impl AnnotatedText {
    /// Flag the given span of the source as unusable
    pub fn new(
        source: &str,
        target: Range<usize>,
        kind: IssueKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            text: source[target.clone()].to_string(),
            annotation: Annotation::issue(kind, target, message),
        }
    }

    /// The original text marked with the annotation
    pub fn rich(&self) -> RichText {
        RichText::new()
            .text(self.text.clone())
            .marked(self.annotation.clone())
    }
}
