use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;

/// A single piece of rendered text
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Span {
    /// Normal text
    Text(String),
    /// Text to be rendered as superscript, charges and isotope labels
    Superscript(String),
    /// Text to be rendered as subscript, element counts
    Subscript(String),
    /// Text to be rendered in italics, coupling constant symbols and deuterium labels
    Italic(String),
    /// Text that carries an annotation, the renderer decides how to highlight it
    Marked {
        /// The annotation
        annotation: Annotation,
        /// The marked spans
        content: Vec<Span>,
    },
}

impl Span {
    fn write_plain(&self, buffer: &mut String) {
        match self {
            Self::Text(s) | Self::Superscript(s) | Self::Subscript(s) | Self::Italic(s) => {
                buffer.push_str(s);
            }
            Self::Marked { content, .. } => {
                for span in content {
                    span.write_plain(buffer);
                }
            }
        }
    }

    fn collect_annotations<'a>(&'a self, annotations: &mut Vec<&'a Annotation>) {
        if let Self::Marked {
            annotation,
            content,
        } = self
        {
            annotations.push(annotation);
            for span in content {
                span.collect_annotations(annotations);
            }
        }
    }
}

/// Tagged text, a sequence of spans that an external renderer turns into markup
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RichText(Vec<Span>);

impl RichText {
    /// Create empty text
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add normal text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.0.push(Span::Text(text.into()));
        self
    }

    /// Add superscript text
    #[must_use]
    pub fn superscript(mut self, text: impl Into<String>) -> Self {
        self.0.push(Span::Superscript(text.into()));
        self
    }

    /// Add subscript text
    #[must_use]
    pub fn subscript(mut self, text: impl Into<String>) -> Self {
        self.0.push(Span::Subscript(text.into()));
        self
    }

    /// Add italic text
    #[must_use]
    pub fn italic(mut self, text: impl Into<String>) -> Self {
        self.0.push(Span::Italic(text.into()));
        self
    }

    /// Add all spans of the other text
    #[must_use]
    pub fn append(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Wrap all current content in a single marked span
    #[must_use]
    pub fn marked(self, annotation: Annotation) -> Self {
        Self(vec![Span::Marked {
            annotation,
            content: self.0,
        }])
    }

    /// Wrap all current content in a marked span for each annotation, the first annotation ends
    /// up outermost
    #[must_use]
    pub fn marked_all<'a>(self, annotations: impl IntoIterator<Item = &'a Annotation>) -> Self {
        let annotations: Vec<_> = annotations.into_iter().collect();
        annotations
            .into_iter()
            .rev()
            .fold(self, |text, annotation| text.marked(annotation.clone()))
    }

    /// Add a single span
    pub fn push(&mut self, span: Span) {
        self.0.push(span);
    }

    /// The spans
    pub fn spans(&self) -> &[Span] {
        &self.0
    }

    /// Check if there is no content
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The text without any tagging
    pub fn plain(&self) -> String {
        let mut buffer = String::new();
        for span in &self.0 {
            span.write_plain(&mut buffer);
        }
        buffer
    }

    /// All annotations in this text, outermost first
    pub fn annotations(&self) -> Vec<&Annotation> {
        let mut annotations = Vec::new();
        for span in &self.0 {
            span.collect_annotations(&mut annotations);
        }
        annotations
    }
}

impl std::fmt::Display for RichText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.plain())
    }
}

impl Extend<Span> for RichText {
    fn extend<T: IntoIterator<Item = Span>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::annotation::{Annotation, Classification, IssueKind, RichText, Span};

    #[test]
    fn plain() {
        let text = RichText::new()
            .text("CDCl")
            .subscript("3")
            .text(", ")
            .italic("J")
            .text(" = 8.0 Hz");
        assert_eq!(text.plain(), "CDCl3, J = 8.0 Hz");
        assert_eq!(text.to_string(), text.plain());
        assert!(text.annotations().is_empty());
    }

    #[test]
    fn nested_marks() {
        let outer = Annotation::issue(IssueKind::DecimalPrecision, 0..3, "outer");
        let inner = Annotation::new(0..3, Classification::Success, "inner");
        let text = RichText::new()
            .text("1.0")
            .marked_all([&outer, &inner]);
        assert_eq!(text.plain(), "1.0");
        assert_eq!(text.annotations(), vec![&outer, &inner]);
        assert!(matches!(
            &text.spans()[0],
            Span::Marked { annotation, .. } if *annotation == outer
        ));
    }
}
