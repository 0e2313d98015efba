use serde::{Deserialize, Serialize};

use crate::{annotation::Language, grammar::GrammarVariant};

/// The mode flags that control parsing. Every parse is a pure function of the text and these
/// settings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Use the strict grammar and check decimal precision of reported numbers
    pub strict: bool,
    /// Require coupling constants where the multiplicity needs them and round them to the
    /// digital resolution of the spectrometer
    pub auto_fix_j: bool,
    /// Allow the single higher order multiplicities (p, h, hept) without coupling constants
    pub general_multiplet: bool,
    /// The language for all messages
    pub language: Language,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            strict: false,
            auto_fix_j: true,
            general_multiplet: false,
            language: Language::English,
        }
    }
}

impl ParseSettings {
    /// The grammar variant selected by these settings
    pub const fn grammar(&self) -> GrammarVariant {
        if self.strict {
            GrammarVariant::Strict
        } else {
            GrammarVariant::Lenient
        }
    }

    /// Set strict mode
    #[must_use]
    pub const fn strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    /// Set the coupling constant enforcement
    #[must_use]
    pub const fn auto_fix_j(self, auto_fix_j: bool) -> Self {
        Self { auto_fix_j, ..self }
    }

    /// Set the general multiplet handling
    #[must_use]
    pub const fn general_multiplet(self, general_multiplet: bool) -> Self {
        Self {
            general_multiplet,
            ..self
        }
    }

    /// Set the message language
    #[must_use]
    pub const fn language(self, language: Language) -> Self {
        Self { language, ..self }
    }
}
