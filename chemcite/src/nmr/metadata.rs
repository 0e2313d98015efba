use serde::{Deserialize, Serialize};

use crate::annotation::RichText;

/// The kind of spectrum, only proton spectra are supported
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum SpectrumKind {
    /// ¹H NMR
    #[default]
    H1,
}

impl SpectrumKind {
    /// The rendered name, with the isotope label in superscript
    pub fn rich(self) -> RichText {
        match self {
            Self::H1 => RichText::new().superscript("1").text("H NMR"),
        }
    }
}

impl std::fmt::Display for SpectrumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::H1 => write!(f, "1H NMR"),
        }
    }
}

/// A deuterated NMR solvent
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Solvent {
    /// CDCl3
    Chloroform,
    /// DMSO-d6
    Dmso,
    /// CD3OD
    Methanol,
    /// D2O
    Water,
    /// C6D6
    Benzene,
    /// Acetone-d6
    Acetone,
    /// CD3CN
    Acetonitrile,
    /// CD2Cl2
    Dichloromethane,
    /// THF-d8
    Tetrahydrofuran,
    /// Toluene-d8
    Toluene,
    /// Pyridine-d5
    Pyridine,
}

/// All accepted solvent names, compared ignoring ASCII case
const SOLVENT_NAMES: &[(&str, Solvent)] = &[
    ("CDCl3", Solvent::Chloroform),
    ("Chloroform-d", Solvent::Chloroform),
    ("DMSO-d6", Solvent::Dmso),
    ("DMSO", Solvent::Dmso),
    ("d6-DMSO", Solvent::Dmso),
    ("CD3OD", Solvent::Methanol),
    ("Methanol-d4", Solvent::Methanol),
    ("D2O", Solvent::Water),
    ("Deuterium Oxide", Solvent::Water),
    ("C6D6", Solvent::Benzene),
    ("Benzene-d6", Solvent::Benzene),
    ("Acetone-d6", Solvent::Acetone),
    ("(CD3)2CO", Solvent::Acetone),
    ("CD3COCD3", Solvent::Acetone),
    ("CD3CN", Solvent::Acetonitrile),
    ("Acetonitrile-d3", Solvent::Acetonitrile),
    ("CD2Cl2", Solvent::Dichloromethane),
    ("Dichloromethane-d2", Solvent::Dichloromethane),
    ("THF-d8", Solvent::Tetrahydrofuran),
    ("Toluene-d8", Solvent::Toluene),
    ("Pyridine-d5", Solvent::Pyridine),
];

impl Solvent {
    /// Look up a solvent by any of its common names
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        SOLVENT_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, s)| *s)
    }

    /// The publication name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chloroform => "CDCl3",
            Self::Dmso => "DMSO-d6",
            Self::Methanol => "CD3OD",
            Self::Water => "D2O",
            Self::Benzene => "C6D6",
            Self::Acetone => "acetone-d6",
            Self::Acetonitrile => "CD3CN",
            Self::Dichloromethane => "CD2Cl2",
            Self::Tetrahydrofuran => "THF-d8",
            Self::Toluene => "toluene-d8",
            Self::Pyridine => "pyridine-d5",
        }
    }

    /// The publication name with subscript counts and an italic deuterium label
    pub fn rich(self) -> RichText {
        let name = self.name();
        let mut text = RichText::new();
        let mut start = 0;
        let bytes = name.as_bytes();
        let mut index = 0;
        while index < bytes.len() {
            let digits = bytes[index..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits > 0 {
                let label = index > 1 && bytes[index - 1] == b'd' && bytes[index - 2] == b'-';
                let end = if label { index - 1 } else { index };
                if start < end {
                    text = text.text(&name[start..end]);
                }
                if label {
                    text = text.italic("d");
                }
                text = text.subscript(&name[index..index + digits]);
                index += digits;
                start = index;
            } else {
                index += 1;
            }
        }
        if start < name.len() {
            text = text.text(&name[start..]);
        }
        text
    }
}

impl std::fmt::Display for Solvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The metadata of a spectrum as given in the header of a peak list
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SpectrumMetadata {
    /// The nucleus
    pub kind: SpectrumKind,
    /// The spectrometer frequency in MHz, always positive
    pub frequency: f64,
    /// The frequency as written
    pub frequency_text: String,
    /// The solvent
    pub solvent: Solvent,
}

impl SpectrumMetadata {
    /// The header as plain text, including the trailing space before the peak list
    pub fn plain(&self) -> String {
        format!(
            "{} ({} MHz, {}) δ ",
            self.kind, self.frequency_text, self.solvent
        )
    }

    /// The header as rich text, including the trailing space before the peak list
    pub fn rich(&self) -> RichText {
        self.kind
            .rich()
            .text(format!(" ({} MHz, ", self.frequency_text))
            .append(self.solvent.rich())
            .text(") ")
            .italic("δ")
            .text(" ")
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::{
        annotation::Span,
        nmr::{Solvent, SpectrumKind, SpectrumMetadata},
    };

    #[test]
    fn lookup() {
        assert_eq!(Solvent::from_name("CDCl3"), Some(Solvent::Chloroform));
        assert_eq!(Solvent::from_name("chloroform-d"), Some(Solvent::Chloroform));
        assert_eq!(Solvent::from_name(" dmso-d6 "), Some(Solvent::Dmso));
        assert_eq!(Solvent::from_name("(CD3)2CO"), Some(Solvent::Acetone));
        assert_eq!(Solvent::from_name("CHCl3"), None);
    }

    #[test]
    fn rich_names() {
        assert_eq!(
            Solvent::Chloroform.rich().spans(),
            &[Span::Text("CDCl".to_string()), Span::Subscript("3".to_string())]
        );
        assert_eq!(
            Solvent::Dmso.rich().spans(),
            &[
                Span::Text("DMSO-".to_string()),
                Span::Italic("d".to_string()),
                Span::Subscript("6".to_string())
            ]
        );
        assert_eq!(
            Solvent::Dichloromethane.rich().spans(),
            &[
                Span::Text("CD".to_string()),
                Span::Subscript("2".to_string()),
                Span::Text("Cl".to_string()),
                Span::Subscript("2".to_string())
            ]
        );
        for (_, solvent) in super::SOLVENT_NAMES {
            assert_eq!(solvent.rich().plain(), solvent.name());
        }
    }

    #[test]
    fn header() {
        let metadata = SpectrumMetadata {
            kind: SpectrumKind::H1,
            frequency: 400.0,
            frequency_text: "400".to_string(),
            solvent: Solvent::Chloroform,
        };
        assert_eq!(metadata.plain(), "1H NMR (400 MHz, CDCl3) δ ");
        assert_eq!(metadata.rich().plain(), metadata.plain());
    }
}
