use serde::{Deserialize, Serialize};

use crate::chemistry::ELECTRON_MASS;

/// An ionization source
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IonSource {
    /// Electrospray ionization
    Esi,
    /// Atmospheric pressure chemical ionization
    Apci,
    /// Electron ionization
    Ei,
    /// Matrix assisted laser desorption/ionization
    Maldi,
    /// Chemical ionization
    Ci,
    /// Field desorption
    Fd,
    /// Field ionization
    Fi,
    /// Fast atom bombardment
    Fab,
    /// Atmospheric pressure photoionization
    Appi,
    /// Thermospray
    Ts,
    /// Particle beam
    Pb,
    /// Direct analysis in real time
    Dart,
}

/// The search order, abbreviations that contain another abbreviation come first
const SEARCH_ORDER: &[IonSource] = &[
    IonSource::Maldi,
    IonSource::Apci,
    IonSource::Appi,
    IonSource::Dart,
    IonSource::Esi,
    IonSource::Fab,
    IonSource::Ei,
    IonSource::Ci,
    IonSource::Fd,
    IonSource::Fi,
    IonSource::Ts,
    IonSource::Pb,
];

impl IonSource {
    /// The abbreviation
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Esi => "ESI",
            Self::Apci => "APCI",
            Self::Ei => "EI",
            Self::Maldi => "MALDI",
            Self::Ci => "CI",
            Self::Fd => "FD",
            Self::Fi => "FI",
            Self::Fab => "FAB",
            Self::Appi => "APPI",
            Self::Ts => "TS",
            Self::Pb => "PB",
            Self::Dart => "DART",
        }
    }

    /// Find the source named in the text, this is a case sensitive substring search so
    /// `ESI-TOF` and `HR-ESI` are both electrospray
    pub fn find(text: &str) -> Option<Self> {
        SEARCH_ORDER
            .iter()
            .find(|s| text.contains(s.abbreviation()))
            .copied()
    }
}

impl std::fmt::Display for IonSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// The counter ion of a singly charged positive adduct
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum CounterIon {
    /// The molecular ion `[M]+`
    #[default]
    None,
    /// Protonated, `[M + H]+`
    H,
    /// Sodiated, `[M + Na]+`
    Na,
    /// Potassiated, `[M + K]+`
    K,
    /// Caesiated, `[M + Cs]+`
    Cs,
}

impl CounterIon {
    /// Read the ion as written between `[M +` and `]`, the empty string is the molecular ion
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "" => Some(Self::None),
            "H" => Some(Self::H),
            "Na" => Some(Self::Na),
            "K" => Some(Self::K),
            "Cs" => Some(Self::Cs),
            _ => None,
        }
    }

    /// The symbol, empty for the molecular ion
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::H => "H",
            Self::Na => "Na",
            Self::K => "K",
            Self::Cs => "Cs",
        }
    }

    /// The mass added to the formula mass. The formula in a HRMS line already contains the
    /// counter ion, so any ion only removes a single electron, whichever ion it is.
    pub const fn mass_adjustment(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::H | Self::Na | Self::K | Self::Cs => -ELECTRON_MASS,
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::{
        chemistry::ELECTRON_MASS,
        hrms::{CounterIon, IonSource},
    };

    #[test]
    fn find_source() {
        assert_eq!(IonSource::find("ESI"), Some(IonSource::Esi));
        assert_eq!(IonSource::find("ESI-TOF"), Some(IonSource::Esi));
        assert_eq!(IonSource::find("APCI"), Some(IonSource::Apci));
        assert_eq!(IonSource::find("CI"), Some(IonSource::Ci));
        assert_eq!(IonSource::find("MALDI-TOF"), Some(IonSource::Maldi));
        assert_eq!(IonSource::find("EI"), Some(IonSource::Ei));
        assert_eq!(IonSource::find("esi"), None);
        assert_eq!(IonSource::find("NMR"), None);
    }

    #[test]
    fn every_source_is_searched() {
        for source in super::SEARCH_ORDER {
            assert_eq!(IonSource::find(source.abbreviation()), Some(*source));
        }
        assert_eq!(super::SEARCH_ORDER.len(), 12);
    }

    #[test]
    fn ions() {
        assert_eq!(CounterIon::from_symbol(""), Some(CounterIon::None));
        assert_eq!(CounterIon::from_symbol("Na"), Some(CounterIon::Na));
        assert_eq!(CounterIon::from_symbol("Li"), None);
        assert!(CounterIon::None.mass_adjustment().abs() < f64::EPSILON);
        // The same single electron for every ion
        for ion in [CounterIon::H, CounterIon::Na, CounterIon::K, CounterIon::Cs] {
            assert!((ion.mass_adjustment() + ELECTRON_MASS).abs() < f64::EPSILON);
        }
    }
}
