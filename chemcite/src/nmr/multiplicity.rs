use serde::{Deserialize, Serialize};

/// A first order splitting component
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Splitting {
    /// d
    Doublet,
    /// t
    Triplet,
    /// q
    Quartet,
    /// p (quint)
    Pentet,
    /// h (sext)
    Sextet,
    /// hept (sept)
    Septet,
}

impl Splitting {
    /// The ACS symbol
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Doublet => "d",
            Self::Triplet => "t",
            Self::Quartet => "q",
            Self::Pentet => "p",
            Self::Sextet => "h",
            Self::Septet => "hept",
        }
    }
}

/// Longer symbols first, so `hept` is not read as `h` followed by garbage
const SPLITTING_SYMBOLS: &[(&str, Splitting)] = &[
    ("quint", Splitting::Pentet),
    ("hept", Splitting::Septet),
    ("sept", Splitting::Septet),
    ("sext", Splitting::Sextet),
    ("d", Splitting::Doublet),
    ("t", Splitting::Triplet),
    ("q", Splitting::Quartet),
    ("p", Splitting::Pentet),
    ("h", Splitting::Sextet),
];

/// The multiplicity of a peak
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Multiplicity {
    /// s
    Singlet,
    /// br s
    BroadSinglet,
    /// m, a multiplet that is reported as a shift range
    Multiplet,
    /// A first order multiplet of one to three components, for example `d` or `ddd`
    Coupled(Vec<Splitting>),
    /// Any symbol not in the alphabet, as written
    Unknown(String),
}

impl Multiplicity {
    /// Read a multiplicity symbol, any symbol outside the alphabet results in [`Self::Unknown`]
    pub fn from_symbol(symbol: &str) -> Self {
        let lower = symbol.trim().to_ascii_lowercase();
        match lower.as_str() {
            "s" => Self::Singlet,
            "br s" | "brs" | "bs" | "br" => Self::BroadSinglet,
            "m" => Self::Multiplet,
            other => {
                let mut rest = other;
                let mut components = Vec::new();
                'outer: while !rest.is_empty() {
                    for (text, splitting) in SPLITTING_SYMBOLS {
                        if let Some(tail) = rest.strip_prefix(text) {
                            components.push(*splitting);
                            rest = tail;
                            continue 'outer;
                        }
                    }
                    return Self::Unknown(symbol.trim().to_string());
                }
                if (1..=3).contains(&components.len()) {
                    Self::Coupled(components)
                } else {
                    Self::Unknown(symbol.trim().to_string())
                }
            }
        }
    }

    /// The ACS symbol
    pub fn symbol(&self) -> String {
        match self {
            Self::Singlet => "s".to_string(),
            Self::BroadSinglet => "br s".to_string(),
            Self::Multiplet => "m".to_string(),
            Self::Coupled(components) => components.iter().map(|c| c.symbol()).collect(),
            Self::Unknown(symbol) => symbol.clone(),
        }
    }

    /// Check if this symbol is part of the alphabet
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// The number of coupling constants this multiplicity needs, unknown for unknown symbols
    pub fn expected_couplings(&self) -> Option<usize> {
        match self {
            Self::Singlet | Self::BroadSinglet | Self::Multiplet => Some(0),
            Self::Coupled(components) => Some(components.len()),
            Self::Unknown(_) => None,
        }
    }

    /// Multiplets are reported as a shift range
    pub const fn requires_range(&self) -> bool {
        matches!(self, Self::Multiplet)
    }

    /// Only first order multiplets can carry coupling constants
    pub const fn can_carry_couplings(&self) -> bool {
        matches!(self, Self::Coupled(_))
    }

    /// Check if this multiplicity has to be reported with coupling constants. With
    /// `general_multiplet` the single higher order multiplicities (p, h, hept) may be reported
    /// without, as they are often not resolved.
    pub fn requires_couplings(&self, general_multiplet: bool) -> bool {
        match self {
            Self::Coupled(components) => {
                !(general_multiplet
                    && components.len() == 1
                    && matches!(
                        components[0],
                        Splitting::Pentet | Splitting::Sextet | Splitting::Septet
                    ))
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
