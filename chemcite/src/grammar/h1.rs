use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use crate::{
    grammar::GrammarVariant,
    helper_functions::{split_outside_enclosures, trim_range},
};

/// The pattern set for 1H NMR descriptions of one grammar variant
#[derive(Debug)]
pub struct H1Grammar {
    header: Regex,
    peak_with_couplings: Regex,
    peak_without_couplings: Regex,
    terminator: Regex,
    separators: &'static [char],
}

const LENIENT_SHIFT: &str =
    r"(?P<first>\d+(?:\.\d+)?)(?:\s*[-–—~]\s*(?P<second>\d+(?:\.\d+)?))?";
const STRICT_SHIFT: &str = r"(?P<first>\d+\.\d{2})(?: – (?P<second>\d+\.\d{2}))?";

static STRICT: LazyLock<H1Grammar> = LazyLock::new(|| H1Grammar {
    header: Regex::new(r"^1H NMR \((?P<frequency>\d+) MHz, (?P<solvent>(?:\([^()]*\)|[^()])+)\) δ ")
        .unwrap(),
    peak_with_couplings: Regex::new(&format!(
        r"^{STRICT_SHIFT} \((?P<multiplicity>[a-z]+(?: [a-z]+)?), J = (?P<couplings>\d+\.\d(?:, \d+\.\d)*) Hz, (?P<hydrogens>\d+)H\)$"
    ))
    .unwrap(),
    peak_without_couplings: Regex::new(&format!(
        r"^{STRICT_SHIFT} \((?P<multiplicity>[a-z]+(?: [a-z]+)?), (?P<hydrogens>\d+)H\)$"
    ))
    .unwrap(),
    terminator: Regex::new(r"H\)$").unwrap(),
    separators: &[','],
});

static LENIENT: LazyLock<H1Grammar> = LazyLock::new(|| H1Grammar {
    header: Regex::new(
        r"^(?:1H|¹H|1 H)\s*NMR\s*\(\s*(?P<frequency>\d+(?:\.\d+)?)\s*MHz\s*[,，;]\s*(?P<solvent>(?:\([^()]*\)|[^()])+?)\s*\)\s*[,，:：]?\s*(?:δ\s*(?:\(?\s*ppm\s*\)?)?\s*[:：=]?\s*)?",
    )
    .unwrap(),
    peak_with_couplings: Regex::new(&format!(
        r"^{LENIENT_SHIFT}\s*\(\s*(?P<multiplicity>[A-Za-z]+(?:\s[A-Za-z]+)?)\s*[,，]\s*(?:3|4)?J\s*(?:\([A-Za-z]+\))?\s*=\s*(?P<couplings>\d+(?:\.\d+)?(?:\s*[,，]\s*\d+(?:\.\d+)?)*)\s*Hz\s*[,，]\s*(?P<hydrogens>\d+)\s*H\s*\)$"
    ))
    .unwrap(),
    peak_without_couplings: Regex::new(&format!(
        r"^{LENIENT_SHIFT}\s*\(\s*(?P<multiplicity>[A-Za-z]+(?:\s[A-Za-z]+)?)\s*[,，]\s*(?P<hydrogens>\d+)\s*H\s*\)$"
    ))
    .unwrap(),
    terminator: Regex::new(r"H\s*\)$").unwrap(),
    separators: &[',', '，'],
});

/// The parts of a matched 1H NMR header, all ranges are relative to the record text
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct H1Header {
    /// The full header, including the whitespace before the peak list
    pub range: Range<usize>,
    /// The spectrometer frequency in MHz
    pub frequency: Range<usize>,
    /// The solvent name
    pub solvent: Range<usize>,
}

/// The captured parts of a single peak
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PeakCaptures<'a> {
    /// The first (or only) shift value
    pub first: &'a str,
    /// The second shift value for ranges
    pub second: Option<&'a str>,
    /// The multiplicity symbol
    pub multiplicity: &'a str,
    /// The coupling constants, if the with-couplings grammar matched
    pub couplings: Option<Vec<&'a str>>,
    /// The hydrogen count
    pub hydrogens: &'a str,
}

/// The result of matching a single peak token
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PeakMatch<'a> {
    /// The token matched one of the peak grammars
    Matched(PeakCaptures<'a>),
    /// The token does not end with a hydrogen count and closing parenthesis
    Unterminated,
    /// The token ends correctly but could not be read
    Malformed,
}

impl H1Grammar {
    /// Get the pattern set for the given variant
    pub fn get(variant: GrammarVariant) -> &'static Self {
        match variant {
            GrammarVariant::Strict => &STRICT,
            GrammarVariant::Lenient => &LENIENT,
        }
    }

    /// Match the header (`1H NMR (400 MHz, CDCl3) δ `) at the start of a record
    pub fn match_header(&self, line: &str) -> Option<H1Header> {
        let captures = self.header.captures(line)?;
        Some(H1Header {
            range: captures.get(0)?.range(),
            frequency: captures.name("frequency")?.range(),
            solvent: trim_range(line, captures.name("solvent")?.range()),
        })
    }

    /// Find the peak tokens in the peak list starting at `start`. The list ends at the first
    /// full stop or semicolon outside of any parentheses. Tokens are separated by commas outside
    /// of parentheses (the lenient variant also accepts full width commas), a hyphen or dash is never a separator, so shift ranges (`7.10 – 7.30`)
    /// and the commas between coupling constants stay within their token.
    pub fn peak_tokens(&self, line: &str, start: usize) -> Vec<Range<usize>> {
        let end = peak_list_end(line, start);
        split_outside_enclosures(line, start..end, self.separators)
    }

    /// Match a single peak token, the with-couplings grammar is tried first
    pub fn match_peak<'a>(&self, token: &'a str) -> PeakMatch<'a> {
        let (captures, with_couplings) = match self.peak_with_couplings.captures(token) {
            Some(c) => (c, true),
            None => match self.peak_without_couplings.captures(token) {
                Some(c) => (c, false),
                None if self.terminator.is_match(token) => return PeakMatch::Malformed,
                None => return PeakMatch::Unterminated,
            },
        };
        let (Some(first), Some(multiplicity), Some(hydrogens)) = (
            captures.name("first"),
            captures.name("multiplicity"),
            captures.name("hydrogens"),
        ) else {
            return PeakMatch::Malformed;
        };
        PeakMatch::Matched(PeakCaptures {
            first: first.as_str(),
            second: captures.name("second").map(|m| m.as_str()),
            multiplicity: multiplicity.as_str(),
            couplings: with_couplings.then(|| {
                captures.name("couplings").map_or_else(Vec::new, |m| {
                    m.as_str()
                        .split([',', '，'])
                        .map(str::trim)
                        .collect()
                })
            }),
            hydrogens: hydrogens.as_str(),
        })
    }
}

/// The end of the peak list: the first full stop not followed by a digit, or the first
/// semicolon, outside of any parentheses. If there is none the list runs to the end of the line.
fn peak_list_end(line: &str, start: usize) -> usize {
    let bytes = line.as_bytes();
    let mut depth = 0_usize;
    for (index, byte) in bytes.iter().enumerate().skip(start) {
        match byte {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return index,
            b'.' if depth == 0 && !bytes.get(index + 1).is_some_and(u8::is_ascii_digit) => {
                return index;
            }
            _ => (),
        }
    }
    line.len()
}
