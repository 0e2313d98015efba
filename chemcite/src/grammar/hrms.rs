use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use crate::grammar::GrammarVariant;

const WEIGHT: &str = r"\d+(?:\.\d+)?\s*(?:mg|g)\b";
const YIELD: &str = r"\d+(?:\.\d+)?\s*%";

/// The pattern set for HRMS descriptions of one grammar variant
#[derive(Debug)]
pub struct HrmsGrammar {
    clause: Regex,
    weight: Regex,
    amount_yield: Regex,
    weight_format: Option<Regex>,
    yield_format: Option<Regex>,
}

static STRICT: LazyLock<HrmsGrammar> = LazyLock::new(|| HrmsGrammar {
    clause: Regex::new(
        r"HRMS \((?P<source>[^()]+)\) m/z: \[M(?:(?P<separator>\s*(?P<sign>[+\-−])\s*)(?P<ion>[A-Za-z0-9]+))?\][+\-−] calcd for (?P<formula>[A-Za-z0-9]+)\+? (?P<exact>\d+(?:\.\d+)?)[,;] found (?P<found>\d+(?:\.\d+)?)\.?$",
    )
    .unwrap(),
    weight: Regex::new(WEIGHT).unwrap(),
    amount_yield: Regex::new(YIELD).unwrap(),
    weight_format: Some(Regex::new(r"^\d+\.\d mg$").unwrap()),
    yield_format: Some(Regex::new(r"^\d+%$").unwrap()),
});

static LENIENT: LazyLock<HrmsGrammar> = LazyLock::new(|| HrmsGrammar {
    clause: Regex::new(
        r"HRMS\s*\(\s*(?P<source>[^()]*?)\s*\)\s*(?:m/z)?\s*[:：]?\s*\[\s*M(?:(?P<separator>\s*(?P<sign>[+\-−])\s*)(?P<ion>[A-Za-z0-9]+))?\s*\]\s*[+\-−]?\s*[,;:：]?\s*(?i:calc(?:ulate)?d?\.?)\s*(?i:for)?\s*(?P<formula>[A-Za-z0-9]+)\s*(?:\[[^\]]*\])?\s*[+\-−]?\s*[:：,]?\s*(?P<exact>\d+(?:\.\d+)?)\s*[,;，；]\s*(?i:found)\s*[:：]?\s*(?P<found>\d+(?:\.\d+)?)\.?",
    )
    .unwrap(),
    weight: Regex::new(WEIGHT).unwrap(),
    amount_yield: Regex::new(YIELD).unwrap(),
    weight_format: None,
    yield_format: None,
});


/// The captured parts of a HRMS clause, all ranges are relative to the record text
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HrmsCaptures<'a> {
    /// The full clause, from `HRMS` up to and including the closing full stop
    pub clause: Range<usize>,
    /// The ionization source text, for example `ESI-TOF`
    pub source: &'a str,
    /// The text between `M` and the ion including whitespace, for example ` + `
    pub separator: Option<&'a str>,
    /// The adduct sign
    pub sign: Option<&'a str>,
    /// The counter ion, empty for `[M]+`
    pub ion: &'a str,
    /// The formula text
    pub formula: (&'a str, Range<usize>),
    /// The reported (calculated) exact mass
    pub exact: (&'a str, Range<usize>),
    /// The found mass
    pub found: (&'a str, Range<usize>),
}

impl HrmsGrammar {
    /// Get the pattern set for the given variant
    pub fn get(variant: GrammarVariant) -> &'static Self {
        match variant {
            GrammarVariant::Strict => &STRICT,
            GrammarVariant::Lenient => &LENIENT,
        }
    }

    /// Match the HRMS clause anywhere in the record
    pub fn match_clause<'a>(&self, line: &'a str) -> Option<HrmsCaptures<'a>> {
        let captures = self.clause.captures(line)?;
        let formula = captures.name("formula")?;
        let exact = captures.name("exact")?;
        let found = captures.name("found")?;
        Some(HrmsCaptures {
            clause: captures.get(0)?.range(),
            source: captures.name("source")?.as_str(),
            separator: captures.name("separator").map(|m| m.as_str()),
            sign: captures.name("sign").map(|m| m.as_str()),
            ion: captures.name("ion").map_or("", |m| m.as_str()),
            formula: (formula.as_str(), formula.range()),
            exact: (exact.as_str(), exact.range()),
            found: (found.as_str(), found.range()),
        })
    }

    /// Find a weight (`12.3 mg`) in the text before the clause
    pub fn match_weight(&self, prefix: &str) -> Option<Range<usize>> {
        self.weight.find(prefix).map(|m| m.range())
    }

    /// Find a yield (`85%`) in the text before the clause
    pub fn match_yield(&self, prefix: &str) -> Option<Range<usize>> {
        self.amount_yield.find(prefix).map(|m| m.range())
    }

    /// Check the formatting of a weight, only the strict variant has any requirements
    pub fn weight_format_ok(&self, weight: &str) -> bool {
        self.weight_format.as_ref().is_none_or(|r| r.is_match(weight))
    }

    /// Check the formatting of a yield, only the strict variant has any requirements
    pub fn yield_format_ok(&self, value: &str) -> bool {
        self.yield_format.as_ref().is_none_or(|r| r.is_match(value))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::grammar::{GrammarVariant, HrmsGrammar};

    const LINE: &str = "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.";

    #[test]
    fn strict_clause() {
        let grammar = HrmsGrammar::get(GrammarVariant::Strict);
        let captures = grammar.match_clause(LINE).unwrap();
        assert_eq!(captures.clause, 0..LINE.len());
        assert_eq!(captures.source, "ESI");
        assert_eq!(captures.separator, Some(" + "));
        assert_eq!(captures.sign, Some("+"));
        assert_eq!(captures.ion, "H");
        assert_eq!(captures.formula.0, "C10H13N2O");
        assert_eq!(captures.exact.0, "177.1022");
        assert_eq!(&LINE[captures.found.1], "177.1025");
    }

    #[test]
    fn strict_keeps_separator_for_validation() {
        let grammar = HrmsGrammar::get(GrammarVariant::Strict);
        let captures = grammar
            .match_clause("HRMS (ESI) m/z: [M+Na]+ calcd for C10H12N2ONa+ 199.0842; found 199.0840.")
            .unwrap();
        assert_eq!(captures.separator, Some("+"));
        assert_eq!(captures.ion, "Na");
        assert!(
            grammar
                .match_clause("HRMS (ESI) m/z: [M + H]+ calcd. for C10H13N2O 177.1022, found 177.1025")
                .is_none()
        );
    }

    #[test]
    fn lenient_clause() {
        let grammar = HrmsGrammar::get(GrammarVariant::Lenient);
        let line = "12.3 mg, 85% yield; HRMS(ESI-TOF) m/z [M+H]+ Calcd. for C10H13N2O: 177.1022, Found: 177.1025";
        let captures = grammar.match_clause(line).unwrap();
        assert_eq!(captures.source, "ESI-TOF");
        assert_eq!(captures.ion, "H");
        assert_eq!(captures.formula.0, "C10H13N2O");
        assert_eq!(captures.exact.0, "177.1022");
        assert_eq!(captures.found.0, "177.1025");
        let prefix = &line[..captures.clause.start];
        assert_eq!(&prefix[grammar.match_weight(prefix).unwrap()], "12.3 mg");
        assert_eq!(&prefix[grammar.match_yield(prefix).unwrap()], "85%");
    }

    #[test]
    fn molecular_ion() {
        let grammar = HrmsGrammar::get(GrammarVariant::Lenient);
        let captures = grammar
            .match_clause("HRMS (EI) m/z: [M]+ calcd for C10H12N2O 176.0944; found 176.0940")
            .unwrap();
        assert_eq!(captures.ion, "");
        assert_eq!(captures.separator, None);
    }

    #[test]
    fn amount_formats() {
        let strict = HrmsGrammar::get(GrammarVariant::Strict);
        assert!(strict.weight_format_ok("12.3 mg"));
        assert!(!strict.weight_format_ok("12.30 mg"));
        assert!(!strict.weight_format_ok("12.3mg"));
        assert!(strict.yield_format_ok("85%"));
        assert!(!strict.yield_format_ok("85.5%"));
        let lenient = HrmsGrammar::get(GrammarVariant::Lenient);
        assert!(lenient.weight_format_ok("12.30mg"));
        assert!(lenient.yield_format_ok("85.5 %"));
    }
}
