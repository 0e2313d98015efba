use std::ops::Range;

use context_error::StaticErrorContent;
use serde::{Deserialize, Serialize};

use crate::{
    CitableRecord, ParseSettings, Replacement,
    annotation::{AnnotatedText, Annotation, Classification, IssueKind, Language, Message, RichText},
    chemistry::MolecularFormula,
    grammar::{HrmsGrammar, RawRecord},
    helper_functions::{float_digits, round_to, trim_range},
    hrms::{CounterIon, IonSource},
};

/// The maximal allowed difference between the found and the reported exact mass
pub const MASS_TOLERANCE: f64 = 0.003;
/// The maximal allowed difference between the reported exact mass and the calculated mass
pub const CONSISTENCY_TOLERANCE: f64 = 0.0001;

/// The mass of the formula as the given ion, rounded to 5 and then to 4 decimals, which is how
/// calculated masses are reported.
///
/// ```rust
/// use chemcite::{chemistry::MolecularFormula, hrms::{CounterIon, calculated_mass}};
/// let formula = MolecularFormula::parse("C10H13N2O").unwrap();
/// assert!((calculated_mass(&formula, CounterIon::H) - 177.1022).abs() < 1e-9);
/// ```
pub fn calculated_mass(formula: &MolecularFormula, ion: CounterIon) -> f64 {
    round_to(
        round_to(formula.monoisotopic_mass() + ion.mass_adjustment(), 5),
        4,
    )
}

/// What an amount before the HRMS clause reports
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum AmountKind {
    /// The isolated weight, `12.3 mg`
    Weight,
    /// The yield, `85%`
    Yield,
}

/// A weight or yield reported before the HRMS clause
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Amount {
    /// Weight or yield
    pub kind: AmountKind,
    /// The text as written
    pub original: String,
    /// The location in the input
    pub location: Range<usize>,
    /// Set if the formatting is wrong in strict mode
    pub annotation: Option<Annotation>,
}

impl Amount {
    /// The amount with normalised spacing
    pub fn plain(&self) -> String {
        let split = self
            .original
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(self.original.len());
        let (value, unit) = self.original.split_at(split);
        match self.kind {
            AmountKind::Weight => format!("{value} {}", unit.trim()),
            AmountKind::Yield => format!("{value}%"),
        }
    }

    fn replacement(&self) -> Replacement {
        let rich = RichText::new().text(self.plain());
        Replacement {
            original: self.original.clone(),
            location: self.location.clone(),
            plain: self.plain(),
            rich: match &self.annotation {
                Some(annotation) => rich.marked(annotation.clone()),
                None => rich,
            },
        }
    }
}

/// A validated HRMS description
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HrmsRecord {
    /// The HRMS clause as written
    pub raw_text: String,
    /// The location of the clause in the input
    pub location: Range<usize>,
    /// The ionization source as written, for example `ESI-TOF`
    pub source_text: String,
    /// The ionization source
    pub ion_source: IonSource,
    /// The counter ion
    pub counter_ion: CounterIon,
    /// The formula of the ion
    pub formula: MolecularFormula,
    /// The reported exact mass as written
    pub exact_mass_reported: String,
    /// The location of the reported exact mass
    pub exact_location: Range<usize>,
    /// The exact mass used for the checks, in lenient mode rounded to 4 decimals
    pub exact_mass: f64,
    /// The found mass as written
    pub found_mass_reported: String,
    /// The location of the found mass
    pub found_location: Range<usize>,
    /// The mass calculated from the formula, see [`calculated_mass`]
    pub calculated_mass: f64,
    /// Weight and yield before the clause
    pub amounts: Vec<Amount>,
    /// The outcome of the mass checks, a single success annotation if all passed
    pub annotations: Vec<Annotation>,
    strict: bool,
}

/// Parse and validate a single HRMS line, see [`HrmsRecord::parse`]. Leading and trailing
/// whitespace is ignored, annotation locations are relative to the given text.
///
/// # Errors
/// If the line cannot be parsed, see [`HrmsRecord::parse`].
pub fn parse_hrms_clause(text: &str, settings: &ParseSettings) -> Result<HrmsRecord, AnnotatedText> {
    let range = trim_range(text, 0..text.len());
    HrmsRecord::parse(
        &RawRecord {
            line_index: 0,
            offset: range.start,
            text: &text[range],
        },
        settings,
    )
}

fn reject(record: &RawRecord<'_>, kind: IssueKind, message: String) -> AnnotatedText {
    AnnotatedText {
        text: record.text.to_string(),
        annotation: Annotation::issue(kind, record.range(), message),
    }
}

impl HrmsRecord {
    /// Parse and validate a HRMS line.
    ///
    /// In strict mode the exact mass and then the found mass have to be reported with 4
    /// decimals, only if both are the tolerance between them is checked. In lenient mode the
    /// exact mass is rounded to 4 decimals and the tolerance is always checked. In both modes
    /// the reported exact mass has to match the mass calculated from the formula.
    ///
    /// # Errors
    /// If the clause does not match the grammar, the source or counter ion is unknown, the
    /// adduct is negative, the separator is not ` + ` in strict mode, or the formula is invalid.
    /// In all cases the whole line is returned as annotated text.
    pub fn parse(record: &RawRecord<'_>, settings: &ParseSettings) -> Result<Self, AnnotatedText> {
        let grammar = HrmsGrammar::get(settings.grammar());
        let language = settings.language;
        let line = record.text;

        let Some(captures) = grammar.match_clause(line) else {
            log::debug!("line {} is not a HRMS description", record.line_index + 1);
            return Err(reject(
                record,
                IssueKind::Format,
                Message::HrmsFormat.localize(language),
            ));
        };
        let source_text = captures.source.trim();
        let ion_source = IonSource::find(source_text).ok_or_else(|| {
            reject(
                record,
                IssueKind::Data,
                Message::UnknownSource(source_text).localize(language),
            )
        })?;
        if captures.sign.is_some_and(|sign| sign != "+") {
            return Err(reject(
                record,
                IssueKind::Data,
                Message::NegativeAdduct.localize(language),
            ));
        }
        let counter_ion = CounterIon::from_symbol(captures.ion).ok_or_else(|| {
            reject(
                record,
                IssueKind::Data,
                Message::UnknownIon(captures.ion).localize(language),
            )
        })?;
        if settings.strict
            && let Some(separator) = captures.separator
            && separator != " + "
        {
            return Err(reject(
                record,
                IssueKind::Format,
                Message::Separator(separator).localize(language),
            ));
        }
        let formula = MolecularFormula::parse(captures.formula.0).map_err(|error| {
            reject(
                record,
                IssueKind::Data,
                Message::InvalidFormula(&error.get_long_description()).localize(language),
            )
        })?;
        let (Ok(exact), Ok(found)) = (
            captures.exact.0.parse::<f64>(),
            captures.found.0.parse::<f64>(),
        ) else {
            return Err(reject(
                record,
                IssueKind::Format,
                Message::HrmsFormat.localize(language),
            ));
        };

        let calculated = calculated_mass(&formula, counter_ion);
        let exact_location = record.absolute(captures.exact.1.clone());
        let found_location = record.absolute(captures.found.1.clone());
        let mut annotations = Vec::new();
        let tolerance = |exact: f64| {
            let difference = round_to((found - exact).abs(), 4);
            (difference > MASS_TOLERANCE).then(|| {
                Annotation::issue(
                    IssueKind::Tolerance,
                    found_location.clone(),
                    Message::Tolerance(difference).localize(language),
                )
            })
        };
        let exact_mass = if settings.strict {
            if float_digits(captures.exact.0) != Some(4) {
                annotations.push(Annotation::issue(
                    IssueKind::DecimalPrecision,
                    exact_location.clone(),
                    Message::ExactDecimals.localize(language),
                ));
            } else if float_digits(captures.found.0) != Some(4) {
                annotations.push(Annotation::issue(
                    IssueKind::DecimalPrecision,
                    found_location.clone(),
                    Message::FoundDecimals.localize(language),
                ));
            } else {
                annotations.extend(tolerance(exact));
            }
            exact
        } else {
            let coerced = round_to(exact, 4);
            annotations.extend(tolerance(coerced));
            coerced
        };
        if round_to((exact_mass - calculated).abs(), 4) > CONSISTENCY_TOLERANCE {
            annotations.push(Annotation::issue(
                IssueKind::Consistency,
                exact_location.clone(),
                Message::Consistency(calculated).localize(language),
            ));
        }
        if annotations.is_empty() {
            annotations.push(Annotation::new(
                exact_location.clone(),
                Classification::Success,
                Message::Verified(calculated).localize(language),
            ));
        }
        log::debug!(
            "line {}: {formula} as {counter_ion:?} calculated {calculated:.4}, reported {exact_mass:.4}, found {found}",
            record.line_index + 1
        );

        let prefix = &line[..captures.clause.start];
        let mut amounts = Vec::new();
        if let Some(range) = grammar.match_weight(prefix) {
            let format_ok = grammar.weight_format_ok(&prefix[range.clone()]);
            amounts.push(Self::amount(
                record,
                AmountKind::Weight,
                range,
                format_ok,
                language,
            ));
        }
        if let Some(range) = grammar.match_yield(prefix) {
            let format_ok = grammar.yield_format_ok(&prefix[range.clone()]);
            amounts.push(Self::amount(
                record,
                AmountKind::Yield,
                range,
                format_ok,
                language,
            ));
        }
        amounts.sort_by_key(|a| a.location.start);

        Ok(Self {
            raw_text: line[captures.clause.clone()].to_string(),
            location: record.absolute(captures.clause),
            source_text: source_text.to_string(),
            ion_source,
            counter_ion,
            formula,
            exact_mass_reported: captures.exact.0.to_string(),
            exact_location,
            exact_mass,
            found_mass_reported: captures.found.0.to_string(),
            found_location,
            calculated_mass: calculated,
            amounts,
            annotations,
            strict: settings.strict,
        })
    }

    fn amount(
        record: &RawRecord<'_>,
        kind: AmountKind,
        range: Range<usize>,
        format_ok: bool,
        language: Language,
    ) -> Amount {
        let location = record.absolute(range.clone());
        let annotation = (!format_ok).then(|| {
            let message = match kind {
                AmountKind::Weight => Message::WeightDecimals,
                AmountKind::Yield => Message::YieldDecimals,
            };
            Annotation::issue(
                IssueKind::DecimalPrecision,
                location.clone(),
                message.localize(language),
            )
        });
        Amount {
            kind,
            original: record.text[range].to_string(),
            location,
            annotation,
        }
    }

    /// The exact mass as it should be cited, lenient parsing normalises it to 4 decimals
    pub fn exact_mass_text(&self) -> String {
        if self.strict {
            self.exact_mass_reported.clone()
        } else {
            format!("{:.4}", self.exact_mass)
        }
    }

    /// The ion, for example `[M + H]`
    pub fn ion_text(&self) -> String {
        match self.counter_ion {
            CounterIon::None => "[M]".to_string(),
            ion => format!("[M + {}]", ion.symbol()),
        }
    }

    /// The clause as plain text
    pub fn plain(&self) -> String {
        self.rich().plain()
    }

    /// The clause as rich text, with the mass checks marked on the masses
    pub fn rich(&self) -> RichText {
        let marked = |text: String, location: &Range<usize>| {
            RichText::new()
                .text(text)
                .marked_all(self.annotations.iter().filter(|a| a.target == *location))
        };
        RichText::new()
            .text(format!("HRMS ({}) m/z: {}", self.source_text, self.ion_text()))
            .superscript("+")
            .text(" calcd for ")
            .append(self.formula.formatted())
            .superscript("+")
            .text(" ")
            .append(marked(self.exact_mass_text(), &self.exact_location))
            .text("; found ")
            .append(marked(
                self.found_mass_reported.clone(),
                &self.found_location,
            ))
            .text(".")
    }

    /// Check if no annotation is a danger annotation
    pub fn is_ready(&self) -> bool {
        self.annotations().iter().all(|a| !a.is_danger())
    }
}

impl CitableRecord for HrmsRecord {
    fn parse(record: &RawRecord<'_>, settings: &ParseSettings) -> Result<Self, AnnotatedText> {
        Self::parse(record, settings)
    }

    fn replacements(&self) -> Vec<Replacement> {
        let mut replacements: Vec<Replacement> =
            self.amounts.iter().map(Amount::replacement).collect();
        replacements.push(Replacement {
            original: self.raw_text.clone(),
            location: self.location.clone(),
            plain: self.plain(),
            rich: self.rich(),
        });
        replacements
    }

    fn annotations(&self) -> Vec<&Annotation> {
        self.amounts
            .iter()
            .filter_map(|a| a.annotation.as_ref())
            .chain(self.annotations.iter())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use crate::{
        ParseSettings,
        annotation::{AnnotatedText, Classification, IssueKind},
        chemistry::MolecularFormula,
        grammar::split_records,
        hrms::{CounterIon, HrmsRecord, IonSource, calculated_mass, parse_hrms_clause},
    };

    fn parse(text: &str, strict: bool) -> Result<HrmsRecord, AnnotatedText> {
        HrmsRecord::parse(
            &split_records(text)[0],
            &ParseSettings::default().strict(strict),
        )
    }

    fn issues(record: &HrmsRecord) -> Vec<Option<IssueKind>> {
        record.annotations.iter().map(|a| a.issue).collect()
    }

    #[test]
    fn calculated_masses() {
        let protonated = MolecularFormula::parse("C10H13N2O").unwrap();
        assert!((calculated_mass(&protonated, CounterIon::H) - 177.1022).abs() < 1e-9);
        let sodiated = MolecularFormula::parse("C10H12N2ONa").unwrap();
        assert!((calculated_mass(&sodiated, CounterIon::Na) - 199.0842).abs() < 1e-9);
        let neutral = MolecularFormula::parse("C10H12N2O").unwrap();
        assert!((calculated_mass(&neutral, CounterIon::H) - 176.0944).abs() < 1e-9);
        assert!((calculated_mass(&neutral, CounterIon::None) - 176.0950).abs() < 1e-9);
    }

    #[test]
    fn verified() {
        let text = "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.";
        let record = parse(text, true).unwrap();
        assert_eq!(record.ion_source, IonSource::Esi);
        assert_eq!(record.counter_ion, CounterIon::H);
        assert_eq!(record.annotations.len(), 1);
        assert_eq!(record.annotations[0].classification, Classification::Success);
        assert!(record.annotations[0].message.contains("177.1022"));
        assert!(record.is_ready());
        assert_eq!(record.plain(), text);
    }

    #[test]
    fn consistency_is_always_checked() {
        // The formula lacks the added proton, so the calculated mass does not match
        let text = "HRMS (ESI) m/z: [M + H]+ calcd for C10H12N2O+ 195.0866; found 195.0868.";
        for strict in [true, false] {
            let record = parse(text, strict).unwrap();
            assert_eq!(issues(&record), vec![Some(IssueKind::Consistency)]);
            assert!(record.annotations[0].message.contains("176.0944"));
            assert!(!record.is_ready());
        }
    }

    #[test]
    fn strict_decimals() {
        let exact = parse(
            "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.102; found 177.1025.",
            true,
        )
        .unwrap();
        assert_eq!(issues(&exact)[0], Some(IssueKind::DecimalPrecision));
        let found = parse(
            "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.10.",
            true,
        )
        .unwrap();
        assert_eq!(issues(&found), vec![Some(IssueKind::DecimalPrecision)]);
        assert_eq!(found.annotations[0].target, found.found_location);
    }

    #[test]
    fn lenient_coerces_exact() {
        let record = parse(
            "HRMS (ESI) m/z [M+H]+ calcd for C10H13N2O 177.10224, found 177.1025",
            false,
        )
        .unwrap();
        assert!(record.is_ready());
        assert_eq!(record.exact_mass_text(), "177.1022");
        assert_eq!(
            record.plain(),
            "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025."
        );
    }

    #[test]
    fn tolerance() {
        let record = parse(
            "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1062.",
            true,
        )
        .unwrap();
        assert_eq!(issues(&record), vec![Some(IssueKind::Tolerance)]);
        let edge = parse(
            "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1052.",
            true,
        )
        .unwrap();
        assert!(edge.is_ready());
    }

    #[test]
    fn rejected() {
        let format = parse("HRMS: 177.1022", false).unwrap_err();
        assert_eq!(format.annotation.issue, Some(IssueKind::Format));
        let source = parse(
            "HRMS (XYZ) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.",
            false,
        )
        .unwrap_err();
        assert_eq!(source.annotation.issue, Some(IssueKind::Data));
        let ion = parse(
            "HRMS (ESI) m/z: [M + Li]+ calcd for C10H12N2OLi+ 183.1110; found 183.1112.",
            false,
        )
        .unwrap_err();
        assert!(ion.annotation.message.contains("Li"));
        let negative = parse(
            "HRMS (ESI) m/z: [M - H]- calcd for C10H11N2O- 175.0877; found 175.0870.",
            false,
        )
        .unwrap_err();
        assert_eq!(negative.annotation.issue, Some(IssueKind::Data));
        let separator = parse(
            "HRMS (ESI) m/z: [M+H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.",
            true,
        )
        .unwrap_err();
        assert_eq!(separator.annotation.issue, Some(IssueKind::Format));
        assert!(
            parse(
                "HRMS (ESI) m/z: [M+H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.",
                false
            )
            .is_ok()
        );
        let formula = parse(
            "HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2Xx+ 177.1022; found 177.1025.",
            true,
        )
        .unwrap_err();
        assert!(formula.annotation.message.contains("Xx"));
    }

    #[test]
    fn single_clause() {
        let record = parse_hrms_clause(
            "  HRMS (APCI) m/z: [M + K]+ calcd for C10H12N2OK+ 215.0581; found 215.0585.  ",
            &ParseSettings::default(),
        )
        .unwrap();
        assert_eq!(record.ion_source, IonSource::Apci);
        assert_eq!(record.location.start, 2);
        assert!(record.is_ready());
    }

    #[test]
    fn amounts() {
        let strict = parse(
            "white solid, 12.30 mg, 85.5% yield; HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.",
            true,
        )
        .unwrap();
        assert_eq!(strict.amounts.len(), 2);
        assert!(strict.amounts.iter().all(|a| a.annotation.is_some()));
        assert!(!strict.is_ready());
        let lenient = parse(
            "12.30mg, 85.5 % yield; HRMS (ESI) m/z: [M + H]+ calcd for C10H13N2O+ 177.1022; found 177.1025.",
            false,
        )
        .unwrap();
        assert!(lenient.is_ready());
        assert_eq!(lenient.amounts[0].plain(), "12.30 mg");
        assert_eq!(lenient.amounts[1].plain(), "85.5%");
    }
}
