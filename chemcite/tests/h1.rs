#![allow(clippy::missing_panics_doc)]
//! Integration tests for 1H NMR peak lists
use chemcite::{
    nmr::{fix_peak_data, is_j_valid, round_j},
    prelude::*,
};
use context_error::StaticErrorContent;

const MNOVA: &str = "1H NMR (400 MHz, CDCl3) δ 7.37 – 7.26 (m, 5H), 7.14 (dd, J = 8.4, 2.0 Hz, 1H), 6.90 (d, J = 8.4 Hz, 1H), 4.12 (q, J = 7.2 Hz, 2H), 3.80 (s, 3H), 1.22 (t, J = 7.2 Hz, 3H).";

fn peaks(citation: &Citation<H1Record>) -> &[Result<PeakEntry, AnnotatedText>] {
    &citation.record.as_ref().unwrap().peaks
}

#[test]
fn software_output_descending_range() {
    let citations = cite_h1(MNOVA, &ParseSettings::default().strict(true));
    assert_eq!(citations.len(), 1);
    let citation = &citations[0];
    assert_eq!(peaks(citation).len(), 6);
    // The multiplet range is written high to low
    let multiplet = peaks(citation)[0].as_ref().unwrap();
    assert_eq!(
        multiplet.annotation.as_ref().unwrap().issue,
        Some(IssueKind::Format)
    );
    assert!(!citation.is_ready());
    for peak in &peaks(citation)[1..] {
        assert_eq!(peak.as_ref().unwrap().annotation, None);
    }
}

#[test]
fn software_output_ascending_range_is_ready() {
    let text = MNOVA.replace("7.37 – 7.26", "7.26 – 7.37");
    let citations = cite_h1(&text, &ParseSettings::default().strict(true));
    assert!(citations[0].is_ready());
    assert_eq!(citations[0].plain(), text);
}

#[test]
fn coupling_constant_quantization() {
    // 0.4 Hz steps at 400 MHz
    assert!(is_j_valid(7.6, 400.0));
    assert!(!is_j_valid(7.5, 400.0));
    assert!((round_j(7.5, 400.0) - 7.6).abs() < 1e-9);
    assert!((round_j(7.3, 400.0) - 7.2).abs() < 1e-9);

    let text = "1H NMR (400 MHz, CDCl3) δ 6.90 (dd, J = 8.5, 2.1 Hz, 1H).";
    let citations = cite_h1(text, &ParseSettings::default());
    let peak = peaks(&citations[0])[0].as_ref().unwrap();
    let annotation = peak.annotation.as_ref().unwrap();
    assert_eq!(annotation.classification, Classification::Warning);
    assert_eq!(annotation.issue, Some(IssueKind::Quantization));
    assert!(annotation.message.contains("8.5, 2.1"));
    assert_eq!(peak.plain(), "6.90 (dd, J = 8.4, 2.0 Hz, 1H)");
    // A warning does not block the citation
    assert!(citations[0].is_ready());
}

#[test]
fn triplet_with_two_constants() {
    let text = "1H NMR (400 MHz, CDCl3) δ 1.22 (t, J = 7.2, 6.8 Hz, 3H).";
    let citations = cite_h1(text, &ParseSettings::default());
    let annotation = peaks(&citations[0])[0]
        .as_ref()
        .unwrap()
        .annotation
        .clone()
        .unwrap();
    assert_eq!(annotation.issue, Some(IssueKind::PeakType));
    assert!(annotation.message.contains("expects 1 coupling constant"));
    assert_eq!(&text[annotation.target], "1.22 (t, J = 7.2, 6.8 Hz, 3H)");
}

#[test]
fn corrector_runs_once() {
    let settings = ParseSettings::default();
    let citations = cite_h1(
        "1H NMR (400 MHz, CDCl3) δ 6.90 (dd, J = 8.5, 2.1 Hz, 1H), 7.00 (x, 1H).",
        &settings,
    );
    for peak in peaks(&citations[0]) {
        let peak = peak.as_ref().unwrap();
        assert!(peak.is_corrected());
        assert_eq!(&fix_peak_data(peak.clone(), 400.0, &settings), peak);
    }
}

#[test]
fn unknown_multiplicity_becomes_placeholder_multiplet() {
    let citations = cite_h1(
        "1H NMR (400 MHz, CDCl3) δ 7.00 (ddddd, J = 8.0 Hz, 1H).",
        &ParseSettings::default(),
    );
    assert_eq!(
        citations[0].plain(),
        "1H NMR (400 MHz, CDCl3) δ x.xx – x.xx (m, 1H)."
    );
    assert!(!citations[0].is_ready());
}

#[test]
fn strict_rejects_hand_edits() {
    let text = "1H NMR (400 MHz, CDCl3) δ 7.26-7.37 (m, 5H), 3.8 (s, 3H).";
    let strict = cite_h1(text, &ParseSettings::default().strict(true));
    assert!(peaks(&strict[0]).iter().all(Result::is_err));
    let lenient = cite_h1(text, &ParseSettings::default());
    assert!(peaks(&lenient[0]).iter().all(Result::is_ok));
    assert!(lenient[0].is_ready());
    assert_eq!(
        lenient[0].plain(),
        "1H NMR (400 MHz, CDCl3) δ 7.26 – 7.37 (m, 5H), 3.8 (s, 3H)."
    );
}

#[test]
fn broken_header_marks_whole_line() {
    let text = "1H NMR 400 MHz CDCl3: 7.26 (s, 1H)\n1H NMR (500 MHz, DMSO-d6) δ 8.01 (s, 1H).";
    let citations = cite_h1(text, &ParseSettings::default());
    assert_eq!(citations.len(), 2);
    let error = citations[0].record.as_ref().unwrap_err();
    assert_eq!(error.annotation.target, 0..34);
    assert_eq!(citations[0].replacements.len(), 1);
    assert!(citations[1].is_ready());
    let rich = citations[1].rich();
    assert!(rich.spans().contains(&Span::Italic("d".to_string())));
    assert!(rich.spans().contains(&Span::Superscript("1".to_string())));
}

#[test]
fn language_only_changes_messages() {
    let text = "1H NMR (400 MHz, CDCl3) δ 7.30 (m, 5H), 1.22 (t, 3H).";
    let english = cite_h1(text, &ParseSettings::default());
    let chinese = cite_h1(text, &ParseSettings::default().language(Language::Chinese));
    assert_eq!(english[0].plain(), chinese[0].plain());
    let english = english[0].annotations();
    let chinese = chinese[0].annotations();
    assert_eq!(english.len(), 2);
    assert_eq!(english.len(), chinese.len());
    for (en, zh) in english.iter().zip(&chinese) {
        assert_eq!(en.classification, zh.classification);
        assert_eq!(en.issue, zh.issue);
        assert_eq!(en.target, zh.target);
        assert_ne!(en.message, zh.message);
    }
}

#[test]
fn general_multiplet_allows_unresolved_pentet() {
    let text = "1H NMR (400 MHz, CDCl3) δ 1.62 (p, 2H).";
    assert!(!cite_h1(text, &ParseSettings::default())[0].is_ready());
    assert!(cite_h1(text, &ParseSettings::default().general_multiplet(true))[0].is_ready());
    assert!(cite_h1(text, &ParseSettings::default().auto_fix_j(false))[0].is_ready());
}

#[test]
fn annotations_become_errors() {
    let text = "1H NMR (400 MHz, CDCl3) δ 7.30 (m, 5H).";
    let citations = cite_h1(text, &ParseSettings::default());
    let annotation = citations[0].annotations()[0].clone();
    let error = annotation.to_error(text, Language::English);
    assert_eq!(error.get_short_description(), "Peak type error");
}

#[test]
fn citations_serialise() {
    let citations = cite_h1(MNOVA, &ParseSettings::default());
    let json = serde_json::to_string(&citations).unwrap();
    let back: Vec<Citation<H1Record>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, citations);
}

#[test]
fn decimal_frequency_keeps_whole_quanta() {
    let text = "1H NMR (400.13 MHz, CDCl3) δ 7.26 (d, J = 7.6 Hz, 2H), 7.10 (d, J = 7.5 Hz, 1H).";
    let citations = cite_h1(text, &ParseSettings::default());
    let peaks = peaks(&citations[0]);
    let first = peaks[0].as_ref().unwrap();
    assert_eq!(first.annotation, None);
    let second = peaks[1].as_ref().unwrap();
    assert_eq!(
        second.annotation.as_ref().unwrap().issue,
        Some(IssueKind::Quantization)
    );
    assert_eq!(second.plain(), "7.10 (d, J = 7.6 Hz, 1H)");
    assert!(citations[0].is_ready());
    assert!(
        citations[0]
            .plain()
            .ends_with("7.26 (d, J = 7.6 Hz, 2H), 7.10 (d, J = 7.6 Hz, 1H).")
    );
}

#[test]
fn full_width_commas_between_peaks() {
    let text = "1H NMR (400 MHz, CDCl3) δ 7.26 (s, 1H)，3.80 (s, 3H).";
    let citations = cite_h1(text, &ParseSettings::default());
    let peaks = peaks(&citations[0]);
    assert_eq!(peaks.len(), 2);
    assert!(peaks.iter().all(Result::is_ok));
    assert!(citations[0].is_ready());
}
