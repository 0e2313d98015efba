use itertools::Itertools;

use crate::{
    ParseSettings,
    annotation::{Annotation, IssueKind, Message},
    helper_functions::format_trimmed,
    nmr::{Multiplicity, PeakEntry, Reported, ShiftValue},
};

/// The number of digital resolution steps a coupling constant may be off and still be valid
const QUANTUM_TOLERANCE: f64 = 1e-6;

/// Check if a coupling constant (Hz) is a whole multiple of the digital resolution of the
/// spectrometer, which is `frequency / 1000` Hz for a frequency in MHz.
///
/// ```rust
/// use chemcite::nmr::is_j_valid;
/// assert!(is_j_valid(7.6, 400.0));
/// assert!(!is_j_valid(7.5, 400.0));
/// ```
pub fn is_j_valid(j: f64, frequency: f64) -> bool {
    let quanta = 1000.0 * j / frequency;
    (quanta - quanta.round()).abs() < QUANTUM_TOLERANCE
}

/// Snap a coupling constant (Hz) to the nearest whole multiple of `frequency / 1000` Hz.
///
/// ```rust
/// use chemcite::nmr::round_j;
/// assert!((round_j(7.5, 400.0) - 7.6).abs() < 1e-9);
/// ```
pub fn round_j(j: f64, frequency: f64) -> f64 {
    (1000.0 * j / frequency).round() * frequency / 1000.0
}

/// The semantic pass over a parsed peak. A peak is corrected at most once, running this on a
/// corrected peak returns it unchanged.
///
/// 1. A multiplicity outside the alphabet is turned into a multiplet with a placeholder range.
/// 2. A multiplet with a single shift needs an interval.
/// 3. Other multiplicities with a range need a single value, and singlets may not carry coupling
///    constants.
/// 4. With `auto_fix_j`, multiplicities that require coupling constants need them.
/// 5. With `auto_fix_j`, if any coupling constant is not a multiple of the digital resolution
///    all are rounded, the original values are kept in the warning. The resolution is taken
///    from the nominal frequency, so `400.13` MHz is checked as `400` MHz.
pub fn fix_peak_data(mut entry: PeakEntry, frequency: f64, settings: &ParseSettings) -> PeakEntry {
    if entry.corrected {
        return entry;
    }
    entry.corrected = true;
    let language = settings.language;
    let location = entry.location.clone();
    let nominal = frequency.round().max(1.0);

    if let Multiplicity::Unknown(symbol) = &entry.multiplicity {
        let message = Message::UnknownMultiplicity(symbol).localize(language);
        log::debug!("unknown multiplicity '{symbol}' replaced by a multiplet");
        entry.multiplicity = Multiplicity::Multiplet;
        entry.shift = ShiftValue::Placeholder;
        entry.couplings = None;
        entry.annotate(Annotation::issue(IssueKind::PeakType, location, message));
        return entry;
    }

    let has_couplings = entry.couplings.as_ref().is_some_and(|c| !c.is_empty());
    let shift_message = match (&entry.shift, entry.multiplicity.requires_range()) {
        (ShiftValue::Single(_), true) => Some(Message::NeedsInterval),
        (ShiftValue::Range(..), false) => Some(Message::NeedsSingle),
        _ => None,
    };
    if let Some(message) = shift_message {
        entry.annotate(Annotation::issue(
            IssueKind::PeakType,
            location.clone(),
            message.localize(language),
        ));
    }
    if has_couplings && !entry.multiplicity.can_carry_couplings() {
        entry.annotate(Annotation::issue(
            IssueKind::PeakType,
            location.clone(),
            Message::ShouldNotCarryJ.localize(language),
        ));
    }

    if !settings.auto_fix_j {
        return entry;
    }
    if !has_couplings && entry.multiplicity.requires_couplings(settings.general_multiplet) {
        entry.annotate(Annotation::issue(
            IssueKind::PeakType,
            location.clone(),
            Message::MissingJ.localize(language),
        ));
    }
    if entry.multiplicity.can_carry_couplings()
        && let Some(couplings) = &mut entry.couplings
        && couplings.iter().any(|j| !is_j_valid(j.value, nominal))
    {
        let original = couplings.iter().map(|j| j.text.as_str()).join(", ");
        for j in couplings.iter_mut() {
            let value = round_j(j.value, nominal);
            *j = Reported {
                value,
                text: format_trimmed(value, 2, 1),
            };
        }
        log::debug!("coupling constants {original} rounded at {nominal} MHz");
        entry.annotate(Annotation::issue(
            IssueKind::Quantization,
            location,
            Message::JRounded(&original).localize(language),
        ));
    }
    entry
}
