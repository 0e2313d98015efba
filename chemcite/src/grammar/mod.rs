mod h1;
mod hrms;
mod records;

use serde::{Deserialize, Serialize};

pub use h1::*;
pub use hrms::*;
pub use records::*;

/// The grammar family. Strict follows the exact output of common NMR processing software
/// (single spaces, en-dash ranges, fixed decimals), lenient accepts common hand edited variations.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum GrammarVariant {
    /// Exact formatting
    Strict,
    /// Flexible whitespace, range marks, and decimals
    #[default]
    Lenient,
}
