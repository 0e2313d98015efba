mod ion;
mod record;

pub use ion::*;
pub use record::*;
