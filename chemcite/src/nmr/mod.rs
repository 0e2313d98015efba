mod correct;
mod metadata;
mod multiplicity;
mod peak;
mod record;

pub use correct::*;
pub use metadata::*;
pub use multiplicity::*;
pub use peak::*;
pub use record::*;
