mod model;
mod message;
mod rich;

pub use model::*;
pub use message::Language;
pub(crate) use message::Message;
pub use rich::*;
