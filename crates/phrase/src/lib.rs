mod error;
mod flow;
mod index;
mod replace;
mod seq;
mod window;

pub use error::{Error, IndexFailure, Result};
pub use index::{IndexSpec, RangeMode, resolve_many, resolve_one};
pub use replace::Replacer;
pub use seq::Seq;
pub use window::window_starts;
