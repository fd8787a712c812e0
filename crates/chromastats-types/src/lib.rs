pub mod document;
pub mod error;
pub mod key;
pub mod module;

pub use document::*;
pub use error::{Error, Result};
pub use key::ModuleKey;
pub use module::*;
