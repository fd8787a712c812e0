pub mod error;
pub mod identifier;
pub mod path;

pub use error::{Error, Result};
pub use identifier::absolute_path_from_identifier;
pub use path::{
    BASE_DIR_ENV, PathResolver, discover_base_dir, expand_tilde, is_absolute_path, to_posix_path,
};
