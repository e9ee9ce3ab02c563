use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");

pub const STARTER_CONFIG: &str = "fpmkit.yml";

pub fn scaffold_file_content(path: &str) -> Option<&'static str> {
    SCAFFOLD_DIR.get_file(path).and_then(|file| file.contents_utf8())
}

/// The descriptor file `fpmkit init` writes.
pub fn starter_config() -> Result<&'static str, AppError> {
    scaffold_file_content(STARTER_CONFIG)
        .ok_or_else(|| AppError::config_error(format!("Missing scaffold file: {}", STARTER_CONFIG)))
}
