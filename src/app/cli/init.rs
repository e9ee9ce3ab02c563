//! Init command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_init(path: Option<PathBuf>) -> Result<(), AppError> {
    let outcome = match path {
        Some(path) => crate::app::api::init_at(path)?,
        None => crate::app::api::init()?,
    };
    println!("✅ Created {}", outcome.path);
    println!("  Edit the apps list, then run `fpmkit generate`.");
    Ok(())
}
