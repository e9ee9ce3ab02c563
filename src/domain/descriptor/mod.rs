//! Application descriptor model: caller-supplied records and their validation.

mod application;
mod validate;

pub use application::{ApplicationDescriptor, ResolvedApplication};
pub use validate::validate;
