pub mod validation;

pub use validation::{
    PathRejection, check_served_path, normalize_relative_path, validate_identifier,
};
