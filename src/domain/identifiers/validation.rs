/// Validates an identifier string.
///
/// Checks:
/// - Non-empty
/// - No path separators (/, \)
/// - Not "." or ".."
/// - Characters are ASCII alphanumeric, '-', '_', or (optionally) '.'
pub fn validate_identifier(id: &str, allow_dots: bool) -> bool {
    if id.is_empty() {
        return false;
    }
    if id.contains('/') || id.contains('\\') {
        return false;
    }
    if id == "." || id == ".." {
        return false;
    }
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || (allow_dots && c == '.'))
}

/// Why a relative path was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejection {
    Empty,
    Absolute,
    Traversal,
    ColonNotAllowed,
    ControlCharacter,
    ReservedCharacter,
}

impl PathRejection {
    pub fn reason(self) -> &'static str {
        match self {
            PathRejection::Empty => "path must not be empty",
            PathRejection::Absolute => "path must be relative",
            PathRejection::Traversal => "path must not contain '..' segments",
            PathRejection::ColonNotAllowed => "path must not contain ':'",
            PathRejection::ControlCharacter => "path must not contain control characters",
            PathRejection::ReservedCharacter => {
                "path must not contain '$', '{', '}', ';', '#' or quotes"
            }
        }
    }
}

/// Validates and normalizes a relative path.
///
/// Backslashes are treated as separators, `.` segments and empty segments are
/// dropped. The result uses `/` separators and has no leading or trailing
/// slash; `"."` normalizes to `""`.
///
/// `allow_empty` controls whether an empty input is accepted (document roots
/// default to the source root, source paths must be given).
pub fn normalize_relative_path(path: &str, allow_empty: bool) -> Result<String, PathRejection> {
    if path.trim().is_empty() {
        return if allow_empty { Ok(String::new()) } else { Err(PathRejection::Empty) };
    }
    if path.chars().any(char::is_control) {
        return Err(PathRejection::ControlCharacter);
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(PathRejection::Absolute);
    }
    // Drive prefixes and compose volume specs both use ':'.
    if path.contains(':') {
        return Err(PathRejection::ColonNotAllowed);
    }

    let mut segments = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(PathRejection::Traversal),
            other => segments.push(other),
        }
    }

    Ok(segments.join("/"))
}

/// Rejects characters nginx reads as variables or directive syntax even
/// inside a quoted argument. `$` has no escape in `root`.
pub fn check_served_path(path: &str) -> Result<(), PathRejection> {
    if path.chars().any(|c| matches!(c, '$' | '{' | '}' | ';' | '#' | '"' | '\'')) {
        Err(PathRejection::ReservedCharacter)
    } else {
        Ok(())
    }
}
