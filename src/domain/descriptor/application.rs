use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::error::ValidationError;
use crate::domain::identifiers::{
    check_served_path, normalize_relative_path, validate_identifier,
};

/// One PHP application to scaffold.
///
/// Fields hold caller input verbatim; [`validate`](super::validate) and
/// [`ApplicationDescriptor::resolve`] enforce the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationDescriptor {
    pub name: String,

    #[serde(rename = "port", alias = "listen_port")]
    pub listen_port: u16,

    #[serde(rename = "path", alias = "source_path")]
    pub source_path: String,

    /// Relative to `source_path`; `None` serves the source root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_root: Option<String>,

    #[serde(
        default,
        rename = "extensions",
        alias = "php_extensions",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub php_extensions: BTreeSet<String>,
}

impl ApplicationDescriptor {
    pub fn new(name: impl Into<String>, listen_port: u16, source_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listen_port,
            source_path: source_path.into(),
            document_root: None,
            php_extensions: BTreeSet::new(),
        }
    }

    pub fn with_document_root(mut self, document_root: impl Into<String>) -> Self {
        self.document_root = Some(document_root.into());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.php_extensions.extend(extensions.into_iter().map(Into::into));
        self
    }

    /// Check the invariants that hold for a single descriptor in isolation.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.resolve("/").map(|_| ())
    }

    /// Validate this descriptor and derive its host and container paths.
    ///
    /// `web_root` is the container directory applications are mounted under.
    pub fn resolve(&self, web_root: &str) -> Result<ResolvedApplication, ValidationError> {
        if !validate_identifier(&self.name, false) {
            return Err(ValidationError::InvalidName(self.name.clone()));
        }
        if self.listen_port == 0 {
            return Err(ValidationError::InvalidPort {
                app: self.name.clone(),
                port: self.listen_port,
            });
        }

        let source_dir = normalize_relative_path(&self.source_path, false).map_err(|rejection| {
            ValidationError::InvalidPath {
                app: self.name.clone(),
                path: self.source_path.clone(),
                reason: rejection.reason().to_string(),
            }
        })?;

        let raw_root = self.document_root.as_deref().unwrap_or("");
        let document_root = normalize_relative_path(raw_root, true)
            .and_then(|root| check_served_path(&root).map(|()| root))
            .map_err(|rejection| ValidationError::InvalidPath {
                app: self.name.clone(),
                path: raw_root.to_string(),
                reason: format!("document root: {}", rejection.reason()),
            })?;

        let invalid_extension =
            self.php_extensions.iter().find(|ext| !validate_identifier(ext, true));
        if let Some(extension) = invalid_extension {
            return Err(ValidationError::InvalidExtension {
                app: self.name.clone(),
                extension: extension.clone(),
            });
        }

        let mount_path = format!("{}/{}", web_root.trim_end_matches('/'), self.name);
        let served_path = if document_root.is_empty() {
            mount_path.clone()
        } else {
            format!("{}/{}", mount_path, document_root)
        };
        // Compose treats a relative host path without a leading '.' as a named volume.
        let host_path =
            if source_dir.is_empty() { ".".to_string() } else { format!("./{}", source_dir) };

        Ok(ResolvedApplication {
            name: self.name.clone(),
            listen_port: self.listen_port,
            source_dir,
            document_root,
            host_path,
            mount_path,
            served_path,
        })
    }
}

/// Parses the `--app NAME:PORT:PATH[:DOCROOT]` flag form.
impl FromStr for ApplicationDescriptor {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_error = |details: &str| AppError::ParseError {
            what: format!("--app '{}'", value),
            details: details.to_string(),
        };

        let parts: Vec<&str> = value.split(':').collect();
        let (name, port, path, document_root) = match parts.as_slice() {
            [name, port, path] => (*name, *port, *path, None),
            [name, port, path, root] => (*name, *port, *path, Some(*root)),
            _ => return Err(parse_error("expected NAME:PORT:PATH[:DOCROOT]")),
        };

        let port: u16 =
            port.parse().map_err(|_| parse_error("PORT must be an integer between 1 and 65535"))?;

        let mut descriptor = ApplicationDescriptor::new(name, port, path);
        if let Some(root) = document_root.filter(|root| !root.is_empty()) {
            descriptor = descriptor.with_document_root(root);
        }
        Ok(descriptor)
    }
}

/// A validated descriptor with every derived path computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedApplication {
    pub name: String,
    pub listen_port: u16,
    /// Normalized source directory relative to the target directory (`""` for the root).
    pub source_dir: String,
    /// Normalized document root relative to `source_dir` (`""` for the source root).
    pub document_root: String,
    /// Bind-mount host path as written in the compose manifest.
    pub host_path: String,
    /// Container path the source directory is mounted at.
    pub mount_path: String,
    /// Container path the proxy serves from.
    pub served_path: String,
}

impl ResolvedApplication {
    /// Directory (relative to the target directory) that holds the public entry point.
    pub fn public_dir(&self) -> String {
        match (self.source_dir.is_empty(), self.document_root.is_empty()) {
            (true, true) => String::new(),
            (true, false) => self.document_root.clone(),
            (false, true) => self.source_dir.clone(),
            (false, false) => format!("{}/{}", self.source_dir, self.document_root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_document_root() {
        let app = ApplicationDescriptor::new("app1", 8080, "src/app1").with_document_root("public");
        let resolved = app.resolve("/var/www/html").unwrap();

        assert_eq!(resolved.host_path, "./src/app1");
        assert_eq!(resolved.mount_path, "/var/www/html/app1");
        assert_eq!(resolved.served_path, "/var/www/html/app1/public");
        assert_eq!(resolved.public_dir(), "src/app1/public");
    }

    #[test]
    fn dot_source_mounts_target_directory() {
        let app = ApplicationDescriptor::new("app", 8082, ".");
        let resolved = app.resolve("/var/www/html/").unwrap();

        assert_eq!(resolved.host_path, ".");
        assert_eq!(resolved.served_path, "/var/www/html/app");
        assert_eq!(resolved.public_dir(), "");
    }

    #[test]
    fn rejects_port_zero() {
        let err = ApplicationDescriptor::new("app", 0, "src").check().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPort { port: 0, .. }));
    }

    #[test]
    fn rejects_traversal_in_document_root() {
        let app = ApplicationDescriptor::new("app", 8080, "src").with_document_root("../etc");
        let err = app.check().unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidPath { ref reason, .. } if reason.contains(".."))
        );
    }

    #[test]
    fn rejects_nginx_variables_in_document_root() {
        let app = ApplicationDescriptor::new("app", 8080, "src").with_document_root("pub$lic");
        let err = app.check().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidPath { ref path, ref reason, .. }
                if path == "pub$lic" && reason.starts_with("document root:")
        ));
    }

    #[test]
    fn rejects_bad_extension_name() {
        let app = ApplicationDescriptor::new("app", 8080, "src").with_extensions(["gd; rm -rf /"]);
        assert!(matches!(app.check(), Err(ValidationError::InvalidExtension { .. })));
    }

    #[test]
    fn parses_flag_form() {
        let app: ApplicationDescriptor = "blog:8081:src/blog:public".parse().unwrap();
        assert_eq!(app.name, "blog");
        assert_eq!(app.listen_port, 8081);
        assert_eq!(app.source_path, "src/blog");
        assert_eq!(app.document_root.as_deref(), Some("public"));

        let plain: ApplicationDescriptor = "app:8082:.".parse().unwrap();
        assert_eq!(plain.document_root, None);
    }

    #[test]
    fn flag_form_rejects_bad_shapes() {
        assert!("app:8080".parse::<ApplicationDescriptor>().is_err());
        assert!("app:http:src".parse::<ApplicationDescriptor>().is_err());
        assert!("app:70000:src".parse::<ApplicationDescriptor>().is_err());
        assert!("a:1:b:c:d".parse::<ApplicationDescriptor>().is_err());
    }

    #[test]
    fn deserializes_aliases() {
        let yaml = "name: api\nlisten_port: 9090\nsource_path: api\nphp_extensions: [intl]\n";
        let app: ApplicationDescriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(app.listen_port, 9090);
        assert_eq!(app.source_path, "api");
        assert!(app.php_extensions.contains("intl"));
    }
}
