//! Run-wide stack settings shared by every generated artifact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;
use crate::domain::identifiers::validate_identifier;

/// Images, names, and limits applied across the whole environment.
///
/// Every field has a default, so a descriptor file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackSettings {
    pub php_image: String,
    pub proxy_image: String,
    pub network: String,
    pub network_driver: String,
    pub restart: String,
    /// Port PHP-FPM listens on inside the backend container.
    pub upstream_port: u16,
    /// Container directory applications are mounted under.
    pub web_root: String,
    pub system_packages: Vec<String>,
    /// Extensions installed for every application.
    pub extensions: Vec<String>,
    pub user: String,
    pub group: String,
    pub uid: u32,
    pub gid: u32,
    pub upload_max_filesize: String,
    pub post_max_size: String,
    /// Additional `php.ini` overrides, rendered after the size limits.
    pub ini: BTreeMap<String, String>,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            php_image: "php:8.2-fpm".into(),
            proxy_image: "nginx:alpine".into(),
            network: "app-network".into(),
            network_driver: "bridge".into(),
            restart: "unless-stopped".into(),
            upstream_port: 9000,
            web_root: "/var/www/html".into(),
            system_packages: [
                "git",
                "curl",
                "zip",
                "unzip",
                "libpng-dev",
                "libonig-dev",
                "libxml2-dev",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            extensions: ["pdo_mysql", "mbstring", "exif", "pcntl", "bcmath", "gd"]
                .into_iter()
                .map(String::from)
                .collect(),
            user: "www".into(),
            group: "www".into(),
            uid: 1000,
            gid: 1000,
            upload_max_filesize: "40M".into(),
            post_max_size: "40M".into(),
            ini: BTreeMap::new(),
        }
    }
}

impl StackSettings {
    /// Check every setting that ends up verbatim in a generated file.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_image("php_image", &self.php_image)?;
        check_image("proxy_image", &self.proxy_image)?;
        check_identifier("network", &self.network, false)?;
        check_identifier("network_driver", &self.network_driver, false)?;
        check_identifier("restart", &self.restart, false)?;
        check_identifier("user", &self.user, false)?;
        check_identifier("group", &self.group, false)?;

        if self.upstream_port == 0 {
            return Err(invalid("upstream_port", "must be between 1 and 65535"));
        }
        if !self.web_root.starts_with('/') {
            return Err(invalid("web_root", "must be an absolute container path"));
        }
        // Rendered bare into `WORKDIR`, `RUN chown` and nginx `root`.
        let safe = self
            .web_root
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-'));
        if !safe {
            let reason = "may only contain letters, digits, '.', '_', '-' and '/'";
            return Err(invalid("web_root", reason));
        }
        if self.web_root.split('/').any(|segment| segment == "..") {
            return Err(invalid("web_root", "must not contain '..' segments"));
        }

        for package in &self.system_packages {
            check_identifier("system_packages", package, true)?;
        }
        for extension in &self.extensions {
            check_identifier("extensions", extension, true)?;
        }

        check_size("upload_max_filesize", &self.upload_max_filesize)?;
        check_size("post_max_size", &self.post_max_size)?;

        for (key, value) in &self.ini {
            if !validate_identifier(key, true) {
                return Err(invalid(&format!("ini.{}", key), "key must be an ini identifier"));
            }
            // php.ini starts a comment at ';'.
            if value.chars().any(|c| c.is_control() || c == '"' || c == ';') {
                return Err(invalid(
                    &format!("ini.{}", key),
                    "value must not contain quotes, ';' or control characters",
                ));
            }
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidSetting { key: key.to_string(), reason: reason.to_string() }
}

fn check_identifier(key: &str, value: &str, allow_dots: bool) -> Result<(), ValidationError> {
    if validate_identifier(value, allow_dots) {
        Ok(())
    } else {
        Err(invalid(key, &format!("'{}' is not a valid identifier", value)))
    }
}

fn check_image(key: &str, value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/' | ':' | '@'));
    if valid {
        Ok(())
    } else {
        Err(invalid(key, &format!("'{}' is not an image reference", value)))
    }
}

/// Accepts the shorthand byte notation `php.ini` understands: digits plus an optional K/M/G.
fn check_size(key: &str, value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_suffix(['K', 'M', 'G', 'k', 'm', 'g']).unwrap_or(value);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let reason = format!("'{}' must be a number with an optional K, M or G suffix", value);
        Err(invalid(key, &reason))
    }
}
