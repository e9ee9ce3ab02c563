use serde::Serialize;

/// Data for the PHP-FPM image build recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecipe {
    pub base_image: String,
    pub system_packages: Vec<String>,
    /// Sorted, deduplicated.
    pub extensions: Vec<String>,
    pub user: String,
    pub group: String,
    pub uid: u32,
    pub gid: u32,
    pub workdir: String,
    pub expose_port: u16,
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniEntry {
    pub key: String,
    pub value: String,
}

/// Ordered `php.ini` overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    pub entries: Vec<IniEntry>,
}

impl RuntimeConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| entry.value.as_str())
    }
}
