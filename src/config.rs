use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{WndError, WndResult};

/// Font names every configuration accepts.
pub const BUILTIN_FONTS: &[&str] = &[
    "Times New Roman",
    "Arial",
    "Courier New",
    "Placard MT Condensed",
    "Generals",
    "Courier",
];

/// Parser and validator settings, loadable from YAML.
///
/// ```yaml
/// source_file: MainMenu.wnd
/// extra_fonts: [Tahoma]
/// require_file_version: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// File tag for `NAME` values of nodes that carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub extra_fonts: Vec<String>,
    /// Missing `FILE_VERSION` is fatal instead of informational.
    pub require_file_version: bool,
    /// Report status flags outside the known vocabulary.
    pub warn_unknown_status: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            source_file: None,
            extra_fonts: Vec::new(),
            require_file_version: false,
            warn_unknown_status: true,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> WndResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> WndResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            WndError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> WndResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn is_known_font(&self, name: &str) -> bool {
        BUILTIN_FONTS.contains(&name) || self.extra_fonts.iter().any(|f| f == name)
    }
}
