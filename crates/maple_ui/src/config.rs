//! Configuration system
//!
//! Toolkit settings are plain serde structs that can be kept in TOML or RON
//! files through the [`Config`] trait, or assembled in code with the
//! builder-style `with_*` methods.

use serde::{Deserialize, Serialize};

/// Configuration trait for settings that round-trip through config files.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Settings for a [`Context`](crate::Context) and the OpenGL contexts it
/// creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// OpenGL context version to request (major, minor)
    pub opengl_version: (u32, u32),
    /// Whether buffer swaps wait for the display's vertical sync
    pub vsync: bool,
}

impl ContextConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OpenGL context version to request.
    pub fn with_opengl_version(mut self, major: u32, minor: u32) -> Self {
        self.opengl_version = (major, minor);
        self
    }

    /// Enable or disable vertical sync on window surfaces.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Validate the configuration.
    ///
    /// The built-in renderer needs vertex array objects and GLSL 330, so
    /// anything below OpenGL 3.3 is rejected.
    pub fn validate(&self) -> Result<(), String> {
        let (major, minor) = self.opengl_version;
        if major < 3 || (major == 3 && minor < 3) {
            return Err(format!(
                "OpenGL {major}.{minor} is below the minimum supported version 3.3"
            ));
        }
        Ok(())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            opengl_version: (4, 5),
            vsync: true,
        }
    }
}

impl Config for ContextConfig {}
