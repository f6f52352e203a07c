//! TOML configuration for the verne binary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use verne_core::{MAX_BODY_CHARS, ParameterDefinition};
use verne_error::{ConfigError, VerneResult};
use verne_generation::StaticParameterSource;

/// Configuration for the verne binary, loaded from `verne.toml`.
///
/// Every section and field is optional in the file; omitted values take
/// the defaults below. `OPENAI_API_KEY` always comes from the
/// environment, never from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerneConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Text provider settings.
    pub text: TextConfig,
    /// Image provider settings.
    pub image: ImageConfig,
    /// Pipeline settings.
    pub generation: GenerationConfig,
    /// Parameter catalog settings.
    pub catalog: CatalogConfig,
}

impl VerneConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> VerneResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }

    /// Load from the file when it exists, else fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> VerneResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the content API binds to.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8780".to_string(),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; falls back to `DATABASE_URL` when unset.
    pub url: Option<String>,
}

/// Text provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Chat model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Override for the provider base URL.
    pub base_url: Option<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.9,
            max_tokens: 4096,
            base_url: None,
        }
    }
}

/// Image provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Image model identifier.
    pub model: String,
    /// Requested dimensions, e.g. `1024x1024`.
    pub size: String,
    /// Requested quality tier.
    pub quality: String,
    /// Override for the provider base URL.
    pub base_url: Option<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: "gpt-image-1".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            base_url: None,
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Target word count when no length parameter is selected.
    pub default_word_count: u32,
    /// Stored prose cap in characters.
    pub max_body_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_word_count: 1200,
            max_body_chars: MAX_BODY_CHARS,
        }
    }
}

/// Parameter catalog settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a TOML file declaring parameter categories.
    ///
    /// When unset the catalog is empty and every submitted selection is
    /// dropped by validation.
    pub path: Option<PathBuf>,
}

/// On-disk shape of a parameter catalog file.
///
/// ```toml
/// [[categories.genre]]
/// id = "mood"
/// name = "Mood"
/// kind = { type = "select", options = ["noir", "hopeful"] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Parameter declarations, keyed by category id.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<ParameterDefinition>>,
}

impl CatalogFile {
    /// Parse a catalog from TOML text.
    pub fn parse(content: &str) -> VerneResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse catalog: {}", e)).into())
    }

    /// Build the parameter source the pipeline consumes.
    pub fn into_source(self) -> StaticParameterSource {
        self.categories
            .into_iter()
            .fold(StaticParameterSource::new(), |source, (id, parameters)| {
                source.with_category(id, parameters)
            })
    }
}

/// Load the catalog named by the config, or an empty one.
pub fn load_catalog(config: &CatalogConfig) -> VerneResult<StaticParameterSource> {
    match &config.path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::new(format!("Failed to read catalog file: {}", e)))?;
            Ok(CatalogFile::parse(&content)?.into_source())
        }
        None => Ok(StaticParameterSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config = VerneConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8780");
        assert!(config.database.url.is_none());
        assert_eq!(config.text.model, "gpt-4o-mini");
        assert_eq!(config.image.size, "1024x1024");
        assert_eq!(config.generation.default_word_count, 1200);
        assert_eq!(config.generation.max_body_chars, MAX_BODY_CHARS);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn partial_files_override_only_named_fields() {
        let config: VerneConfig = toml::from_str(
            r#"
            [server]
            bind_addr = "0.0.0.0:9000"

            [text]
            temperature = 0.4
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.text.temperature, 0.4);
        assert_eq!(config.text.model, "gpt-4o-mini");
        assert_eq!(config.image.quality, "standard");
    }

    #[test]
    fn catalog_files_declare_typed_parameters() {
        let catalog = CatalogFile::parse(
            r#"
            [[categories.genre]]
            id = "mood"
            name = "Mood"
            kind = { type = "select", options = ["noir", "hopeful"] }

            [[categories.genre]]
            id = "epilogue"
            name = "Epilogue"
            kind = { type = "toggle" }

            [[categories.setting]]
            id = "year"
            name = "Year"
            kind = { type = "range", min = 1000.0, max = 9999.0, step = 1.0 }
            "#,
        )
        .unwrap();

        assert_eq!(catalog.categories.len(), 2);
        let genre = &catalog.categories["genre"];
        assert_eq!(genre.len(), 2);
        assert_eq!(genre[0].id, "mood");
        assert_eq!(
            genre[0].kind,
            verne_core::ParameterKind::Select {
                options: vec!["noir".to_string(), "hopeful".to_string()],
            }
        );
        assert_eq!(genre[1].kind, verne_core::ParameterKind::Toggle);
    }

    #[tokio::test]
    async fn loaded_catalogs_answer_category_lookups() {
        use verne_interface::ParameterSource;

        let catalog = CatalogFile::parse(
            r#"
            [[categories.genre]]
            id = "mood"
            name = "Mood"
            kind = { type = "select", options = ["noir"] }
            "#,
        )
        .unwrap();
        let source = catalog.into_source();

        let genre = source.category_parameters("genre").await.unwrap();
        assert_eq!(genre.unwrap().len(), 1);
        assert!(
            source
                .category_parameters("cuisine")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn empty_catalog_config_yields_empty_source() {
        use verne_interface::ParameterSource;

        let source = load_catalog(&CatalogConfig::default()).unwrap();
        assert!(source.category_parameters("genre").await.unwrap().is_none());
    }
}
