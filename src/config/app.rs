// src/config/app.rs
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_APP_CONFIG_PATH: &str = "config/app.toml";
pub const ENV_APP_CONFIG_PATH: &str = "APP_CONFIG_PATH";
/// Overrides `artifacts.dir`.
pub const ENV_MODEL_DIR: &str = "MODEL_DIR";

fn default_dir() -> PathBuf {
    PathBuf::from("artifacts")
}
fn default_model() -> String {
    "fraud_detector.json".to_string()
}
fn default_scaler() -> String {
    "feature_scaler.json".to_string()
}
fn default_feature_names() -> String {
    "feature_names.json".to_string()
}

/// Where the three model artifacts live. File names are relative to `dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_scaler")]
    pub scaler: String,
    #[serde(default = "default_feature_names")]
    pub feature_names: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            model: default_model(),
            scaler: default_scaler(),
            feature_names: default_feature_names(),
        }
    }
}

impl ArtifactsConfig {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model)
    }
    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler)
    }
    pub fn feature_names_path(&self) -> PathBuf {
        self.dir.join(&self.feature_names)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read app config at {}: {}", path.display(), e))?;
        let cfg: AppConfig = toml::from_str(&data)?;
        Ok(cfg)
    }

    /// Resolve config the way the binary does:
    /// `APP_CONFIG_PATH` (or `config/app.toml`) if it exists, defaults otherwise,
    /// then `MODEL_DIR` on top.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = env::var(ENV_APP_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_APP_CONFIG_PATH));

        let mut cfg = if path.exists() {
            Self::load_from_file(&path)?
        } else if env::var(ENV_APP_CONFIG_PATH).is_ok() {
            // explicitly requested file must exist
            anyhow::bail!("APP_CONFIG_PATH points to missing file {}", path.display());
        } else {
            Self::default()
        };

        if let Ok(dir) = env::var(ENV_MODEL_DIR) {
            let dir = dir.trim();
            if !dir.is_empty() {
                cfg.artifacts.dir = PathBuf::from(dir);
            }
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [artifacts]
            dir = "models/v2"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.artifacts.dir, PathBuf::from("models/v2"));
        assert_eq!(cfg.artifacts.model, "fraud_detector.json");
        assert_eq!(
            cfg.artifacts.scaler_path(),
            PathBuf::from("models/v2").join("feature_scaler.json")
        );
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
