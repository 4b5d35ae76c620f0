use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::azure::DEFAULT_API_VERSION;
use crate::endpoint::DEFAULT_STORAGE_DOMAIN;
use crate::upload::FailurePolicy;
use crate::Result;

/// ストレージドメインを上書きする環境変数
pub const STORAGE_DOMAIN_ENV: &str = "BLOBDROP_STORAGE_DOMAIN";

/// Blobdrop 設定
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Storage 設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// エンドポイントのドメイン（例: blob.core.windows.net）
    #[serde(default = "default_domain")]
    pub domain: String,
    /// x-ms-version ヘッダーの値
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

/// Upload 設定
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UploadConfig {
    /// 最初の失敗で中断するか
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_domain() -> String {
    DEFAULT_STORAGE_DOMAIN.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            api_version: default_api_version(),
        }
    }
}

impl Config {
    /// 設定ファイルのパスを取得
    pub fn config_path() -> Result<PathBuf> {
        let home = env::var("HOME")
            .map_err(|_| crate::Error::Config("HOME environment variable not set".into()))?;
        Ok(PathBuf::from(home).join(".blobdrop").join("config.toml"))
    }

    /// 設定を読み込み（ファイルがなければデフォルト、環境変数優先）
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                crate::Error::Config(format!("Failed to read config file: {}", e))
            })?;
            Self::from_toml(&content)?
        } else {
            Config::default()
        };

        config.apply_env(env::var(STORAGE_DOMAIN_ENV).ok());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))
    }

    fn apply_env(&mut self, domain: Option<String>) {
        if let Some(domain) = domain.filter(|d| !d.trim().is_empty()) {
            self.storage.domain = domain.trim().to_string();
        }
    }

    /// 設定を保存
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;

        // ディレクトリを作成
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(&path, self.to_toml()?).map_err(|e| {
            crate::Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(path)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.upload.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.domain, "blob.core.windows.net");
        assert_eq!(config.storage.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.failure_policy(), FailurePolicy::Continue);
    }

    #[test]
    fn test_config_serialization() -> Result<()> {
        let config = Config {
            storage: StorageConfig {
                domain: "blob.core.usgovcloudapi.net".to_string(),
                api_version: "2021-08-06".to_string(),
            },
            upload: UploadConfig { fail_fast: true },
        };

        let toml = config.to_toml()?;
        assert!(toml.contains("usgovcloudapi"));
        assert!(toml.contains("fail_fast = true"));

        let parsed = Config::from_toml(&toml)?;
        assert_eq!(parsed, config);
        assert_eq!(parsed.failure_policy(), FailurePolicy::Abort);

        Ok(())
    }

    #[test]
    fn test_partial_config() -> Result<()> {
        let parsed = Config::from_toml("[upload]\nfail_fast = true\n")?;
        assert_eq!(parsed.storage, StorageConfig::default());
        assert!(parsed.upload.fail_fast);

        let empty = Config::from_toml("")?;
        assert_eq!(empty, Config::default());

        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_toml("[storage]\ndomain = 42\n"),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides_domain() {
        let mut config = Config::default();
        config.apply_env(Some(" blob.core.chinacloudapi.cn ".to_string()));
        assert_eq!(config.storage.domain, "blob.core.chinacloudapi.cn");

        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.storage.domain, "blob.core.chinacloudapi.cn");

        config.apply_env(None);
        assert_eq!(config.storage.domain, "blob.core.chinacloudapi.cn");
    }
}
