// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Directory Configuration Types
//
// Kubernetes-style manifest (apiVersion/kind/metadata/spec) carrying:
// - Listing settings (page size, default trust level for new contacts)
// - Trust preferences (policy, network leverage, network depth)
// - Optional seed file locations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::contact::TrustLevel;
use crate::domain::pagination::DEFAULT_PAGE_SIZE;

pub const API_VERSION: &str = "trustlist.dev/v1";
pub const KIND: &str = "DirectoryConfig";

pub const MIN_NETWORK_DEPTH: u8 = 1;
pub const MAX_NETWORK_DEPTH: u8 = 4;

/// Top-level Kubernetes-style directory configuration manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfigManifest {
    /// API version (must be "trustlist.dev/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "DirectoryConfig")
    pub kind: String,

    pub metadata: ConfigMetadata,

    #[serde(default)]
    pub spec: DirectoryConfigSpec,
}

pub type DirectoryConfig = DirectoryConfigManifest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfigSpec {
    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub preferences: TrustPreferences,

    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Rows per page in contact and tag listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Trust level given to new contacts when none is supplied (1-10)
    #[serde(default = "default_trust_level")]
    pub default_trust_level: u8,
}

impl ListingConfig {
    pub fn default_trust(&self) -> TrustLevel {
        TrustLevel::new(i64::from(self.default_trust_level))
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_trust_level: default_trust_level(),
        }
    }
}

/// User trust preferences. Stored and displayed only; the suggested trust
/// level does not read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustPreferences {
    #[serde(default)]
    pub trust_policy: TrustPolicy,

    /// Consider trust relationships of connected wallets
    #[serde(default = "default_true")]
    pub leverage_network: bool,

    /// Hops to follow when leveraging the network (1-4)
    #[serde(default = "default_network_depth")]
    pub network_depth: u8,
}

impl Default for TrustPreferences {
    fn default() -> Self {
        Self {
            trust_policy: TrustPolicy::default(),
            leverage_network: default_true(),
            network_depth: default_network_depth(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustPolicy {
    Conservative,
    #[default]
    Moderate,
    Liberal,
}

impl TrustPolicy {
    pub fn description(self) -> &'static str {
        match self {
            TrustPolicy::Conservative => "Require strong evidence before trusting a wallet",
            TrustPolicy::Moderate => "Balance interaction history and tags",
            TrustPolicy::Liberal => "Trust readily, flag only clear risks",
        }
    }
}

impl std::fmt::Display for TrustPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrustPolicy::Conservative => "conservative",
            TrustPolicy::Moderate => "moderate",
            TrustPolicy::Liberal => "liberal",
        };
        f.write_str(name)
    }
}

/// Seed files loaded at startup. Unset paths fall back to the embedded demo data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_trust_level() -> u8 {
    TrustLevel::DEFAULT.value()
}

fn default_true() -> bool {
    true
}

fn default_network_depth() -> u8 {
    2
}

impl Default for DirectoryConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ConfigMetadata {
                name: "trustlist".to_string(),
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: DirectoryConfigSpec::default(),
        }
    }
}

impl DirectoryConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. TRUSTLIST_CONFIG_PATH environment variable
    /// 2. ./trustlist-config.yaml (working directory)
    /// 3. ~/.trustlist/config.yaml (user home)
    /// 4. /etc/trustlist/config.yaml (system, Unix) or C:\ProgramData\TrustList\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TRUSTLIST_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./trustlist-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".trustlist").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/trustlist/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\TrustList\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load from an explicit path (failing if it is missing or invalid), else
    /// from the discovered path, else built-in defaults. Environment overrides
    /// are applied in every case.
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(&config_path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", config_path, e))?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::debug!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override source abstracted so tests need not touch the process environment.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("TRUSTLIST_PAGE_SIZE") {
            match val.trim().parse::<usize>() {
                Ok(size) => {
                    tracing::info!("Environment override: TRUSTLIST_PAGE_SIZE={}", size);
                    self.spec.listing.page_size = size;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for TRUSTLIST_PAGE_SIZE: '{}'. Expected a positive integer. Ignoring.",
                    val
                ),
            }
        }

        if let Some(val) = lookup("TRUSTLIST_DEFAULT_TRUST_LEVEL") {
            match val.trim().parse::<u8>() {
                Ok(level) => {
                    tracing::info!("Environment override: TRUSTLIST_DEFAULT_TRUST_LEVEL={}", level);
                    self.spec.listing.default_trust_level = level;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for TRUSTLIST_DEFAULT_TRUST_LEVEL: '{}'. Expected 1-10. Ignoring.",
                    val
                ),
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.trim().is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.listing.page_size == 0 {
            anyhow::bail!("spec.listing.page_size must be at least 1");
        }

        let level = self.spec.listing.default_trust_level;
        if !(TrustLevel::MIN..=TrustLevel::MAX).contains(&level) {
            anyhow::bail!(
                "spec.listing.default_trust_level must be between {} and {}, got {}",
                TrustLevel::MIN,
                TrustLevel::MAX,
                level
            );
        }

        let depth = self.spec.preferences.network_depth;
        if !(MIN_NETWORK_DEPTH..=MAX_NETWORK_DEPTH).contains(&depth) {
            anyhow::bail!(
                "spec.preferences.network_depth must be between {} and {}, got {}",
                MIN_NETWORK_DEPTH,
                MAX_NETWORK_DEPTH,
                depth
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = DirectoryConfigManifest::default();
        assert_eq!(manifest.api_version, "trustlist.dev/v1");
        assert_eq!(manifest.kind, "DirectoryConfig");
        assert_eq!(manifest.spec.listing.page_size, 20);
        assert_eq!(manifest.spec.listing.default_trust(), TrustLevel::DEFAULT);
        assert_eq!(manifest.spec.preferences.trust_policy, TrustPolicy::Moderate);
        assert!(manifest.spec.seed.contacts.is_none());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let yaml = r#"
apiVersion: trustlist.dev/v1
kind: DirectoryConfig
metadata:
  name: test-directory
"#;
        let manifest = DirectoryConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.metadata.name, "test-directory");
        assert_eq!(manifest.spec.listing.page_size, 20);
        assert_eq!(manifest.spec.preferences.network_depth, 2);
        assert!(manifest.spec.preferences.leverage_network);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
apiVersion: trustlist.dev/v1
kind: DirectoryConfig
metadata:
  name: desk
spec:
  listing:
    page_size: 10
    default_trust_level: 3
  preferences:
    trust_policy: conservative
    leverage_network: false
    network_depth: 4
  seed:
    contacts: ./contacts.yaml
"#;
        let manifest = DirectoryConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.spec.listing.page_size, 10);
        assert_eq!(manifest.spec.listing.default_trust().value(), 3);
        assert_eq!(manifest.spec.preferences.trust_policy, TrustPolicy::Conservative);
        assert!(!manifest.spec.preferences.leverage_network);
        assert_eq!(manifest.spec.seed.contacts, Some(PathBuf::from("./contacts.yaml")));
        assert!(manifest.spec.seed.tags.is_none());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut manifest = DirectoryConfigManifest::default();
        assert!(manifest.validate().is_ok());

        manifest.api_version = "wrong/v1".to_string();
        assert!(manifest.validate().is_err());
        manifest.api_version = API_VERSION.to_string();

        manifest.kind = "WrongKind".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.metadata.name = " ".to_string();
        assert!(manifest.validate().is_err());
        manifest.metadata.name = "ok".to_string();

        manifest.spec.listing.page_size = 0;
        assert!(manifest.validate().is_err());
        manifest.spec.listing.page_size = 20;

        manifest.spec.listing.default_trust_level = 11;
        assert!(manifest.validate().is_err());
        manifest.spec.listing.default_trust_level = 5;

        manifest.spec.preferences.network_depth = 5;
        assert!(manifest.validate().is_err());
        manifest.spec.preferences.network_depth = 0;
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut manifest = DirectoryConfigManifest::default();
        manifest.apply_overrides_from(|key| match key {
            "TRUSTLIST_PAGE_SIZE" => Some("50".to_string()),
            "TRUSTLIST_DEFAULT_TRUST_LEVEL" => Some("seven".to_string()),
            _ => None,
        });
        assert_eq!(manifest.spec.listing.page_size, 50);
        assert_eq!(manifest.spec.listing.default_trust_level, 5);
    }

    #[test]
    fn test_yaml_roundtrip_keeps_camel_case_api_version() {
        let yaml = DirectoryConfigManifest::default().to_yaml_string().unwrap();
        assert!(yaml.contains("apiVersion: trustlist.dev/v1"));
        let parsed = DirectoryConfigManifest::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, DirectoryConfigManifest::default());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trustlist-config.yaml");
        std::fs::write(&path, DirectoryConfigManifest::default().to_yaml_string().unwrap()).unwrap();

        let loaded = DirectoryConfigManifest::load_or_default(Some(path)).unwrap();
        assert_eq!(loaded.metadata.name, "trustlist");

        let missing = dir.path().join("missing.yaml");
        assert!(DirectoryConfigManifest::load_or_default(Some(missing)).is_err());
    }
}
