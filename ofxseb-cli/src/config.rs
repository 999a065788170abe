use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// `~/.ofxseb/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Profile used when neither `--profile` nor `--plugin` is given
    pub default_profile: Option<String>,
    /// One section per bank/account, e.g. `[profiles.seb]`
    pub profiles: BTreeMap<String, ProfileSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSection {
    pub plugin: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "seb".to_string(),
            ProfileSection {
                plugin: "swedenseb".to_string(),
            },
        );

        Self {
            log_level: "info".to_string(),
            default_profile: Some("seb".to_string()),
            profiles,
        }
    }
}

impl Config {
    /// Pick a plugin name: an explicit plugin wins, then the named or default profile.
    pub fn resolve_plugin(&self, profile: Option<&str>, plugin: Option<&str>) -> Result<String> {
        if let Some(plugin) = plugin {
            return Ok(plugin.to_string());
        }

        let Some(name) = profile.or(self.default_profile.as_deref()) else {
            bail!("no profile given and no default_profile configured");
        };

        match self.profiles.get(name) {
            Some(section) => Ok(section.plugin.clone()),
            None => bail!("profile {name:?} is not defined in the config"),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ofxseb").join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config unless one exists. Returns whether a file was written.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(path, &Config::default())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(init_config(&path).unwrap());
        assert!(!init_config(&path).unwrap());
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_profile = \"privat\"\n\n[profiles.privat]\nplugin = \"swedenseb\"\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.resolve_plugin(None, None).unwrap(), "swedenseb");
        assert!(cfg.resolve_plugin(Some("seb"), None).is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = [").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_resolve_plugin_precedence() {
        let cfg = Config::default();
        assert_eq!(cfg.resolve_plugin(None, Some("other")).unwrap(), "other");
        assert_eq!(cfg.resolve_plugin(Some("seb"), None).unwrap(), "swedenseb");
        assert_eq!(cfg.resolve_plugin(None, None).unwrap(), "swedenseb");

        let no_default = Config {
            default_profile: None,
            ..Config::default()
        };
        assert!(no_default.resolve_plugin(None, None).is_err());
    }
}
