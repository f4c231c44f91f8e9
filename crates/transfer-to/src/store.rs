use crate::{config::PickerConfig, paths::PickerPaths};
use eyre::Context as _;
use std::{fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

/// Apply overrides from `var` (normally the process environment) to the config.
fn apply_overrides(cfg: &mut PickerConfig, var: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| {
        var(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    if let Some(v) = get("TRANSFER_TO_ALTERNATIVE_ISO_CODE") {
        cfg.wallet.alternative_iso_code = v.to_uppercase();
    }
    if let Some(v) = get("TRANSFER_TO_PROFILE") {
        cfg.profile_path = Some(PathBuf::from(v));
    }
    if let Some(n) = get("TRANSFER_TO_CONTACTS_PAGE_SIZE").and_then(|v| v.parse::<usize>().ok()) {
        if n > 0 {
            cfg.contacts_page_size = n;
        }
    }
}

fn apply_env_overrides(cfg: &mut PickerConfig) {
    apply_overrides(cfg, |k| std::env::var(k).ok());
}

impl ConfigStore {
    pub fn new(paths: &PickerPaths) -> Self {
        Self {
            path: paths.config_file(),
        }
    }

    /// Load `config.toml`, falling back to defaults when the file does not exist.
    pub fn load(&self) -> eyre::Result<PickerConfig> {
        let mut cfg = if self.path.exists() {
            let s = fs::read_to_string(&self.path)
                .with_context(|| format!("read {}", self.path.display()))?;
            toml::from_str(&s).context("parse config.toml")?
        } else {
            PickerConfig::default()
        };
        apply_env_overrides(&mut cfg);
        Ok(cfg)
    }
}
