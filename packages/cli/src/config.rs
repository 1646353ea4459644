use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pageforge.config.json";

/// Pageforge configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Serialized project file
    #[serde(default = "default_project_file")]
    pub project_file: String,

    /// Output directory for published bundles
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_project_file() -> String {
    "project.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults when no
    /// config file exists.
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn project_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.project_file)
    }

    pub fn out_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_file: default_project_file(),
            out_dir: default_out_dir(),
        }
    }
}
