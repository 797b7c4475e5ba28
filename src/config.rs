use crate::error::{AcpError, Result};
use crate::gh::MergeMethod;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "acp";

/// The filename for the configuration file.
const CONFIG_FILENAME: &str = "config.toml";

/// Default prefix for temporary branches and stash labels.
pub const DEFAULT_BRANCH_PREFIX: &str = "acp";

/// Default hosting domain.
pub const DEFAULT_HOST: &str = "github.com";

// ============================================================================
// Configuration
// ============================================================================

/// User preferences for the PR workflow.
///
/// Loaded from `~/.config/acp/config.toml`. Every field is optional in the
/// file; missing fields take their default. Command-line flags override
/// these values.
///
/// # Example
///
/// ```toml
/// # Temporary branches are named <branch_prefix>/<user>/<number>
/// branch_prefix = "acp"
///
/// # Hosting domain remotes must point at
/// host = "github.com"
///
/// # Used by --merge and --auto-merge: merge, squash or rebase
/// merge_method = "squash"
///
/// # Pull the original branch after a successful --merge
/// sync = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix for temporary branch names and stash labels.
    pub branch_prefix: String,

    /// Hosting domain that `origin` and `upstream` must reference.
    pub host: String,

    /// Merge strategy when `--merge-method` is not given.
    pub merge_method: MergeMethod,

    /// Whether `--merge` also pulls the original branch afterwards.
    pub sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
            host: DEFAULT_HOST.to_string(),
            merge_method: MergeMethod::default(),
            sync: false,
        }
    }
}

impl Config {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| AcpError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that TOML types alone cannot express.
    pub fn validate(&self) -> Result<()> {
        let prefix = self.branch_prefix.trim_matches('/');
        if prefix.is_empty() {
            return Err(AcpError::Config("branch_prefix must not be empty".to_string()));
        }
        if prefix.chars().any(|c| c.is_whitespace() || c == ':' || c == '~' || c == '^') {
            return Err(AcpError::Config(format!(
                "branch_prefix '{}' is not a valid git branch component",
                self.branch_prefix
            )));
        }
        if self.host.trim().is_empty() || self.host.contains('/') {
            return Err(AcpError::Config(format!("invalid host '{}'", self.host)));
        }
        Ok(())
    }

    /// Branch prefix without leading or trailing slashes.
    pub fn prefix(&self) -> &str {
        self.branch_prefix.trim_matches('/')
    }
}

// ============================================================================
// Config File Management
// ============================================================================

/// Get the acp config directory path (~/.config/acp).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AcpError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Get the path to the config file.
///
/// Returns the path to `~/.config/acp/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load the configuration from `~/.config/acp/config.toml`.
///
/// A missing file yields the defaults; the file is never created.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    Config::from_toml(&content).map_err(|e| match e {
        AcpError::Config(msg) => AcpError::Config(format!(
            "Failed to parse config file at {:?}: {}",
            path, msg
        )),
        other => other,
    })
}
