use crate::error::Result;
use crate::paths;
use crate::types::{HookType, ProjectType, SecurityFeature, StorageBackend};
use serde::Deserialize;
use std::path::Path;

/// Per-project wizard defaults, read from `.claude/claude-hooks.yaml`.
///
/// Every key is optional; a missing key falls back to the built-in default.
///
/// ```yaml
/// hooks: [SubagentStop, SessionStart]
/// security: [block_dangerous_file_ops, prevent_secret_exposure]
/// project: python
/// storage: sqlite
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HooksConfig {
    /// Extended hook types enabled by default. Baseline hooks are implied.
    #[serde(default)]
    pub hooks: Option<Vec<HookType>>,
    #[serde(default)]
    pub security: Option<Vec<SecurityFeature>>,
    #[serde(default)]
    pub project: Option<ProjectType>,
    #[serde(default)]
    pub storage: Option<StorageBackend>,
}

impl HooksConfig {
    /// Load the config file, or the empty config when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        let Some(data) = crate::io::read_optional(&path)? else {
            return Ok(Self::default());
        };
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: HooksConfig = serde_yaml::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded wizard defaults");
        Ok(cfg)
    }
}
