use crate::types::{HookType, ProjectType, SecurityFeature, StorageBackend};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// HookSelection
// ---------------------------------------------------------------------------

/// Enabled hook types. The baseline set is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSelection {
    enabled: BTreeSet<HookType>,
}

impl HookSelection {
    pub fn baseline() -> Self {
        Self {
            enabled: HookType::baseline().iter().copied().collect(),
        }
    }

    /// Baseline plus every hook in `extra`. Baseline entries in `extra` are
    /// accepted and have no effect.
    pub fn with_extra(extra: impl IntoIterator<Item = HookType>) -> Self {
        let mut selection = Self::baseline();
        selection.enabled.extend(extra);
        selection
    }

    pub fn all() -> Self {
        Self::with_extra(HookType::all().iter().copied())
    }

    pub fn contains(&self, hook: HookType) -> bool {
        self.enabled.contains(&hook)
    }

    /// Enabled hooks in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = HookType> + '_ {
        self.enabled.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl Default for HookSelection {
    fn default() -> Self {
        Self::baseline()
    }
}

// ---------------------------------------------------------------------------
// SecurityFeatureConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityFeatureConfig {
    pub block_dangerous_file_ops: bool,
    pub prevent_secret_exposure: bool,
    pub production_safeguards: bool,
    pub network_restrictions: bool,
}

impl SecurityFeatureConfig {
    pub fn all_enabled() -> Self {
        Self::from_features(SecurityFeature::all().iter().copied())
    }

    pub fn none() -> Self {
        Self::from_features(std::iter::empty())
    }

    pub fn from_features(features: impl IntoIterator<Item = SecurityFeature>) -> Self {
        let mut cfg = Self {
            block_dangerous_file_ops: false,
            prevent_secret_exposure: false,
            production_safeguards: false,
            network_restrictions: false,
        };
        for feature in features {
            match feature {
                SecurityFeature::BlockDangerousFileOps => cfg.block_dangerous_file_ops = true,
                SecurityFeature::PreventSecretExposure => cfg.prevent_secret_exposure = true,
                SecurityFeature::ProductionSafeguards => cfg.production_safeguards = true,
                SecurityFeature::NetworkRestrictions => cfg.network_restrictions = true,
            }
        }
        cfg
    }

    pub fn is_enabled(&self, feature: SecurityFeature) -> bool {
        match feature {
            SecurityFeature::BlockDangerousFileOps => self.block_dangerous_file_ops,
            SecurityFeature::PreventSecretExposure => self.prevent_secret_exposure,
            SecurityFeature::ProductionSafeguards => self.production_safeguards,
            SecurityFeature::NetworkRestrictions => self.network_restrictions,
        }
    }

    /// Enabled features in canonical order.
    pub fn enabled(&self) -> Vec<SecurityFeature> {
        SecurityFeature::all()
            .iter()
            .copied()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }
}

impl Default for SecurityFeatureConfig {
    fn default() -> Self {
        Self::all_enabled()
    }
}

// ---------------------------------------------------------------------------
// ProjectContext / SessionRoot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectContext {
    pub project_type: ProjectType,
    pub storage: StorageBackend,
}

/// Base directory the generated `session.ts` writes under.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionRoot {
    /// `os.tmpdir()` of the machine running the hook.
    #[default]
    SystemTemp,
    Dir(String),
}

// ---------------------------------------------------------------------------
// GenerationPlan
// ---------------------------------------------------------------------------

/// Everything the renderer needs. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationPlan {
    pub hooks: HookSelection,
    pub security: SecurityFeatureConfig,
    pub project: ProjectContext,
    pub session_root: SessionRoot,
}

// ---------------------------------------------------------------------------
// OutputArtifact
// ---------------------------------------------------------------------------

/// Where an artifact lands relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Settings,
    IndexTs,
    LibTs,
    SessionTs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub kind: ArtifactKind,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_always_keeps_baseline() {
        let selection = HookSelection::with_extra([HookType::PreCompact]);
        for hook in HookType::baseline() {
            assert!(selection.contains(*hook));
        }
        assert!(selection.contains(HookType::PreCompact));
        assert!(!selection.contains(HookType::SessionStart));
        assert_eq!(selection.len(), 5);
    }

    #[test]
    fn selection_iterates_in_canonical_order() {
        let selection = HookSelection::with_extra([HookType::SessionStart, HookType::SubagentStop]);
        let order: Vec<_> = selection.iter().collect();
        assert_eq!(
            order,
            vec![
                HookType::PreToolUse,
                HookType::PostToolUse,
                HookType::Notification,
                HookType::Stop,
                HookType::SubagentStop,
                HookType::SessionStart,
            ]
        );
    }

    #[test]
    fn security_config_from_features() {
        let cfg = SecurityFeatureConfig::from_features([SecurityFeature::NetworkRestrictions]);
        assert!(cfg.network_restrictions);
        assert!(!cfg.block_dangerous_file_ops);
        assert_eq!(cfg.enabled(), vec![SecurityFeature::NetworkRestrictions]);
        assert_eq!(SecurityFeatureConfig::default().enabled().len(), 4);
    }
}
