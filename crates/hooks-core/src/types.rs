use crate::error::HooksError;
use serde::Deserialize;
use std::fmt;

// ---------------------------------------------------------------------------
// HookType
// ---------------------------------------------------------------------------

/// A lifecycle event the host runtime shells out for.
///
/// Variant order is the canonical order: every generated file lists hooks in
/// this order regardless of how they were selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum HookType {
    PreToolUse,
    PostToolUse,
    Notification,
    Stop,
    SubagentStop,
    UserPromptSubmit,
    PreCompact,
    SessionStart,
}

impl HookType {
    pub fn all() -> &'static [HookType] {
        &[
            HookType::PreToolUse,
            HookType::PostToolUse,
            HookType::Notification,
            HookType::Stop,
            HookType::SubagentStop,
            HookType::UserPromptSubmit,
            HookType::PreCompact,
            HookType::SessionStart,
        ]
    }

    /// Hooks that are always generated.
    pub fn baseline() -> &'static [HookType] {
        &HookType::all()[..4]
    }

    /// Hooks the wizard offers on top of the baseline.
    pub fn extended() -> &'static [HookType] {
        &HookType::all()[4..]
    }

    pub fn is_baseline(self) -> bool {
        HookType::baseline().contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HookType::PreToolUse => "PreToolUse",
            HookType::PostToolUse => "PostToolUse",
            HookType::Notification => "Notification",
            HookType::Stop => "Stop",
            HookType::SubagentStop => "SubagentStop",
            HookType::UserPromptSubmit => "UserPromptSubmit",
            HookType::PreCompact => "PreCompact",
            HookType::SessionStart => "SessionStart",
        }
    }

    /// camelCase name of the generated handler function.
    pub fn handler_name(self) -> &'static str {
        match self {
            HookType::PreToolUse => "preToolUse",
            HookType::PostToolUse => "postToolUse",
            HookType::Notification => "notification",
            HookType::Stop => "stop",
            HookType::SubagentStop => "subagentStop",
            HookType::UserPromptSubmit => "userPromptSubmit",
            HookType::PreCompact => "preCompact",
            HookType::SessionStart => "sessionStart",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HookType::PreToolUse => "before a tool runs (can block it)",
            HookType::PostToolUse => "after a tool completes",
            HookType::Notification => "when the assistant sends a notification",
            HookType::Stop => "when the assistant finishes responding",
            HookType::SubagentStop => "when a subagent finishes",
            HookType::UserPromptSubmit => "when the user submits a prompt",
            HookType::PreCompact => "before the conversation is compacted",
            HookType::SessionStart => "when a session starts or resumes",
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HookType {
    type Err = HooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HookType::all()
            .iter()
            .copied()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HooksError::InvalidHookType(s.to_string()))
    }
}

impl TryFrom<String> for HookType {
    type Error = HooksError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// SecurityFeature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum SecurityFeature {
    BlockDangerousFileOps,
    PreventSecretExposure,
    ProductionSafeguards,
    NetworkRestrictions,
}

impl SecurityFeature {
    pub fn all() -> &'static [SecurityFeature] {
        &[
            SecurityFeature::BlockDangerousFileOps,
            SecurityFeature::PreventSecretExposure,
            SecurityFeature::ProductionSafeguards,
            SecurityFeature::NetworkRestrictions,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SecurityFeature::BlockDangerousFileOps => "block_dangerous_file_ops",
            SecurityFeature::PreventSecretExposure => "prevent_secret_exposure",
            SecurityFeature::ProductionSafeguards => "production_safeguards",
            SecurityFeature::NetworkRestrictions => "network_restrictions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SecurityFeature::BlockDangerousFileOps => "Block dangerous file operations (rm -rf, chmod 777)",
            SecurityFeature::PreventSecretExposure => "Prevent secret exposure (.env, keys, credentials)",
            SecurityFeature::ProductionSafeguards => "Production safeguards (deploys, prod databases)",
            SecurityFeature::NetworkRestrictions => "Network restrictions (curl | sh, unknown hosts)",
        }
    }
}

impl fmt::Display for SecurityFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SecurityFeature {
    type Err = HooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SecurityFeature::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| HooksError::InvalidSecurityFeature(s.to_string()))
    }
}

impl TryFrom<String> for SecurityFeature {
    type Error = HooksError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// ProjectType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectType {
    Node,
    Python,
    Ruby,
    Go,
    #[default]
    Other,
}

impl ProjectType {
    pub fn all() -> &'static [ProjectType] {
        &[
            ProjectType::Node,
            ProjectType::Python,
            ProjectType::Ruby,
            ProjectType::Go,
            ProjectType::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Node => "node",
            ProjectType::Python => "python",
            ProjectType::Ruby => "ruby",
            ProjectType::Go => "go",
            ProjectType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Node => "Node.js",
            ProjectType::Python => "Python",
            ProjectType::Ruby => "Ruby",
            ProjectType::Go => "Go",
            ProjectType::Other => "Other",
        }
    }

    /// Command suggested in generated examples for checking edited files.
    pub fn check_command(self) -> Option<&'static str> {
        match self {
            ProjectType::Node => Some("npx tsc --noEmit"),
            ProjectType::Python => Some("ruff check ."),
            ProjectType::Ruby => Some("bundle exec rubocop"),
            ProjectType::Go => Some("go vet ./..."),
            ProjectType::Other => None,
        }
    }

    /// File extensions the generated examples treat as project sources.
    pub fn source_extensions(self) -> &'static [&'static str] {
        match self {
            ProjectType::Node => &[".ts", ".tsx", ".js", ".jsx"],
            ProjectType::Python => &[".py"],
            ProjectType::Ruby => &[".rb"],
            ProjectType::Go => &[".go"],
            ProjectType::Other => &[],
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = HooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "node" | "nodejs" | "node.js" => Ok(ProjectType::Node),
            "python" => Ok(ProjectType::Python),
            "ruby" => Ok(ProjectType::Ruby),
            "go" => Ok(ProjectType::Go),
            "other" => Ok(ProjectType::Other),
            _ => Err(HooksError::InvalidProjectType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProjectType {
    type Error = HooksError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// StorageBackend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
    Postgres,
}

impl StorageBackend {
    pub fn all() -> &'static [StorageBackend] {
        &[
            StorageBackend::Json,
            StorageBackend::Sqlite,
            StorageBackend::Postgres,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Json => "json",
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Postgres => "postgres",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StorageBackend::Json => "JSON files",
            StorageBackend::Sqlite => "SQLite",
            StorageBackend::Postgres => "Postgres",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = HooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            _ => Err(HooksError::InvalidStorageBackend(s.to_string())),
        }
    }
}

impl TryFrom<String> for StorageBackend {
    type Error = HooksError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
