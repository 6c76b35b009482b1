use crate::plan::ArtifactKind;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CLAUDE_DIR: &str = ".claude";
pub const HOOKS_DIR: &str = ".claude/hooks";

pub const INDEX_TS: &str = ".claude/hooks/index.ts";
pub const LIB_TS: &str = ".claude/hooks/lib.ts";
pub const SESSION_TS: &str = ".claude/hooks/session.ts";

pub const SETTINGS_FILE: &str = ".claude/settings.json";
pub const SETTINGS_LOCAL_FILE: &str = ".claude/settings.json.local";

pub const CONFIG_FILE: &str = ".claude/claude-hooks.yaml";

/// Namespace directory for per-session files written by generated hooks.
pub const SESSIONS_NAMESPACE: &str = "claude-hooks-sessions";

/// Command the host runtime runs for each hook type.
pub const HOOK_COMMAND_PREFIX: &str = "bun .claude/hooks/index.ts";

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn claude_dir(root: &Path) -> PathBuf {
    root.join(CLAUDE_DIR)
}

pub fn hooks_dir(root: &Path) -> PathBuf {
    root.join(HOOKS_DIR)
}

pub fn index_ts_path(root: &Path) -> PathBuf {
    root.join(INDEX_TS)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Relative settings file path; `local` selects `settings.json.local`.
pub fn settings_rel(local: bool) -> &'static str {
    if local {
        SETTINGS_LOCAL_FILE
    } else {
        SETTINGS_FILE
    }
}

pub fn settings_path(root: &Path, local: bool) -> PathBuf {
    root.join(settings_rel(local))
}

/// Relative path an artifact is written to.
pub fn artifact_rel(kind: ArtifactKind, local: bool) -> &'static str {
    match kind {
        ArtifactKind::Settings => settings_rel(local),
        ArtifactKind::IndexTs => INDEX_TS,
        ArtifactKind::LibTs => LIB_TS,
        ArtifactKind::SessionTs => SESSION_TS,
    }
}

/// `index.backup.<timestamp>.ts` next to `index.ts`.
pub fn backup_path(root: &Path, at: DateTime<Utc>) -> PathBuf {
    let stamp = at.format(BACKUP_TIMESTAMP_FORMAT);
    hooks_dir(root).join(format!("index.backup.{stamp}.ts"))
}

/// Same as [`backup_path`] with a numeric suffix, used when two backups land
/// in the same second.
pub fn backup_path_numbered(root: &Path, at: DateTime<Utc>, n: u32) -> PathBuf {
    let stamp = at.format(BACKUP_TIMESTAMP_FORMAT);
    hooks_dir(root).join(format!("index.backup.{stamp}-{n}.ts"))
}

pub fn hook_command(hook: crate::types::HookType) -> String {
    format!("{HOOK_COMMAND_PREFIX} {hook}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
