//! Pre-flight checks, backup, and the filesystem writer.

use crate::error::{HooksError, Result};
use crate::plan::{ArtifactKind, OutputArtifact};
use crate::render::settings;
use crate::{io, paths};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Pre-flight
// ---------------------------------------------------------------------------

/// What already exists at the target before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
    /// `.claude/hooks/index.ts` exists.
    pub index_exists: bool,
    /// The target settings file exists and declares a `hooks` object.
    pub settings_has_hooks: bool,
    /// Relative path of the settings file that was checked.
    pub settings_rel: &'static str,
}

impl Preflight {
    pub fn has_conflict(&self) -> bool {
        self.index_exists || self.settings_has_hooks
    }

    /// Relative paths that would be overwritten.
    pub fn conflicts(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.index_exists {
            out.push(paths::INDEX_TS.to_string());
        }
        if self.settings_has_hooks {
            out.push(self.settings_rel.to_string());
        }
        out
    }

    /// Refuse to continue over existing hooks unless `force` is set.
    pub fn ensure_writable(&self, force: bool) -> Result<()> {
        if self.has_conflict() && !force {
            return Err(HooksError::HooksExist(self.conflicts()));
        }
        Ok(())
    }
}

pub fn preflight(root: &Path, local: bool) -> Result<Preflight> {
    let settings_path = paths::settings_path(root, local);
    let settings_has_hooks = match io::read_optional(&settings_path)? {
        Some(content) => settings::declares_hooks(&content, &settings_path)?,
        None => false,
    };
    let pre = Preflight {
        index_exists: paths::index_ts_path(root).is_file(),
        settings_has_hooks,
        settings_rel: paths::settings_rel(local),
    };
    tracing::debug!(?pre, "preflight");
    Ok(pre)
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

/// Copy `index.ts` to `index.backup.<timestamp>.ts` in the same directory.
///
/// Returns the backup path, or `None` when there is no `index.ts`. Only
/// `index.ts` is backed up; `lib.ts` and `session.ts` are managed content.
pub fn backup_index(root: &Path, now: DateTime<Utc>) -> Result<Option<PathBuf>> {
    let index = paths::index_ts_path(root);
    if !index.is_file() {
        return Ok(None);
    }

    let mut target = paths::backup_path(root, now);
    let mut n = 1;
    while target.exists() {
        target = paths::backup_path_numbered(root, now, n);
        n += 1;
    }
    io::copy_new(&index, &target)?;
    tracing::debug!(backup = %target.display(), "backed up index.ts");
    Ok(Some(target))
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    Created,
    Updated,
}

impl WriteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteStatus::Created => "created",
            WriteStatus::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub path: String,
    pub status: WriteStatus,
}

/// Write every artifact under `root`, in order.
///
/// `on_written` is called after each successful write. The first failure
/// stops the run; files already written stay in place.
pub fn write_artifacts(
    root: &Path,
    artifacts: Vec<OutputArtifact>,
    local: bool,
    mut on_written: impl FnMut(&WriteReport),
) -> Result<Vec<WriteReport>> {
    let hooks_dir = paths::hooks_dir(root);
    io::ensure_dir(&hooks_dir).map_err(|e| write_failed(paths::HOOKS_DIR, e))?;

    let mut reports = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let rel = paths::artifact_rel(artifact.kind, local);
        let path = root.join(rel);
        let existed = path.symlink_metadata().is_ok();

        // Only settings are read back; other targets are replaced byte-for-byte.
        let content = match artifact.kind {
            ArtifactKind::Settings => {
                match io::read_optional(&path).map_err(|e| write_failed(rel, e))? {
                    Some(current) => settings::merge(&current, &artifact.content, &path)?,
                    None => artifact.content,
                }
            }
            _ => artifact.content,
        };
        io::atomic_write(&path, content.as_bytes()).map_err(|e| write_failed(rel, e))?;

        let report = WriteReport {
            path: rel.to_string(),
            status: if existed {
                WriteStatus::Updated
            } else {
                WriteStatus::Created
            },
        };
        tracing::debug!(path = rel, status = report.status.as_str(), "wrote artifact");
        on_written(&report);
        reports.push(report);
    }
    Ok(reports)
}

fn write_failed(rel: &str, err: HooksError) -> HooksError {
    match err {
        HooksError::Io(source) => HooksError::WriteFailed {
            path: rel.to_string(),
            source,
        },
        other => other,
    }
}
