use super::{Fragment, TsFile};
use crate::paths::SESSIONS_NAMESPACE;
use crate::plan::{GenerationPlan, SessionRoot};
use crate::types::StorageBackend;

const HEADER: &str = r#"/**
 * Per-session scratch storage for hook handlers.
 *
 * Generated by claude-hooks. Each session gets one JSON file holding the
 * latest payload seen for every hook type. Override the base directory with
 * CLAUDE_HOOKS_SESSION_DIR.
 */
import { mkdir, readFile, writeFile } from 'node:fs/promises'
import { tmpdir } from 'node:os'
import { join } from 'node:path'"#;

const SAVE_FN: &str = r#"/**
 * Record `payload` as the latest `hookType` event for its session. Replaces
 * any earlier entry for the same session id and hook type.
 */
export async function saveSessionData<P extends { session_id: string }>(
  hookType: string,
  payload: P,
): Promise<void> {
  await mkdir(SESSION_DIR, { recursive: true })
  const file = join(SESSION_DIR, `${payload.session_id}.json`)

  let sessionData: Record<string, unknown> = {}
  try {
    sessionData = JSON.parse(await readFile(file, 'utf8'))
  } catch {
    // first event for this session
  }

  sessionData[hookType] = { recorded_at: new Date().toISOString(), payload }
  await writeFile(file, JSON.stringify(sessionData, null, 2))
}"#;

/// `SESSION_DIR` constant, rooted per the plan.
pub fn session_dir(root: &SessionRoot) -> Fragment {
    let base = match root {
        SessionRoot::SystemTemp => "tmpdir()".to_string(),
        SessionRoot::Dir(dir) => js_string(dir),
    };
    let body = format!(
        "const SESSION_DIR =\n  process.env.CLAUDE_HOOKS_SESSION_DIR ?? join({base}, '{SESSIONS_NAMESPACE}')"
    );
    Fragment::new("session-dir", body)
}

/// Notes on moving session data to the requested backend.
pub fn storage_note(storage: StorageBackend) -> Fragment {
    let body = match storage {
        StorageBackend::Json => {
            "// Sessions are stored as plain JSON files. Delete the directory to reset them."
        }
        StorageBackend::Sqlite => {
            "// SQLite was requested for session storage. To switch, replace the body of\n\
             // saveSessionData with bun:sqlite, e.g.\n\
             //   const db = new Database(join(SESSION_DIR, 'sessions.db'))\n\
             //   db.run('INSERT OR REPLACE INTO events (session_id, hook, payload) VALUES (?, ?, ?)', ...)"
        }
        StorageBackend::Postgres => {
            "// Postgres was requested for session storage. To switch, replace the body of\n\
             // saveSessionData with an upsert through Bun.sql, e.g.\n\
             //   await sql`INSERT INTO hook_events ${sql({ session_id, hook, payload })}\n\
             //             ON CONFLICT (session_id, hook) DO UPDATE SET payload = EXCLUDED.payload`"
        }
    };
    Fragment::new("storage-note", body)
}

/// Quote `s` as a single-quoted JS string literal.
fn js_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

pub fn build(plan: &GenerationPlan) -> TsFile {
    TsFile {
        header: HEADER.to_string(),
        fragments: vec![
            session_dir(&plan.session_root),
            storage_note(plan.project.storage),
            Fragment::new("save-session-data", SAVE_FN),
        ],
        footer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_temp_uses_tmpdir() {
        let body = session_dir(&SessionRoot::SystemTemp).body;
        assert!(body.contains("join(tmpdir(), 'claude-hooks-sessions')"));
        assert!(body.contains("CLAUDE_HOOKS_SESSION_DIR"));
    }

    #[test]
    fn explicit_dir_is_quoted() {
        let body = session_dir(&SessionRoot::Dir("/srv/it's".to_string())).body;
        assert!(body.contains(r"join('/srv/it\'s', 'claude-hooks-sessions')"));
    }

    #[test]
    fn exports_exactly_one_function() {
        let out = build(&GenerationPlan::default()).assemble();
        assert_eq!(out.matches("export ").count(), 1);
        assert!(out.contains("export async function saveSessionData("));
    }

    #[test]
    fn save_accepts_any_payload_interface() {
        // Interfaces carry no index signature, so the payload must stay generic.
        let out = build(&GenerationPlan::default()).assemble();
        assert!(out.contains("saveSessionData<P extends { session_id: string }>("));
        assert!(out.contains("  payload: P,\n"));
        assert!(!out.contains("& Record<string, unknown>"));
    }

    #[test]
    fn storage_note_mentions_backend() {
        assert!(storage_note(StorageBackend::Sqlite).body.contains("bun:sqlite"));
        assert!(storage_note(StorageBackend::Postgres).body.contains("Bun.sql"));
    }
}
