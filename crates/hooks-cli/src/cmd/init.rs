use crate::output::print_json;
use crate::wizard::{self, Answer, DefaultsPrompter, Prompter, TerminalPrompter, WizardDefaults};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use hooks_core::config::HooksConfig;
use hooks_core::plan::SessionRoot;
use hooks_core::scaffold::{self, WriteReport};
use hooks_core::{paths, render, HooksError};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Overwrite existing hooks (offers to back up index.ts first)
    #[arg(short, long)]
    pub force: bool,

    /// Write .claude/settings.json.local instead of .claude/settings.json
    #[arg(long)]
    pub local: bool,

    /// Skip all prompts and use the defaults
    #[arg(short, long)]
    pub yes: bool,

    /// Project root (default: auto-detect from .claude/ or .git/)
    #[arg(long, env = "CLAUDE_HOOKS_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory generated hooks store session files under (default: the system temp dir)
    #[arg(long, value_name = "DIR")]
    pub session_dir: Option<String>,

    /// Print the result as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InitReport {
    root: String,
    hooks: Vec<String>,
    backup: Option<String>,
    files: Vec<WriteReport>,
}

/// `claude-hooks init` on the terminal.
pub fn run(root: &Path, args: &InitArgs) -> anyhow::Result<()> {
    if args.yes {
        return run_with(root, args, &mut DefaultsPrompter, Utc::now());
    }
    if !std::io::stdin().is_terminal() {
        // Existing hooks are reported ahead of the missing TTY.
        scaffold::preflight(root, args.local)?.ensure_writable(args.force)?;
        return Err(HooksError::NonInteractive.into());
    }
    run_with(root, args, &mut TerminalPrompter::new(), Utc::now())
}

/// The whole init flow with the prompter and clock supplied by the caller.
pub fn run_with(
    root: &Path,
    args: &InitArgs,
    prompter: &mut dyn Prompter,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    // 1. Refuse to touch existing hooks without --force
    let pre = scaffold::preflight(root, args.local)
        .with_context(|| {
            format!(
                "Failed to setup hooks: could not inspect {}",
                paths::claude_dir(root).display()
            )
        })?;
    pre.ensure_writable(args.force)?;

    // 2. Ask the setup questions
    let config = HooksConfig::load(root)
        .with_context(|| format!("failed to read {}", paths::CONFIG_FILE))?;
    let defaults = WizardDefaults::resolve(root, &config);
    let answers = wizard::run(prompter, &wizard::questions(&defaults))?;

    let session_root = match &args.session_dir {
        Some(dir) => SessionRoot::Dir(dir.clone()),
        None => SessionRoot::SystemTemp,
    };
    let plan = answers.into_plan(session_root);
    let hook_names: Vec<String> = plan.hooks.iter().map(|h| h.to_string()).collect();
    tracing::debug!(?plan, "generation plan");

    if !args.json {
        println!("Setting up hooks in: {}", root.display());
    }

    // 3. Offer a backup of index.ts before it is overwritten
    let mut backup = None;
    if pre.index_exists {
        let wanted = matches!(
            wizard::ask_valid(prompter, &wizard::backup_question())?,
            Answer::YesNo(true)
        );
        if wanted {
            let path = scaffold::backup_index(root, now)
                .context("Failed to setup hooks: could not back up index.ts")?;
            if let Some(path) = path {
                let rel = relative(root, &path);
                if !args.json {
                    println!("  backup:  {rel}");
                }
                backup = Some(rel);
            }
        } else if !args.json {
            println!("  skipped backup of {}", paths::INDEX_TS);
        }
    }

    // 4. Render and write
    let artifacts = render::render(plan).context("Failed to setup hooks")?;
    let files = scaffold::write_artifacts(root, artifacts, args.local, |report| {
        if !args.json {
            println!("  {:<8} {}", format!("{}:", report.status.as_str()), report.path);
        }
    })
    .context("Failed to setup hooks")?;

    if which::which("bun").is_err() {
        tracing::warn!("bun not found on PATH");
        eprintln!("warning: `bun` is not on PATH; the generated hooks run with bun (https://bun.sh)");
    }

    if args.json {
        return print_json(&InitReport {
            root: root.display().to_string(),
            hooks: hook_names,
            backup,
            files,
        });
    }

    println!("\nHooks enabled: {}", hook_names.join(", "));
    println!("Next: edit {} to customize the handlers.", paths::INDEX_TS);
    Ok(())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::ScriptedPrompter;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap()
    }

    fn yes() -> InitArgs {
        InitArgs {
            yes: true,
            ..Default::default()
        }
    }

    fn read(dir: &TempDir, rel: &str) -> String {
        std::fs::read_to_string(dir.path().join(rel)).unwrap()
    }

    #[test]
    fn defaults_write_all_files() {
        let dir = TempDir::new().unwrap();
        run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap();
        for rel in [paths::INDEX_TS, paths::LIB_TS, paths::SESSION_TS, paths::SETTINGS_FILE] {
            assert!(dir.path().join(rel).is_file(), "{rel} missing");
        }
        let settings: serde_json::Value =
            serde_json::from_str(&read(&dir, paths::SETTINGS_FILE)).unwrap();
        let keys: Vec<_> = settings["hooks"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["PreToolUse", "PostToolUse", "Notification", "Stop"]);
    }

    #[test]
    fn scripted_answers_shape_output() {
        let dir = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::new([
            Answer::Many(vec![1]),
            Answer::Many(vec![]),
            Answer::One(0),
            Answer::One(1),
        ]);
        let args = InitArgs {
            session_dir: Some("/var/tmp/hooks".to_string()),
            ..Default::default()
        };
        run_with(dir.path(), &args, &mut prompter, at()).unwrap();

        let index = read(&dir, paths::INDEX_TS);
        assert!(index.contains("async function userPromptSubmit("));
        assert!(index.contains("const GUARDS: Guard[] = []"));
        assert!(index.contains("'.tsx'"));
        let session = read(&dir, paths::SESSION_TS);
        assert!(session.contains("join('/var/tmp/hooks', 'claude-hooks-sessions')"));
        assert!(session.contains("bun:sqlite"));
    }

    #[test]
    fn second_run_without_force_changes_nothing() {
        let dir = TempDir::new().unwrap();
        run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap();
        std::fs::write(dir.path().join(paths::INDEX_TS), "// mine\n").unwrap();

        let mut prompter = ScriptedPrompter::new([]);
        let err = run_with(dir.path(), &InitArgs::default(), &mut prompter, at()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("already exist"));
        assert!(msg.contains("--force"));
        assert!(prompter.asked.is_empty());
        assert_eq!(read(&dir, paths::INDEX_TS), "// mine\n");
    }

    #[test]
    fn force_with_backup_preserves_old_index() {
        let dir = TempDir::new().unwrap();
        run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap();
        std::fs::write(dir.path().join(paths::INDEX_TS), "// custom handlers\n").unwrap();

        let mut prompter = ScriptedPrompter::new([
            Answer::Many(vec![]),
            Answer::Many(vec![0]),
            Answer::One(4),
            Answer::One(0),
            Answer::YesNo(true),
        ]);
        let args = InitArgs {
            force: true,
            ..Default::default()
        };
        run_with(dir.path(), &args, &mut prompter, at()).unwrap();

        let backup = dir.path().join(".claude/hooks/index.backup.20261015-093000.ts");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "// custom handlers\n");
        assert!(read(&dir, paths::INDEX_TS).contains("runHook({"));
        assert_eq!(prompter.asked.last(), Some(&wizard::QuestionId::Backup));
    }

    #[test]
    fn force_without_backup_leaves_no_backup() {
        let dir = TempDir::new().unwrap();
        run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap();

        let mut prompter = ScriptedPrompter::new([
            Answer::Many(vec![]),
            Answer::Many(vec![]),
            Answer::One(4),
            Answer::One(0),
            Answer::YesNo(false),
        ]);
        let args = InitArgs {
            force: true,
            ..Default::default()
        };
        run_with(dir.path(), &args, &mut prompter, at()).unwrap();

        let backups = std::fs::read_dir(dir.path().join(paths::HOOKS_DIR))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("index.backup."))
            .count();
        assert_eq!(backups, 0);
    }

    #[test]
    fn local_writes_local_settings_only() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            yes: true,
            local: true,
            ..Default::default()
        };
        run_with(dir.path(), &args, &mut DefaultsPrompter, at()).unwrap();
        assert!(dir.path().join(paths::SETTINGS_LOCAL_FILE).is_file());
        assert!(!dir.path().join(paths::SETTINGS_FILE).exists());
    }

    #[test]
    fn project_config_sets_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".claude")).unwrap();
        std::fs::write(
            dir.path().join(paths::CONFIG_FILE),
            "hooks: [PreCompact]\nsecurity: []\n",
        )
        .unwrap();
        run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap();
        let index = read(&dir, paths::INDEX_TS);
        assert!(index.contains("async function preCompact("));
        assert!(!index.contains("blockDangerousFileOps"));
    }

    #[test]
    fn unreadable_settings_fail_the_setup() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::SETTINGS_FILE)).unwrap();
        let err = run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("Failed to setup hooks: could not inspect"), "{msg}");
        assert!(!dir.path().join(paths::INDEX_TS).exists());
    }

    #[test]
    fn bad_config_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".claude")).unwrap();
        std::fs::write(dir.path().join(paths::CONFIG_FILE), "project: cobol\n").unwrap();
        let err = run_with(dir.path(), &yes(), &mut DefaultsPrompter, at()).unwrap_err();
        assert!(format!("{err:#}").contains("claude-hooks.yaml"));
        assert!(!dir.path().join(paths::INDEX_TS).exists());
    }
}
