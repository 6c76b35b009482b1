//! The setup wizard: an ordered list of questions driven by one loop.
//!
//! Questions are plain data ([`Question`]); how they are asked is behind the
//! [`Prompter`] trait. The terminal uses `dialoguer`, `--yes` answers every
//! question with its default, and tests feed canned answers.

use anyhow::Context;
use hooks_core::config::HooksConfig;
use hooks_core::detect::detect_project_type;
use hooks_core::plan::{
    GenerationPlan, HookSelection, ProjectContext, SecurityFeatureConfig, SessionRoot,
};
use hooks_core::types::{HookType, ProjectType, SecurityFeature, StorageBackend};
use std::path::Path;

/// How many invalid answers in a row are tolerated before giving up.
const MAX_ATTEMPTS: usize = 3;

// ---------------------------------------------------------------------------
// Questions and answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionId {
    Hooks,
    Security,
    Project,
    Storage,
    Backup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    MultiSelect(Vec<String>),
    Select(Vec<String>),
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Many(Vec<usize>),
    One(usize),
    YesNo(bool),
}

pub type Validator = fn(&Question, &Answer) -> Result<(), String>;

#[derive(Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub kind: QuestionKind,
    pub default: Answer,
    pub validate: Validator,
}

/// Accepts any answer whose shape matches the question and whose indices
/// are in range.
pub fn validate_shape(question: &Question, answer: &Answer) -> Result<(), String> {
    match (&question.kind, answer) {
        (QuestionKind::MultiSelect(options), Answer::Many(picked)) => {
            match picked.iter().find(|i| **i >= options.len()) {
                Some(i) => Err(format!("option {i} is out of range (0-{})", options.len() - 1)),
                None => Ok(()),
            }
        }
        (QuestionKind::Select(options), Answer::One(i)) if *i < options.len() => Ok(()),
        (QuestionKind::Select(options), Answer::One(i)) => {
            Err(format!("option {i} is out of range (0-{})", options.len() - 1))
        }
        (QuestionKind::Confirm, Answer::YesNo(_)) => Ok(()),
        _ => Err("answer does not match the question type".to_string()),
    }
}

/// Same as [`validate_shape`], and rejects duplicate picks.
fn validate_unique(question: &Question, answer: &Answer) -> Result<(), String> {
    validate_shape(question, answer)?;
    if let Answer::Many(picked) = answer {
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != picked.len() {
            return Err("each option can only be picked once".to_string());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default answers, from built-ins, project detection, and the optional
/// `.claude/claude-hooks.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardDefaults {
    pub extra_hooks: Vec<HookType>,
    pub security: Vec<SecurityFeature>,
    pub project: ProjectType,
    pub storage: StorageBackend,
}

impl WizardDefaults {
    pub fn resolve(root: &Path, config: &HooksConfig) -> Self {
        Self {
            extra_hooks: config
                .hooks
                .clone()
                .unwrap_or_default()
                .into_iter()
                .filter(|h| !h.is_baseline())
                .collect(),
            security: config
                .security
                .clone()
                .unwrap_or_else(|| SecurityFeature::all().to_vec()),
            project: config.project.unwrap_or_else(|| detect_project_type(root)),
            storage: config.storage.unwrap_or_default(),
        }
    }
}

fn index_of<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(0)
}

/// Positions of `picked` within `all`, sorted and without repeats. Values not
/// in `all` are dropped.
fn indices_of<T: PartialEq>(all: &[T], picked: &[T]) -> Vec<usize> {
    let mut out: Vec<usize> = picked
        .iter()
        .filter_map(|p| all.iter().position(|v| v == p))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// The setup questions, in the order they are asked.
pub fn questions(defaults: &WizardDefaults) -> Vec<Question> {
    let extended = HookType::extended();
    vec![
        Question {
            id: QuestionId::Hooks,
            prompt: "Extra hook types to enable (PreToolUse, PostToolUse, Notification and Stop are always on)"
                .to_string(),
            kind: QuestionKind::MultiSelect(
                extended
                    .iter()
                    .map(|h| format!("{h} - {}", h.description()))
                    .collect(),
            ),
            default: Answer::Many(indices_of(extended, &defaults.extra_hooks)),
            validate: validate_unique,
        },
        Question {
            id: QuestionId::Security,
            prompt: "Security guards for PreToolUse".to_string(),
            kind: QuestionKind::MultiSelect(
                SecurityFeature::all().iter().map(|f| f.label().to_string()).collect(),
            ),
            default: Answer::Many(indices_of(SecurityFeature::all(), &defaults.security)),
            validate: validate_unique,
        },
        Question {
            id: QuestionId::Project,
            prompt: "Project type".to_string(),
            kind: QuestionKind::Select(
                ProjectType::all().iter().map(|p| p.label().to_string()).collect(),
            ),
            default: Answer::One(index_of(ProjectType::all(), &defaults.project)),
            validate: validate_shape,
        },
        Question {
            id: QuestionId::Storage,
            prompt: "Session storage".to_string(),
            kind: QuestionKind::Select(
                StorageBackend::all().iter().map(|s| s.label().to_string()).collect(),
            ),
            default: Answer::One(index_of(StorageBackend::all(), &defaults.storage)),
            validate: validate_shape,
        },
    ]
}

/// Asked under `--force` when `index.ts` already exists.
pub fn backup_question() -> Question {
    Question {
        id: QuestionId::Backup,
        prompt: "Back up your existing .claude/hooks/index.ts before overwriting it?".to_string(),
        kind: QuestionKind::Confirm,
        default: Answer::YesNo(true),
        validate: validate_shape,
    }
}

// ---------------------------------------------------------------------------
// Prompters
// ---------------------------------------------------------------------------

pub trait Prompter {
    fn ask(&mut self, question: &Question) -> anyhow::Result<Answer>;

    /// Called when an answer fails validation, before the question is asked again.
    fn invalid(&mut self, _question: &Question, _reason: &str) {}
}

/// Interactive prompts on the terminal.
pub struct TerminalPrompter {
    theme: dialoguer::theme::ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &Question) -> anyhow::Result<Answer> {
        use dialoguer::{Confirm, MultiSelect, Select};

        let answer = match (&question.kind, &question.default) {
            (QuestionKind::MultiSelect(options), Answer::Many(defaults)) => {
                let checked: Vec<bool> = (0..options.len()).map(|i| defaults.contains(&i)).collect();
                let picked = MultiSelect::with_theme(&self.theme)
                    .with_prompt(&question.prompt)
                    .items(options.as_slice())
                    .defaults(&checked)
                    .interact()
                    .with_context(|| format!("failed to read answer for {:?}", question.id))?;
                Answer::Many(picked)
            }
            (QuestionKind::Select(options), Answer::One(default)) => {
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(&question.prompt)
                    .items(options.as_slice())
                    .default(*default)
                    .interact()
                    .with_context(|| format!("failed to read answer for {:?}", question.id))?;
                Answer::One(picked)
            }
            (QuestionKind::Confirm, Answer::YesNo(default)) => {
                let yes = Confirm::with_theme(&self.theme)
                    .with_prompt(&question.prompt)
                    .default(*default)
                    .interact()
                    .with_context(|| format!("failed to read answer for {:?}", question.id))?;
                Answer::YesNo(yes)
            }
            _ => anyhow::bail!("question {:?} has a default of the wrong type", question.id),
        };
        Ok(answer)
    }

    fn invalid(&mut self, _question: &Question, reason: &str) {
        eprintln!("  invalid answer: {reason}");
    }
}

/// Answers every question with its default (`--yes`).
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask(&mut self, question: &Question) -> anyhow::Result<Answer> {
        Ok(question.default.clone())
    }
}

/// Ask one question until it gets a valid answer.
pub fn ask_valid(prompter: &mut dyn Prompter, question: &Question) -> anyhow::Result<Answer> {
    for _ in 0..MAX_ATTEMPTS {
        let answer = prompter.ask(question)?;
        match (question.validate)(question, &answer) {
            Ok(()) => return Ok(answer),
            Err(reason) => {
                tracing::debug!(question = ?question.id, %reason, "rejected answer");
                prompter.invalid(question, &reason);
            }
        }
    }
    anyhow::bail!(
        "no valid answer for {:?} after {MAX_ATTEMPTS} attempts",
        question.id
    )
}

// ---------------------------------------------------------------------------
// Running the wizard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardAnswers {
    pub extra_hooks: Vec<HookType>,
    pub security: Vec<SecurityFeature>,
    pub project: ProjectType,
    pub storage: StorageBackend,
}

impl WizardAnswers {
    pub fn into_plan(self, session_root: SessionRoot) -> GenerationPlan {
        GenerationPlan {
            hooks: HookSelection::with_extra(self.extra_hooks),
            security: SecurityFeatureConfig::from_features(self.security),
            project: ProjectContext {
                project_type: self.project,
                storage: self.storage,
            },
            session_root,
        }
    }
}

/// Ask every question in order and collect the answers.
pub fn run(prompter: &mut dyn Prompter, questions: &[Question]) -> anyhow::Result<WizardAnswers> {
    let mut answers = WizardAnswers {
        extra_hooks: Vec::new(),
        security: Vec::new(),
        project: ProjectType::default(),
        storage: StorageBackend::default(),
    };

    for question in questions {
        let answer = ask_valid(prompter, question)?;
        match (question.id, answer) {
            (QuestionId::Hooks, Answer::Many(picked)) => {
                answers.extra_hooks = picked.iter().map(|i| HookType::extended()[*i]).collect();
            }
            (QuestionId::Security, Answer::Many(picked)) => {
                answers.security = picked.iter().map(|i| SecurityFeature::all()[*i]).collect();
            }
            (QuestionId::Project, Answer::One(i)) => answers.project = ProjectType::all()[i],
            (QuestionId::Storage, Answer::One(i)) => answers.storage = StorageBackend::all()[i],
            (id, answer) => anyhow::bail!("unexpected answer {answer:?} for {id:?}"),
        }
    }
    Ok(answers)
}

/// Feeds canned answers, recording which questions were asked.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Answer>,
    pub asked: Vec<QuestionId>,
    pub rejected: usize,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
            rejected: 0,
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> anyhow::Result<Answer> {
        self.asked.push(question.id);
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script ran out of answers at {:?}", question.id))
    }

    fn invalid(&mut self, _question: &Question, _reason: &str) {
        self.rejected += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> WizardDefaults {
        WizardDefaults {
            extra_hooks: Vec::new(),
            security: SecurityFeature::all().to_vec(),
            project: ProjectType::Go,
            storage: StorageBackend::Json,
        }
    }

    #[test]
    fn questions_are_asked_in_order() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Many(vec![]),
            Answer::Many(vec![]),
            Answer::One(0),
            Answer::One(0),
        ]);
        run(&mut prompter, &questions(&defaults())).unwrap();
        assert_eq!(prompter.rejected, 0);
        assert_eq!(
            prompter.asked,
            vec![
                QuestionId::Hooks,
                QuestionId::Security,
                QuestionId::Project,
                QuestionId::Storage
            ]
        );
    }

    #[test]
    fn defaults_give_baseline_with_all_guards() {
        let answers = run(&mut DefaultsPrompter, &questions(&defaults())).unwrap();
        let plan = answers.into_plan(SessionRoot::SystemTemp);
        assert_eq!(plan.hooks, HookSelection::baseline());
        assert_eq!(plan.security, SecurityFeatureConfig::all_enabled());
        assert_eq!(plan.project.project_type, ProjectType::Go);
    }

    #[test]
    fn scripted_answers_build_the_plan() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Many(vec![0, 3]),
            Answer::Many(vec![1]),
            Answer::One(1),
            Answer::One(2),
        ]);
        let answers = run(&mut prompter, &questions(&defaults())).unwrap();
        assert_eq!(
            answers.extra_hooks,
            vec![HookType::SubagentStop, HookType::SessionStart]
        );
        assert_eq!(answers.security, vec![SecurityFeature::PreventSecretExposure]);
        assert_eq!(answers.project, ProjectType::Python);
        assert_eq!(answers.storage, StorageBackend::Postgres);
        assert_eq!(prompter.asked.len(), 4);
    }

    #[test]
    fn invalid_answer_is_asked_again() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Many(vec![9]),
            Answer::One(0),
            Answer::Many(vec![]),
            Answer::Many(vec![]),
            Answer::One(4),
            Answer::One(0),
        ]);
        let answers = run(&mut prompter, &questions(&defaults())).unwrap();
        assert_eq!(prompter.rejected, 2);
        assert_eq!(prompter.asked[..3], [QuestionId::Hooks, QuestionId::Hooks, QuestionId::Hooks]);
        assert!(answers.extra_hooks.is_empty());
        assert!(answers.security.is_empty());
        assert_eq!(answers.project, ProjectType::Other);
    }

    #[test]
    fn gives_up_after_repeated_invalid_answers() {
        let mut prompter = ScriptedPrompter::new([
            Answer::YesNo(true),
            Answer::YesNo(true),
            Answer::YesNo(true),
        ]);
        let err = run(&mut prompter, &questions(&defaults())).unwrap_err();
        assert!(err.to_string().contains("no valid answer"));
    }

    #[test]
    fn duplicate_picks_are_rejected() {
        let q = &questions(&defaults())[1];
        assert!(validate_unique(q, &Answer::Many(vec![1, 1])).is_err());
        assert!(validate_unique(q, &Answer::Many(vec![0, 1])).is_ok());
    }

    #[test]
    fn config_defaults_drop_baseline_hooks() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("Gemfile"), "").unwrap();
        let config = HooksConfig {
            hooks: Some(vec![HookType::Stop, HookType::PreCompact]),
            storage: Some(StorageBackend::Sqlite),
            ..Default::default()
        };
        let d = WizardDefaults::resolve(dir.path(), &config);
        assert_eq!(d.extra_hooks, vec![HookType::PreCompact]);
        assert_eq!(d.project, ProjectType::Ruby);
        assert_eq!(d.storage, StorageBackend::Sqlite);
        assert_eq!(d.security.len(), 4);

        let qs = questions(&d);
        assert_eq!(qs[0].default, Answer::Many(vec![2]));
        assert_eq!(qs[2].default, Answer::One(2));
    }
}
