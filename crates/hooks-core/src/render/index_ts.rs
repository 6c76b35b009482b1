use super::{indent, Fragment, TsFile};
use crate::plan::{GenerationPlan, HookSelection, SecurityFeatureConfig};
use crate::types::{HookType, ProjectType, SecurityFeature};

const HEADER_DOC: &str = r#"/**
 * Hook handlers for this project.
 *
 * Generated by claude-hooks; edit freely. Each handler receives the typed
 * payload for its hook and returns the response the host should act on.
 * Returning {} lets the host continue normally.
 */"#;

const GUARD_TYPE: &str = r#"/** A guard returns a reason to block the tool call, or undefined to allow it. */
type Guard = (toolName: string, command: string, filePath: string) => string | undefined"#;

const GUARD_DANGEROUS_FILE_OPS: &str = r##"const DANGEROUS_COMMANDS: RegExp[] = [
  /\brm\s+-[a-zA-Z]*[rR][a-zA-Z]*\s+(\/|~|\$HOME)(\s|$)/,
  /\brm\s+-[a-zA-Z]*[rR][a-zA-Z]*\s+\*(\s|$)/,
  /\bchmod\s+(-R\s+)?777\b/,
  /\bmkfs(\.\w+)?\b/,
  /\bdd\s+.*\bof=\/dev\//,
  /\bgit\s+push\s+.*--force\b/,
]

/** Block recursive deletes of broad paths, world-writable chmods and disk writes. */
const blockDangerousFileOps: Guard = (_toolName, command) => {
  const hit = DANGEROUS_COMMANDS.find((re) => re.test(command))
  return hit ? `dangerous command blocked (${hit.source})` : undefined
}"##;

const GUARD_SECRET_EXPOSURE: &str = r##"const SECRET_FILES: RegExp[] = [
  /(^|\/)\.env(\.[\w-]+)?$/,
  /\.(pem|key|p12|pfx)$/,
  /(^|\/)id_(rsa|ecdsa|ed25519)$/,
  /(^|\/)\.(aws|ssh|gnupg)\//,
  /credentials(\.json)?$/i,
]

const SECRET_COMMANDS: RegExp[] = [/\b(cat|less|head|tail)\s+\S*\.env\b/, /\bprintenv\b/, /^\s*env\s*$/]

/** Keep secrets out of the transcript: no reading or editing key material. */
const preventSecretExposure: Guard = (_toolName, command, filePath) => {
  if (filePath && SECRET_FILES.some((re) => re.test(filePath))) {
    return `${filePath} may contain secrets`
  }
  if (SECRET_COMMANDS.some((re) => re.test(command))) {
    return 'command would print secrets'
  }
  return undefined
}"##;

const GUARD_PRODUCTION: &str = r##"const PRODUCTION_COMMANDS: RegExp[] = [
  /\b(deploy|release|migrate|rollback)\b.*\bprod(uction)?\b/i,
  /\b(drop|truncate)\s+(table|database)\b/i,
  /\bkubectl\b.*--context[= ]\S*prod/,
  /\bterraform\s+(apply|destroy)\b/,
]

/** Require a human for anything that touches production. */
const productionSafeguards: Guard = (_toolName, command) => {
  const hit = PRODUCTION_COMMANDS.find((re) => re.test(command))
  return hit ? 'production operations must be run by a human' : undefined
}"##;

const GUARD_NETWORK: &str = r##"const PIPE_TO_SHELL = /\b(curl|wget)\b[^|]*\|\s*(sudo\s+)?(ba|z)?sh\b/
const URL_HOST = /\bhttps?:\/\/([^/\s:'"]+)/g

/** Only allow network access to known hosts, and never pipe downloads into a shell. */
const networkRestrictions: Guard = (toolName, command) => {
  if (toolName !== 'Bash') return undefined
  if (PIPE_TO_SHELL.test(command)) {
    return 'piping downloads into a shell is not allowed'
  }
  for (const match of command.matchAll(URL_HOST)) {
    const host = match[1]
    if (!ALLOWED_HOSTS.some((allowed) => host === allowed || host.endsWith(`.${allowed}`))) {
      return `network access to ${host} is not allowed`
    }
  }
  return undefined
}"##;

const PRE_TOOL_USE: &str = r#"/** Runs before every tool call. Return decision 'block' to cancel it. */
async function preToolUse(payload: PreToolUsePayload): Promise<PreToolUseResponse> {
  await saveSessionData('PreToolUse', payload)

  const command = typeof payload.tool_input.command === 'string' ? payload.tool_input.command : ''
  const filePath = typeof payload.tool_input.file_path === 'string' ? payload.tool_input.file_path : ''
  log('debug', 'tool requested', { tool: payload.tool_name, command, filePath })

  for (const guard of GUARDS) {
    const reason = guard(payload.tool_name, command, filePath)
    if (reason) {
      log('warn', 'tool call blocked', { tool: payload.tool_name, reason })
      return { decision: 'block', reason }
    }
  }
  return {}
}"#;

const NOTIFICATION: &str = r#"/** Runs when the assistant needs attention, e.g. waiting for permission. */
async function notification(payload: NotificationPayload): Promise<NotificationResponse> {
  await saveSessionData('Notification', payload)
  log('info', 'notification', { message: payload.message })

  // Forward to the desktop where a notifier is available.
  if (process.platform === 'darwin') {
    Bun.spawn(['osascript', '-e', `display notification ${JSON.stringify(payload.message)} with title "Assistant"`])
  } else if (process.platform === 'linux') {
    Bun.spawn(['notify-send', 'Assistant', payload.message])
  }
  return {}
}"#;

const STOP: &str = r#"/** Runs when the assistant finishes a turn. */
async function stop(payload: StopPayload): Promise<StopResponse> {
  await saveSessionData('Stop', payload)

  // Already continuing because of a previous Stop hook; don't loop.
  if (payload.stop_hook_active) return {}

  log('info', 'turn finished', { session: payload.session_id })
  return {}
}"#;

const SUBAGENT_STOP: &str = r#"/** Runs when a subagent (Task tool) finishes. */
async function subagentStop(payload: SubagentStopPayload): Promise<SubagentStopResponse> {
  await saveSessionData('SubagentStop', payload)
  if (payload.stop_hook_active) return {}

  log('info', 'subagent finished', { session: payload.session_id })
  return {}
}"#;

const PRE_COMPACT: &str = r#"/** Runs before the conversation is compacted. */
async function preCompact(payload: PreCompactPayload): Promise<PreCompactResponse> {
  await saveSessionData('PreCompact', payload)
  log('info', 'compacting conversation', {
    trigger: payload.trigger,
    hasInstructions: payload.custom_instructions.length > 0,
  })
  return {}
}"#;

fn header(plan: &GenerationPlan) -> String {
    let types = plan
        .hooks
        .iter()
        .flat_map(|h| [format!("  type {h}Payload,"), format!("  type {h}Response,")])
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{HEADER_DOC}\nimport {{\n  log,\n  runHook,\n{types}\n}} from './lib'\nimport {{ saveSessionData }} from './session'"
    )
}

/// Hosts the network guard lets through for a project type.
fn allowed_hosts(project: ProjectType) -> Vec<&'static str> {
    let mut hosts = vec!["github.com", "githubusercontent.com"];
    hosts.extend_from_slice(match project {
        ProjectType::Node => &["registry.npmjs.org", "nodejs.org"],
        ProjectType::Python => &["pypi.org", "files.pythonhosted.org"],
        ProjectType::Ruby => &["rubygems.org"],
        ProjectType::Go => &["proxy.golang.org", "pkg.go.dev"],
        ProjectType::Other => &[],
    });
    hosts
}

/// The constants and function for one security guard.
pub fn guard_fragment(feature: SecurityFeature, project: ProjectType) -> Fragment {
    let body = match feature {
        SecurityFeature::BlockDangerousFileOps => GUARD_DANGEROUS_FILE_OPS.to_string(),
        SecurityFeature::PreventSecretExposure => GUARD_SECRET_EXPOSURE.to_string(),
        SecurityFeature::ProductionSafeguards => GUARD_PRODUCTION.to_string(),
        SecurityFeature::NetworkRestrictions => {
            let hosts = allowed_hosts(project)
                .iter()
                .map(|h| format!("'{h}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("const ALLOWED_HOSTS: string[] = [{hosts}]\n{GUARD_NETWORK}")
        }
    };
    Fragment::new(format!("guard:{feature}"), body)
}

/// camelCase name of a guard function.
fn guard_name(feature: SecurityFeature) -> &'static str {
    match feature {
        SecurityFeature::BlockDangerousFileOps => "blockDangerousFileOps",
        SecurityFeature::PreventSecretExposure => "preventSecretExposure",
        SecurityFeature::ProductionSafeguards => "productionSafeguards",
        SecurityFeature::NetworkRestrictions => "networkRestrictions",
    }
}

/// `GUARDS`, the list `preToolUse` walks in order.
pub fn guard_list(security: &SecurityFeatureConfig) -> Fragment {
    let enabled = security.enabled();
    let body = if enabled.is_empty() {
        "// Add guards here to block tool calls, e.g.\n\
         //   const noSudo: Guard = (_tool, command) => (/\\bsudo\\b/.test(command) ? 'no sudo' : undefined)\n\
         const GUARDS: Guard[] = []"
            .to_string()
    } else {
        let names = enabled
            .iter()
            .map(|f| guard_name(*f))
            .collect::<Vec<_>>()
            .join(", ");
        format!("const GUARDS: Guard[] = [{names}]")
    };
    Fragment::new("guards", body)
}

fn post_tool_use(project: ProjectType) -> String {
    let exts = project.source_extensions();
    let condition = if exts.is_empty() {
        "filePath".to_string()
    } else {
        let list = exts
            .iter()
            .map(|e| format!("'{e}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{list}].some((ext) => filePath.endsWith(ext))")
    };
    let example = match project.check_command() {
        Some(cmd) => format!(
            "// Example: run `{cmd}` here and return\n\
             // {{ decision: 'block', reason: output }} to send failures back."
        ),
        None => "// Example: run your linter here and return\n\
                 // { decision: 'block', reason: output } to send failures back."
            .to_string(),
    };
    format!(
        "/** Runs after a tool call succeeds. */\n\
         async function postToolUse(payload: PostToolUsePayload): Promise<PostToolUseResponse> {{\n\
         \x20 await saveSessionData('PostToolUse', payload)\n\
         \n\
         \x20 const filePath = typeof payload.tool_input.file_path === 'string' ? payload.tool_input.file_path : ''\n\
         \x20 if (['Edit', 'MultiEdit', 'Write'].includes(payload.tool_name) && {condition}) {{\n\
         \x20   log('info', 'source file changed', {{ tool: payload.tool_name, filePath }})\n\
         {example}\n\
         \x20 }}\n\
         \x20 return {{}}\n\
         }}",
        example = indent(&example, 4),
    )
}

fn user_prompt_submit(security: &SecurityFeatureConfig) -> String {
    let secret_check = if security.prevent_secret_exposure {
        "\n\
         \x20 // Catch API keys pasted into the prompt before they reach the transcript.\n\
         \x20 if (/\\b(sk-[A-Za-z0-9_-]{20,}|AKIA[0-9A-Z]{16}|ghp_[A-Za-z0-9]{36})\\b/.test(payload.prompt)) {\n\
         \x20   log('warn', 'prompt blocked: looks like it contains a secret')\n\
         \x20   return { decision: 'block', reason: 'Prompt appears to contain a secret. Remove it and try again.' }\n\
         \x20 }\n"
    } else {
        ""
    };
    format!(
        "/** Runs when the user submits a prompt, before the assistant sees it. */\n\
         async function userPromptSubmit(payload: UserPromptSubmitPayload): Promise<UserPromptSubmitResponse> {{\n\
         \x20 await saveSessionData('UserPromptSubmit', payload)\n\
         \x20 log('debug', 'prompt submitted', {{ length: payload.prompt.length }})\n\
         {secret_check}\n\
         \x20 return {{ additionalContext: `Current time: ${{new Date().toISOString()}}` }}\n\
         }}"
    )
}

fn session_start(project: ProjectType) -> String {
    let context = match project.check_command() {
        Some(cmd) => format!("{} project. Run `{cmd}` before finishing a task.", project.label()),
        None => "Follow the conventions in the repository README.".to_string(),
    };
    format!(
        "/** Runs when a session starts, resumes, or is cleared. */\n\
         async function sessionStart(payload: SessionStartPayload): Promise<SessionStartResponse> {{\n\
         \x20 await saveSessionData('SessionStart', payload)\n\
         \x20 log('info', 'session started', {{ source: payload.source, cwd: payload.cwd }})\n\
         \x20 return {{ additionalContext: {context} }}\n\
         }}",
        context = serde_json::Value::String(context),
    )
}

/// The handler function for one hook type.
pub fn handler_fragment(hook: HookType, plan: &GenerationPlan) -> Fragment {
    let body = match hook {
        HookType::PreToolUse => PRE_TOOL_USE.to_string(),
        HookType::PostToolUse => post_tool_use(plan.project.project_type),
        HookType::Notification => NOTIFICATION.to_string(),
        HookType::Stop => STOP.to_string(),
        HookType::SubagentStop => SUBAGENT_STOP.to_string(),
        HookType::UserPromptSubmit => user_prompt_submit(&plan.security),
        HookType::PreCompact => PRE_COMPACT.to_string(),
        HookType::SessionStart => session_start(plan.project.project_type),
    };
    Fragment::new(format!("handler:{hook}"), body)
}

/// Trailing `runHook({...})` that registers every handler.
pub fn register_call(hooks: &HookSelection) -> String {
    let entries = hooks
        .iter()
        .map(|h| format!("  {h}: {},", h.handler_name()))
        .collect::<Vec<_>>()
        .join("\n");
    format!("runHook({{\n{entries}\n}})")
}

pub fn build(plan: &GenerationPlan) -> TsFile {
    let mut fragments = Vec::new();
    if plan.hooks.contains(HookType::PreToolUse) {
        fragments.push(Fragment::new("guard-type", GUARD_TYPE));
        for feature in plan.security.enabled() {
            fragments.push(guard_fragment(feature, plan.project.project_type));
        }
        fragments.push(guard_list(&plan.security));
    }
    for hook in plan.hooks.iter() {
        fragments.push(handler_fragment(hook, plan));
    }

    TsFile {
        header: header(plan),
        fragments,
        footer: Some(register_call(&plan.hooks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ProjectContext;

    fn plan_with(security: SecurityFeatureConfig, project: ProjectType) -> GenerationPlan {
        GenerationPlan {
            security,
            project: ProjectContext {
                project_type: project,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn handlers_are_never_empty() {
        let plan = GenerationPlan {
            hooks: HookSelection::all(),
            ..Default::default()
        };
        for hook in HookType::all() {
            let body = handler_fragment(*hook, &plan).body;
            assert!(body.contains(&format!("async function {}(payload: {hook}Payload)", hook.handler_name())));
            assert!(body.contains(&format!("saveSessionData('{hook}', payload)")));
            assert!(body.contains("log("), "{hook} handler has no example logic");
        }
    }

    #[test]
    fn guards_follow_enabled_features() {
        let plan = plan_with(
            SecurityFeatureConfig::from_features([SecurityFeature::NetworkRestrictions]),
            ProjectType::Python,
        );
        let file = build(&plan);
        assert!(file.fragment("guard:network_restrictions").is_some());
        assert!(file.fragment("guard:block_dangerous_file_ops").is_none());
        assert_eq!(
            file.fragment("guards").unwrap().body,
            "const GUARDS: Guard[] = [networkRestrictions]"
        );
        assert!(file.assemble().contains("'pypi.org'"));
    }

    #[test]
    fn no_security_features_leaves_example_guard() {
        let plan = plan_with(SecurityFeatureConfig::none(), ProjectType::Other);
        let body = guard_list(&plan.security).body;
        assert!(body.ends_with("const GUARDS: Guard[] = []"));
        assert!(body.contains("noSudo"));
    }

    #[test]
    fn post_tool_use_mentions_project_check() {
        let body = post_tool_use(ProjectType::Go);
        assert!(body.contains("'.go'"));
        assert!(body.contains("go vet ./..."));
        let other = post_tool_use(ProjectType::Other);
        assert!(other.contains("&& filePath)"));
    }

    #[test]
    fn user_prompt_secret_check_is_optional() {
        assert!(user_prompt_submit(&SecurityFeatureConfig::all_enabled()).contains("AKIA"));
        assert!(!user_prompt_submit(&SecurityFeatureConfig::none()).contains("AKIA"));
    }

    #[test]
    fn session_start_context_is_a_string_literal() {
        let body = session_start(ProjectType::Ruby);
        assert!(body.contains(r#"additionalContext: "Ruby project. Run `bundle exec rubocop` before finishing a task.""#));
    }

    #[test]
    fn register_call_lists_enabled_handlers() {
        let call = register_call(&HookSelection::with_extra([HookType::SessionStart]));
        assert_eq!(
            call,
            "runHook({\n  PreToolUse: preToolUse,\n  PostToolUse: postToolUse,\n  Notification: notification,\n  Stop: stop,\n  SessionStart: sessionStart,\n})"
        );
    }

    #[test]
    fn imports_only_enabled_types() {
        let out = build(&GenerationPlan::default()).assemble();
        assert!(out.contains("  type PreToolUsePayload,"));
        assert!(!out.contains("SessionStartPayload"));
        assert!(out.contains("import { saveSessionData } from './session'"));
        assert!(out.trim_end().ends_with("})"));
    }
}
