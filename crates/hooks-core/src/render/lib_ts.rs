use super::{Fragment, TsFile};
use crate::types::HookType;

const HEADER: &str = r#"/**
 * Shared types and runtime for .claude/hooks.
 *
 * Generated by claude-hooks. Handlers live in index.ts; this file is not
 * meant to be edited by hand.
 *
 * Protocol: the host runs `bun .claude/hooks/index.ts <HookType>` with the
 * hook payload as JSON on stdin, and reads the JSON response from stdout.
 * Log output goes to stderr.
 */"#;

const BASE_TYPES: &str = r#"/** Fields present on every hook payload. */
export interface BasePayload {
  session_id: string
  transcript_path: string
  cwd: string
  hook_event_name: string
}

/** Fields every hook response may carry. */
export interface BaseResponse {
  /** false stops the assistant after this hook. */
  continue?: boolean
  /** Shown to the user when continue is false. */
  stopReason?: string
  /** Hide this hook's stdout from the transcript. */
  suppressOutput?: boolean
}"#;

const LOG_FN: &str = r#"/**
 * Write one structured log line to stderr. Stdout is reserved for the JSON
 * response. Set CLAUDE_HOOKS_DEBUG=1 to include debug lines.
 */
export function log(
  level: 'debug' | 'info' | 'warn' | 'error',
  message: string,
  fields: Record<string, unknown> = {},
): void {
  if (level === 'debug' && !process.env.CLAUDE_HOOKS_DEBUG) return
  console.error(JSON.stringify({ ts: new Date().toISOString(), level, message, ...fields }))
}"#;

const RUN_HOOK_FN: &str = r#"/**
 * Entry point used by index.ts. Reads the payload from stdin, picks the
 * handler named by argv, and prints its response as JSON. Prints `{}` when
 * no handler is registered for the hook type.
 */
export async function runHook(handlers: HookHandlers): Promise<void> {
  const hookType = process.argv[2] as HookType | undefined
  const raw = await Bun.stdin.text()

  let payload: unknown
  try {
    payload = raw.trim() ? JSON.parse(raw) : {}
  } catch (err) {
    log('error', 'invalid hook payload', { hookType, error: String(err) })
    process.exit(1)
  }

  const handler = hookType ? (handlers[hookType] as ((p: unknown) => unknown) | undefined) : undefined
  if (!handler) {
    console.log(JSON.stringify({}))
    return
  }

  try {
    const response = await handler(payload)
    console.log(JSON.stringify(response ?? {}))
  } catch (err) {
    log('error', 'hook handler failed', { hookType, error: String(err) })
    process.exit(1)
  }
}"#;

/// TypeScript payload interface for one hook type.
pub fn payload_interface(hook: HookType) -> Fragment {
    let fields = match hook {
        HookType::PreToolUse => "  tool_name: string\n  tool_input: Record<string, unknown>\n",
        HookType::PostToolUse => {
            "  tool_name: string\n  tool_input: Record<string, unknown>\n  tool_response: Record<string, unknown>\n"
        }
        HookType::Notification => "  message: string\n",
        HookType::Stop | HookType::SubagentStop => "  stop_hook_active: boolean\n",
        HookType::UserPromptSubmit => "  prompt: string\n",
        HookType::PreCompact => "  trigger: 'manual' | 'auto'\n  custom_instructions: string\n",
        HookType::SessionStart => "  source: 'startup' | 'resume' | 'clear' | 'compact'\n",
    };
    let body = format!(
        "/** Payload for {hook}: sent {desc}. */\nexport interface {hook}Payload extends BasePayload {{\n  hook_event_name: '{hook}'\n{fields}}}",
        desc = hook.description(),
    );
    Fragment::new(format!("payload:{hook}"), body)
}

/// TypeScript response interface for one hook type.
pub fn response_interface(hook: HookType) -> Fragment {
    let fields = match hook {
        HookType::PreToolUse => {
            "  /** approve skips the permission prompt, block cancels the tool call. */\n  decision?: 'approve' | 'block'\n  reason?: string\n"
        }
        HookType::PostToolUse | HookType::Stop | HookType::SubagentStop => {
            "  /** block feeds reason back to the assistant. */\n  decision?: 'block'\n  reason?: string\n"
        }
        HookType::UserPromptSubmit => {
            "  /** block rejects the prompt before the assistant sees it. */\n  decision?: 'block'\n  reason?: string\n  /** Appended to the prompt as extra context. */\n  additionalContext?: string\n"
        }
        HookType::SessionStart => "  /** Injected into the new session as context. */\n  additionalContext?: string\n",
        HookType::Notification | HookType::PreCompact => "",
    };
    let body = if fields.is_empty() {
        format!("export type {hook}Response = BaseResponse")
    } else {
        format!("export interface {hook}Response extends BaseResponse {{\n{fields}}}")
    };
    Fragment::new(format!("response:{hook}"), body)
}

/// Union of hook names plus the handler map `runHook` accepts.
pub fn handler_map() -> Fragment {
    let names = HookType::all()
        .iter()
        .map(|h| format!("'{h}'"))
        .collect::<Vec<_>>()
        .join("\n  | ");
    let entries = HookType::all()
        .iter()
        .map(|h| format!("  {h}?: (payload: {h}Payload) => {h}Response | Promise<{h}Response>"))
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "export type HookType =\n  | {names}\n\n/** Handlers by hook type. Missing entries answer with `{{}}`. */\nexport interface HookHandlers {{\n{entries}\n}}"
    );
    Fragment::new("handlers", body)
}

pub fn build() -> TsFile {
    let mut fragments = vec![Fragment::new("base-types", BASE_TYPES)];
    for hook in HookType::all() {
        fragments.push(payload_interface(*hook));
        fragments.push(response_interface(*hook));
    }
    fragments.push(handler_map());
    fragments.push(Fragment::new("log", LOG_FN));
    fragments.push(Fragment::new("run-hook", RUN_HOOK_FN));

    TsFile {
        header: HEADER.to_string(),
        fragments,
        footer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_payload_and_response_per_hook() {
        let file = build();
        for hook in HookType::all() {
            assert!(file.fragment(&format!("payload:{hook}")).is_some());
            assert!(file.fragment(&format!("response:{hook}")).is_some());
        }
        let out = file.assemble();
        assert_eq!(out.matches("export interface PreToolUsePayload").count(), 1);
        assert_eq!(out.matches("export type NotificationResponse").count(), 1);
    }

    #[test]
    fn pre_tool_use_payload_fields() {
        let body = payload_interface(HookType::PreToolUse).body;
        assert!(body.contains("export interface PreToolUsePayload extends BasePayload {"));
        assert!(body.contains("hook_event_name: 'PreToolUse'"));
        assert!(body.contains("tool_input: Record<string, unknown>"));
        assert!(body.ends_with('}'));
    }

    #[test]
    fn stop_response_can_block() {
        let body = response_interface(HookType::Stop).body;
        assert!(body.contains("decision?: 'block'"));
        assert!(!body.contains("approve"));
    }

    #[test]
    fn handler_map_lists_every_hook() {
        let body = handler_map().body;
        for hook in HookType::all() {
            assert!(body.contains(&format!("{hook}?: (payload: {hook}Payload)")));
        }
    }

    #[test]
    fn runtime_exports_log_and_run_hook() {
        let out = build().assemble();
        assert!(out.contains("export function log("));
        assert!(out.contains("export async function runHook(handlers: HookHandlers)"));
        assert!(out.contains("console.log(JSON.stringify({}))"));
    }
}
