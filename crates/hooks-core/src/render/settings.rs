use crate::error::{HooksError, Result};
use crate::paths;
use crate::plan::HookSelection;
use crate::types::HookType;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SettingsFile<'a> {
    hooks: HookTable<'a>,
}

/// Serialized as an object keyed by hook type, in canonical order.
#[derive(Debug)]
struct HookTable<'a>(&'a HookSelection);

impl Serialize for HookTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for hook in self.0.iter() {
            map.serialize_entry(hook.as_str(), &[MatcherEntry::for_hook(hook)])?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct MatcherEntry {
    matcher: &'static str,
    hooks: [CommandHook; 1],
}

impl MatcherEntry {
    fn for_hook(hook: HookType) -> Self {
        Self {
            matcher: "",
            hooks: [CommandHook {
                kind: "command",
                command: paths::hook_command(hook),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct CommandHook {
    #[serde(rename = "type")]
    kind: &'static str,
    command: String,
}

/// Render `settings.json`: one entry per enabled hook, pretty-printed.
pub fn render(hooks: &HookSelection) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&SettingsFile {
        hooks: HookTable(hooks),
    })?;
    out.push('\n');
    Ok(out)
}

fn parse_object(existing: &str, path: &Path) -> Result<serde_json::Map<String, Value>> {
    if existing.trim().is_empty() {
        return Ok(serde_json::Map::new());
    }
    match serde_json::from_str::<Value>(existing) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(HooksError::InvalidSettings(path.to_path_buf())),
    }
}

/// Whether an existing settings file already declares a `hooks` object.
pub fn declares_hooks(existing: &str, path: &Path) -> Result<bool> {
    let map = parse_object(existing, path)?;
    Ok(map.get("hooks").is_some_and(|h| h.is_object()))
}

/// Replace the `hooks` key of an existing settings file with the rendered
/// one, keeping every other key where it was.
pub fn merge(existing: &str, rendered: &str, path: &Path) -> Result<String> {
    let mut map = parse_object(existing, path)?;
    let rendered: Value = serde_json::from_str(rendered)?;
    let hooks = rendered.get("hooks").cloned().unwrap_or(Value::Null);
    map.insert("hooks".to_string(), hooks);
    let mut out = serde_json::to_string_pretty(&Value::Object(map))?;
    out.push('\n');
    Ok(out)
}
