//! Pure rendering of a [`GenerationPlan`] into file contents.
//!
//! Each TypeScript file is a [`TsFile`]: a header, a list of named
//! [`Fragment`]s, and an optional footer. Fragments are rendered by small
//! functions that can be tested on their own; [`TsFile::assemble`] joins them
//! with one blank line between pieces. Nothing here touches the filesystem
//! or the clock, so identical plans give byte-identical output.

pub mod index_ts;
pub mod lib_ts;
pub mod session_ts;
pub mod settings;

use crate::error::Result;
use crate::plan::{ArtifactKind, GenerationPlan, OutputArtifact};

/// A named, independently rendered piece of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub body: String,
}

impl Fragment {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// A generated TypeScript file as a composition of fragments.
#[derive(Debug, Clone, Default)]
pub struct TsFile {
    pub header: String,
    pub fragments: Vec<Fragment>,
    pub footer: Option<String>,
}

impl TsFile {
    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.name == name)
    }

    /// Join all pieces. Each piece is trimmed of surrounding newlines and
    /// separated by exactly one blank line; the file ends with one newline.
    pub fn assemble(&self) -> String {
        let pieces = std::iter::once(self.header.as_str())
            .chain(self.fragments.iter().map(|f| f.body.as_str()))
            .chain(self.footer.as_deref())
            .map(|p| p.trim_matches('\n'))
            .filter(|p| !p.is_empty());

        let mut out = String::new();
        for piece in pieces {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(piece);
        }
        out.push('\n');
        out
    }
}

/// Render every artifact for `plan`, in write order.
pub fn render(plan: GenerationPlan) -> Result<Vec<OutputArtifact>> {
    tracing::debug!(hooks = plan.hooks.len(), project = %plan.project.project_type, "rendering");
    let artifacts = vec![
        OutputArtifact {
            kind: ArtifactKind::IndexTs,
            content: index_ts::build(&plan).assemble(),
        },
        OutputArtifact {
            kind: ArtifactKind::LibTs,
            content: lib_ts::build().assemble(),
        },
        OutputArtifact {
            kind: ArtifactKind::SessionTs,
            content: session_ts::build(&plan).assemble(),
        },
        OutputArtifact {
            kind: ArtifactKind::Settings,
            content: settings::render(&plan.hooks)?,
        },
    ];
    Ok(artifacts)
}

/// Indent every non-empty line of `text` by `spaces`.
pub(crate) fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{pad}{l}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
