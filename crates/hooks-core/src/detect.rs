use crate::types::ProjectType;
use std::path::Path;

/// Marker files checked in order; the first hit decides the project type.
const MARKERS: &[(&str, ProjectType)] = &[
    ("package.json", ProjectType::Node),
    ("requirements.txt", ProjectType::Python),
    ("pyproject.toml", ProjectType::Python),
    ("Gemfile", ProjectType::Ruby),
    ("go.mod", ProjectType::Go),
];

/// Guess the project type from marker files in `root`.
pub fn detect_project_type(root: &Path) -> ProjectType {
    let detected = MARKERS
        .iter()
        .find(|(marker, _)| root.join(marker).is_file())
        .map(|(_, project)| *project)
        .unwrap_or(ProjectType::Other);
    tracing::debug!(root = %root.display(), project = %detected, "detected project type");
    detected
}
