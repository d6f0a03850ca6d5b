//! Output path construction and filename sanitization

use std::path::{Path, PathBuf};

/// Characters that are invalid in filenames on at least one supported platform
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Longest filename component we will emit, in characters
const MAX_COMPONENT_LEN: usize = 150;

/// Replace filesystem-hostile characters so a catalog-provided name is safe
/// to use as a single path component.
///
/// Forbidden characters and control characters become underscores; leading
/// and trailing whitespace and dots are trimmed; overly long names are
/// truncated. The result never contains a path separator.
pub fn sanitize_filename(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    out = out.trim().trim_matches('.').trim().to_string();
    if out.chars().count() > MAX_COMPONENT_LEN {
        out = out.chars().take(MAX_COMPONENT_LEN).collect();
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// Render the output path for one episode from the configured template.
///
/// Placeholders `{podcast}`, `{episode_name}`, `{release_date}`, and `{ext}`
/// are substituted; name-derived values are sanitized per component. The
/// rendered template is joined under `root_dir`.
pub fn render_output_path(
    root_dir: &Path,
    template: &str,
    podcast: &str,
    episode_name: &str,
    release_date: &str,
    ext: &str,
) -> PathBuf {
    let rendered = template
        .replace("{podcast}", &sanitize_filename(podcast))
        .replace("{episode_name}", &sanitize_filename(episode_name))
        .replace("{release_date}", &sanitize_filename(release_date))
        .replace("{ext}", ext);
    root_dir.join(rendered)
}
