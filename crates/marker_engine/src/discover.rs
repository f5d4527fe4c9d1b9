use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collects every regular file under `root` with a `pdf`
/// extension (ASCII case ignored, filename otherwise untouched).
///
/// Order is the traversal's own and is stable across repeat calls on an
/// unchanged tree. An empty result is not an error; the batch driver decides
/// what to tell the user.
pub fn discover_pdfs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect()
}
