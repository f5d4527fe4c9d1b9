use std::path::{Path, PathBuf};

/// Maps a discovered file to its output location.
///
/// With a distinct destination base the output mirrors the file's path
/// relative to the source folder. When the base *is* the source folder the
/// document is annotated in place.
pub fn output_path_for(file: &Path, source: &Path, dest_base: &Path) -> PathBuf {
    if dest_base == source {
        return file.to_path_buf();
    }
    match file.strip_prefix(source) {
        Ok(relative) => dest_base.join(relative),
        // File outside the source tree: keep at least its name.
        Err(_) => match file.file_name() {
            Some(name) => dest_base.join(name),
            None => dest_base.to_path_buf(),
        },
    }
}
