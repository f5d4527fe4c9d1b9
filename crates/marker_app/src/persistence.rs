//! Session settings persistence: last-used folders and keywords, stored as
//! RON next to the executable's working directory. Missing or unreadable
//! settings degrade to defaults, never to an error dialog.

use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::{engine_error, engine_info, engine_warn};
use marker_core::SessionSnapshot;
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = ".marker_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    source_folder: Option<PathBuf>,
    dest_folder: Option<PathBuf>,
    keywords: Vec<String>,
}

pub(crate) fn settings_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(SETTINGS_FILENAME)
}

pub(crate) fn load_session(path: &Path) -> Option<SessionSnapshot> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            engine_warn!("Failed to read session settings from {:?}: {}", path, err);
            return None;
        }
    };

    let session: PersistedSession = match ron::from_str(&content) {
        Ok(session) => session,
        Err(err) => {
            engine_warn!("Failed to parse session settings from {:?}: {}", path, err);
            return None;
        }
    };

    engine_info!("Restored session settings from {:?}", path);
    Some(SessionSnapshot {
        source_folder: session.source_folder,
        dest_folder: session.dest_folder,
        keywords: session.keywords,
    })
}

pub(crate) fn save_session(path: &Path, snapshot: &SessionSnapshot) {
    let session = PersistedSession {
        source_folder: snapshot.source_folder.clone(),
        dest_folder: snapshot.dest_folder.clone(),
        keywords: snapshot.keywords.clone(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&session, pretty) {
        Ok(text) => text,
        Err(err) => {
            engine_error!("Failed to serialize session settings: {}", err);
            return;
        }
    };

    if let Err(err) = fs::write(path, content) {
        engine_error!("Failed to write session settings to {:?}: {}", path, err);
    }
}
