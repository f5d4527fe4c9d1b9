use std::path::Path;

use crate::{AppState, BatchSpec, Effect, Msg, Notice, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourceFolderPicked(folder) => {
            state.set_source_folder(folder);
            Vec::new()
        }
        Msg::DestFolderPicked(folder) => {
            state.set_dest_folder(folder);
            Vec::new()
        }
        Msg::KeywordsLoaded(keywords) => {
            state.set_keywords(keywords);
            Vec::new()
        }
        Msg::KeywordFileFailed(message) => {
            state.set_notice(Notice::KeywordFile(message));
            Vec::new()
        }
        Msg::KeywordsEdited(raw) => {
            state.set_keywords(parse_keywords(&raw));
            Vec::new()
        }
        Msg::SessionRestored(snapshot) => {
            state.restore(snapshot);
            Vec::new()
        }
        Msg::StartClicked => {
            // Only one batch at a time; the shell also disables the button.
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            let Some(source) = state.source_folder() else {
                state.set_notice(Notice::MissingSource);
                return (state, Vec::new());
            };
            let source = source.to_path_buf();
            if state.keywords().is_empty() {
                state.set_notice(Notice::MissingKeywords);
                return (state, Vec::new());
            }
            let dest_base = state
                .dest_folder()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source.clone());
            let spec = BatchSpec {
                source,
                dest_base,
                keywords: state.keywords().to_vec(),
            };
            state.begin_scanning();
            vec![Effect::StartBatch(spec)]
        }
        Msg::BatchStarted { total } => {
            state.begin_running(total);
            Vec::new()
        }
        Msg::NoFilesFound => {
            state.set_notice(Notice::NoPdfsFound);
            state.back_to_idle();
            Vec::new()
        }
        Msg::FileCompleted {
            index,
            name,
            outcome,
        } => {
            let line = match outcome {
                Ok(hits) => format!("✓ {name}: {hits} hit(s)"),
                Err(message) => format!("✗ Error {name}: {message}"),
            };
            state.append_log(line);
            state.apply_progress(index);
            Vec::new()
        }
        Msg::BatchFinished { total } => {
            state.finish(total);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Splits comma-separated keyword text into trimmed, non-empty entries,
/// preserving order and duplicates.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
