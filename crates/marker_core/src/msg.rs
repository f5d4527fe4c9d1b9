use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a source folder in the folder dialog.
    SourceFolderPicked(PathBuf),
    /// User picked an output folder, or cleared it back to "same as source".
    DestFolderPicked(Option<PathBuf>),
    /// A keyword file was read successfully by the shell.
    KeywordsLoaded(Vec<String>),
    /// Reading the keyword file failed; carries the error text.
    KeywordFileFailed(String),
    /// User edited the comma-separated keyword box (raw text).
    KeywordsEdited(String),
    /// Restore folders and keywords persisted by a previous session.
    SessionRestored(crate::SessionSnapshot),
    /// User clicked Start.
    StartClicked,
    /// Worker discovered the batch; `total` files will be processed.
    BatchStarted { total: usize },
    /// Worker found nothing to do under the source folder.
    NoFilesFound,
    /// One file finished: hit count on success, error text on failure.
    FileCompleted {
        index: usize,
        name: String,
        outcome: Result<usize, String>,
    },
    /// Worker processed the whole batch.
    BatchFinished { total: usize },
    /// UI tick; drives nothing in the state machine.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
