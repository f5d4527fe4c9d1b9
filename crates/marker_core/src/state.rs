use std::path::{Path, PathBuf};

use crate::view_model::AppViewModel;

/// Where the interactive session currently is.
///
/// `Scanning` covers the window between the start action and the worker's
/// first event: the configuration snapshot has been handed off, discovery is
/// in flight, and the start action is no longer accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Scanning,
    Running,
}

/// A one-shot message for the user, shown by the shell as a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MissingSource,
    MissingKeywords,
    NoPdfsFound,
    KeywordFile(String),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::MissingSource => "No source",
            Notice::MissingKeywords => "No keywords",
            Notice::NoPdfsFound => "No PDFs",
            Notice::KeywordFile(_) => "Keyword file",
        }
    }

    pub fn text(&self) -> String {
        match self {
            Notice::MissingSource => "Choose a source folder with PDFs first.".to_string(),
            Notice::MissingKeywords => {
                "Load or enter at least one keyword to highlight.".to_string()
            }
            Notice::NoPdfsFound => "Found no PDFs in the selected folder.".to_string(),
            Notice::KeywordFile(message) => message.clone(),
        }
    }

    /// Informational notices are not user mistakes.
    pub fn informational(&self) -> bool {
        matches!(self, Notice::NoPdfsFound)
    }
}

/// The configuration half of the state, as persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub source_folder: Option<PathBuf>,
    pub dest_folder: Option<PathBuf>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    source_folder: Option<PathBuf>,
    dest_folder: Option<PathBuf>,
    keywords: Vec<String>,
    session: SessionState,
    progress_done: usize,
    progress_total: usize,
    log: Vec<String>,
    summary: Option<String>,
    notice: Option<Notice>,
    settings_dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            source_folder: self.source_folder.clone(),
            dest_folder: self.dest_folder.clone(),
            keyword_count: self.keywords.len(),
            progress_done: self.progress_done,
            progress_total: self.progress_total,
            log: self.log.clone(),
            summary: self.summary.clone(),
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn source_folder(&self) -> Option<&Path> {
        self.source_folder.as_deref()
    }

    pub fn dest_folder(&self) -> Option<&Path> {
        self.dest_folder.as_deref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Takes the pending notice, if any, leaving none behind.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// True once per batch of configuration edits; the shell persists the
    /// session snapshot when it observes `true`.
    pub fn consume_settings_dirty(&mut self) -> bool {
        std::mem::take(&mut self.settings_dirty)
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source_folder: self.source_folder.clone(),
            dest_folder: self.dest_folder.clone(),
            keywords: self.keywords.clone(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: SessionSnapshot) {
        self.source_folder = snapshot.source_folder;
        self.dest_folder = snapshot.dest_folder;
        self.keywords = snapshot.keywords;
    }

    pub(crate) fn set_source_folder(&mut self, folder: PathBuf) {
        self.source_folder = Some(folder);
        self.settings_dirty = true;
    }

    pub(crate) fn set_dest_folder(&mut self, folder: Option<PathBuf>) {
        self.dest_folder = folder;
        self.settings_dirty = true;
    }

    pub(crate) fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
        self.settings_dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub(crate) fn begin_scanning(&mut self) {
        self.session = SessionState::Scanning;
    }

    pub(crate) fn begin_running(&mut self, total: usize) {
        self.session = SessionState::Running;
        self.progress_done = 0;
        self.progress_total = total;
        self.log.clear();
        self.summary = None;
    }

    pub(crate) fn back_to_idle(&mut self) {
        self.session = SessionState::Idle;
    }

    pub(crate) fn append_log(&mut self, line: String) {
        self.log.push(line);
    }

    /// Progress is monotone and never exceeds the total.
    pub(crate) fn apply_progress(&mut self, index: usize) {
        self.progress_done = index.max(self.progress_done).min(self.progress_total);
    }

    pub(crate) fn finish(&mut self, total: usize) {
        self.summary = Some(format!("Finished {total} PDF(s)."));
        self.session = SessionState::Idle;
    }
}
