//! Marker engine: PDF discovery, keyword search, and highlight stamping.
mod engine;
mod dest;
mod discover;
mod highlight;
mod keywords;
mod persist;
mod scan;
mod search;
mod stamp;
mod types;

pub use engine::{BackendFactory, EngineBackend, EngineHandle};
pub use dest::output_path_for;
pub use discover::discover_pdfs;
pub use highlight::highlight_file;
pub use keywords::{load_keyword_file, KeywordFileError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use scan::{PageScanner, PdfiumScanner};
pub use search::find_keyword_regions;
pub use stamp::{HighlightStamper, LopdfStamper};
pub use types::{
    BatchSpec, EngineEvent, FailureKind, JobError, PageChar, PageMarks, PageText, Region,
};
