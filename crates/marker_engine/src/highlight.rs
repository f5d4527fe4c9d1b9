use std::path::Path;

use engine_logging::engine_debug;

use crate::scan::PageScanner;
use crate::search::find_keyword_regions;
use crate::stamp::HighlightStamper;
use crate::types::{FailureKind, JobError, PageMarks};

/// Processes one document end to end: scan pages, match every keyword in
/// supplied order, stamp a highlight per matched region, write the copy.
///
/// Returns the hit count: the number of regions highlighted across the whole
/// document. Every failure comes back as a `JobError`; nothing here aborts
/// the batch, and a failed document leaves no output file.
pub fn highlight_file(
    scanner: &dyn PageScanner,
    stamper: &dyn HighlightStamper,
    src: &Path,
    dest: &Path,
    keywords: &[String],
) -> Result<usize, JobError> {
    if !src.is_file() {
        return Err(JobError::new(
            FailureKind::NotFound,
            src.display().to_string(),
        ));
    }

    let pages = scanner.scan_pages(src)?;

    let mut marks = Vec::new();
    let mut hits = 0;
    for page in &pages {
        let mut regions = Vec::new();
        for keyword in keywords {
            regions.extend(find_keyword_regions(page, keyword));
        }
        if regions.is_empty() {
            continue;
        }
        hits += regions.len();
        marks.push(PageMarks {
            page: page.number,
            regions,
        });
    }
    engine_debug!(
        "{}: {} hit(s) across {} page(s)",
        src.display(),
        hits,
        pages.len()
    );

    stamper.stamp(src, dest, &marks)?;
    Ok(hits)
}
