use std::path::Path;

use pdfium_render::prelude::*;

use crate::types::{FailureKind, JobError, PageChar, PageText, Region};

/// Produces the positioned character stream of every page of a document.
///
/// Implementations live on the worker thread for the whole engine lifetime;
/// they are constructed there and never cross threads.
pub trait PageScanner {
    fn scan_pages(&self, path: &Path) -> Result<Vec<PageText>, JobError>;
}

/// Production scanner on top of the pdfium library.
pub struct PdfiumScanner {
    pdfium: Pdfium,
}

impl PdfiumScanner {
    /// Binds the system pdfium library, falling back to one shipped next to
    /// the executable.
    pub fn new() -> Result<Self, JobError> {
        let bindings = Pdfium::bind_to_system_library()
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            })
            .map_err(|err| {
                JobError::new(FailureKind::Backend, format!("pdfium unavailable: {err}"))
            })?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PageScanner for PdfiumScanner {
    fn scan_pages(&self, path: &Path) -> Result<Vec<PageText>, JobError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|err| JobError::new(FailureKind::OpenDocument, err.to_string()))?;

        let mut pages = Vec::new();
        for (page_index, page) in document.pages().iter().enumerate() {
            let number = (page_index + 1) as u32;
            let text = page.text().map_err(|err| {
                JobError::new(FailureKind::TextScan, format!("page {number}: {err}"))
            })?;
            let mut chars = Vec::new();
            for char_obj in text.chars().iter() {
                let Some(ch) = char_obj.unicode_char() else {
                    continue;
                };
                let bounds = char_obj.loose_bounds().map_err(|err| {
                    JobError::new(FailureKind::TextScan, format!("page {number}: {err}"))
                })?;
                chars.push(PageChar {
                    ch,
                    bounds: Region::new(
                        bounds.left().value,
                        bounds.bottom().value,
                        bounds.right().value,
                        bounds.top().value,
                    ),
                });
            }
            pages.push(PageText { number, chars });
        }
        Ok(pages)
    }
}
