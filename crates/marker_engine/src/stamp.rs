use std::path::Path;

use lopdf::{dictionary, Document, Object, ObjectId};

use crate::persist::AtomicFileWriter;
use crate::types::{FailureKind, JobError, PageMarks, Region};

/// Full-intensity red and green, zero blue.
const HIGHLIGHT_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

/// Annotation flag bit 3: print the annotation along with the page.
const FLAG_PRINT: i64 = 4;

/// Writes the highlighted copy of a document.
pub trait HighlightStamper {
    fn stamp(&self, src: &Path, dest: &Path, marks: &[PageMarks]) -> Result<(), JobError>;
}

/// Production stamper: re-opens the document with lopdf, appends one
/// `/Highlight` annotation per region to the owning page, compacts the
/// object table, compresses streams, and persists atomically. A document
/// with zero matches is still written, unchanged apart from the cleanup
/// pass.
pub struct LopdfStamper;

impl HighlightStamper for LopdfStamper {
    fn stamp(&self, src: &Path, dest: &Path, marks: &[PageMarks]) -> Result<(), JobError> {
        let mut doc = Document::load(src)
            .map_err(|err| JobError::new(FailureKind::OpenDocument, err.to_string()))?;

        let pages = doc.get_pages();
        for page_marks in marks {
            let Some(&page_id) = pages.get(&page_marks.page) else {
                return Err(JobError::new(
                    FailureKind::Annotate,
                    format!("document has no page {}", page_marks.page),
                ));
            };
            let annot_ids: Vec<ObjectId> = page_marks
                .regions
                .iter()
                .map(|region| doc.add_object(highlight_annotation(region)))
                .collect();
            attach_annotations(&mut doc, page_id, annot_ids)
                .map_err(|err| JobError::new(FailureKind::Annotate, err.to_string()))?;
        }

        doc.renumber_objects();
        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|err| JobError::new(FailureKind::Save, err.to_string()))?;

        write_atomically(dest, &bytes)
    }
}

fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<(), JobError> {
    let parent = dest.parent().filter(|p| !p.as_os_str().is_empty());
    let Some(parent) = parent else {
        return Err(JobError::new(
            FailureKind::Save,
            format!("no parent directory for {}", dest.display()),
        ));
    };
    let Some(filename) = dest.file_name().and_then(|n| n.to_str()) else {
        return Err(JobError::new(
            FailureKind::Save,
            format!("unusable output filename {}", dest.display()),
        ));
    };
    AtomicFileWriter::new(parent.to_path_buf())
        .write(filename, bytes)
        .map_err(|err| JobError::new(FailureKind::Save, err.to_string()))?;
    Ok(())
}

fn highlight_annotation(region: &Region) -> Object {
    let Region { x0, y0, x1, y1 } = *region;
    let [red, green, blue] = HIGHLIGHT_COLOR;
    Object::Dictionary(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Highlight",
        "Rect" => vec![
            Object::Real(x0.into()),
            Object::Real(y0.into()),
            Object::Real(x1.into()),
            Object::Real(y1.into()),
        ],
        // Quad order per viewer convention: upper-left, upper-right,
        // lower-left, lower-right.
        "QuadPoints" => vec![
            Object::Real(x0.into()),
            Object::Real(y1.into()),
            Object::Real(x1.into()),
            Object::Real(y1.into()),
            Object::Real(x0.into()),
            Object::Real(y0.into()),
            Object::Real(x1.into()),
            Object::Real(y0.into()),
        ],
        "C" => vec![
            Object::Real(red.into()),
            Object::Real(green.into()),
            Object::Real(blue.into()),
        ],
        "F" => FLAG_PRINT,
    })
}

/// Appends annotation references to the page's `/Annots`, which may be
/// missing, inline, or behind an indirect reference.
fn attach_annotations(
    doc: &mut Document,
    page_id: ObjectId,
    annot_ids: Vec<ObjectId>,
) -> Result<(), lopdf::Error> {
    let refs: Vec<Object> = annot_ids.into_iter().map(Object::Reference).collect();

    let indirect_annots = doc
        .get_dictionary(page_id)?
        .get(b"Annots")
        .ok()
        .and_then(|obj| match obj {
            Object::Reference(id) => Some(*id),
            _ => None,
        });

    if let Some(array_id) = indirect_annots {
        doc.get_object_mut(array_id)?.as_array_mut()?.extend(refs);
        return Ok(());
    }

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    if let Ok(Object::Array(existing)) = page.get_mut(b"Annots") {
        existing.extend(refs);
        return Ok(());
    }
    page.set("Annots", Object::Array(refs));
    Ok(())
}
