//! Case-insensitive, hyphenation-tolerant keyword search over page text.
//!
//! Matching runs on a normalized view of the page's character stream:
//! lowercased, whitespace runs collapsed to single spaces, and a hyphen
//! sitting directly before a line break removed together with the break so
//! the two word halves join. Soft hyphens are always invisible. A keyword
//! containing hyphens is additionally tried with them elided, so a query for
//! either `failsafe` or `Fail-Safe` finds text wrapped as `Fail-⏎Safe`.
//! A hyphen in the middle of a line is kept, so `foo` never matches `f-oo`.

use crate::types::{PageChar, PageText, Region};

const SOFT_HYPHEN: char = '\u{00AD}';

/// One entry of the normalized stream. `source` points back into
/// `PageText::chars`; synthesized spaces have no source.
struct NormChar {
    ch: char,
    source: Option<usize>,
}

/// Finds every occurrence of `keyword` on `page` and returns one region per
/// line run the occurrence covers. A match wrapped across a line break
/// therefore contributes one region per line, and each region counts as one
/// hit.
pub fn find_keyword_regions(page: &PageText, keyword: &str) -> Vec<Region> {
    let needle = normalize_keyword(keyword);
    if needle.is_empty() {
        return Vec::new();
    }

    let text = normalize_page(&page.chars);
    let hay: Vec<char> = text.iter().map(|entry| entry.ch).collect();

    let mut spans: Vec<(usize, usize)> = Vec::new();
    for variant in keyword_variants(&needle) {
        for (start, end) in scan_occurrences(&hay, &variant) {
            // Map the normalized window back to source characters.
            let mut sources = text[start..end].iter().filter_map(|entry| entry.source);
            let Some(first) = sources.next() else { continue };
            let last = sources.last().unwrap_or(first);
            spans.push((first, last));
        }
    }
    spans.sort_unstable();
    spans.dedup();

    let mut regions = Vec::new();
    for (first, last) in spans {
        regions.extend(line_runs(&page.chars[first..=last]));
    }
    regions
}

/// Non-overlapping occurrences of `needle` in `hay`, left to right.
fn scan_occurrences(hay: &[char], needle: &[char]) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    if needle.is_empty() || hay.len() < needle.len() {
        return found;
    }
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            found.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    found
}

/// Lowercased keyword with whitespace runs collapsed to single spaces.
fn normalize_keyword(keyword: &str) -> Vec<char> {
    let mut out = Vec::new();
    for word in keyword.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// The needle as given plus, when it carries hyphens, a variant with them
/// elided (the dehyphenated page text has lost its line-end hyphens).
fn keyword_variants(needle: &[char]) -> Vec<Vec<char>> {
    let mut variants = vec![needle.to_vec()];
    if needle.contains(&'-') {
        let elided: Vec<char> = needle.iter().copied().filter(|&ch| ch != '-').collect();
        if !elided.is_empty() && elided != needle {
            variants.push(elided);
        }
    }
    variants
}

fn normalize_page(chars: &[PageChar]) -> Vec<NormChar> {
    let mut out: Vec<NormChar> = Vec::with_capacity(chars.len());
    let mut pending_space = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i].ch;
        if ch == SOFT_HYPHEN {
            i += 1;
            continue;
        }
        if ch.is_whitespace() {
            pending_space = true;
            i += 1;
            continue;
        }
        // A hyphen directly before a line break joins the word halves.
        if ch == '-' && line_break_follows(chars, i + 1) {
            i += 1;
            while i < chars.len() && matches!(chars[i].ch, '\r' | '\n') {
                i += 1;
            }
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(NormChar {
                ch: ' ',
                source: None,
            });
        }
        pending_space = false;
        for lower in ch.to_lowercase() {
            out.push(NormChar {
                ch: lower,
                source: Some(i),
            });
        }
        i += 1;
    }
    out
}

fn line_break_follows(chars: &[PageChar], mut i: usize) -> bool {
    // Skip soft hyphens the backend may interleave.
    while i < chars.len() && chars[i].ch == SOFT_HYPHEN {
        i += 1;
    }
    matches!(chars.get(i), Some(entry) if entry.ch == '\r' || entry.ch == '\n')
}

/// Groups a matched character slice into per-line unions of their boxes.
fn line_runs(chars: &[PageChar]) -> Vec<Region> {
    let mut runs: Vec<Region> = Vec::new();
    for entry in chars {
        if entry.ch.is_whitespace() || entry.ch == SOFT_HYPHEN {
            continue;
        }
        match runs.last_mut() {
            Some(run) if same_line(run, &entry.bounds) => *run = run.union(entry.bounds),
            _ => runs.push(entry.bounds),
        }
    }
    runs
}

/// Two boxes sit on the same line when they overlap vertically by at least
/// half the smaller height.
fn same_line(a: &Region, b: &Region) -> bool {
    let overlap = a.y1.min(b.y1) - a.y0.max(b.y0);
    let min_height = a.height().min(b.height());
    if min_height <= f32::EPSILON {
        return (a.y0 - b.y0).abs() <= 1.0;
    }
    overlap >= 0.5 * min_height
}
