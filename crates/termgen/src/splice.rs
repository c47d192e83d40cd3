//! Replacing the generated region of a target file.

use std::sync::LazyLock;

use regex::Regex;

/// Opens the generated region of a target file.
pub const START_MARKER: &str = "//--- start generated text ---//";
/// Closes the generated region of a target file.
pub const END_MARKER: &str = "//--- end generated text ---//";

static REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(START_MARKER),
        regex::escape(END_MARKER)
    ))
    .expect("marker pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    #[error("no `//--- start generated text ---//` ... `//--- end generated text ---//` region found")]
    MissingMarkers,
    #[error("more than one generated region found; exactly one is supported")]
    MultipleRegions,
    #[error("generated text contains a region marker")]
    MarkerInBlock,
}

/// Replaces the marker-delimited region of `text`, markers included, with
/// `block` wrapped in fresh markers. Text outside the region is kept
/// byte for byte.
///
/// A `block` containing either marker is rejected.
pub fn splice_generated_region(text: &str, block: &str) -> Result<String, SpliceError> {
    if block.contains(START_MARKER) || block.contains(END_MARKER) {
        return Err(SpliceError::MarkerInBlock);
    }
    let starts = text.matches(START_MARKER).count();
    let ends = text.matches(END_MARKER).count();
    if starts > 1 || ends > 1 {
        return Err(SpliceError::MultipleRegions);
    }
    let region = REGION.find(text).ok_or(SpliceError::MissingMarkers)?;

    let mut out = String::with_capacity(text.len() + block.len());
    out.push_str(&text[..region.start()]);
    out.push_str(START_MARKER);
    out.push('\n');
    out.push_str(block);
    if !block.is_empty() && !block.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(END_MARKER);
    out.push_str(&text[region.end()..]);
    Ok(out)
}
