//! Marker-based language detection
//!
//! Two languages are supported. Spanish is recognized by the presence of any
//! of a fixed list of markers; everything else is English. Markers are tested
//! in declaration order and the first hit wins, so the list order is part of
//! the output contract.

use crate::types::Lang;

/// Spanish markers, tested against the lower-cased text padded with spaces
pub const SPANISH_MARKERS: [&str; 9] = [
    " el ", " la ", " de ", " que ", " los ", "las ", "ñ", "¿", "¡",
];

/// Classify `text`, honouring an explicit `hint`
///
/// A concrete hint (`es` or `en`) is returned unchanged without looking at
/// the text. `None` or `Auto` runs the marker test.
pub fn detect(text: &str, hint: Option<Lang>) -> Lang {
    match hint {
        Some(lang @ (Lang::Es | Lang::En)) => lang,
        _ => detect_from_markers(text),
    }
}

fn detect_from_markers(text: &str) -> Lang {
    let padded = format!(" {} ", text.to_lowercase());
    if SPANISH_MARKERS.iter().any(|marker| padded.contains(marker)) {
        Lang::Es
    } else {
        Lang::En
    }
}
