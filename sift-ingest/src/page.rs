//! Page boundaries in rendered statement text

/// Marker line inserted between rendered pages
pub const PAGE_BREAK: &str = "--- PAGE BREAK ---";

/// Join per-page text the way the renderer hands documents to the parsers.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(page.as_ref());
        out.push('\n');
        out.push_str(PAGE_BREAK);
        out.push('\n');
    }
    out
}

/// Replace form feeds (pdftotext's page separator) with the page-break marker.
pub fn normalize_page_breaks(text: &str) -> String {
    if !text.contains('\x0c') {
        return text.to_string();
    }
    let pages: Vec<&str> = text.split('\x0c').filter(|p| !p.trim().is_empty()).collect();
    join_pages(&pages)
}

/// Byte offsets at which a page-break marker starts
pub fn page_break_offsets(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.match_indices(PAGE_BREAK).map(|(i, _)| i)
}
