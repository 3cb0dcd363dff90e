/// Strips scheme, host, query and fragment, leaving the path
fn path_of(href: &str) -> &str {
    let href = href.trim();
    let without_origin = match href.find("://") {
        Some(scheme_end) => {
            let rest = &href[scheme_end + 3..];
            rest.find('/').map_or("", |i| &rest[i..])
        }
        None => href,
    };
    let end = without_origin
        .find(&['?', '#'][..])
        .unwrap_or(without_origin.len());
    &without_origin[..end]
}

/// Numeric path segment following `marker`
///
/// `/questions/11227809/why-is-it-faster` with marker `questions` gives
/// 11227809; `/users/22656/jon-skeet` with marker `users` gives 22656.
pub fn numeric_segment_after(href: &str, marker: &str) -> Option<u64> {
    let mut segments = path_of(href).split('/').filter(|s| !s.is_empty());
    segments.find(|s| *s == marker)?;
    segments.next()?.parse().ok()
}

/// Final non-empty path segment, e.g. the slug of a collective link
pub fn last_segment(href: &str) -> Option<&str> {
    path_of(href).split('/').filter(|s| !s.is_empty()).last()
}
