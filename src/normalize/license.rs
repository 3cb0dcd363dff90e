use crate::model::DEFAULT_LICENSE;

const KNOWN_LICENSES: &[&str] = &["CC BY-SA 4.0", "CC BY-SA 3.0"];

/// Canonical content license for whatever license indicator a page exposed
///
/// Text mentioning a known license collapses to that license; any other
/// non-blank text passes through trimmed; no indicator means the default.
pub fn canonical_license(indicator: Option<&str>) -> String {
    let text = match indicator.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => text,
        None => return DEFAULT_LICENSE.to_string(),
    };

    KNOWN_LICENSES
        .iter()
        .find(|known| text.contains(*known))
        .map_or_else(|| text.to_string(), |known| known.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_licenses_pass_as_is() {
        assert_eq!(canonical_license(Some("CC BY-SA 4.0")), "CC BY-SA 4.0");
        assert_eq!(canonical_license(Some("CC BY-SA 3.0")), "CC BY-SA 3.0");
    }

    #[test]
    fn test_known_license_inside_text() {
        assert_eq!(
            canonical_license(Some("Content licensed under CC BY-SA 3.0 by the author")),
            "CC BY-SA 3.0"
        );
    }

    #[test]
    fn test_other_license_passes_verbatim() {
        assert_eq!(canonical_license(Some(" CC BY-SA 2.5 ")), "CC BY-SA 2.5");
    }

    #[test]
    fn test_missing_license_defaults() {
        assert_eq!(canonical_license(None), "CC BY-SA 4.0");
        assert_eq!(canonical_license(Some("  ")), "CC BY-SA 4.0");
    }
}
