//! File-path helpers.

use std::path::Path;

/// Derive a component display name from a file name.
///
/// `src/Button.jsx` gives `Button`; an `index` module takes the name of its
/// directory (`button/index.js` gives `button`).
pub fn display_name_from_path(path: &str) -> Option<String> {
    let path = Path::new(path);
    let stem = path.file_stem()?.to_str()?;
    // `Button.test.jsx` and similar keep only the first segment.
    let stem = stem.split('.').next().unwrap_or(stem);
    if stem == "index" {
        let parent = path.parent()?.file_name()?.to_str()?;
        return (!parent.is_empty()).then(|| parent.to_string());
    }
    (!stem.is_empty()).then(|| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(display_name_from_path("src/Button.jsx").as_deref(), Some("Button"));
        assert_eq!(display_name_from_path("a/button/index.js").as_deref(), Some("button"));
        assert_eq!(display_name_from_path("Card.stories.js").as_deref(), Some("Card"));
        assert_eq!(display_name_from_path("index.js"), None);
        assert_eq!(display_name_from_path(""), None);
    }
}
