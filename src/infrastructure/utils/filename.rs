use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strips the original base name down to word characters and hyphens,
/// collapsing whitespace runs to single hyphens.
pub fn sanitize_stem(name: &str) -> String {
    let stem = name.split('.').next().unwrap_or(name);
    let cleaned = NON_WORD.replace_all(stem, "");
    let cleaned = WHITESPACE.replace_all(cleaned.trim(), "-");

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.into_owned()
    }
}

fn extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
        _ => "bin",
    }
}

/// Collision-resistant object name: upload timestamp (millis) plus the
/// sanitized original stem and its extension, e.g. `1717171717171-my-shot.png`.
pub fn storage_filename(original_name: &str, now_millis: i64) -> String {
    format!("{}-{}.{}", now_millis, sanitize_stem(original_name), extension(original_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(sanitize_stem("My Cool  Photo!.png"), "My-Cool-Photo");
        assert_eq!(sanitize_stem("shot(1).jpeg"), "shot1");
    }

    #[test]
    fn stem_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_stem("???.png"), "file");
    }

    #[test]
    fn filename_keeps_original_extension() {
        let name = storage_filename("hero image.webp", 1_717_000_000_000);
        assert_eq!(name, "1717000000000-hero-image.webp");
    }

    #[test]
    fn filename_matches_upload_contract() {
        let re = Regex::new(r"^\d+-[\w-]+\.\w+$").unwrap();
        for original in ["a b c.png", "weird~!name.gif", "no-extension", "..png"] {
            let name = storage_filename(original, 1_717_000_000_000);
            assert!(re.is_match(&name), "{name} should match the contract");
        }
    }
}
