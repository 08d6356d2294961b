use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

/// `#` then ASCII `A`..=`z` (brackets, caret, underscore and backtick
/// included), Latin-1 letters U+00C0..=U+00FE, or digits.
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#[A-z\x{C0}-\x{FE}0-9]+").expect("hashtag pattern is valid")
});

/// Lowercased, `#`-less, deduplicated hashtags in order of first appearance.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HASHTAG
        .find_iter(content)
        .map(|m| m.as_str()[1..].to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_2024() {
        assert_eq!(extract_hashtags("Hello #World #world #2024!"), ["world", "2024"]);
    }

    #[test]
    fn case_variants_collapse() {
        assert_eq!(extract_hashtags("#Foo then #foo then #FOO"), ["foo"]);
    }

    #[test]
    fn nothing_to_tag() {
        assert!(extract_hashtags("").is_empty());
        assert!(extract_hashtags("no tags here").is_empty());
        assert!(extract_hashtags("a lone # and #! and # space").is_empty());
    }

    #[test]
    fn accented_letters_are_part_of_the_tag() {
        assert_eq!(extract_hashtags("#Café au lait #ÉTÉ"), ["café", "été"]);
    }

    #[test]
    fn the_ascii_range_keeps_underscores() {
        assert_eq!(extract_hashtags("#rust_lang"), ["rust_lang"]);
    }

    #[test]
    fn tags_need_no_leading_space() {
        assert_eq!(extract_hashtags("mid#word ##double"), ["word", "double"]);
    }

    #[test]
    fn punctuation_ends_a_tag() {
        assert_eq!(extract_hashtags("#rust, #tokio. #axum-web"), ["rust", "tokio", "axum"]);
    }

    #[test]
    fn tagging_is_idempotent() {
        for content in [
            "Hello #World #world #2024!",
            "#Café #café #CAFÉ and #Ümlaut",
            "#a#b#c #A",
            "nothing",
        ] {
            let once = extract_hashtags(content);
            let rendered: String = once.iter().map(|tag| format!("#{tag} ")).collect();
            assert_eq!(extract_hashtags(&rendered), once, "content: {content}");
        }
    }
}
