/// Comparison key for a word: all whitespace removed, lower-cased.
///
/// `"Hello  World"`, `"helloworld"` and `" HELLOWORLD "` share one key.
/// The stored word keeps its original spelling; only comparisons use the key.
pub fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn case_and_whitespace_insensitive() {
        let key = normalize("Hello  World");
        assert_eq!(key, "helloworld");
        assert_eq!(normalize("helloworld"), key);
        assert_eq!(normalize(" HELLOWORLD "), key);
        assert_eq!(normalize("\tHello\nWorld "), key);
    }

    #[test]
    fn hangul_spacing_collapses() {
        assert_eq!(normalize("피 자"), normalize("피자"));
        assert_eq!(normalize("마크 "), "마크");
    }

    #[test]
    fn key_is_stable_under_renormalization() {
        for w in ["  A b C ", "마인 크래프트", "", "   "] {
            assert_eq!(normalize(&normalize(w)), normalize(w));
        }
        assert_eq!(normalize("   "), "");
    }
}
