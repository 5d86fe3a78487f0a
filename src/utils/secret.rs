/// Equality check whose running time does not depend on where the inputs differ.
pub fn secrets_match(expected: &str, supplied: &str) -> bool {
    constant_time_compare(expected.as_bytes(), supplied.as_bytes())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let result = a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    result == 0
}

#[cfg(test)]
mod tests {
    use super::secrets_match;

    #[test]
    fn matches_only_identical_values() {
        assert!(secrets_match("master", "master"));
        assert!(!secrets_match("master", "Master"));
        assert!(!secrets_match("master", "maste"));
        assert!(!secrets_match("master", ""));
    }
}
