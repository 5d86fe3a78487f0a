use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

pub const ACCESS_CODE_LEN: usize = 10;

pub fn generate_access_code(count: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(count)
        .map(char::from)
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_alphanumeric_of_requested_length() {
        let code = generate_access_code(ACCESS_CODE_LEN);
        assert_eq!(code.len(), ACCESS_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn codes_differ() {
        assert_ne!(
            generate_access_code(ACCESS_CODE_LEN),
            generate_access_code(ACCESS_CODE_LEN)
        );
    }
}
