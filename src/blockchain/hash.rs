use sha2::{Digest, Sha256};

/// SHA-256 over the block fields concatenated in order with no separators.
/// Numeric fields use their decimal form. Output is lowercase hex.
pub fn calculate_hash(
    index: u64,
    previous_hash: &str,
    timestamp: i64,
    data: &str,
    nonce: u64,
) -> String {
    let preimage = format!("{index}{previous_hash}{timestamp}{data}{nonce}");
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::calculate_hash;
    use sha2::{Digest, Sha256};

    #[test]
    fn hashes_concatenated_fields() {
        let h = calculate_hash(1, "0", 1_682_839_690, "hello", 7);
        let expected = hex::encode(Sha256::digest(b"101682839690hello7"));
        assert_eq!(h, expected);
        assert_eq!(
            h,
            "9e757f249b65d949827e684e05b25a4b8f8338349b1dc11b4e7563b557455f6f"
        );
    }

    #[test]
    fn is_deterministic() {
        let a = calculate_hash(3, "abc", 1_682_839_690, "payload", 42);
        let b = calculate_hash(3, "abc", 1_682_839_690, "payload", 42);
        assert_eq!(a, b);
    }

    #[test]
    fn every_field_changes_output() {
        let base = calculate_hash(3, "abc", 100, "payload", 42);
        assert_ne!(base, calculate_hash(4, "abc", 100, "payload", 42));
        assert_ne!(base, calculate_hash(3, "abd", 100, "payload", 42));
        assert_ne!(base, calculate_hash(3, "abc", 101, "payload", 42));
        assert_ne!(base, calculate_hash(3, "abc", 100, "paylaod", 42));
        assert_ne!(base, calculate_hash(3, "abc", 100, "payload", 43));
    }

    #[test]
    fn output_is_lowercase_hex() {
        let h = calculate_hash(0, "0", 0, "x", 0);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
