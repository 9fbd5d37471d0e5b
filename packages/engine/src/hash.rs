use sha2::{Digest, Sha256};

/// Length of a rendered column digest in hex characters.
pub const COLUMN_HASH_LEN: usize = 64;

/// SHA-256 of the column name's UTF-8 bytes, rendered as lowercase hex.
///
/// No salt and no normalization: the same name yields the same digest in
/// every process and in every other implementation of the scheme.
pub fn column_hash(name: &str) -> String {
    format!("{:x}", Sha256::digest(name.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::{column_hash, COLUMN_HASH_LEN};

    #[test]
    fn matches_known_sha256_vectors() {
        assert_eq!(
            column_hash("a"),
            "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
        );
        assert_eq!(
            column_hash("b"),
            "3e23e8160039594a33894f6564e1b1348bbd7a0088d42c4acb73eeaed59c009d"
        );
        assert_eq!(
            column_hash("c"),
            "2e7d2c03a9507ae265ecf5b5356885a53393a2029d241394997265a1a25aefc6"
        );
    }

    #[test]
    fn empty_name_hashes_like_any_other() {
        assert_eq!(
            column_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn is_case_sensitive_and_fixed_length() {
        let lower = column_hash("email");
        let upper = column_hash("EMAIL");

        assert_ne!(lower, upper);
        assert_eq!(lower.len(), COLUMN_HASH_LEN);
        assert!(lower
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch)));
        assert_eq!(lower, column_hash("email"));
    }
}
