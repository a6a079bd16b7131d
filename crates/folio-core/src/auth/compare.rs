//! Timing-safe string equality for secrets.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Returns `true` iff `a` and `b` are the same string.
///
/// Both inputs are hashed to 32-byte SHA-256 digests first, so the digest
/// comparison always covers equal-length buffers and neither the position
/// of the first difference nor a length mismatch shows up in the running
/// time. Only meant for secrets: a digest collision would compare equal.
pub fn safe_compare(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());
    a.as_slice().ct_eq(b.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_match() {
        assert!(safe_compare("secret", "secret"));
        assert!(safe_compare("correct horse battery staple", "correct horse battery staple"));
    }

    #[test]
    fn empty_strings_match() {
        assert!(safe_compare("", ""));
    }

    #[test]
    fn same_length_difference() {
        assert!(!safe_compare("secret", "secreT"));
        assert!(!safe_compare("secret", "Secret"));
    }

    #[test]
    fn different_lengths() {
        assert!(!safe_compare("secret", "secret1"));
        assert!(!safe_compare("secret", "secre"));
        assert!(!safe_compare("", "a"));
    }

    #[test]
    fn multibyte_unicode() {
        assert!(safe_compare("🔐 clé", "🔐 clé"));
        assert!(!safe_compare("🔐", "🔑"));
        assert!(!safe_compare("한글", "한굴"));
    }

    #[test]
    fn compares_code_points_not_normalization() {
        // precomposed é vs e + combining acute
        assert!(!safe_compare("\u{e9}", "e\u{301}"));
    }

    #[test]
    fn long_inputs() {
        let a = "x".repeat(10_000);
        let mut b = a.clone();
        assert!(safe_compare(&a, &b));
        b.push('y');
        assert!(!safe_compare(&a, &b));
    }
}
