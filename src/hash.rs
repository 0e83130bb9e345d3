//! Name hashing for archive group lookup

/// djb2-style string hash used for group names.
///
/// `h = h * 31 + c` over the lowercased bytes, wrapping at 32 bits.
pub fn djb2(name: &str) -> i32 {
    name.bytes().fold(0i32, |hash, c| {
        hash.wrapping_mul(31)
            .wrapping_add(i32::from(c.to_ascii_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(djb2(""), 0);
        assert_eq!(djb2("m"), 109);
        // 109 * 31 + '0'
        assert_eq!(djb2("m0"), 3427);
        assert_eq!(djb2("m0_0"), ((3427 * 31 + 95) * 31) + 48);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(djb2("M50_50"), djb2("m50_50"));
    }

    #[test]
    fn test_wraps_without_panic() {
        let long = "m255_255".repeat(16);
        let _ = djb2(&long);
        assert_ne!(djb2("m50_50"), djb2("m50_51"));
    }
}
