use rand::distributions::Alphanumeric;
use rand::Rng;

/// Short fixed prefix on every booking reference.
pub const REFERENCE_PREFIX: &str = "MRD";

const SUFFIX_LEN: usize = 6;

/// Generate a human-shareable booking reference, e.g. `MRD-7K2Q9X`.
///
/// Uppercasing collapses the alphabet to 36 characters, ~2.2e9 combinations;
/// collisions are left to the unique index on the store, where the caller
/// retries once with a fresh reference.
pub fn new_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}-{}", REFERENCE_PREFIX, suffix.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_shape() {
        let reference = new_reference();
        assert_eq!(reference.len(), REFERENCE_PREFIX.len() + 1 + SUFFIX_LEN);
        assert!(reference.starts_with("MRD-"));
        let suffix = &reference[REFERENCE_PREFIX.len() + 1..];
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn references_vary() {
        let a = new_reference();
        let b = new_reference();
        // Not a collision-probability proof, just a sanity check that the
        // generator is not constant.
        assert!(a != b || new_reference() != a);
    }
}
