//! Task id generation.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Prefix marking an id as one of ours.
const ID_PREFIX: &str = "td-";

/// How many digest bytes end up in the id (2 hex chars each).
const ID_BYTES: usize = 6;

/// Generate a task id: the prefix plus 12 hex chars of a digest over the
/// title, the creation timestamp, and 8 random bytes. The randomness makes
/// collisions implausible even for identical titles created in the same
/// instant; `add` still refuses a duplicate outright.
pub fn generate_id(title: &str, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(created_at.timestamp_nanos_opt().unwrap_or(0).to_le_bytes());
    hasher.update(rand::rng().random::<[u8; 8]>());
    let digest = hasher.finalize();

    let hex: String = digest[..ID_BYTES]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("{}{}", ID_PREFIX, hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("Test title", Utc::now());
        assert!(id.starts_with("td-"));
        assert_eq!(id.len(), 15); // prefix + 12 hex chars
        assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_inputs_still_differ() {
        let now = Utc::now();
        // The random component keeps identical titles apart
        assert_ne!(generate_id("Same title", now), generate_id("Same title", now));
    }

    #[test]
    fn test_different_titles_differ() {
        let now = Utc::now();
        assert_ne!(generate_id("Title one", now), generate_id("Title two", now));
    }
}
