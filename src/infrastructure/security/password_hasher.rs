//! Pluggable password hashing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hashing collaborator for user passwords.
///
/// The core never compares raw passwords; it stores whatever [`hash`] returns
/// and checks logins through [`verify`]. Swapping the algorithm is a pure
/// substitution behind this trait.
///
/// [`hash`]: PasswordHasher::hash
/// [`verify`]: PasswordHasher::verify
pub trait PasswordHasher: Send + Sync {
    /// Hashes a raw password for storage.
    fn hash(&self, raw: &str) -> String;

    /// Checks a raw password against a stored hash.
    fn verify(&self, raw: &str, stored: &str) -> bool;
}

/// HMAC-SHA256 password hasher keyed by a server-side signing secret.
///
/// An attacker with read-only access to the user store cannot verify or
/// forge credentials without the secret.
pub struct HmacPasswordHasher {
    signing_secret: String,
}

impl HmacPasswordHasher {
    /// Creates a hasher keyed by `signing_secret`. Must match the value used
    /// when existing passwords were stored.
    pub fn new(signing_secret: String) -> Self {
        Self { signing_secret }
    }
}

impl PasswordHasher for HmacPasswordHasher {
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash(&self, raw: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(raw.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn verify(&self, raw: &str, stored: &str) -> bool {
        self.hash(raw) == stored
    }
}
