//! AES-256-GCM sealing of the session token
//!
//! A cookie value is the URL-safe, unpadded base64 of
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`. The key is the
//! SHA-256 digest of the pre-shared secret.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use tutordesk_core::{CoreError, CoreResult};

/// Length of the nonce in bytes (96 bits)
pub const NONCE_LENGTH: usize = 12;

/// Length of the authentication tag in bytes (128 bits)
pub const TAG_LENGTH: usize = 16;

#[derive(Clone)]
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// Derive the cipher key from a pre-shared secret
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&digest);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Seal a token into a cookie-safe string
    ///
    /// # Errors
    ///
    /// Returns an error if the AEAD backend rejects the input
    pub fn encrypt(&self, plaintext: &str) -> CoreResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CoreError::encryption_error(e.to_string()))?;

        let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(combined))
    }

    /// Open a value produced by [`TokenCipher::encrypt`]
    ///
    /// # Errors
    ///
    /// Returns an error for malformed base64, truncated input, a wrong key,
    /// tampered bytes, or a plaintext that is not UTF-8
    pub fn decrypt(&self, sealed: &str) -> CoreResult<String> {
        let combined = URL_SAFE_NO_PAD
            .decode(sealed.trim())
            .map_err(|e| CoreError::decryption_error(format!("invalid base64: {e}")))?;

        if combined.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(CoreError::decryption_error(format!(
                "expected at least {} bytes, got {}",
                NONCE_LENGTH + TAG_LENGTH,
                combined.len()
            )));
        }

        let (nonce, ciphertext) = combined.split_at(NONCE_LENGTH);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CoreError::decryption_error("authentication failed"))?;

        String::from_utf8(plaintext)
            .map_err(|e| CoreError::decryption_error(format!("invalid UTF-8: {e}")))
    }
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCipher").finish_non_exhaustive()
    }
}
