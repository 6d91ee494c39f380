//! Encrypt / decrypt operators
//!
//! Replacements are `base64(nonce || ciphertext)` produced by ChaCha20-Poly1305.
//! Nonces are drawn from the OS random source on every call, so a seeded
//! engine still never reuses a nonce.
//! The cipher key is the SHA-256 digest of the caller's `key` param, which must
//! be 16, 24 or 32 bytes long. Decrypting with the same `key` recovers the
//! original entity text exactly.

use super::{required_str, Operator, OperatorType};
use crate::anonymization::models::OperatorParams;
use crate::domain::{Result, ShroudError};
use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Param holding the caller's key
pub const KEY: &str = "key";

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305)
pub const NONCE_SIZE: usize = 12;

/// Size of authentication tag in bytes
pub const TAG_SIZE: usize = 16;

const VALID_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// Cipher key derived from the `key` param, zeroized on drop
#[derive(Zeroize, ZeroizeOnDrop)]
struct CipherKey([u8; 32]);

impl CipherKey {
    fn from_params(params: &OperatorParams, operator: &str) -> Result<Self> {
        let key = required_str(params, KEY, operator)?;
        if !VALID_KEY_LENGTHS.contains(&key.len()) {
            return Err(ShroudError::InvalidParam(
                "Invalid input, key must be of length 128, 192 or 256 bits".to_string(),
            ));
        }
        let digest = Sha256::digest(key.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Ok(Self(bytes))
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(Key::from_slice(&self.0))
    }
}

/// Encrypts the entity text; reversed by [`Decrypt`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Encrypt;

impl Operator for Encrypt {
    fn operate(
        &self,
        text: &str,
        params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        let key = CipherKey::from_params(params, self.name())?;

        // Nonces never come from the injected source, which may be seeded
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let ciphertext = key
            .cipher()
            .encrypt(Nonce::from_slice(&nonce_bytes), text.as_bytes())
            .map_err(|_| ShroudError::InvalidParam("Encryption failed".to_string()))?;

        let mut bytes = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        bytes.extend_from_slice(&nonce_bytes);
        bytes.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(&bytes))
    }

    fn validate(&self, params: &OperatorParams) -> Result<()> {
        CipherKey::from_params(params, self.name()).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "encrypt"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }

    fn reverse_operator(&self) -> Option<&'static str> {
        Some("decrypt")
    }
}

/// Recovers text produced by [`Encrypt`] with the same key
#[derive(Debug, Clone, Copy, Default)]
pub struct Decrypt;

fn undecryptable() -> ShroudError {
    ShroudError::InvalidParam("Invalid input, text could not be decrypted".to_string())
}

impl Operator for Decrypt {
    fn operate(
        &self,
        text: &str,
        params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        let key = CipherKey::from_params(params, self.name())?;

        let bytes = STANDARD.decode(text).map_err(|_| undecryptable())?;
        if bytes.len() < NONCE_SIZE + TAG_SIZE {
            return Err(undecryptable());
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_SIZE);

        let plaintext = key
            .cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| undecryptable())?;
        String::from_utf8(plaintext).map_err(|_| undecryptable())
    }

    fn validate(&self, params: &OperatorParams) -> Result<()> {
        CipherKey::from_params(params, self.name()).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "decrypt"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Deanonymize
    }
}
