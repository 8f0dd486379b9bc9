//! AES-256-CBC byte transform used to protect the grid payload.
//!
//! Key = SHA-256 of the UTF-8 passphrase. Output = 16-byte random IV followed
//! by the PKCS#7-padded ciphertext.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// A reversible byte transform applied to the payload before it is rendered.
pub trait ByteCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Vec<u8>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Derive the AES key from a passphrase.
pub fn derive_key(passphrase: &str) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(passphrase.as_bytes());
    hasher.finalize().into()
}

/// Encrypt with a fresh random IV. Returns `IV || ciphertext`.
pub fn encrypt_bytes(plaintext: &[u8], key: &[u8; KEY_LEN]) -> Vec<u8> {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    encrypt_bytes_with_iv(plaintext, key, iv)
}

/// Encrypt with a caller-chosen IV. Returns `IV || ciphertext`.
pub fn encrypt_bytes_with_iv(plaintext: &[u8], key: &[u8; KEY_LEN], iv: [u8; IV_LEN]) -> Vec<u8> {
    let ciphertext =
        Aes256CbcEnc::new(&(*key).into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    out
}

/// Split off the IV, decrypt, and strip the padding.
pub fn decrypt_bytes(data: &[u8], key: &[u8; KEY_LEN]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < IV_LEN {
        return Err(CryptoError::CiphertextTooShort(data.len()));
    }
    let (iv_bytes, ciphertext) = data.split_at(IV_LEN);
    if ciphertext.is_empty() || ciphertext.len() % IV_LEN != 0 {
        return Err(CryptoError::NotBlockAligned(ciphertext.len()));
    }
    let mut iv = [0u8; IV_LEN];
    iv.copy_from_slice(iv_bytes);
    Aes256CbcDec::new(&(*key).into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Padding)
}

/// AES-256-CBC keyed by a passphrase.
#[derive(Clone)]
pub struct AesCbcCipher {
    key: [u8; KEY_LEN],
}

impl AesCbcCipher {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::new(derive_key(passphrase))
    }

    /// Encrypt with a fixed IV.
    pub fn encrypt_with_iv(&self, plaintext: &[u8], iv: [u8; IV_LEN]) -> Vec<u8> {
        encrypt_bytes_with_iv(plaintext, &self.key, iv)
    }
}

impl std::fmt::Debug for AesCbcCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCbcCipher").finish_non_exhaustive()
    }
}

impl ByteCipher for AesCbcCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        encrypt_bytes(plaintext, &self.key)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        decrypt_bytes(ciphertext, &self.key)
    }
}
