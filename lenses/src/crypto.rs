// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! At-rest protection of context passwords.
//!
//! Passwords stored in the configuration file are sealed with AES-256-GCM.
//! The key is derived from the host of the profile that owns the password,
//! so a secret copied into a profile pointing somewhere else no longer
//! decrypts. This keeps secrets out of plaintext on disk without requiring a
//! separate key store; it is not meant to resist an attacker who can read
//! the file and knows the host.
//!
//! The serialized form is `base64(iv || ciphertext || tag)`.

use base64::{engine::general_purpose, Engine as _};
use openssl::{hash::MessageDigest, pkcs5, rand::rand_bytes, symm::Cipher};
use thiserror::Error;

pub const AES_256_KEY_LEN: usize = 32;
pub const AES_BLOCK_SIZE: usize = 16;
pub const GCM_TAG_LEN: usize = 16;

const KDF_SALT: &[u8] = b"lensesctl/context-secret/v1";
const KDF_ITERATIONS: usize = 10_000;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Error decoding base64
    #[error("failed to decode base64")]
    Base64Decode(#[from] base64::DecodeError),

    /// Error decrypting AES GCM encrypted data
    #[error("failed to decrypt AES GCM encrypted data")]
    DecryptAead(#[source] openssl::error::ErrorStack),

    /// Error encrypting data with AES GCM
    #[error("failed to encrypt data with AES GCM")]
    EncryptAead(#[source] openssl::error::ErrorStack),

    /// No host to derive the key from
    #[error("cannot derive a key from empty key material")]
    EmptyKeyMaterial,

    /// Decoded payload is too short to hold an IV and a tag
    #[error("Invalid input length {length}")]
    InvalidInputLength { length: usize },

    /// Decrypted bytes are not UTF-8
    #[error("decrypted data is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Error deriving key with PBKDF2
    #[error("failed to derive key from key material with PBKDF2")]
    Pbkdf2(#[source] openssl::error::ErrorStack),

    /// Error generating random bytes
    #[error("failed to generate random IV")]
    Random(#[source] openssl::error::ErrorStack),
}

fn derive_key(
    key_material: &str,
) -> Result<[u8; AES_256_KEY_LEN], CryptoError> {
    if key_material.is_empty() {
        return Err(CryptoError::EmptyKeyMaterial);
    }

    let mut key = [0u8; AES_256_KEY_LEN];
    pkcs5::pbkdf2_hmac(
        key_material.as_bytes(),
        KDF_SALT,
        KDF_ITERATIONS,
        MessageDigest::sha256(),
        &mut key,
    )
    .map_err(CryptoError::Pbkdf2)?;
    Ok(key)
}

/// Encrypt `plaintext` with a key derived from `key_material`.
///
/// The empty string encrypts to the empty string. A fresh IV is drawn for
/// every call, so encrypting the same value twice gives different output.
pub fn encrypt(
    plaintext: &str,
    key_material: &str,
) -> Result<String, CryptoError> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let key = derive_key(key_material)?;
    let mut iv = [0u8; AES_BLOCK_SIZE];
    rand_bytes(&mut iv).map_err(CryptoError::Random)?;

    let mut tag = [0u8; GCM_TAG_LEN];
    let ciphertext = openssl::symm::encrypt_aead(
        Cipher::aes_256_gcm(),
        &key,
        Some(&iv),
        &[],
        plaintext.as_bytes(),
        &mut tag,
    )
    .map_err(CryptoError::EncryptAead)?;

    let mut sealed =
        Vec::with_capacity(iv.len() + ciphertext.len() + tag.len());
    sealed.extend_from_slice(&iv);
    sealed.extend(ciphertext);
    sealed.extend_from_slice(&tag);
    Ok(general_purpose::STANDARD.encode(sealed))
}

/// Decrypt a value produced by [`encrypt`] with the same key material.
pub fn decrypt(
    ciphertext: &str,
    key_material: &str,
) -> Result<String, CryptoError> {
    if ciphertext.is_empty() {
        return Ok(String::new());
    }

    let key = derive_key(key_material)?;
    let data = general_purpose::STANDARD.decode(ciphertext.trim())?;

    let length = data.len();
    if length < AES_BLOCK_SIZE + GCM_TAG_LEN {
        return Err(CryptoError::InvalidInputLength { length });
    }
    let (iv, rest) = data.split_at(AES_BLOCK_SIZE);
    let (ciphertext, tag) = rest.split_at(rest.len() - GCM_TAG_LEN);

    let plaintext = openssl::symm::decrypt_aead(
        Cipher::aes_256_gcm(),
        &key,
        Some(iv),
        &[],
        ciphertext,
        tag,
    )
    .map_err(CryptoError::DecryptAead)?;

    Ok(String::from_utf8(plaintext)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "https://lenses.example.com:9991";

    #[test]
    fn test_encrypt_decrypt_ascii() {
        let sealed = encrypt("s3cr3t-p4ss", HOST).unwrap(); //#[allow_ci]
        assert_ne!(sealed, "s3cr3t-p4ss");
        assert_eq!(decrypt(&sealed, HOST).unwrap(), "s3cr3t-p4ss"); //#[allow_ci]
    }

    #[test]
    fn test_encrypt_decrypt_utf8() {
        for password in ["pässwörd", "密码🔑", "пароль with spaces", "a"] {
            let sealed = encrypt(password, HOST).unwrap(); //#[allow_ci]
            assert_eq!(decrypt(&sealed, HOST).unwrap(), password); //#[allow_ci]
        }
    }

    #[test]
    fn test_empty_is_noop() {
        assert_eq!(encrypt("", HOST).unwrap(), ""); //#[allow_ci]
        assert_eq!(decrypt("", HOST).unwrap(), ""); //#[allow_ci]
        // Empty values never touch the key, even an empty one
        assert_eq!(encrypt("", "").unwrap(), ""); //#[allow_ci]
    }

    #[test]
    fn test_different_hosts_give_different_ciphertext() {
        let a = encrypt("same-password", "https://a.example.com").unwrap(); //#[allow_ci]
        let b = encrypt("same-password", "https://b.example.com").unwrap(); //#[allow_ci]
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_host_fails_to_decrypt() {
        let sealed = encrypt("secret", "https://a.example.com").unwrap(); //#[allow_ci]
        let result = decrypt(&sealed, "https://b.example.com");
        assert!(matches!(result, Err(CryptoError::DecryptAead(_))));
    }

    #[test]
    fn test_empty_key_material() {
        let result = encrypt("secret", "");
        assert!(matches!(result, Err(CryptoError::EmptyKeyMaterial)));
        let result = decrypt("c2VjcmV0", "");
        assert!(matches!(result, Err(CryptoError::EmptyKeyMaterial)));
    }

    #[test]
    fn test_decrypt_garbage() {
        assert!(matches!(
            decrypt("not base64 !!", HOST),
            Err(CryptoError::Base64Decode(_))
        ));
        // Valid base64, too short for IV and tag
        assert!(matches!(
            decrypt("c2hvcnQ=", HOST),
            Err(CryptoError::InvalidInputLength { length: 5 })
        ));
    }

    #[test]
    fn test_plaintext_password_is_not_decryptable() {
        // A password typed into the file by hand must not be accepted as-is
        assert!(decrypt("admin", HOST).is_err());
    }
}
