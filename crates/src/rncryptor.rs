//! RNCryptor data format v3, password-based.
//!
//! ```text
//! 0x03 | 0x01 | encSalt[8] | hmacSalt[8] | iv[16] | ciphertext | hmac[32]
//! ```
//!
//! AES-256-CBC with PKCS#7 padding; HMAC-SHA256 over everything before the
//! tag; both keys from PBKDF2-HMAC-SHA1 (10 000 rounds).

use crate::error::{Error, Result};
use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

pub const VERSION: u8 = 3;
const OPTIONS_PASSWORD: u8 = 1;
const SALT_LEN: usize = 8;
const IV_LEN: usize = 16;
const KEY_LEN: usize = 32;
const HMAC_LEN: usize = 32;
const PBKDF2_ROUNDS: u32 = 10_000;
const HEADER_LEN: usize = 2 + SALT_LEN * 2 + IV_LEN;

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    key
}

fn hmac(key: &[u8], data: &[u8]) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| Error::Crypto(e.to_string()))?;
    mac.update(data);
    Ok(mac)
}

/// Encrypt with fresh random salts and IV.
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
    let enc_salt: [u8; SALT_LEN] = rand::random();
    let hmac_salt: [u8; SALT_LEN] = rand::random();
    let iv: [u8; IV_LEN] = rand::random();
    encrypt_with(password, &enc_salt, &hmac_salt, &iv, plaintext)
}

pub fn encrypt_with(
    password: &str,
    enc_salt: &[u8; SALT_LEN],
    hmac_salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let enc_key = derive_key(password, enc_salt);
    let hmac_key = derive_key(password, hmac_salt);

    let mut out = Vec::with_capacity(HEADER_LEN + plaintext.len() + IV_LEN + HMAC_LEN);
    out.push(VERSION);
    out.push(OPTIONS_PASSWORD);
    out.extend_from_slice(enc_salt);
    out.extend_from_slice(hmac_salt);
    out.extend_from_slice(iv);

    let ciphertext =
        Aes256CbcEnc::new(&enc_key.into(), &(*iv).into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    out.extend_from_slice(&ciphertext);

    let tag = hmac(&hmac_key, &out)?.finalize().into_bytes();
    out.extend_from_slice(&tag);
    Ok(out)
}

pub fn decrypt(password: &str, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < HEADER_LEN + HMAC_LEN {
        return Err(Error::Crypto("message too short".to_string()));
    }
    if data[0] != VERSION || data[1] != OPTIONS_PASSWORD {
        return Err(Error::Crypto(format!(
            "unsupported header {:#04x} {:#04x}",
            data[0], data[1]
        )));
    }
    let (signed, tag) = data.split_at(data.len() - HMAC_LEN);
    let enc_salt = &data[2..2 + SALT_LEN];
    let hmac_salt = &data[2 + SALT_LEN..2 + SALT_LEN * 2];
    let iv = &data[2 + SALT_LEN * 2..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];

    let hmac_key = derive_key(password, hmac_salt);
    hmac(&hmac_key, signed)?
        .verify_slice(tag)
        .map_err(|_| Error::Crypto("HMAC mismatch (wrong password or corrupted data)".to_string()))?;

    let enc_key = derive_key(password, enc_salt);
    Aes256CbcDec::new_from_slices(&enc_key, iv)
        .map_err(|e| Error::Crypto(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| Error::Crypto("bad padding".to_string()))
}
