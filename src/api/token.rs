//! TokenStore - Bearer Token Persistence
//!
//! The portal attaches a bearer token to every outbound request. The token is
//! persisted under the app data dir, AES-256-GCM encrypted and Base64 encoded
//! (`[nonce (12 bytes)][ciphertext]`).

use std::fs;
use std::path::PathBuf;

use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::error::{Error, Result};
use crate::utils::config_store::app_data_dir;

/// Master encryption key for AES-256-GCM cipher.
///
/// WARNING: In production, this should come from the platform keychain or an
/// env var rather than the binary.
const MASTER_KEY: &[u8; 32] = b"GanaderosPortalTokenKey2026Aso!!";

const TOKEN_FILE: &str = "token.dat";

/// Encrypts a plaintext token, output is Base64 `[nonce][ciphertext]`
pub fn encrypt(plain_text: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(MASTER_KEY.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::Token {
            message: format!("Encryption failed: {e}"),
        })?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Decrypts a Base64 `[nonce][ciphertext]` string produced by `encrypt`
pub fn decrypt(cipher_text: &str) -> Result<String> {
    let data = BASE64.decode(cipher_text).map_err(|e| Error::Token {
        message: format!("Base64 decode failed: {e}"),
    })?;

    if data.len() < 12 {
        return Err(Error::Token {
            message: "Ciphertext too short".to_string(),
        });
    }

    let cipher = Aes256Gcm::new(MASTER_KEY.into());
    let nonce = Nonce::<Aes256Gcm>::from_slice(&data[0..12]);

    let plaintext_bytes = cipher.decrypt(nonce, &data[12..]).map_err(|e| Error::Token {
        message: format!("Decryption failed: {e}"),
    })?;

    String::from_utf8(plaintext_bytes).map_err(|e| Error::Token {
        message: format!("UTF-8 decode failed: {e}"),
    })
}

/// File-backed store for the API bearer token
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store under the default app data dir
    pub fn open() -> Result<Self> {
        let dir = app_data_dir().map_err(|e| Error::Token {
            message: format!("No data dir: {e}"),
        })?;
        Ok(Self {
            path: dir.join(TOKEN_FILE),
        })
    }

    /// Store at an explicit path (tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load and decrypt the token, `None` when no token was saved
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        decrypt(content.trim()).map(Some)
    }

    /// Encrypt and persist the token
    pub fn save(&self, token: &str) -> Result<()> {
        fs::write(&self.path, encrypt(token)?)?;
        Ok(())
    }

    /// Remove the saved token
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let token = "eyJhbGciOiJIUzI1NiJ9.portal";
        let encrypted = encrypt(token).expect("encrypt");
        assert_ne!(encrypted, token);
        assert_eq!(decrypt(&encrypted).expect("decrypt"), token);
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        assert!(decrypt("not-base64!!!").is_err());
        assert!(decrypt("AAAA").is_err());
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("portal-token-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("tmp dir");
        let store = TokenStore::at(dir.join("token.dat"));

        assert_eq!(store.load().expect("load"), None);
        store.save("secreto").expect("save");
        assert_eq!(store.load().expect("load"), Some("secreto".to_string()));
        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }
}
