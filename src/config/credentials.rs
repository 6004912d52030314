use aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use anyhow::{Result, anyhow, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Debug)]
struct StoredPassword {
    cipher: String,
    nonce: String,
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct CredentialFile {
    passwords: BTreeMap<String, StoredPassword>,
}

/// Database passwords kept on disk, encrypted with AES-256-GCM under a
/// per-user key in `key.bin`.
#[derive(Debug)]
pub struct CredentialStore {
    dir: PathBuf,
    file: CredentialFile,
}

impl CredentialStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let path = dir.join("credentials.json");
        let file = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            CredentialFile::default()
        };
        Ok(CredentialStore { dir, file })
    }

    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(&self.file)?;
        fs::write(self.dir.join("credentials.json"), contents)?;
        Ok(())
    }

    /// The lookup key for one login: `user@host:port/database`.
    pub fn key_for(user: &str, host: &str, port: u16, database: &str) -> String {
        format!("{}@{}:{}/{}", user, host, port, database)
    }

    pub fn remember(&mut self, key: &str, password: &str) -> Result<()> {
        let (cipher, nonce) = self.encrypt_password(password)?;
        self.file
            .passwords
            .insert(key.to_string(), StoredPassword { cipher, nonce });
        Ok(())
    }

    pub fn forget(&mut self, key: &str) -> bool {
        self.file.passwords.remove(key).is_some()
    }

    pub fn password(&self, key: &str) -> Result<Option<String>> {
        match self.file.passwords.get(key) {
            Some(stored) => Ok(Some(self.decrypt_password(&stored.cipher, &stored.nonce)?)),
            None => Ok(None),
        }
    }

    fn get_or_create_key(&self) -> Result<[u8; 32]> {
        let path = self.dir.join("key.bin");
        if !path.exists() {
            fs::create_dir_all(&self.dir)?;
            let mut key = [0u8; 32];
            rand::rng().fill(&mut key);
            fs::write(&path, key)?;
            return Ok(key);
        }
        let data = fs::read(path)?;
        if data.len() < 32 {
            bail!("key file is truncated");
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&data[..32]);
        Ok(key)
    }

    fn encrypt_password(&self, plain: &str) -> Result<(String, String)> {
        let key = self.get_or_create_key()?;
        let cipher = Aes256Gcm::new(&key.into());
        let mut nonce_bytes = [0u8; 12];
        rand::rng().fill(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ct = cipher
            .encrypt(nonce, plain.as_bytes())
            .map_err(|_| anyhow!("encryption failed"))?;
        Ok((STANDARD.encode(ct), STANDARD.encode(nonce_bytes)))
    }

    fn decrypt_password(&self, cipher_b64: &str, nonce_b64: &str) -> Result<String> {
        let key = self.get_or_create_key()?;
        let cipher = Aes256Gcm::new(&key.into());
        let nonce_bytes = STANDARD.decode(nonce_b64)?;
        if nonce_bytes.len() != 12 {
            bail!("stored nonce has the wrong length");
        }
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ct = STANDARD.decode(cipher_b64)?;
        let pt = cipher
            .decrypt(nonce, ct.as_ref())
            .map_err(|_| anyhow!("decryption failed"))?;
        Ok(String::from_utf8(pt)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_for() {
        assert_eq!(
            CredentialStore::key_for("clerk", "localhost", 5432, "hotel"),
            "clerk@localhost:5432/hotel"
        );
    }

    #[test]
    fn test_remember_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let key = CredentialStore::key_for("clerk", "localhost", 5432, "hotel");

        let mut store = CredentialStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.password(&key).unwrap(), None);
        store.remember(&key, "front-desk").unwrap();
        store.save().unwrap();

        let reopened = CredentialStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.password(&key).unwrap().as_deref(), Some("front-desk"));
    }

    #[test]
    fn test_password_is_not_stored_in_plain_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CredentialStore::open(temp_dir.path()).unwrap();
        store.remember("k", "my_secret_password").unwrap();
        store.save().unwrap();

        let raw = fs::read_to_string(temp_dir.path().join("credentials.json")).unwrap();
        assert!(!raw.contains("my_secret_password"));
        assert!(temp_dir.path().join("key.bin").exists());
    }

    #[test]
    fn test_forget() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CredentialStore::open(temp_dir.path()).unwrap();
        store.remember("k", "pw").unwrap();

        assert!(store.forget("k"));
        assert!(!store.forget("k"));
        assert_eq!(store.password("k").unwrap(), None);
    }

    #[test]
    fn test_wrong_key_fails_to_decrypt() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CredentialStore::open(temp_dir.path()).unwrap();
        store.remember("k", "pw").unwrap();
        store.save().unwrap();

        fs::write(temp_dir.path().join("key.bin"), [7u8; 32]).unwrap();
        let reopened = CredentialStore::open(temp_dir.path()).unwrap();
        assert!(reopened.password("k").is_err());
    }
}
