//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher producing PHC-encoded strings.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// Hasher using the crate's recommended parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let argon2 = self.argon2();
        let secret = password.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
            let hash = argon2
                .hash_password(secret.expose().as_bytes(), &salt)
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
            Ok(PasswordHash::new(hash.to_string()))
        })
        .await
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let argon2 = self.argon2();
        let secret = password.clone();
        let encoded = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PhcHash::new(&encoded)
                .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
            match argon2.verify_password(secret.expose().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
            }
        })
        .await
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
    }
}
