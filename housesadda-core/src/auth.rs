//! Admin session tokens and password hashing.
//!
//! Tokens are HS256 JWTs signed with a shared secret; passwords are stored
//! as salted Argon2id hashes. Both the server (login/verify) and the CLI
//! (admin bootstrap) go through this module.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Claims carried by an admin bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id
    pub sub: String,
    /// Admin username at issue time
    pub username: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Issues and verifies admin bearer tokens
pub struct JwtManager {
    secret: Vec<u8>,
    ttl_secs: i64,
    algorithm: Algorithm,
}

impl JwtManager {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_secs,
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for an admin user.
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &EncodingKey::from_secret(&self.secret))?;
        Ok(token)
    }

    /// Verify a token and return its claims.
    ///
    /// Expired tokens map to `CoreError::TokenExpired`, everything else that
    /// fails validation to `CoreError::InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);
        let data = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => CoreError::TokenExpired,
                _ => CoreError::InvalidToken,
            })?;
        Ok(data.claims)
    }

    /// Generate a random signing secret, for operators who have not set one.
    pub fn generate_secret() -> String {
        use base64::Engine;
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CoreError::PasswordHash {
            reason: e.to_string(),
        })?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash.
///
/// Returns `Ok(false)` on mismatch. A stored hash that cannot be parsed is
/// an error: it means the row was written by something other than
/// `hash_password`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| CoreError::PasswordHash {
        reason: e.to_string(),
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::PasswordHash {
            reason: e.to_string(),
        }),
    }
}
