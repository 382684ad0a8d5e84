use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::database::models::account::Account;

/// Claims carried by a session token. The account number is the only
/// binding; there are no scopes or roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "accountNumber")]
    pub account_number: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(account_number: i64, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            account_number,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
    InvalidToken(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// Signs and verifies session tokens with a server-held HMAC secret.
///
/// The secret is handed in at construction and never re-read from the
/// environment.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes().to_vec(),
            Duration::hours(config.jwt_expiry_hours as i64),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, account: &Account) -> Result<String, JwtError> {
        self.issue_claims(&Claims::new(account.number, self.ttl))
    }

    pub fn issue_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        if self.secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let encoding_key = EncodingKey::from_secret(&self.secret);
        encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Check signature, algorithm family and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        if self.secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let decoding_key = DecodingKey::from_secret(&self.secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::hours(1))
    }

    #[test]
    fn issue_then_verify_round_trips_account_number() {
        let tokens = service();
        let token = tokens.issue_claims(&Claims::new(30264, tokens.ttl())).unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.account_number, 30264);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn claims_serialize_with_account_number_key() {
        let value = serde_json::to_value(Claims::new(7, Duration::minutes(5))).unwrap();
        assert_eq!(value["accountNumber"], 7);
        assert!(value.get("exp").is_some());
    }

    #[test]
    fn empty_secret_cannot_sign() {
        let tokens = TokenService::new("", Duration::hours(1));
        let err = tokens.issue_claims(&Claims::new(1, Duration::hours(1))).unwrap_err();
        assert!(matches!(err, JwtError::InvalidSecret));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other = TokenService::new("other-secret", Duration::hours(1));
        let token = other.issue_claims(&Claims::new(1, Duration::hours(1))).unwrap();
        assert!(matches!(service().verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_garbage() {
        assert!(service().verify("garbage").is_err());
        assert!(service().verify("a.b.c").is_err());
        assert!(service().verify("").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = service();
        let token = tokens
            .issue_claims(&Claims::new(5, Duration::hours(-1)))
            .unwrap();
        assert!(matches!(tokens.verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn accepts_other_hmac_algorithms() {
        let claims = Claims::new(12, Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(service().verify(&token).unwrap(), claims);
    }

    #[test]
    fn rejects_unsigned_token() {
        // {"alg":"none","typ":"JWT"} . {"accountNumber":1,"exp":9999999999,"iat":0} .
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJhY2NvdW50TnVtYmVyIjoxLCJleHAiOjk5OTk5OTk5OTksImlhdCI6MH0.";
        assert!(service().verify(token).is_err());
    }
}
