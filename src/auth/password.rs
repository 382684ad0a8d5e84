use thiserror::Error;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;
/// bcrypt only reads this many bytes of input; anything longer is refused
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid bcrypt cost {0}: must be between {} and {}", MIN_COST, MAX_COST)]
    InvalidCost(u32),

    #[error("Password is {0} bytes, at most {} are allowed", MAX_PASSWORD_BYTES)]
    PasswordTooLong(usize),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(String),
}

/// One-way password codec with a fixed work factor.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh salt, so the same
/// plaintext never produces the same stored value twice.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::PasswordTooLong(password.len()));
        }
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// A wrong password or an unparseable hash both yield `false`.
    ///
    /// Candidates longer than bcrypt's input limit never match, since no
    /// stored hash can have been produced from them.
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> bool {
        if candidate.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match bcrypt::verify(candidate, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }

    /// Hash on the blocking pool so request tasks are not stalled by the work factor
    pub async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Task(e.to_string()))?
    }

    pub async fn verify_blocking(&self, stored_hash: String, candidate: String) -> bool {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&stored_hash, &candidate))
            .await
            .unwrap_or(false)
    }
}
