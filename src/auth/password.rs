use crate::error::AppError;

/// Hashes and checks passwords with bcrypt at a cost fixed by configuration.
#[derive(Debug, Clone, Copy)]
pub struct CredentialVerifier {
    cost: u32,
}

impl CredentialVerifier {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Salted hash of `password`. The salt and cost are embedded in the result.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::HashingError(format!("Failed to hash password: {}", e)))
    }

    /// Whether `password` matches `stored_hash`.
    ///
    /// A stored hash bcrypt cannot parse counts as a mismatch: the caller only ever needs
    /// to know whether the credential is good.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match bcrypt::verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password hash could not be checked: {}", e);
                false
            }
        }
    }
}
