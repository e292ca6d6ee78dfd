use crate::types::{AppError, Result};
use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Argon2 cost parameters.
///
/// The defaults are the argon2 crate's recommended values (19 MiB, two
/// passes, one lane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Salted one-way password hashing with Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    /// Creates a hasher with the given cost, rejecting parameters argon2
    /// would refuse at hash time.
    pub fn new(cost: HashCost) -> Result<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AppError::Hash(format!("Invalid hash parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Returns a PHC-formatted hash string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Hash(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a password against a PHC hash.
    ///
    /// Salt and cost come from the hash itself, so hashes made under an
    /// older cost setting keep verifying.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Hash(format!("Invalid password hash: {}", e)))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Hash(format!("Failed to verify password: {}", e))),
        }
    }

    /// [`hash_password`](Self::hash_password) on the blocking pool.
    pub async fn hash(&self, password: String) -> Result<String> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// [`verify_password`](Self::verify_password) on the blocking pool.
    pub async fn verify(&self, password: String, hash: String) -> Result<bool> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
    }

    /// Verification for an account that doesn't exist.
    ///
    /// Hashes the password at the configured cost so the caller spends as
    /// long as a real [`verify`](Self::verify), then reports a mismatch.
    pub async fn verify_missing(&self, password: String) -> Result<bool> {
        self.hash(password).await.map(|_| false)
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheapest parameters argon2 accepts, to keep the suite fast.
    fn create_test_service() -> PasswordService {
        PasswordService::new(HashCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("test parameters should be valid")
    }

    #[test]
    fn test_password_hashing() {
        let service = create_test_service();
        let password = "test_password_123";

        let hash = service
            .hash_password(password)
            .expect("should hash password");

        assert_ne!(hash, password);
        assert!(hash.starts_with("$argon2id$"), "hash should be in PHC format");
        assert!(hash.contains("m=8,t=1,p=1"), "hash should embed its cost");
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let service = create_test_service();

        let first = service.hash_password("pw").expect("should hash");
        let second = service.hash_password("pw").expect("should hash");

        assert_ne!(first, second, "each hash should use a fresh salt");
        assert!(service.verify_password("pw", &first).expect("should verify"));
        assert!(service.verify_password("pw", &second).expect("should verify"));
    }

    #[test]
    fn test_password_verification_failure() {
        let service = create_test_service();

        let hash = service
            .hash_password("correct_password")
            .expect("should hash password");
        let is_valid = service
            .verify_password("wrong_password", &hash)
            .expect("should verify");

        assert!(!is_valid, "wrong password should fail verification");
    }

    #[test]
    fn test_verify_uses_cost_embedded_in_hash() {
        let old = create_test_service();
        let hash = old.hash_password("pw").expect("should hash");

        let stronger = PasswordService::new(HashCost {
            memory_kib: 16,
            iterations: 2,
            parallelism: 1,
        })
        .expect("valid params");

        assert!(stronger.verify_password("pw", &hash).expect("should verify"));
    }

    #[test]
    fn test_malformed_hash_is_hash_error() {
        let service = create_test_service();

        let result = service.verify_password("pw", "not-a-phc-string");

        assert!(matches!(result, Err(AppError::Hash(_))));
    }

    #[test]
    fn test_unsupported_algorithm_is_hash_error() {
        let service = create_test_service();
        let hash = service.hash_password("pw").expect("should hash");
        let foreign = hash.replacen("$argon2id$", "$argon2x$", 1);

        let result = service.verify_password("pw", &foreign);

        assert!(matches!(result, Err(AppError::Hash(_))));
    }

    #[tokio::test]
    async fn test_verify_missing_never_matches() {
        let service = create_test_service();

        assert!(!service
            .verify_missing("pw".to_string())
            .await
            .expect("should run"));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordService::new(HashCost {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        });

        assert!(matches!(result, Err(AppError::Hash(_))));
    }

    #[test]
    fn test_default_cost_matches_argon2_recommendation() {
        let cost = HashCost::default();

        assert_eq!(cost.memory_kib, 19 * 1024);
        assert_eq!(cost.iterations, 2);
        assert_eq!(cost.parallelism, 1);
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let service = create_test_service();

        let hash = service.hash("pw".to_string()).await.expect("should hash");

        assert!(service
            .verify("pw".to_string(), hash.clone())
            .await
            .expect("should verify"));
        assert!(!service
            .verify("nope".to_string(), hash)
            .await
            .expect("should verify"));
    }
}
