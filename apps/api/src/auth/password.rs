// Password hashing utilities
// Uses bcrypt for salted, deliberately slow hashing

use bcrypt::{hash, verify};

/// Hashes a password using bcrypt
///
/// # Arguments
/// * `password` - The plaintext password to hash
/// * `cost` - bcrypt cost factor (4..=31); 10 takes tens of milliseconds
///
/// # Returns
/// * `Ok(String)` - The bcrypt hash
/// * `Err(String)` - If hashing fails
///
/// # Example
/// ```
/// use club_canin_api::auth::password::hash_password;
///
/// let hash = hash_password("woof-woof", 4).expect("valid hash");
/// assert_ne!(hash, "woof-woof");
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, String> {
    hash(password, cost).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(bool)` - True if password matches, false otherwise
/// * `Err(String)` - If the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}

/// Runs [`hash_password`] on the blocking thread pool
///
/// bcrypt is CPU-bound; request handlers call this so the async workers keep serving.
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| e.to_string())?
}

/// Runs [`verify_password`] on the blocking thread pool
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, String> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| e.to_string())?
}
