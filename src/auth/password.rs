use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Credential hashing for account registration.
///
/// Digests are argon2id PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so
/// the salt and cost parameters travel with the stored value and `verify_password` needs
/// nothing else. Each call draws a new 16-byte salt from the OS, so hashing the same password
/// twice yields two different strings that both verify.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!("hash password: {e}")
        })?
        .to_string();
    Ok(hash)
}

/// Checks `plain` against a stored PHC string using the parameters embedded in it.
///
/// A wrong password is `Ok(false)`, never an error, so login can map it to the same
/// response as an unknown email. Only a stored value that is not a PHC string errors.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!("parse stored hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
