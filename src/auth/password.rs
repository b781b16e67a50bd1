use anyhow::Context;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

#[cfg(test)]
pub(crate) static VERIFY_CALLS: std::sync::atomic::AtomicUsize =
    std::sync::atomic::AtomicUsize::new(0);

lazy_static! {
    /// Hash checked against when the account does not exist, so that the
    /// miss costs one Argon2 verification like a wrong password does.
    static ref DUMMY_HASH: Option<String> = hash_password("vitali-dummy-password").ok();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    #[cfg(test)]
    VERIFY_CALLS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task panicked")?
}

/// Computes the dummy hash up front so the first unknown-email login is not
/// slower than later ones.
pub fn warm_up() {
    lazy_static::initialize(&DUMMY_HASH);
}

/// Burns one verification against [`DUMMY_HASH`]; the result is discarded.
pub async fn verify_dummy_blocking(plain: String) {
    let Some(hash) = DUMMY_HASH.clone() else {
        error!("dummy hash unavailable");
        return;
    };
    if let Err(e) = verify_password_blocking(plain, hash).await {
        error!(error = %e, "dummy verification failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn dummy_hash_is_a_valid_argon2_hash() {
        let hash = DUMMY_HASH.clone().expect("dummy hash");
        assert!(hash.starts_with("$argon2"));
        assert!(!verify_password("secret1", &hash).unwrap());
    }

    #[tokio::test]
    async fn blocking_wrappers_roundtrip() {
        let hash = hash_password_blocking("secret1".into()).await.unwrap();
        assert!(verify_password_blocking("secret1".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_blocking("secret2".into(), hash).await.unwrap());
    }
}
