use arrowclass::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_and_verify_password() {
    let hash = hash_password("password123").unwrap();

    assert_ne!(hash, "password123");
    assert!(verify_password("password123", &hash).unwrap());
}

#[test]
fn test_verify_rejects_wrong_password() {
    let hash = hash_password("password123").unwrap();

    assert!(!verify_password("not-the-password", &hash).unwrap());
}

#[test]
fn test_same_password_hashes_differently() {
    // bcrypt salts per call
    let first = hash_password("password123").unwrap();
    let second = hash_password("password123").unwrap();

    assert_ne!(first, second);
}
