/// Credential handling
///
/// - `password`: Argon2id hashing and verification for user passwords

pub mod password;

pub use password::{hash_password, verify_password, PasswordError};
