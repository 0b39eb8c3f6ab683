pub mod argon2;
pub mod errors;
pub mod policy;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use errors::PolicyViolation;
pub use policy::PasswordPolicy;
