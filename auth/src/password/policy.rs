use super::errors::PolicyViolation;

/// Password strength rules.
///
/// Rules run in a fixed order and the first failure is reported:
/// length, mixed case, digit, special character, login containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    const MIN_LENGTH: usize = 8;
    const SPECIAL_CHARS: &'static str = "!@#$%^&*(),.?\":{}|<>";

    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate password for the given login.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `NoMixedCase` - Missing an uppercase or a lowercase letter
    /// * `NoNumber` - No digit
    /// * `NoSpecialChar` - None of `!@#$%^&*(),.?":{}|<>`
    /// * `ContainsLogin` - Contains the login, ignoring case
    pub fn validate(&self, password: &str, login: &str) -> Result<(), PolicyViolation> {
        Self::with_valid_length(password)?;
        Self::with_mixed_case(password)?;
        Self::with_number(password)?;
        Self::with_special_char(password)?;
        Self::without_login(password, login)
    }

    fn with_valid_length(password: &str) -> Result<(), PolicyViolation> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PolicyViolation::TooShort {
                min: Self::MIN_LENGTH,
                got: length,
            })
        } else {
            Ok(())
        }
    }

    fn with_mixed_case(password: &str) -> Result<(), PolicyViolation> {
        let has_upper = password.chars().any(char::is_uppercase);
        let has_lower = password.chars().any(char::is_lowercase);
        if has_upper && has_lower {
            Ok(())
        } else {
            Err(PolicyViolation::NoMixedCase)
        }
    }

    fn with_number(password: &str) -> Result<(), PolicyViolation> {
        if password.chars().any(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(PolicyViolation::NoNumber)
        }
    }

    fn with_special_char(password: &str) -> Result<(), PolicyViolation> {
        if password.chars().any(|c| Self::SPECIAL_CHARS.contains(c)) {
            Ok(())
        } else {
            Err(PolicyViolation::NoSpecialChar)
        }
    }

    fn without_login(password: &str, login: &str) -> Result<(), PolicyViolation> {
        if password.to_lowercase().contains(&login.to_lowercase()) {
            Err(PolicyViolation::ContainsLogin)
        } else {
            Ok(())
        }
    }
}
