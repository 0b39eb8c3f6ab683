use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Session token issuer and verifier.
///
/// Tokens are compact JWTs signed with HS512. The algorithm is fixed: tokens
/// declaring any other `alg` (including `none`) are rejected as malformed.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS512;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared secret for signing and verifying tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 512 bits (64 bytes) for HS512
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    /// Issue a token for `subject` as if issued at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims::new(subject, issued_at, ttl);
        self.encode(&claims)
    }

    /// Sign already-built claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = Header::new(Self::ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before expiry, so a token signed with another
    /// secret reports `BadSignature` even when it has also expired.
    ///
    /// # Errors
    /// * `Malformed` - Not a three-segment JWT, unknown algorithm, or missing claims
    /// * `BadSignature` - Signature does not match
    /// * `Expired` - Current time is past `exp`
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_64_bytes_long_for_hs512_signing_purposes!";

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue("42", Duration::hours(48))
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 48 * 60 * 60);
    }

    #[test]
    fn test_token_is_url_safe() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue("42", Duration::hours(1)).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'));
    }

    #[test]
    fn test_header_declares_hs512() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue("42", Duration::hours(1)).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = JwtHandler::new(SECRET);

        let issued_at = Utc::now() - Duration::hours(49);
        let token = handler
            .issue_at("42", issued_at, Duration::hours(48))
            .unwrap();

        assert_eq!(handler.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_64_bytes_long_key_for_hs512_signing_purposes!!");
        let handler2 = JwtHandler::new(b"secret2_at_least_64_bytes_long_key_for_hs512_signing_purposes!!");

        let token = handler1.issue("42", Duration::hours(1)).unwrap();

        assert_eq!(handler2.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue("42", Duration::hours(1)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        // {"sub":"42","iat":1700000000,"exp":4102444800}
        let forged = format!(
            "{}.eyJzdWIiOiI0MiIsImlhdCI6MTcwMDAwMDAwMCwiZXhwIjo0MTAyNDQ0ODAwfQ.{}",
            parts[0], parts[2]
        );

        assert_eq!(handler.verify(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = JwtHandler::new(SECRET);

        assert_eq!(handler.verify(""), Err(TokenError::Malformed));
        assert_eq!(handler.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(
            handler.verify("invalid.token.here"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_verify_rejects_none_algorithm() {
        let handler = JwtHandler::new(SECRET);

        // {"alg":"none","typ":"JWT"} . {"sub":"42","iat":1700000000,"exp":4102444800} . <empty>
        let unsigned = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiI0MiIsImlhdCI6MTcwMDAwMDAwMCwiZXhwIjo0MTAyNDQ0ODAwfQ.";

        assert_eq!(handler.verify(unsigned), Err(TokenError::Malformed));
    }

    #[test]
    fn test_verify_rejects_other_hmac_algorithm() {
        let handler = JwtHandler::new(SECRET);

        let claims = SessionClaims::new("42", Utc::now(), Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(handler.verify(&token), Err(TokenError::Malformed));
    }
}
