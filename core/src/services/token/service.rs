//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenType};
use crate::domain::entities::user::User;
use crate::domain::value_objects::UserId;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and validating JWT tokens
///
/// Uses a single process-wide symmetric key (HMAC-SHA256), loaded once at
/// construction and never rotated during the process lifetime. Tokens are
/// self-contained: validity is purely signature plus expiry.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error if the configuration invariants
    /// (secret length, lifetime ordering) do not hold
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // Strict `now < exp`; the library default allows 60s of skew
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Creates a signed access token for a user
    pub fn create_access_token(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::for_user(
            user,
            &self.config.issuer,
            self.config.access_token_expiry_secs,
            TokenType::Access,
        );
        self.encode_jwt(&claims)
    }

    /// Creates a signed refresh token for a user
    ///
    /// Identical to the access token except for the `token_type` claim and
    /// the longer expiry.
    pub fn create_refresh_token(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::for_user(
            user,
            &self.config.issuer,
            self.config.refresh_token_expiry_secs,
            TokenType::Refresh,
        );
        self.encode_jwt(&claims)
    }

    /// Checks whether a token is valid (signature and expiry)
    ///
    /// Never errors toward the caller: an expired, malformed, or
    /// wrongly-signed token all collapse to `false`. The specific reason is
    /// kept only for diagnostic logging.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.decode_claims(token) {
            Ok(_) => true,
            Err(TokenError::TokenExpired) => {
                tracing::debug!("Rejected expired JWT");
                false
            }
            Err(reason) => {
                tracing::debug!("Rejected invalid JWT: {}", reason);
                false
            }
        }
    }

    /// Extracts the email claim from a token
    ///
    /// Extraction is defensive: the signature and expiry are verified again
    /// here, so calling this with an unvalidated token fails safely instead
    /// of yielding claims from an untrusted payload.
    pub fn email_from_token(&self, token: &str) -> DomainResult<String> {
        Ok(self.decode_claims(token)?.email)
    }

    /// Extracts the user id from the subject claim
    pub fn user_id_from_token(&self, token: &str) -> DomainResult<UserId> {
        let claims = self.decode_claims(token)?;
        let uuid = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(UserId::from_uuid(uuid))
    }

    /// Extracts the role set from a token
    pub fn roles_from_token(&self, token: &str) -> DomainResult<Vec<String>> {
        Ok(self.decode_claims(token)?.roles)
    }

    /// Extracts the token type claim
    pub fn token_type_from_token(&self, token: &str) -> DomainResult<TokenType> {
        Ok(self.decode_claims(token)?.token_type)
    }

    /// Configured access token lifetime in seconds, for response payloads
    pub fn access_token_expiration(&self) -> i64 {
        self.config.access_token_expiry_secs
    }

    /// Encodes claims into a signed compact JWT
    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Parses a token and verifies signature, issuer, and expiry
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            })
    }
}
