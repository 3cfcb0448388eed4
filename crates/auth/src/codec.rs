//! Compact token codec: the only code that touches the signing key and the
//! wire encoding.
//!
//! Wire format: `base64url(header) . base64url(claims) . base64url(mac)`, with
//! header `{"typ":"JWT","alg":<configured HMAC>}`. Decoding checks, in order:
//! empty input, segment count, header, algorithm, signature, payload. Expiry
//! is never looked at here.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation};
use serde::Deserialize;

use crate::{Claims, SigningKey, TokenError};

pub struct TokenCodec {
    key: SigningKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(key: SigningKey) -> Self {
        let algorithm = key.algorithm();

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            key,
            header: Header::new(algorithm),
            validation,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.key.algorithm()
    }

    /// Serialize and sign `claims`.
    ///
    /// Deterministic for identical claims. Only fails if the claims cannot be
    /// serialized, which is a programming error.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&self.header, claims, self.key.encoding_key())
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify `token` and return its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::EmptyOrNullInput);
        }

        if token.split('.').count() != 3 {
            return Err(TokenError::malformed("expected three dot-separated segments"));
        }

        // A header naming the configured algorithm but failing to parse is
        // malformed, not unsupported.
        let header = jsonwebtoken::decode_header(token).map_err(|e| match declared_algorithm(token) {
            Some(alg) if alg.parse::<Algorithm>().ok() != Some(self.algorithm()) => {
                TokenError::UnsupportedAlgorithm(alg)
            }
            _ => TokenError::malformed(format!("header: {e}")),
        })?;

        if header.alg != self.algorithm() {
            return Err(TokenError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        jsonwebtoken::decode::<Claims>(token, self.key.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => TokenError::BadSignature,
                JwtErrorKind::InvalidAlgorithm
                | JwtErrorKind::InvalidAlgorithmName
                | JwtErrorKind::MissingAlgorithm => {
                    TokenError::UnsupportedAlgorithm(format!("{:?}", header.alg))
                }
                _ => TokenError::malformed(e.to_string()),
            })
    }
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: Option<String>,
}

/// The `alg` string of a header the JWT library refused to parse, if the
/// header is otherwise well-formed JSON (e.g. `"none"`).
fn declared_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    serde_json::from_slice::<RawHeader>(&bytes).ok()?.alg
}
