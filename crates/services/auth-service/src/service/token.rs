//! Compact HS256 session tokens.
//!
//! `base64url(header) . base64url(payload) . base64url(hmac)`, unpadded,
//! with the header fixed to `{"alg":"HS256","typ":"JWT"}`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{TOKEN_ALGORITHM, TOKEN_TYPE};

type HmacSha256 = Hmac<Sha256>;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Expiry, unix seconds
    pub exp: i64,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Signs and checks tokens with one fixed secret.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Serialize and sign `claims`.
    pub fn encode(&self, claims: &Claims) -> AppResult<String> {
        let header = Header {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        };
        let header = encode_segment(&header)?;
        let payload = encode_segment(claims)?;

        let signing_input = format!("{}.{}", header, payload);
        let signature = self.sign(&signing_input);

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Check the signature and decode the payload.
    ///
    /// Expiry is not checked here. Anything malformed yields `None`.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut parts = token.split('.');
        let (header, payload, signature) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }

        let expected = self.sign(&format!("{}.{}", header, payload));
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return None;
        }

        let header: Header = decode_segment(header)?;
        if header.alg != TOKEN_ALGORITHM {
            return None;
        }

        decode_segment(payload)
    }

    fn sign(&self, signing_input: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

fn encode_segment<T: Serialize>(value: &T) -> AppResult<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| AppError::internal(format!("Token encoding failed: {}", e)))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}
