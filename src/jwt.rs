use base64::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// The decoded payload of a token.
pub type ClaimSet = Map<String, Value>;

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    #[error("JWT is malformed")]
    JwtMalformed,
    #[error("Invalid base64: {0}")]
    InvalidBase64(base64::DecodeError),
    #[error("Invalid UTF-8")]
    InvalidUtf8(std::string::FromUtf8Error),
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Signing method (alg) is unspecified")]
    MissingAlgorithm,
    #[error("Payload is not a JSON object")]
    PayloadNotObject,
}

#[derive(Debug, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(default)]
    pub typ: Option<String>,
}

/// A token decoded without any signature check.
#[derive(Debug)]
pub struct Jwt {
    pub header: Header,
    pub claims: ClaimSet,
    pub signature: String,
}

fn decode_segment(segment: &str) -> Result<String, Error> {
    let decoded = BASE64_URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('=').as_bytes())
        .map_err(Error::InvalidBase64)?;
    String::from_utf8(decoded).map_err(Error::InvalidUtf8)
}

impl FromStr for Jwt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();

        if parts.len() != 3 {
            return Err(Error::JwtMalformed);
        }

        let (header, payload, signature) = (parts[0], parts[1], parts[2]);

        let header_str = decode_segment(header)?;
        let header: Value = serde_json::from_str(&header_str).map_err(|_| Error::InvalidHeader)?;
        if !header.is_object() {
            return Err(Error::InvalidHeader);
        }
        if !header.get("alg").is_some_and(Value::is_string) {
            return Err(Error::MissingAlgorithm);
        }
        let header: Header = serde_json::from_value(header).map_err(|_| Error::InvalidHeader)?;

        let payload_str = decode_segment(payload)?;
        let claims = match serde_json::from_str(&payload_str) {
            Ok(Value::Object(claims)) => claims,
            _ => return Err(Error::PayloadNotObject),
        };

        Ok(Jwt {
            header,
            claims,
            signature: signature.to_string(),
        })
    }
}
