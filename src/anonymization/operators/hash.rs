//! Hash operator

use super::{Operator, OperatorType};
use crate::anonymization::models::OperatorParams;
use crate::domain::{Result, ShroudError};
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};

pub const HASH_TYPE: &str = "hash_type";
pub const SALT: &str = "salt";

/// Replaces the entity text with the lowercase hex digest of `salt + text`
#[derive(Debug, Clone, Copy, Default)]
pub struct Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashType {
    Sha256,
    Sha512,
}

impl HashType {
    fn from_params(params: &OperatorParams) -> Result<Self> {
        match params.get(HASH_TYPE) {
            None | Some(serde_json::Value::Null) => Ok(Self::Sha256),
            Some(value) => match value.as_str() {
                Some("sha256") => Ok(Self::Sha256),
                Some("sha512") => Ok(Self::Sha512),
                _ => Err(ShroudError::InvalidParam(format!(
                    "Parameter {HASH_TYPE} value {value} is not in ['sha256', 'sha512']."
                ))),
            },
        }
    }
}

fn salt(params: &OperatorParams) -> Result<&str> {
    match params.get(SALT) {
        None | Some(serde_json::Value::Null) => Ok(""),
        Some(value) => value.as_str().ok_or_else(|| {
            ShroudError::InvalidParam(format!("Invalid parameter value for {SALT}."))
        }),
    }
}

fn digest_hex<D: Digest>(salt: &str, text: &str) -> String {
    let mut hasher = D::new();
    hasher.update(salt.as_bytes());
    hasher.update(text.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

impl Operator for Hash {
    fn operate(
        &self,
        text: &str,
        params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        let salt = salt(params)?;
        Ok(match HashType::from_params(params)? {
            HashType::Sha256 => digest_hex::<Sha256>(salt, text),
            HashType::Sha512 => digest_hex::<Sha512>(salt, text),
        })
    }

    fn validate(&self, params: &OperatorParams) -> Result<()> {
        HashType::from_params(params)?;
        salt(params)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "hash"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }
}
