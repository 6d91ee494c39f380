//! Mask operator

use super::{required_str, Operator, OperatorType};
use crate::anonymization::models::OperatorParams;
use crate::domain::{Result, ShroudError};
use rand::RngCore;

pub const MASKING_CHAR: &str = "masking_char";
pub const CHARS_TO_MASK: &str = "chars_to_mask";
pub const FROM_END: &str = "from_end";

/// Overwrites up to `chars_to_mask` characters with `masking_char`,
/// counting from the start, or from the end when `from_end` is set
#[derive(Debug, Clone, Copy, Default)]
pub struct Mask;

struct MaskParams {
    masking_char: char,
    chars_to_mask: usize,
    from_end: bool,
}

impl MaskParams {
    fn parse(params: &OperatorParams) -> Result<Self> {
        let masking_char = required_str(params, MASKING_CHAR, "mask")?;
        let mut chars = masking_char.chars();
        let masking_char = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ShroudError::InvalidParam(
                    "Invalid input, masking_char must be a character".to_string(),
                ))
            }
        };

        let chars_to_mask = match params.get(CHARS_TO_MASK) {
            None => {
                return Err(ShroudError::InvalidParam(format!(
                    "Expected parameter {CHARS_TO_MASK} for operator mask"
                )))
            }
            Some(value) => value
                .as_i64()
                .ok_or_else(|| {
                    ShroudError::InvalidParam(format!(
                        "Invalid parameter value for {CHARS_TO_MASK}."
                    ))
                })?
                .max(0) as usize,
        };

        let from_end = match params.get(FROM_END) {
            None => {
                return Err(ShroudError::InvalidParam(format!(
                    "Expected parameter {FROM_END} for operator mask"
                )))
            }
            Some(value) => value.as_bool().ok_or_else(|| {
                ShroudError::InvalidParam(format!("Invalid parameter value for {FROM_END}."))
            })?,
        };

        Ok(Self {
            masking_char,
            chars_to_mask,
            from_end,
        })
    }
}

impl Operator for Mask {
    fn operate(
        &self,
        text: &str,
        params: &OperatorParams,
        _rng: &mut dyn RngCore,
    ) -> Result<String> {
        let MaskParams {
            masking_char,
            chars_to_mask,
            from_end,
        } = MaskParams::parse(params)?;

        let len = text.chars().count();
        let masked = chars_to_mask.min(len);
        let (mask_from, mask_to) = if from_end {
            (len - masked, len)
        } else {
            (0, masked)
        };

        Ok(text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if (mask_from..mask_to).contains(&i) {
                    masking_char
                } else {
                    c
                }
            })
            .collect())
    }

    fn validate(&self, params: &OperatorParams) -> Result<()> {
        MaskParams::parse(params).map(|_| ())
    }

    fn name(&self) -> &'static str {
        "mask"
    }

    fn operator_type(&self) -> OperatorType {
        OperatorType::Anonymize
    }
}
