//! Length-prefixed pricing output
//!
//! Pricing entry points fill an over-allocated `double` buffer as
//! `[n, a_1 .. a_n, b_1 .. b_n, ...]`: a count followed by two equally long
//! groups (tenors, then sensitivities). Anything past `2n + 1` is ignored.

use crate::error::MarshalError;
use serde::{Deserialize, Serialize};

/// Two parallel groups decoded from one output buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    pub tenors: Vec<f64>,
    pub sensitivities: Vec<f64>,
}

impl SensitivityCurve {
    /// Decode `buffer` using the count in its first element
    pub fn decode(buffer: &[f64]) -> Result<Self, MarshalError> {
        let Some(&head) = buffer.first() else {
            return Err(MarshalError::OutputLayout(
                "empty output buffer".to_string(),
            ));
        };

        if !head.is_finite() || head < 0.0 {
            return Err(MarshalError::OutputLayout(format!(
                "invalid element count {}",
                head
            )));
        }

        let size = head.floor();
        let needed = 1.0 + 2.0 * size;
        if needed > buffer.len() as f64 {
            return Err(MarshalError::OutputLayout(format!(
                "count {} needs {} elements, buffer holds {}",
                size,
                needed,
                buffer.len()
            )));
        }

        let size = size as usize;
        Ok(Self {
            tenors: buffer[1..=size].to_vec(),
            sensitivities: buffer[size + 1..=2 * size].to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.tenors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenors.is_empty()
    }

    /// `(tenor, sensitivity)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.tenors
            .iter()
            .copied()
            .zip(self.sensitivities.iter().copied())
    }
}
