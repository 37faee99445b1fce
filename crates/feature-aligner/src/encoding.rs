//! One-Hot Encoding Conventions

use crate::error::AlignError;
use crate::schema::TrainingSchema;
use booking_validator::CategoricalField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a categorical field was expanded into indicator columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingConvention {
    /// One indicator per level
    Full,
    /// Reference (first) level omitted, represented by all-zero siblings
    DropFirst,
}

impl fmt::Display for EncodingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingConvention::Full => write!(f, "full"),
            EncodingConvention::DropFirst => write!(f, "drop_first"),
        }
    }
}

/// Configured expectation for the schema's encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingPolicy {
    /// Derive the convention from the schema artifact
    #[default]
    Auto,
    /// Require full dummy encoding
    Full,
    /// Require drop-first encoding
    DropFirst,
}

impl EncodingPolicy {
    /// Reconcile the policy with what the schema actually contains
    pub fn resolve(
        self,
        field: &CategoricalField,
        detected: EncodingConvention,
    ) -> Result<EncodingConvention, AlignError> {
        let required = match self {
            EncodingPolicy::Auto => return Ok(detected),
            EncodingPolicy::Full => EncodingConvention::Full,
            EncodingPolicy::DropFirst => EncodingConvention::DropFirst,
        };
        if required != detected {
            return Err(AlignError::EncodingMismatch {
                field: field.name,
                reason: format!("configured {} but schema was built with {}", required, detected),
            });
        }
        Ok(detected)
    }
}

/// Detect which convention the schema uses for a categorical field
pub fn detect(
    schema: &TrainingSchema,
    field: &CategoricalField,
) -> Result<EncodingConvention, AlignError> {
    let present: Vec<bool> = field
        .levels
        .iter()
        .map(|level| schema.contains(&field.indicator_column(level)))
        .collect();

    if present.iter().all(|p| *p) {
        return Ok(EncodingConvention::Full);
    }
    if !present[0] && present[1..].iter().all(|p| *p) {
        return Ok(EncodingConvention::DropFirst);
    }

    let missing: Vec<&str> = field
        .levels
        .iter()
        .zip(&present)
        .filter(|(_, p)| !**p)
        .map(|(level, _)| *level)
        .collect();
    Err(AlignError::EncodingMismatch {
        field: field.name,
        reason: format!("schema lacks indicator columns for levels {:?}", missing),
    })
}

/// Indicator columns and values for one categorical value
pub fn expand<'a>(
    field: &'a CategoricalField,
    level: &str,
    convention: EncodingConvention,
) -> impl Iterator<Item = (String, f64)> + 'a {
    let skip = match convention {
        EncodingConvention::Full => 0,
        EncodingConvention::DropFirst => 1,
    };
    let level = level.to_string();
    field.levels.iter().skip(skip).map(move |candidate| {
        let value = if *candidate == level { 1.0 } else { 0.0 };
        (field.indicator_column(candidate), value)
    })
}
