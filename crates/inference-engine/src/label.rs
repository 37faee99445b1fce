//! Label Mapping

use crate::InferenceError;
use serde::{Deserialize, Serialize};

/// Predicted booking outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingOutcome {
    /// Class 0
    NotCanceled,
    /// Class 1
    Canceled,
}

/// Language used for display labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelLanguage {
    #[default]
    English,
    Indonesian,
}

impl BookingOutcome {
    /// Map a classifier class index
    pub fn from_class_index(index: i64) -> Result<Self, InferenceError> {
        match index {
            0 => Ok(BookingOutcome::NotCanceled),
            1 => Ok(BookingOutcome::Canceled),
            other => Err(InferenceError::InferenceFailed(format!(
                "classifier returned non-binary class {}",
                other
            ))),
        }
    }

    /// Class index the model uses for this outcome
    pub fn class_index(&self) -> usize {
        match self {
            BookingOutcome::NotCanceled => 0,
            BookingOutcome::Canceled => 1,
        }
    }

    /// Display label
    pub fn label(&self, language: LabelLanguage) -> &'static str {
        match (self, language) {
            (BookingOutcome::Canceled, LabelLanguage::English) => "Canceled",
            (BookingOutcome::NotCanceled, LabelLanguage::English) => "Not Canceled",
            (BookingOutcome::Canceled, LabelLanguage::Indonesian) => "Dibatalkan",
            (BookingOutcome::NotCanceled, LabelLanguage::Indonesian) => "Tidak Dibatalkan",
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, BookingOutcome::Canceled)
    }
}

/// Probability rendered for display, two decimals
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}", probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_mapping() {
        assert_eq!(BookingOutcome::from_class_index(1).unwrap(), BookingOutcome::Canceled);
        assert_eq!(BookingOutcome::from_class_index(0).unwrap(), BookingOutcome::NotCanceled);
        assert!(BookingOutcome::from_class_index(2).is_err());
        assert!(BookingOutcome::from_class_index(-1).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(BookingOutcome::Canceled.label(LabelLanguage::English), "Canceled");
        assert_eq!(
            BookingOutcome::NotCanceled.label(LabelLanguage::English),
            "Not Canceled"
        );
        assert_eq!(
            BookingOutcome::NotCanceled.label(LabelLanguage::Indonesian),
            "Tidak Dibatalkan"
        );
    }

    #[test]
    fn test_probability_format() {
        assert_eq!(format_probability(0.876), "0.88");
        assert_eq!(format_probability(1.0), "1.00");
        assert_eq!(format_probability(0.004), "0.00");
    }

    #[test]
    fn test_language_from_config_string() {
        let lang: LabelLanguage = serde_json::from_str("\"indonesian\"").unwrap();
        assert_eq!(lang, LabelLanguage::Indonesian);
    }
}
