//! Rule-Based Fallback System
//!
//! Provides a heuristic cancellation score when the trained classifier is
//! unavailable or fails.

mod rules;

pub use rules::{RuleBasedClassifier, ScoringRule, DEFAULT_RULES};
