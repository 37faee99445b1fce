//! Feature Alignment Engine
//!
//! Converts validated bookings into the fixed-width, fixed-order numeric
//! vector the cancellation classifier was trained on.

mod aligner;
mod encoding;
mod error;
mod features;
mod scaler;
mod schema;

pub use aligner::FeatureAligner;
pub use encoding::{detect as detect_encoding, EncodingConvention, EncodingPolicy};
pub use error::AlignError;
pub use features::FeatureVector;
pub use scaler::{FittedScaler, ScalerKind, ScalerParams, ROBUST_COLUMNS, STANDARD_COLUMNS};
pub use schema::TrainingSchema;
