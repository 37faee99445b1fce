//! Booking Record Validation
//!
//! Typed booking records, the categorical domains the classifier was
//! trained on, and validation of raw caller input.

mod category;
mod error;
mod record;
mod validator;

pub use category::{
    CategoricalField, MarketSegment, MealPlan, RoomType, CATEGORICAL_FIELDS, MARKET_SEGMENT,
    MEAL_PLAN, ROOM_TYPE,
};
pub use error::ValidationError;
pub use record::{BookingRecord, RawBookingRecord, NUMERIC_COLUMNS};
pub use validator::{ValidationConfig, ValidationResult, Validator, FIELD_COUNT};
