//! Categorical Booking Attributes
//!
//! Level lists are kept in the order the training-time one-hot encoder
//! emitted its indicator columns (lexicographic). The first level of each
//! list is the reference level when the schema was built with drop-first
//! encoding.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Static description of one categorical column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalField {
    /// Training-time column name
    pub name: &'static str,
    /// Known levels in dummy-column order
    pub levels: &'static [&'static str],
}

impl CategoricalField {
    /// Reference level dropped under drop-first encoding
    pub fn reference_level(&self) -> &'static str {
        self.levels[0]
    }

    /// Indicator column name for a level, e.g. `market_segment_type_Online`
    pub fn indicator_column(&self, level: &str) -> String {
        format!("{}_{}", self.name, level)
    }

    /// Position of a level, if known
    pub fn level_index(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| *l == level)
    }
}

/// Meal plan field
pub const MEAL_PLAN: CategoricalField = CategoricalField {
    name: "type_of_meal_plan",
    levels: &["Meal Plan 1", "Meal Plan 2", "Meal Plan 3", "Not Selected"],
};

/// Room type field
pub const ROOM_TYPE: CategoricalField = CategoricalField {
    name: "room_type_reserved",
    levels: &[
        "Room_Type 1",
        "Room_Type 2",
        "Room_Type 3",
        "Room_Type 4",
        "Room_Type 5",
        "Room_Type 6",
        "Room_Type 7",
    ],
};

/// Market segment field
pub const MARKET_SEGMENT: CategoricalField = CategoricalField {
    name: "market_segment_type",
    levels: &["Aviation", "Complementary", "Corporate", "Offline", "Online"],
};

/// All categorical fields, in record order
pub static CATEGORICAL_FIELDS: [CategoricalField; 3] = [MEAL_PLAN, ROOM_TYPE, MARKET_SEGMENT];

/// Meal plan booked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealPlan {
    #[serde(rename = "Meal Plan 1")]
    MealPlan1,
    #[serde(rename = "Meal Plan 2")]
    MealPlan2,
    #[serde(rename = "Meal Plan 3")]
    MealPlan3,
    #[serde(rename = "Not Selected")]
    NotSelected,
}

impl MealPlan {
    const ALL: [MealPlan; 4] = [
        MealPlan::MealPlan1,
        MealPlan::MealPlan2,
        MealPlan::MealPlan3,
        MealPlan::NotSelected,
    ];

    /// Training-time level string
    pub fn as_str(&self) -> &'static str {
        MEAL_PLAN.levels[*self as usize]
    }

    /// Parse a level string
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        parse_level(&MEAL_PLAN, value).map(|i| Self::ALL[i])
    }
}

/// Room type reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Room_Type 1")]
    RoomType1,
    #[serde(rename = "Room_Type 2")]
    RoomType2,
    #[serde(rename = "Room_Type 3")]
    RoomType3,
    #[serde(rename = "Room_Type 4")]
    RoomType4,
    #[serde(rename = "Room_Type 5")]
    RoomType5,
    #[serde(rename = "Room_Type 6")]
    RoomType6,
    #[serde(rename = "Room_Type 7")]
    RoomType7,
}

impl RoomType {
    const ALL: [RoomType; 7] = [
        RoomType::RoomType1,
        RoomType::RoomType2,
        RoomType::RoomType3,
        RoomType::RoomType4,
        RoomType::RoomType5,
        RoomType::RoomType6,
        RoomType::RoomType7,
    ];

    /// Training-time level string
    pub fn as_str(&self) -> &'static str {
        ROOM_TYPE.levels[*self as usize]
    }

    /// Parse a level string
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        parse_level(&ROOM_TYPE, value).map(|i| Self::ALL[i])
    }
}

/// Market segment the booking came through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSegment {
    Aviation,
    Complementary,
    Corporate,
    Offline,
    Online,
}

impl MarketSegment {
    const ALL: [MarketSegment; 5] = [
        MarketSegment::Aviation,
        MarketSegment::Complementary,
        MarketSegment::Corporate,
        MarketSegment::Offline,
        MarketSegment::Online,
    ];

    /// Training-time level string
    pub fn as_str(&self) -> &'static str {
        MARKET_SEGMENT.levels[*self as usize]
    }

    /// Parse a level string
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        parse_level(&MARKET_SEGMENT, value).map(|i| Self::ALL[i])
    }
}

fn parse_level(field: &CategoricalField, value: &str) -> Result<usize, ValidationError> {
    field
        .level_index(value)
        .ok_or_else(|| ValidationError::UnknownCategory {
            field: field.name,
            value: value.to_string(),
        })
}
