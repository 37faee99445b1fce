//! Booking Records

use crate::category::{CategoricalField, MarketSegment, MealPlan, RoomType};
use crate::category::{MARKET_SEGMENT, MEAL_PLAN, ROOM_TYPE};
use serde::{Deserialize, Serialize};

/// Numeric columns in record order
pub const NUMERIC_COLUMNS: [&str; 14] = [
    "no_of_adults",
    "no_of_children",
    "no_of_weekend_nights",
    "no_of_week_nights",
    "required_car_parking_space",
    "lead_time",
    "arrival_year",
    "arrival_month",
    "arrival_date",
    "repeated_guest",
    "no_of_previous_cancellations",
    "no_of_previous_bookings_not_canceled",
    "avg_price_per_room",
    "no_of_special_requests",
];

/// Booking as received from a caller, before validation.
///
/// Every field is optional so that an absent field can be reported as a
/// schema mismatch instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBookingRecord {
    pub no_of_adults: Option<i64>,
    pub no_of_children: Option<i64>,
    pub no_of_weekend_nights: Option<i64>,
    pub no_of_week_nights: Option<i64>,
    pub required_car_parking_space: Option<i64>,
    pub lead_time: Option<i64>,
    pub arrival_year: Option<i64>,
    pub arrival_month: Option<i64>,
    pub arrival_date: Option<i64>,
    pub repeated_guest: Option<i64>,
    pub no_of_previous_cancellations: Option<i64>,
    pub no_of_previous_bookings_not_canceled: Option<i64>,
    pub avg_price_per_room: Option<f64>,
    pub no_of_special_requests: Option<i64>,
    pub type_of_meal_plan: Option<String>,
    pub room_type_reserved: Option<String>,
    pub market_segment_type: Option<String>,
}

/// Validated booking, ready for feature alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub adults: u32,
    pub children: u32,
    pub weekend_nights: u32,
    pub week_nights: u32,
    pub requires_parking: bool,
    /// Days between booking and arrival
    pub lead_time: u32,
    pub arrival_year: i32,
    pub arrival_month: u32,
    pub arrival_date: u32,
    pub repeated_guest: bool,
    pub previous_cancellations: u32,
    pub previous_bookings_not_canceled: u32,
    pub avg_price_per_room: f64,
    pub special_requests: u32,
    pub meal_plan: MealPlan,
    pub room_type: RoomType,
    pub market_segment: MarketSegment,
}

impl BookingRecord {
    /// Numeric fields keyed by column name, in [`NUMERIC_COLUMNS`] order
    pub fn numeric_values(&self) -> [(&'static str, f64); 14] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let values = [
            self.adults as f64,
            self.children as f64,
            self.weekend_nights as f64,
            self.week_nights as f64,
            flag(self.requires_parking),
            self.lead_time as f64,
            self.arrival_year as f64,
            self.arrival_month as f64,
            self.arrival_date as f64,
            flag(self.repeated_guest),
            self.previous_cancellations as f64,
            self.previous_bookings_not_canceled as f64,
            self.avg_price_per_room,
            self.special_requests as f64,
        ];
        let mut out = [("", 0.0); 14];
        for (slot, (name, value)) in out.iter_mut().zip(NUMERIC_COLUMNS.iter().zip(values)) {
            *slot = (*name, value);
        }
        out
    }

    /// Categorical fields with the level this booking carries
    pub fn categorical_levels(&self) -> [(CategoricalField, &'static str); 3] {
        [
            (MEAL_PLAN, self.meal_plan.as_str()),
            (ROOM_TYPE, self.room_type.as_str()),
            (MARKET_SEGMENT, self.market_segment.as_str()),
        ]
    }
}

impl From<&BookingRecord> for RawBookingRecord {
    fn from(record: &BookingRecord) -> Self {
        Self {
            no_of_adults: Some(record.adults.into()),
            no_of_children: Some(record.children.into()),
            no_of_weekend_nights: Some(record.weekend_nights.into()),
            no_of_week_nights: Some(record.week_nights.into()),
            required_car_parking_space: Some(record.requires_parking.into()),
            lead_time: Some(record.lead_time.into()),
            arrival_year: Some(record.arrival_year.into()),
            arrival_month: Some(record.arrival_month.into()),
            arrival_date: Some(record.arrival_date.into()),
            repeated_guest: Some(record.repeated_guest.into()),
            no_of_previous_cancellations: Some(record.previous_cancellations.into()),
            no_of_previous_bookings_not_canceled: Some(
                record.previous_bookings_not_canceled.into(),
            ),
            avg_price_per_room: Some(record.avg_price_per_room),
            no_of_special_requests: Some(record.special_requests.into()),
            type_of_meal_plan: Some(record.meal_plan.as_str().to_string()),
            room_type_reserved: Some(record.room_type.as_str().to_string()),
            market_segment_type: Some(record.market_segment.as_str().to_string()),
        }
    }
}
