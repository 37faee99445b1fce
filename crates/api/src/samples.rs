//! Bundled Sample Bookings

use booking_validator::RawBookingRecord;
use serde::Serialize;

/// A named example booking
#[derive(Debug, Clone, Serialize)]
pub struct SampleBooking {
    pub name: &'static str,
    pub description: &'static str,
    pub booking: RawBookingRecord,
}

/// Short lead time, parking and a special request
pub fn likely_kept() -> RawBookingRecord {
    RawBookingRecord {
        no_of_adults: Some(2),
        no_of_children: Some(0),
        no_of_weekend_nights: Some(1),
        no_of_week_nights: Some(2),
        required_car_parking_space: Some(1),
        lead_time: Some(20),
        arrival_year: Some(2018),
        arrival_month: Some(8),
        arrival_date: Some(15),
        repeated_guest: Some(0),
        no_of_previous_cancellations: Some(0),
        no_of_previous_bookings_not_canceled: Some(1),
        avg_price_per_room: Some(100.0),
        no_of_special_requests: Some(1),
        type_of_meal_plan: Some("Meal Plan 1".to_string()),
        room_type_reserved: Some("Room_Type 1".to_string()),
        market_segment_type: Some("Online".to_string()),
    }
}

/// Long lead time, prior cancellations, no requests
pub fn likely_canceled() -> RawBookingRecord {
    RawBookingRecord {
        no_of_adults: Some(2),
        no_of_children: Some(2),
        no_of_weekend_nights: Some(3),
        no_of_week_nights: Some(5),
        required_car_parking_space: Some(0),
        lead_time: Some(200),
        arrival_year: Some(2018),
        arrival_month: Some(12),
        arrival_date: Some(28),
        repeated_guest: Some(0),
        no_of_previous_cancellations: Some(2),
        no_of_previous_bookings_not_canceled: Some(0),
        avg_price_per_room: Some(130.0),
        no_of_special_requests: Some(0),
        type_of_meal_plan: Some("Not Selected".to_string()),
        room_type_reserved: Some("Room_Type 6".to_string()),
        market_segment_type: Some("Offline".to_string()),
    }
}

/// All bundled samples
pub fn samples() -> Vec<SampleBooking> {
    vec![
        SampleBooking {
            name: "short-lead-online",
            description: "Online booking 20 days ahead with parking and one special request",
            booking: likely_kept(),
        },
        SampleBooking {
            name: "long-lead-offline",
            description: "Offline family booking 200 days ahead with two prior cancellations",
            booking: likely_canceled(),
        },
    ]
}
