//! Booking Validator for Presence, Domain and Range Checking

use crate::category::{MarketSegment, MealPlan, RoomType};
use crate::error::ValidationError;
use crate::record::{BookingRecord, RawBookingRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of fields in a booking record
pub const FIELD_COUNT: usize = 17;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Arrival years seen at training time (inclusive)
    pub arrival_year_range: (i64, i64),
    /// Guest, night and history counts
    pub count_range: (i64, i64),
    /// Lead time in days
    pub lead_time_range: (i64, i64),
    /// Average price per room
    pub price_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            arrival_year_range: (2017, 2018),
            count_range: (0, 1_000),
            lead_time_range: (0, 3_650),
            price_range: (0.0, 100_000.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
    /// The validated record, present only when `valid`
    pub record: Option<BookingRecord>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(record: BookingRecord) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked: FIELD_COUNT,
            record: Some(record),
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked: FIELD_COUNT,
            record: None,
        }
    }
}

fn clamp_range(range: (i64, i64), min: i64, max: i64) -> (i64, i64) {
    (range.0.max(min), range.1.min(max))
}

/// Accumulates errors while reading fields out of a raw record
struct FieldReader<'a> {
    config: &'a ValidationConfig,
    errors: Vec<ValidationError>,
}

impl<'a> FieldReader<'a> {
    fn present<T: Clone>(&mut self, field: &'static str, value: &Option<T>) -> Option<T> {
        if value.is_none() {
            self.errors.push(ValidationError::SchemaMismatch(field));
        }
        value.clone()
    }

    fn int(&mut self, field: &'static str, value: Option<i64>, range: (i64, i64)) -> Option<i64> {
        let value = self.present(field, &value)?;
        if value < range.0 || value > range.1 {
            self.errors.push(ValidationError::OutOfRange {
                field,
                value: value as f64,
                min: range.0 as f64,
                max: range.1 as f64,
            });
            return None;
        }
        Some(value)
    }

    /// Range-checked read into `u32`; the range is narrowed to what `u32` holds
    fn uint(&mut self, field: &'static str, value: Option<i64>, range: (i64, i64)) -> Option<u32> {
        let range = clamp_range(range, 0, u32::MAX.into());
        self.int(field, value, range)
            .and_then(|v| u32::try_from(v).ok())
    }

    fn count(&mut self, field: &'static str, value: Option<i64>) -> Option<u32> {
        let range = self.config.count_range;
        self.uint(field, value, range)
    }

    fn year(&mut self, field: &'static str, value: Option<i64>, range: (i64, i64)) -> Option<i32> {
        let range = clamp_range(range, i32::MIN.into(), i32::MAX.into());
        self.int(field, value, range)
            .and_then(|v| i32::try_from(v).ok())
    }

    fn flag(&mut self, field: &'static str, value: Option<i64>) -> Option<bool> {
        self.int(field, value, (0, 1)).map(|v| v == 1)
    }

    fn price(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        let value = self.present(field, &value)?;
        let (min, max) = self.config.price_range;
        if !value.is_finite() || value < min || value > max {
            self.errors.push(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            });
            return None;
        }
        Some(value)
    }

    fn category<T>(
        &mut self,
        field: &'static str,
        value: &Option<String>,
        parse: fn(&str) -> Result<T, ValidationError>,
    ) -> Option<T> {
        let value = self.present(field, value)?;
        match parse(&value) {
            Ok(level) => Some(level),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }
}

/// Validator turning raw bookings into typed records
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check every field and collect all errors
    pub fn check(&self, raw: &RawBookingRecord) -> ValidationResult {
        let mut r = FieldReader {
            config: &self.config,
            errors: Vec::new(),
        };

        let adults = r.count("no_of_adults", raw.no_of_adults);
        let children = r.count("no_of_children", raw.no_of_children);
        let weekend_nights = r.count("no_of_weekend_nights", raw.no_of_weekend_nights);
        let week_nights = r.count("no_of_week_nights", raw.no_of_week_nights);
        let requires_parking = r.flag("required_car_parking_space", raw.required_car_parking_space);
        let lead_time = r.uint("lead_time", raw.lead_time, self.config.lead_time_range);
        let arrival_year = r.year("arrival_year", raw.arrival_year, self.config.arrival_year_range);
        let arrival_month = r.uint("arrival_month", raw.arrival_month, (1, 12));
        let arrival_date = r.uint("arrival_date", raw.arrival_date, (1, 31));
        let repeated_guest = r.flag("repeated_guest", raw.repeated_guest);
        let previous_cancellations =
            r.count("no_of_previous_cancellations", raw.no_of_previous_cancellations);
        let previous_bookings_not_canceled = r.count(
            "no_of_previous_bookings_not_canceled",
            raw.no_of_previous_bookings_not_canceled,
        );
        let avg_price_per_room = r.price("avg_price_per_room", raw.avg_price_per_room);
        let special_requests = r.count("no_of_special_requests", raw.no_of_special_requests);
        let meal_plan = r.category("type_of_meal_plan", &raw.type_of_meal_plan, MealPlan::parse);
        let room_type = r.category("room_type_reserved", &raw.room_type_reserved, RoomType::parse);
        let market_segment = r.category(
            "market_segment_type",
            &raw.market_segment_type,
            MarketSegment::parse,
        );

        if !r.errors.is_empty() {
            debug!("Booking rejected with {} validation errors", r.errors.len());
            return ValidationResult::invalid(r.errors);
        }

        // Every field is Some once no error was recorded
        let record = (|| {
            Some(BookingRecord {
                adults: adults?,
                children: children?,
                weekend_nights: weekend_nights?,
                week_nights: week_nights?,
                requires_parking: requires_parking?,
                lead_time: lead_time?,
                arrival_year: arrival_year?,
                arrival_month: arrival_month?,
                arrival_date: arrival_date?,
                repeated_guest: repeated_guest?,
                previous_cancellations: previous_cancellations?,
                previous_bookings_not_canceled: previous_bookings_not_canceled?,
                avg_price_per_room: avg_price_per_room?,
                special_requests: special_requests?,
                meal_plan: meal_plan?,
                room_type: room_type?,
                market_segment: market_segment?,
            })
        })();

        match record {
            Some(record) => ValidationResult::valid(record),
            None => ValidationResult::invalid(Vec::new()),
        }
    }

    /// Validate a raw record, failing on the first error in field order
    pub fn validate(&self, raw: &RawBookingRecord) -> Result<BookingRecord, ValidationError> {
        let result = self.check(raw);
        match (result.record, result.errors.into_iter().next()) {
            (Some(record), _) => Ok(record),
            (None, Some(err)) => Err(err),
            (None, None) => Err(ValidationError::SchemaMismatch("record")),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
