//! Feature Alignment
//!
//! Turns a validated booking into the exact vector the classifier was
//! trained on:
//!
//! 1. expand categorical fields into indicator columns,
//! 2. reindex against the training schema (unknown source columns are
//!    dropped, schema columns without a source are zero),
//! 3. rescale the standard group in place,
//! 4. rescale the robust group in place.
//!
//! All consistency checks between schema, scalers and encoding happen once
//! in [`FeatureAligner::new`], so `align` itself cannot fail.

use crate::encoding::{self, EncodingConvention, EncodingPolicy};
use crate::error::AlignError;
use crate::features::FeatureVector;
use crate::scaler::{FittedScaler, ScalerKind};
use crate::schema::TrainingSchema;
use booking_validator::{
    BookingRecord, CategoricalField, RawBookingRecord, Validator, CATEGORICAL_FIELDS,
    NUMERIC_COLUMNS,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Aligns booking records to a training schema
#[derive(Debug, Clone)]
pub struct FeatureAligner {
    schema: Arc<TrainingSchema>,
    conventions: [EncodingConvention; 3],
    standard: FittedScaler,
    robust: FittedScaler,
    /// Schema positions of the standard scaler's columns, in fitted order
    standard_positions: Vec<usize>,
    /// Schema positions of the robust scaler's columns, in fitted order
    robust_positions: Vec<usize>,
}

impl FeatureAligner {
    /// Validate the artifact set and build an aligner
    pub fn new(
        schema: Arc<TrainingSchema>,
        standard: FittedScaler,
        robust: FittedScaler,
        policy: EncodingPolicy,
    ) -> Result<Self, AlignError> {
        let standard_positions = scaler_positions(&schema, &standard, ScalerKind::Standard)?;
        let robust_positions = scaler_positions(&schema, &robust, ScalerKind::Robust)?;

        let mut conventions = [EncodingConvention::Full; 3];
        for (slot, field) in conventions.iter_mut().zip(CATEGORICAL_FIELDS.iter()) {
            let detected = encoding::detect(&schema, field)?;
            *slot = policy.resolve(field, detected)?;
        }

        for column in schema.columns() {
            if !is_known_column(column) {
                warn!("Schema column {} has no source field and will always be 0", column);
            }
        }

        info!(
            "Feature aligner ready: {} columns, encodings {}",
            schema.len(),
            CATEGORICAL_FIELDS
                .iter()
                .zip(conventions.iter())
                .map(|(f, c)| format!("{}={}", f.name, c))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            schema,
            conventions,
            standard,
            robust,
            standard_positions,
            robust_positions,
        })
    }

    /// Training schema
    pub fn schema(&self) -> &Arc<TrainingSchema> {
        &self.schema
    }

    /// Output width
    pub fn width(&self) -> usize {
        self.schema.len()
    }

    /// Resolved encoding per categorical field
    pub fn conventions(&self) -> impl Iterator<Item = (&'static CategoricalField, EncodingConvention)> + '_ {
        CATEGORICAL_FIELDS.iter().zip(self.conventions.iter().copied())
    }

    /// Expand and reindex a record without rescaling
    pub fn reindex(&self, record: &BookingRecord) -> FeatureVector {
        let mut vector = FeatureVector::zeros(Arc::clone(&self.schema));

        for (name, value) in record.numeric_values() {
            vector.set(name, value);
        }

        for ((field, level), convention) in record
            .categorical_levels()
            .iter()
            .zip(self.conventions.iter())
        {
            for (column, value) in encoding::expand(field, level, *convention) {
                vector.set(&column, value);
            }
        }

        vector
    }

    /// Apply both scalers in place to a reindexed vector
    pub fn rescale(&self, vector: &mut FeatureVector) {
        let values = vector.values_mut();
        for (i, &pos) in self.standard_positions.iter().enumerate() {
            values[pos] = self.standard.scale_value(i, values[pos]);
        }
        for (i, &pos) in self.robust_positions.iter().enumerate() {
            values[pos] = self.robust.scale_value(i, values[pos]);
        }
    }

    /// Full pipeline: expand, reindex, rescale
    pub fn align(&self, record: &BookingRecord) -> FeatureVector {
        let mut vector = self.reindex(record);
        self.rescale(&mut vector);
        debug!("Aligned booking to {} features", vector.len());
        vector
    }

    /// Validate a raw record and align it
    pub fn align_raw(
        &self,
        raw: &RawBookingRecord,
        validator: &Validator,
    ) -> Result<FeatureVector, AlignError> {
        let record = validator.validate(raw)?;
        Ok(self.align(&record))
    }
}

fn scaler_positions(
    schema: &TrainingSchema,
    scaler: &FittedScaler,
    expected: ScalerKind,
) -> Result<Vec<usize>, AlignError> {
    if scaler.kind() != expected {
        return Err(AlignError::InvalidScaler {
            scaler: expected.name(),
            reason: format!("got a {} scaler", scaler.kind().name()),
        });
    }
    scaler.check_columns()?;

    scaler
        .columns()
        .iter()
        .map(|column| {
            schema
                .position(column)
                .ok_or_else(|| AlignError::ScalerColumnMissing {
                    scaler: expected.name(),
                    column: column.clone(),
                })
        })
        .collect()
}

fn is_known_column(column: &str) -> bool {
    NUMERIC_COLUMNS.contains(&column)
        || CATEGORICAL_FIELDS.iter().any(|field| {
            field
                .levels
                .iter()
                .any(|level| field.indicator_column(level) == column)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::{ScalerParams, ROBUST_COLUMNS, STANDARD_COLUMNS};
    use booking_validator::{
        MarketSegment, MealPlan, RoomType, ValidationError, MARKET_SEGMENT, MEAL_PLAN, ROOM_TYPE,
    };
    use proptest::prelude::*;

    fn schema_columns(drop_first: bool) -> Vec<String> {
        let skip = usize::from(drop_first);
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|s| s.to_string()).collect();
        for field in CATEGORICAL_FIELDS {
            columns.extend(field.levels.iter().skip(skip).map(|l| field.indicator_column(l)));
        }
        columns
    }

    fn standard() -> FittedScaler {
        FittedScaler::new(
            ScalerKind::Standard,
            ScalerParams {
                columns: STANDARD_COLUMNS.iter().map(|s| s.to_string()).collect(),
                center: Some(vec![7.4, 15.6]),
                scale: Some(vec![3.1, 8.7]),
            },
        )
        .unwrap()
    }

    fn robust() -> FittedScaler {
        FittedScaler::new(
            ScalerKind::Robust,
            ScalerParams {
                columns: ROBUST_COLUMNS.iter().map(|s| s.to_string()).collect(),
                center: Some(vec![
                    2.0, 0.0, 1.0, 2.0, 0.0, 57.0, 2018.0, 0.0, 0.0, 0.0, 99.45, 0.0,
                ]),
                scale: Some(vec![
                    0.0, 0.0, 2.0, 2.0, 0.0, 109.0, 0.0, 0.0, 0.0, 0.0, 39.5, 1.0,
                ]),
            },
        )
        .unwrap()
    }

    fn aligner(drop_first: bool) -> FeatureAligner {
        let schema = Arc::new(TrainingSchema::from_columns(schema_columns(drop_first)).unwrap());
        FeatureAligner::new(schema, standard(), robust(), EncodingPolicy::Auto).unwrap()
    }

    fn scenario_a() -> BookingRecord {
        BookingRecord {
            adults: 2,
            children: 0,
            weekend_nights: 1,
            week_nights: 2,
            requires_parking: true,
            lead_time: 20,
            arrival_year: 2018,
            arrival_month: 8,
            arrival_date: 15,
            repeated_guest: false,
            previous_cancellations: 0,
            previous_bookings_not_canceled: 1,
            avg_price_per_room: 100.0,
            special_requests: 1,
            meal_plan: MealPlan::MealPlan1,
            room_type: RoomType::RoomType1,
            market_segment: MarketSegment::Online,
        }
    }

    fn boundary() -> BookingRecord {
        BookingRecord {
            adults: 0,
            children: 0,
            weekend_nights: 0,
            week_nights: 0,
            requires_parking: false,
            lead_time: 0,
            arrival_year: 2017,
            arrival_month: 1,
            arrival_date: 1,
            repeated_guest: false,
            previous_cancellations: 0,
            previous_bookings_not_canceled: 0,
            avg_price_per_room: 0.0,
            special_requests: 0,
            meal_plan: MealPlan::NotSelected,
            room_type: RoomType::RoomType7,
            market_segment: MarketSegment::Aviation,
        }
    }

    fn indicators(vector: &FeatureVector, field: &CategoricalField) -> Vec<f64> {
        field
            .levels
            .iter()
            .filter_map(|l| vector.get(&field.indicator_column(l)))
            .collect()
    }

    #[test]
    fn test_width_and_order_match_schema() {
        for drop_first in [false, true] {
            let aligner = aligner(drop_first);
            let vector = aligner.align(&scenario_a());
            assert_eq!(vector.len(), aligner.schema().len());
            let names: Vec<&str> = vector.iter().map(|(n, _)| n).collect();
            let expected: Vec<&str> = aligner.schema().columns().iter().map(String::as_str).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn test_scenario_a_values() {
        let vector = aligner(false).align(&scenario_a());
        // Standard group
        assert!((vector.get("arrival_month").unwrap() - (8.0 - 7.4) / 3.1).abs() < 1e-12);
        // Robust group, zero IQR falls back to unit scale
        assert_eq!(vector.get("no_of_adults"), Some(0.0));
        assert_eq!(vector.get("arrival_year"), Some(0.0));
        assert_eq!(vector.get("required_car_parking_space"), Some(1.0));
        assert!((vector.get("lead_time").unwrap() - (20.0 - 57.0) / 109.0).abs() < 1e-12);
        // Indicators are never scaled
        assert_eq!(vector.get("market_segment_type_Online"), Some(1.0));
        assert_eq!(vector.get("market_segment_type_Offline"), Some(0.0));
        assert_eq!(vector.get("type_of_meal_plan_Meal Plan 1"), Some(1.0));
    }

    #[test]
    fn test_drop_first_reference_level_is_all_zero() {
        let aligner = aligner(true);
        let mut record = scenario_a();
        record.market_segment = MarketSegment::Aviation;
        let vector = aligner.align(&record);
        assert_eq!(vector.get("market_segment_type_Aviation"), None);
        assert!(indicators(&vector, &MARKET_SEGMENT).iter().all(|v| *v == 0.0));
        assert_eq!(indicators(&vector, &MEAL_PLAN).iter().sum::<f64>(), 0.0);
        // Non-reference level still sets exactly one indicator
        record.meal_plan = MealPlan::MealPlan3;
        let vector = aligner.align(&record);
        assert_eq!(vector.get("type_of_meal_plan_Meal Plan 3"), Some(1.0));
    }

    #[test]
    fn test_align_is_bit_reproducible() {
        let aligner = aligner(false);
        let a = aligner.align(&scenario_a());
        let b = aligner.align(&scenario_a());
        let bits = |v: &FeatureVector| v.values().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_boundary_record_is_finite() {
        for drop_first in [false, true] {
            let vector = aligner(drop_first).align(&boundary());
            assert!(vector.values().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_extra_schema_column_is_zero() {
        let mut columns = schema_columns(false);
        columns.insert(3, "booking_status_flag".to_string());
        let schema = Arc::new(TrainingSchema::from_columns(columns).unwrap());
        let aligner = FeatureAligner::new(schema, standard(), robust(), EncodingPolicy::Auto).unwrap();
        let vector = aligner.align(&scenario_a());
        assert_eq!(vector.values()[3], 0.0);
        assert_eq!(vector.get("booking_status_flag"), Some(0.0));
    }

    #[test]
    fn test_missing_scaler_column_is_fatal() {
        let columns: Vec<String> = schema_columns(false)
            .into_iter()
            .filter(|c| c != "arrival_date")
            .collect();
        let schema = Arc::new(TrainingSchema::from_columns(columns).unwrap());
        let err = FeatureAligner::new(schema, standard(), robust(), EncodingPolicy::Auto).unwrap_err();
        match err {
            AlignError::ScalerColumnMissing { scaler, column } => {
                assert_eq!(scaler, "standard");
                assert_eq!(column, "arrival_date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_swapped_scalers_rejected() {
        let schema = Arc::new(TrainingSchema::from_columns(schema_columns(false)).unwrap());
        let err = FeatureAligner::new(schema, robust(), standard(), EncodingPolicy::Auto).unwrap_err();
        assert!(matches!(err, AlignError::InvalidScaler { .. }));
    }

    #[test]
    fn test_policy_mismatch_is_fatal() {
        let schema = Arc::new(TrainingSchema::from_columns(schema_columns(false)).unwrap());
        let err = FeatureAligner::new(schema, standard(), robust(), EncodingPolicy::DropFirst)
            .unwrap_err();
        assert!(matches!(err, AlignError::EncodingMismatch { .. }));

        let schema = Arc::new(TrainingSchema::from_columns(schema_columns(true)).unwrap());
        assert!(FeatureAligner::new(schema, standard(), robust(), EncodingPolicy::DropFirst).is_ok());
    }

    #[test]
    fn test_conventions_reported_per_field() {
        let aligner = aligner(true);
        let conventions: Vec<_> = aligner.conventions().map(|(f, c)| (f.name, c)).collect();
        assert_eq!(conventions.len(), 3);
        assert!(conventions.iter().all(|(_, c)| *c == EncodingConvention::DropFirst));
        assert_eq!(conventions[1].0, ROOM_TYPE.name);
    }

    #[test]
    fn test_align_raw_rejects_unknown_category() {
        let mut raw = RawBookingRecord::from(&scenario_a());
        raw.market_segment_type = Some("Travel Agent".to_string());
        let err = aligner(false).align_raw(&raw, &Validator::default()).unwrap_err();
        assert!(matches!(
            err,
            AlignError::Validation(ValidationError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_align_raw_rejects_missing_field() {
        let mut raw = RawBookingRecord::from(&scenario_a());
        raw.avg_price_per_room = None;
        let err = aligner(false).align_raw(&raw, &Validator::default()).unwrap_err();
        assert!(matches!(
            err,
            AlignError::Validation(ValidationError::SchemaMismatch("avg_price_per_room"))
        ));
    }

    prop_compose! {
        fn arb_record()(
            counts in proptest::collection::vec(0u32..20, 7),
            lead_time in 0u32..500,
            arrival_year in 2017i32..=2018,
            arrival_month in 1u32..=12,
            arrival_date in 1u32..=31,
            flags in (any::<bool>(), any::<bool>()),
            price in 0.0f64..500.0,
            meal in 0usize..4,
            room in 0usize..7,
            segment in 0usize..5,
        ) -> BookingRecord {
            BookingRecord {
                adults: counts[0],
                children: counts[1],
                weekend_nights: counts[2],
                week_nights: counts[3],
                requires_parking: flags.0,
                lead_time,
                arrival_year,
                arrival_month,
                arrival_date,
                repeated_guest: flags.1,
                previous_cancellations: counts[4],
                previous_bookings_not_canceled: counts[5],
                avg_price_per_room: price,
                special_requests: counts[6],
                meal_plan: MealPlan::parse(MEAL_PLAN.levels[meal]).unwrap(),
                room_type: RoomType::parse(ROOM_TYPE.levels[room]).unwrap(),
                market_segment: MarketSegment::parse(MARKET_SEGMENT.levels[segment]).unwrap(),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_width_and_idempotence(record in arb_record(), drop_first in any::<bool>()) {
            let aligner = aligner(drop_first);
            let a = aligner.align(&record);
            let b = aligner.align(&record);
            prop_assert_eq!(a.len(), aligner.width());
            for (x, y) in a.values().iter().zip(b.values()) {
                prop_assert_eq!(x.to_bits(), y.to_bits());
            }
        }

        #[test]
        fn prop_at_most_one_indicator_per_field(record in arb_record(), drop_first in any::<bool>()) {
            let aligner = aligner(drop_first);
            let vector = aligner.align(&record);
            for ((field, level), (_, convention)) in record.categorical_levels().iter().zip(aligner.conventions()) {
                let values = indicators(&vector, field);
                prop_assert!(values.iter().all(|v| *v == 0.0 || *v == 1.0));
                let set = values.iter().filter(|v| **v == 1.0).count();
                let is_reference = *level == field.reference_level();
                let expected = if convention == EncodingConvention::DropFirst && is_reference { 0 } else { 1 };
                prop_assert_eq!(set, expected);
            }
        }

        #[test]
        fn prop_rescale_touches_only_scaled_columns(record in arb_record()) {
            let aligner = aligner(false);
            let reindexed = aligner.reindex(&record);
            let mut rescaled = reindexed.clone();
            aligner.rescale(&mut rescaled);
            for ((name, before), (_, after)) in reindexed.iter().zip(rescaled.iter()) {
                let scaled = STANDARD_COLUMNS.contains(&name) || ROBUST_COLUMNS.contains(&name);
                if !scaled {
                    prop_assert_eq!(before.to_bits(), after.to_bits());
                }
            }
            prop_assert_eq!(rescaled, aligner.align(&record));
        }
    }
}
