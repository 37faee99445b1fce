//! Feature Vector

use crate::schema::TrainingSchema;
use std::sync::Arc;

/// Model-ready feature vector, ordered exactly like its training schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: Arc<TrainingSchema>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// All-zero vector over a schema
    pub fn zeros(schema: Arc<TrainingSchema>) -> Self {
        let values = vec![0.0; schema.len()];
        Self { schema, values }
    }

    /// Schema the vector conforms to
    pub fn schema(&self) -> &Arc<TrainingSchema> {
        &self.schema
    }

    /// Raw values in schema order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Width of the vector
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a vector built over a schema
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema.position(column).map(|i| self.values[i])
    }

    /// Overwrite a named column; returns false if the schema lacks it
    pub fn set(&mut self, column: &str, value: f64) -> bool {
        match self.schema.position(column) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Column name and value pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Single-precision copy for model runtimes
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_access() {
        let schema = Arc::new(
            TrainingSchema::from_columns(vec!["lead_time".to_string(), "arrival_month".to_string()])
                .unwrap(),
        );
        let mut vector = FeatureVector::zeros(schema);
        assert_eq!(vector.len(), 2);
        assert!(vector.set("arrival_month", 0.5));
        assert!(!vector.set("unknown", 1.0));
        assert_eq!(vector.get("arrival_month"), Some(0.5));
        assert_eq!(vector.get("unknown"), None);

        let pairs: Vec<(&str, f64)> = vector.iter().collect();
        assert_eq!(pairs, vec![("lead_time", 0.0), ("arrival_month", 0.5)]);
        assert_eq!(vector.to_f32(), vec![0.0f32, 0.5f32]);
    }
}
