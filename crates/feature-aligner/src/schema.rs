//! Training Schema

use crate::error::AlignError;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Ordered column names the classifier was fitted against
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl TrainingSchema {
    /// Build a schema from an ordered column list
    pub fn from_columns(columns: Vec<String>) -> Result<Self, AlignError> {
        if columns.is_empty() {
            return Err(AlignError::InvalidSchema("no columns".to_string()));
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(AlignError::InvalidSchema(format!(
                    "empty column name at position {}",
                    position
                )));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(AlignError::InvalidSchema(format!(
                    "duplicate column {}",
                    name
                )));
            }
        }

        Ok(Self { columns, index })
    }

    /// Load a schema stored as a JSON array of column names
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AlignError> {
        let path = path.as_ref();
        let load_err = |reason: String| AlignError::ArtifactLoad {
            artifact: "training schema",
            path: path.display().to_string(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| load_err(e.to_string()))?;
        let columns: Vec<String> =
            serde_json::from_slice(&bytes).map_err(|e| load_err(e.to_string()))?;
        let schema = Self::from_columns(columns)?;

        info!(
            "Loaded training schema from {}: {} columns",
            path.display(),
            schema.len()
        );
        Ok(schema)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the schema contains a column
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}
