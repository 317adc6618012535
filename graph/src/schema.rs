//! Table schema and display settings declared to the widget.
//!
//! Both are static for the lifetime of a chart and serialize to the shapes a
//! pivoting chart widget expects, e.g.
//! ```json
//! {"price_a":"float", ..., "timestamp":"date", ...}
//! {"view":"y_line","row_pivots":["timestamp"],"columns":[...],"aggregates":{...}}
//! ```

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::VisualizationError;

/// Coarse column type understood by the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Float,
    Date,
}

/// Chart kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ViewKind {
    /// Time-series line chart.
    #[serde(rename = "y_line")]
    YLine,
}

/// Per-column aggregation applied when rows are pivoted together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Aggregate {
    #[serde(rename = "avg")]
    Avg,
    #[serde(rename = "distinct count")]
    DistinctCount,
}

/// Named entries that keep their declaration order when serialized as a JSON object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMap<T>(Vec<(String, T)>);

impl<T> Default for FieldMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> FieldMap<T> {
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: String, value: T) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }
}

impl<T: Serialize> Serialize for FieldMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered column declarations for the widget's backing table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    fields: FieldMap<FieldType>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column; re-declaring a name replaces its type in place.
    pub fn with_field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    /// The seven columns of a ratio row.
    pub fn ratio_schema() -> Self {
        Self::new()
            .with_field("price_a", FieldType::Float)
            .with_field("price_b", FieldType::Float)
            .with_field("ratio", FieldType::Float)
            .with_field("timestamp", FieldType::Date)
            .with_field("upper_bound", FieldType::Float)
            .with_field("lower_bound", FieldType::Float)
            .with_field("trigger_alert", FieldType::Float)
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    pub fn fields(&self) -> &FieldMap<FieldType> {
        &self.fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.get(name).is_some()
    }
}

/// Static display settings applied once when the widget is loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    pub view: ViewKind,
    pub row_pivots: Vec<String>,
    pub columns: Vec<String>,
    pub aggregates: FieldMap<Aggregate>,
}

impl DisplayConfig {
    /// Line chart of the ratio and its band, pivoted on time.
    ///
    /// Every float column is averaged; date columns use a distinct count.
    pub fn ratio_chart(schema: &Schema) -> Self {
        let mut aggregates = FieldMap::default();
        for (name, ty) in schema.fields().iter() {
            let agg = match ty {
                FieldType::Float => Aggregate::Avg,
                FieldType::Date => Aggregate::DistinctCount,
            };
            aggregates.insert(name.to_string(), agg);
        }

        Self {
            view: ViewKind::YLine,
            row_pivots: vec!["timestamp".into()],
            columns: ["ratio", "lower_bound", "upper_bound", "trigger_alert"]
                .into_iter()
                .map(String::from)
                .collect(),
            aggregates,
        }
    }

    /// Every referenced column must be declared in `schema`.
    pub fn validate(&self, schema: &Schema) -> Result<(), VisualizationError> {
        let referenced = self
            .row_pivots
            .iter()
            .map(String::as_str)
            .chain(self.columns.iter().map(String::as_str))
            .chain(self.aggregates.names());

        for name in referenced {
            if !schema.contains(name) {
                return Err(VisualizationError::UnknownField(name.to_string()));
            }
        }
        Ok(())
    }
}
