use market::ratio::RatioRow;

use super::Visualization;
use crate::error::VisualizationError;
use crate::schema::{DisplayConfig, Schema};

/// In-process backing table. Keeps every appended row in delivery order.
#[derive(Debug, Default)]
pub struct MemoryTable {
    layout: Option<(Schema, DisplayConfig)>,
    rows: Vec<RatioRow>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.layout.as_ref().map(|(schema, _)| schema)
    }

    pub fn config(&self) -> Option<&DisplayConfig> {
        self.layout.as_ref().map(|(_, config)| config)
    }

    pub fn rows(&self) -> &[RatioRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Visualization for MemoryTable {
    fn initialize(
        &mut self,
        schema: &Schema,
        config: &DisplayConfig,
    ) -> Result<(), VisualizationError> {
        config.validate(schema)?;
        self.layout = Some((schema.clone(), config.clone()));
        Ok(())
    }

    fn append_row(&mut self, row: &RatioRow) -> Result<(), VisualizationError> {
        if self.layout.is_none() {
            return Err(VisualizationError::NotInitialized);
        }
        self.rows.push(*row);
        Ok(())
    }
}
