mod json_lines;
mod memory;

pub use json_lines::JsonLinesWidget;
pub use memory::MemoryTable;

use market::ratio::RatioRow;

use crate::error::VisualizationError;
use crate::schema::{DisplayConfig, Schema};

/// Handle to a charting widget's backing table.
///
/// The adapter calls `initialize` exactly once, before any row is appended.
/// Pivoting, aggregation and drawing are entirely the widget's business.
pub trait Visualization {
    fn initialize(
        &mut self,
        schema: &Schema,
        config: &DisplayConfig,
    ) -> Result<(), VisualizationError>;

    /// Append a single-row batch.
    fn append_row(&mut self, row: &RatioRow) -> Result<(), VisualizationError>;
}
