use std::io::Write;

use serde::Serialize;

use market::ratio::RatioRow;

use super::Visualization;
use crate::error::VisualizationError;
use crate::schema::{DisplayConfig, Schema};

#[derive(Serialize)]
struct Header<'a> {
    schema: &'a Schema,
    config: &'a DisplayConfig,
}

/// Streams the table to a writer as JSON lines.
///
/// The first line carries the schema and display settings, every following
/// line is one row. Lines are flushed as they are written so a downstream
/// viewer can follow the stream live. Non-finite floats are written as the
/// labels `"Infinity"`, `"-Infinity"` and `"NaN"`, so `null` only ever means
/// a missing alert.
pub struct JsonLinesWidget<W> {
    writer: W,
    initialized: bool,
}

impl<W: Write> JsonLinesWidget<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            initialized: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<(), VisualizationError> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Visualization for JsonLinesWidget<W> {
    fn initialize(
        &mut self,
        schema: &Schema,
        config: &DisplayConfig,
    ) -> Result<(), VisualizationError> {
        config.validate(schema)?;
        self.write_line(&Header { schema, config })?;
        self.initialized = true;
        Ok(())
    }

    fn append_row(&mut self, row: &RatioRow) -> Result<(), VisualizationError> {
        if !self.initialized {
            return Err(VisualizationError::NotInitialized);
        }
        self.write_line(row)
    }
}
