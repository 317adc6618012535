//! GraphAdapter
//!
//! Bridges a quote feed and a charting widget.
//!
//! Lifecycle:
//!   • `start` is called once when the chart becomes visible. With a widget the
//!     fixed schema and display settings are declared and the adapter is `Ready`.
//!     Without one (no charting runtime) it is `Detached` and stays that way.
//!   • `on_data` is called for every delivered quote pair. When `Ready`, one
//!     ratio row is derived and appended; otherwise the call does nothing.
//!
//! Nothing here is fatal. A widget that fails to initialize or to accept a row
//! only means that nothing is drawn for it.

use tracing::{debug, info, warn};

use market::ratio::{RatioBand, RatioRow, derive_row};
use market::types::QuotePair;

use crate::schema::{DisplayConfig, Schema};
use crate::widget::Visualization;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterState {
    /// `start` has not been called yet.
    Uninitialized,
    /// Started without a usable widget; updates are skipped.
    Detached,
    /// Widget configured; updates append rows.
    Ready,
}

pub struct GraphAdapter<V> {
    band: RatioBand,
    schema: Schema,
    config: DisplayConfig,
    widget: Option<V>,
    state: AdapterState,
}

impl<V: Visualization> GraphAdapter<V> {
    pub fn new(band: RatioBand) -> Self {
        let schema = Schema::ratio_schema();
        let config = DisplayConfig::ratio_chart(&schema);

        Self {
            band,
            schema,
            config,
            widget: None,
            state: AdapterState::Uninitialized,
        }
    }

    /// One-time setup. Later calls are ignored and return the current state.
    pub fn start(&mut self, widget: Option<V>) -> AdapterState {
        if self.state != AdapterState::Uninitialized {
            debug!(state = ?self.state, "Graph adapter already started; ignoring");
            return self.state;
        }

        let Some(mut widget) = widget else {
            info!("No visualization runtime available; chart disabled");
            self.state = AdapterState::Detached;
            return self.state;
        };

        match widget.initialize(&self.schema, &self.config) {
            Ok(()) => {
                info!(
                    tolerance = self.band.tolerance,
                    columns = ?self.config.columns,
                    "Chart configured"
                );
                self.widget = Some(widget);
                self.state = AdapterState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Chart initialization failed; chart disabled");
                self.state = AdapterState::Detached;
            }
        }

        self.state
    }

    /// Derive and append the row for one quote pair.
    ///
    /// Returns the appended row, or `None` when there is no widget or the widget
    /// refused the row.
    pub fn on_data(&mut self, pair: &QuotePair) -> Option<RatioRow> {
        let Some(widget) = self.widget.as_mut() else {
            debug!(state = ?self.state, "No chart handle; skipping update");
            return None;
        };

        let row = derive_row(pair, self.band);

        if let Err(e) = widget.append_row(&row) {
            warn!(error = %e, "Failed to append ratio row");
            return None;
        }

        debug!(
            ratio = row.ratio,
            alert = ?row.trigger_alert,
            ts = %row.timestamp,
            "Appended ratio row"
        );
        Some(row)
    }

    pub fn state(&self) -> AdapterState {
        self.state
    }

    pub fn band(&self) -> RatioBand {
        self.band
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn widget(&self) -> Option<&V> {
        self.widget.as_ref()
    }

    pub fn into_widget(self) -> Option<V> {
        self.widget
    }
}
