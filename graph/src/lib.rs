//! Display side of the ratio chart.
//!
//! [`adapter::GraphAdapter`] sits between a quote feed and a charting widget:
//! it declares the table schema and display settings once, then turns every
//! delivered quote pair into exactly one appended row. Widgets are reached only
//! through the [`widget::Visualization`] trait.

pub mod adapter;
pub mod error;
pub mod runner;
pub mod schema;
pub mod widget;
