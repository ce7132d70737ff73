//! figchart: animated figure-chart widgets.
//!
//! This crate maps a live-mutating collection of host "figures" (anything
//! with a value, a description and a color) onto donut and bar chart
//! renderers with smooth enter/exit/value-change animations.

pub mod chart;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use crate::chart::{BarChart, ChartConfig, DonutChart};
pub use crate::core::{Figure, FigureList};
pub use crate::error::{ChartError, ChartResult};
