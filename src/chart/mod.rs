mod bar;
mod config;
mod core;
mod donut;

pub use bar::{BarChart, BarConfig, BarOrientation};
pub use config::{ChartConfig, DescriptionArea};
pub use donut::{DonutChart, DonutConfig};
pub use self::core::ChartCore;
