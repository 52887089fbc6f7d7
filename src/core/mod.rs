pub mod candle;
pub mod indicator;
pub mod pane;
pub mod primitives;
pub mod scale;
pub mod timeframe;
pub mod types;
pub mod viewport;

pub use candle::{Candle, Dataset};
pub use indicator::{IndicatorKind, IndicatorSeries, IndicatorValues};
pub use pane::{ChartStyle, PaneId, PaneState};
pub use scale::{AUTOSCALE_PADDING_RATIO, ValueRange, ValueScale};
pub use timeframe::Timeframe;
pub use types::{LayoutSize, SplitLayout, Viewport};
pub use viewport::{DEFAULT_MIN_VIEW_BARS, DEFAULT_VIEW_BARS, ViewWindow};
