//! Ports implemented by chart engines and by the host window.

use super::options::{
    CandleStyle, ChartOptions, PriceScaleOptions, TimeScaleOptions, VolumeStyle,
};
use super::value_objects::{Dimensions, Marker};
use crate::domain::errors::ChartResult;
use crate::domain::market_data::{CandlePoint, VolumePoint};

/// Handle to a series inside one chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(pub usize);

/// Element the chart is attached to.
pub trait ChartContainer {
    /// Current inner size of the element.
    fn client_size(&self) -> Dimensions;
}

/// Factory for chart instances (the charting library).
pub trait ChartEngine {
    type Container: ChartContainer + Clone + 'static;
    type Chart: ChartHandle + 'static;

    fn create_chart(
        &self,
        container: &Self::Container,
        options: &ChartOptions,
    ) -> ChartResult<Self::Chart>;
}

/// One live chart instance. `remove` releases every resource it holds; no
/// other method is called afterwards.
pub trait ChartHandle {
    fn configure_time_scale(&mut self, options: &TimeScaleOptions) -> ChartResult<()>;
    fn fit_content(&mut self) -> ChartResult<()>;

    fn add_candlestick_series(
        &mut self,
        style: &CandleStyle,
        scale: &PriceScaleOptions,
    ) -> ChartResult<SeriesId>;

    fn add_volume_series(
        &mut self,
        style: &VolumeStyle,
        scale: &PriceScaleOptions,
    ) -> ChartResult<SeriesId>;

    fn set_markers(&mut self, series: SeriesId, markers: &[Marker]) -> ChartResult<()>;
    fn set_candles(&mut self, series: SeriesId, data: &[CandlePoint]) -> ChartResult<()>;
    fn set_volumes(&mut self, series: SeriesId, data: &[VolumePoint]) -> ChartResult<()>;
    fn update_candle(&mut self, series: SeriesId, point: &CandlePoint) -> ChartResult<()>;

    fn resize(&mut self, size: Dimensions) -> ChartResult<()>;
    fn remove(&mut self);
}

/// Window-level resize notifications. Every `subscribe` is paired with exactly
/// one `unsubscribe` of the returned subscription.
pub trait ResizeEvents {
    type Subscription;

    fn subscribe(&self, on_resize: Box<dyn FnMut()>) -> Self::Subscription;
    fn unsubscribe(&self, subscription: Self::Subscription);
}
