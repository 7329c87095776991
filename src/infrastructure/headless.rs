//! In-memory chart engine and window. Every call is recorded so the lifecycle
//! can be driven and inspected without a browser.

use crate::domain::{
    chart::{
        CandleStyle, ChartContainer, ChartEngine, ChartHandle, ChartOptions, Dimensions, Marker,
        PriceScaleOptions, ResizeEvents, SeriesId, TimeScaleOptions, VolumeStyle,
    },
    errors::{ChartError, ChartResult},
    market_data::{CandlePoint, VolumePoint},
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    ChartCreated { chart: usize, size: Dimensions },
    ChartRemoved { chart: usize },
    ListenerAdded { listener: usize },
    ListenerRemoved { listener: usize },
    Resized { chart: usize, size: Dimensions },
}

/// Engine call that fails on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    CreateChart,
    AddSeries,
    SetData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Candlestick,
    Volume,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSeries {
    pub kind: SeriesKind,
    pub candle_style: Option<CandleStyle>,
    pub volume_style: Option<VolumeStyle>,
    pub scale: PriceScaleOptions,
    pub candles: Vec<CandlePoint>,
    pub volumes: Vec<VolumePoint>,
    pub markers: Vec<Marker>,
    pub updates: Vec<CandlePoint>,
}

impl HeadlessSeries {
    fn new(kind: SeriesKind, scale: PriceScaleOptions) -> Self {
        Self {
            kind,
            candle_style: None,
            volume_style: None,
            scale,
            candles: Vec::new(),
            volumes: Vec::new(),
            markers: Vec::new(),
            updates: Vec::new(),
        }
    }
}

/// Everything one chart instance was told.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRecord {
    pub id: usize,
    pub options: ChartOptions,
    pub size: Dimensions,
    pub time_scale: Option<TimeScaleOptions>,
    pub series: Vec<HeadlessSeries>,
    /// Number of bars present when `fit_content` last ran.
    pub fitted_bars: Option<usize>,
    pub removed: bool,
}

impl ChartRecord {
    pub fn series_of(&self, kind: SeriesKind) -> Option<&HeadlessSeries> {
        self.series.iter().find(|series| series.kind == kind)
    }
}

#[derive(Default)]
struct Journal {
    events: Vec<SurfaceEvent>,
    charts: Vec<ChartRecord>,
    fail_at: Option<FailPoint>,
}

type Listener = (usize, Box<dyn FnMut()>);

#[derive(Clone, Default)]
pub struct HeadlessEngine {
    journal: Rc<RefCell<Journal>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_listener: Rc<Cell<usize>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window sharing this engine's journal.
    pub fn window(&self) -> HeadlessWindow {
        HeadlessWindow {
            journal: Rc::clone(&self.journal),
            listeners: Rc::clone(&self.listeners),
            next_listener: Rc::clone(&self.next_listener),
        }
    }

    pub fn fail_at(&self, point: Option<FailPoint>) {
        self.journal.borrow_mut().fail_at = point;
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.journal.borrow().events.clone()
    }

    pub fn charts(&self) -> Vec<ChartRecord> {
        self.journal.borrow().charts.clone()
    }

    pub fn chart(&self, id: usize) -> Option<ChartRecord> {
        self.journal.borrow().charts.get(id).cloned()
    }

    pub fn last_chart(&self) -> Option<ChartRecord> {
        self.journal.borrow().charts.last().cloned()
    }

    pub fn live_charts(&self) -> usize {
        self.journal.borrow().charts.iter().filter(|chart| !chart.removed).count()
    }
}

impl ChartEngine for HeadlessEngine {
    type Container = HeadlessContainer;
    type Chart = HeadlessChart;

    fn create_chart(&self, container: &HeadlessContainer, options: &ChartOptions) -> ChartResult<HeadlessChart> {
        let mut journal = self.journal.borrow_mut();
        if journal.fail_at == Some(FailPoint::CreateChart) {
            return Err(ChartError::rendering("createChart failed"));
        }
        let id = journal.charts.len();
        let size = container.client_size();
        journal.charts.push(ChartRecord {
            id,
            options: *options,
            size: options.size(),
            time_scale: None,
            series: Vec::new(),
            fitted_bars: None,
            removed: false,
        });
        journal.events.push(SurfaceEvent::ChartCreated { chart: id, size });
        Ok(HeadlessChart { id, journal: Rc::clone(&self.journal) })
    }
}

pub struct HeadlessChart {
    id: usize,
    journal: Rc<RefCell<Journal>>,
}

impl HeadlessChart {
    pub fn id(&self) -> usize {
        self.id
    }

    fn check(&self, point: Option<FailPoint>) -> ChartResult<()> {
        let journal = self.journal.borrow();
        if journal.charts[self.id].removed {
            return Err(ChartError::Lifecycle(format!("chart {} already removed", self.id)));
        }
        if point.is_some() && journal.fail_at == point {
            return Err(ChartError::rendering(format!("{:?} failed", journal.fail_at)));
        }
        Ok(())
    }

    fn with_record<R>(&mut self, f: impl FnOnce(&mut ChartRecord) -> R) -> R {
        let mut journal = self.journal.borrow_mut();
        f(&mut journal.charts[self.id])
    }

    fn with_series(&mut self, series: SeriesId, f: impl FnOnce(&mut HeadlessSeries)) -> ChartResult<()> {
        self.with_record(|record| match record.series.get_mut(series.0) {
            Some(found) => {
                f(found);
                Ok(())
            }
            None => Err(ChartError::rendering(format!("unknown series {}", series.0))),
        })
    }

    fn add_series(&mut self, series: HeadlessSeries) -> ChartResult<SeriesId> {
        self.check(Some(FailPoint::AddSeries))?;
        Ok(self.with_record(|record| {
            record.series.push(series);
            SeriesId(record.series.len() - 1)
        }))
    }
}

impl ChartHandle for HeadlessChart {
    fn configure_time_scale(&mut self, options: &TimeScaleOptions) -> ChartResult<()> {
        self.check(None)?;
        self.with_record(|record| record.time_scale = Some(*options));
        Ok(())
    }

    fn fit_content(&mut self) -> ChartResult<()> {
        self.check(Some(FailPoint::SetData))?;
        self.with_record(|record| {
            let bars = record.series_of(SeriesKind::Candlestick).map_or(0, |series| series.candles.len());
            record.fitted_bars = Some(bars);
        });
        Ok(())
    }

    fn add_candlestick_series(&mut self, style: &CandleStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        let mut series = HeadlessSeries::new(SeriesKind::Candlestick, *scale);
        series.candle_style = Some(*style);
        self.add_series(series)
    }

    fn add_volume_series(&mut self, style: &VolumeStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        let mut series = HeadlessSeries::new(SeriesKind::Volume, *scale);
        series.volume_style = Some(*style);
        self.add_series(series)
    }

    fn set_markers(&mut self, series: SeriesId, markers: &[Marker]) -> ChartResult<()> {
        self.check(Some(FailPoint::SetData))?;
        self.with_series(series, |found| found.markers = markers.to_vec())
    }

    fn set_candles(&mut self, series: SeriesId, data: &[CandlePoint]) -> ChartResult<()> {
        self.check(Some(FailPoint::SetData))?;
        self.with_series(series, |found| found.candles = data.to_vec())
    }

    fn set_volumes(&mut self, series: SeriesId, data: &[VolumePoint]) -> ChartResult<()> {
        self.check(Some(FailPoint::SetData))?;
        self.with_series(series, |found| found.volumes = data.to_vec())
    }

    fn update_candle(&mut self, series: SeriesId, point: &CandlePoint) -> ChartResult<()> {
        self.check(Some(FailPoint::SetData))?;
        self.with_series(series, |found| found.updates.push(*point))
    }

    fn resize(&mut self, size: Dimensions) -> ChartResult<()> {
        self.check(Some(FailPoint::SetData))?;
        let id = self.id;
        let mut journal = self.journal.borrow_mut();
        journal.charts[id].size = size;
        journal.events.push(SurfaceEvent::Resized { chart: id, size });
        Ok(())
    }

    fn remove(&mut self) {
        let id = self.id;
        let mut journal = self.journal.borrow_mut();
        if journal.charts[id].removed {
            return;
        }
        journal.charts[id].removed = true;
        journal.events.push(SurfaceEvent::ChartRemoved { chart: id });
    }
}

/// Window whose resize events are fired by hand.
#[derive(Clone)]
pub struct HeadlessWindow {
    journal: Rc<RefCell<Journal>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_listener: Rc<Cell<usize>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ListenerId(usize);

impl HeadlessWindow {
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Run every registered resize listener once.
    pub fn dispatch_resize(&self) {
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (_, listener) in listeners.iter_mut() {
            listener();
        }
        let mut current = self.listeners.borrow_mut();
        listeners.append(&mut current);
        *current = listeners;
    }
}

impl ResizeEvents for HeadlessWindow {
    type Subscription = ListenerId;

    fn subscribe(&self, on_resize: Box<dyn FnMut()>) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, on_resize));
        self.journal.borrow_mut().events.push(SurfaceEvent::ListenerAdded { listener: id });
        ListenerId(id)
    }

    fn unsubscribe(&self, subscription: ListenerId) {
        self.listeners.borrow_mut().retain(|(id, _)| *id != subscription.0);
        self.journal.borrow_mut().events.push(SurfaceEvent::ListenerRemoved { listener: subscription.0 });
    }
}

/// Container whose size tests can change between events.
#[derive(Debug, Clone, Default)]
pub struct HeadlessContainer {
    size: Rc<Cell<Dimensions>>,
}

impl HeadlessContainer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: Rc::new(Cell::new(Dimensions::new(width, height))) }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set(Dimensions::new(width, height));
    }
}

impl ChartContainer for HeadlessContainer {
    fn client_size(&self) -> Dimensions {
        self.size.get()
    }
}
