use crate::domain::{
    chart::{
        ChartBlueprint, ChartContainer, ChartEngine, ChartHandle, ChartSettings, ResizeEvents,
        SeriesId, Theme,
    },
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{PriceSeries, Timespan, Trade},
    post::Post,
};
use crate::{log_debug, log_error, log_warn};
use std::cell::RefCell;
use std::rc::Rc;

/// Snapshot of everything one activation is built from.
#[derive(Debug, Clone, Copy)]
pub struct ActivationInputs<'a> {
    pub series: &'a PriceSeries,
    pub theme: Theme,
    pub timespan: Timespan,
    pub post: Option<&'a Post>,
    pub trade: Option<&'a Trade>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Uninitialized,
    Active,
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleStats {
    pub activations: u64,
    pub teardowns: u64,
}

struct Activation<C, S> {
    chart: Rc<RefCell<C>>,
    subscription: S,
    candle_series: SeriesId,
    volume_series: SeriesId,
}

enum State<C, S> {
    Uninitialized,
    Active(Activation<C, S>),
    TornDown,
}

/// Owns at most one chart instance and the resize listener registered for it.
///
/// Every activation is a full rebuild: the previous chart is torn down
/// (listener removed, then chart removed) before a new one is created.
pub struct ChartLifecycle<E: ChartEngine, W: ResizeEvents> {
    engine: E,
    window: W,
    settings: ChartSettings,
    state: State<E::Chart, W::Subscription>,
    stats: LifecycleStats,
    unmounted: bool,
}

impl<E: ChartEngine, W: ResizeEvents> ChartLifecycle<E, W> {
    pub fn new(engine: E, window: W, settings: ChartSettings) -> Self {
        Self {
            engine,
            window,
            settings,
            state: State::Uninitialized,
            stats: LifecycleStats::default(),
            unmounted: false,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        match self.state {
            State::Uninitialized => LifecyclePhase::Uninitialized,
            State::Active(_) => LifecyclePhase::Active,
            State::TornDown => LifecyclePhase::TornDown,
        }
    }

    pub fn stats(&self) -> LifecycleStats {
        self.stats
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Series handles of the active chart as (candles, volumes).
    pub fn series(&self) -> Option<(SeriesId, SeriesId)> {
        match &self.state {
            State::Active(activation) => Some((activation.candle_series, activation.volume_series)),
            _ => None,
        }
    }

    /// Build a chart into `container`, replacing the current one.
    pub fn activate(&mut self, container: &E::Container, inputs: ActivationInputs<'_>) -> ChartResult<()> {
        if self.unmounted {
            return Err(ChartError::Lifecycle("chart is unmounted".to_string()));
        }
        self.teardown();

        let size = container.client_size();
        let blueprint =
            ChartBlueprint::new(inputs.theme, size, inputs.timespan, &self.settings, inputs.post);
        self.state = State::TornDown;
        let mut chart = self.engine.create_chart(container, &blueprint.options)?;

        let (candle_series, volume_series) = match populate(&mut chart, &blueprint, &inputs, &self.settings) {
            Ok(ids) => ids,
            Err(e) => {
                log_error!(LogComponent::Application("ChartLifecycle"), "❌ Chart setup failed: {}", e);
                chart.remove();
                return Err(e);
            }
        };

        let chart = Rc::new(RefCell::new(chart));
        let subscription =
            self.window.subscribe(resize_handler(&chart, container.clone(), self.settings.resize()));
        self.state = State::Active(Activation { chart, subscription, candle_series, volume_series });
        self.stats.activations += 1;

        log_debug!(
            LogComponent::Application("ChartLifecycle"),
            "📈 Activation #{} ({:?}, {}x{}, {} bars)",
            self.stats.activations,
            inputs.theme,
            size.width,
            size.height,
            inputs.series.len()
        );
        Ok(())
    }

    /// Remove the resize listener and destroy the chart. No-op unless active.
    pub fn teardown(&mut self) {
        if !matches!(self.state, State::Active(_)) {
            return;
        }
        if let State::Active(activation) = std::mem::replace(&mut self.state, State::TornDown) {
            self.window.unsubscribe(activation.subscription);
            activation.chart.borrow_mut().remove();
            self.stats.teardowns += 1;
            log_debug!(
                LogComponent::Application("ChartLifecycle"),
                "🧹 Teardown #{}",
                self.stats.teardowns
            );
        }
    }

    /// Final teardown; later activations are rejected.
    pub fn unmount(&mut self) {
        self.teardown();
        self.unmounted = true;
    }
}

impl<E: ChartEngine, W: ResizeEvents> Drop for ChartLifecycle<E, W> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn populate<C: ChartHandle>(
    chart: &mut C,
    blueprint: &ChartBlueprint,
    inputs: &ActivationInputs<'_>,
    settings: &ChartSettings,
) -> ChartResult<(SeriesId, SeriesId)> {
    chart.configure_time_scale(&blueprint.time_scale)?;

    let candles = chart.add_candlestick_series(&blueprint.candle_style, &blueprint.candle_scale)?;
    let volumes = chart.add_volume_series(&blueprint.volume_style, &blueprint.volume_scale)?;

    if !blueprint.markers().is_empty() {
        chart.set_markers(candles, blueprint.markers())?;
    }

    chart.set_candles(candles, inputs.series.candles())?;
    chart.set_volumes(volumes, inputs.series.volumes())?;

    if settings.live_updates() {
        if let Some(point) = inputs.trade.and_then(|trade| inputs.series.merge_trade(trade)) {
            chart.update_candle(candles, &point)?;
        }
    }

    chart.fit_content()?;
    Ok((candles, volumes))
}

/// Listener registered for every activation. With resizing disabled it does
/// nothing; it never keeps a removed chart alive.
fn resize_handler<C, K>(chart: &Rc<RefCell<C>>, container: K, enabled: bool) -> Box<dyn FnMut()>
where
    C: ChartHandle + 'static,
    K: ChartContainer + 'static,
{
    let chart = Rc::downgrade(chart);
    Box::new(move || {
        if !enabled {
            return;
        }
        let Some(chart) = chart.upgrade() else {
            return;
        };
        let size = container.client_size();
        let Ok(mut chart) = chart.try_borrow_mut() else {
            return;
        };
        if let Err(e) = chart.resize(size) {
            log_warn!(LogComponent::Application("ChartLifecycle"), "⚠️ Resize failed: {}", e);
        }
    })
}
