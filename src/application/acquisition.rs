use crate::domain::{
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{OhlcProvider, PriceSeries, SeriesRequest},
};
use crate::{log_debug, log_error};
use std::rc::Rc;

/// Tri-state of one data source.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionState<T> {
    Pending,
    Ready(T),
    Failed(ChartError),
}

pub type SeriesState = AcquisitionState<Rc<PriceSeries>>;

impl<T> AcquisitionState<T> {
    /// `None` means the request has not resolved yet.
    pub fn from_outcome(outcome: Option<ChartResult<T>>) -> Self {
        match outcome {
            None => Self::Pending,
            Some(Ok(value)) => Self::Ready(value),
            Some(Err(e)) => Self::Failed(e),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Fetch one series. Invalid requests, transport failures and empty results
/// all end up as `Failed`.
pub async fn acquire<P: OhlcProvider>(provider: &P, request: ChartResult<SeriesRequest>) -> SeriesState {
    AcquisitionState::from_outcome(Some(fetch_non_empty(provider, request).await.map(Rc::new)))
}

async fn fetch_non_empty<P: OhlcProvider>(
    provider: &P,
    request: ChartResult<SeriesRequest>,
) -> ChartResult<PriceSeries> {
    let request = request?;
    let result = provider.fetch_series(&request).await.and_then(|series| {
        if series.is_empty() {
            Err(ChartError::NoData(format!(
                "{} {} {}",
                request.symbol, request.multiplier, request.timespan
            )))
        } else {
            Ok(series)
        }
    });

    match &result {
        Ok(series) => {
            log_debug!(
                LogComponent::Application("Acquisition"),
                "📊 {} bars for {} ({}x{})",
                series.len(),
                request.symbol,
                request.multiplier,
                request.timespan
            );
        }
        Err(e) => {
            log_error!(LogComponent::Application("Acquisition"), "❌ {} failed: {}", request.symbol, e);
        }
    }
    result
}
