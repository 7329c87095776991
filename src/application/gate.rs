use super::acquisition::AcquisitionState;

pub const CHART_ERROR_MESSAGE: &str = "Error loading chart data.";

/// What the component renders for a given acquisition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateView {
    /// Full-area loading skeleton.
    Placeholder,
    /// Centered fixed error text.
    Error,
    /// Empty container the chart attaches to.
    Surface,
}

impl GateView {
    pub fn for_state<T>(state: &AcquisitionState<T>) -> Self {
        match state {
            AcquisitionState::Pending => Self::Placeholder,
            AcquisitionState::Failed(_) => Self::Error,
            AcquisitionState::Ready(_) => Self::Surface,
        }
    }

    /// Only the surface hosts a chart.
    pub fn hosts_chart(&self) -> bool {
        matches!(self, Self::Surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ChartError;

    #[test]
    fn every_failure_maps_to_error_view() {
        for err in [
            ChartError::Network("timeout".into()),
            ChartError::Decode("bad json".into()),
            ChartError::NoData("AAPL".into()),
        ] {
            assert_eq!(GateView::for_state(&AcquisitionState::<()>::Failed(err)), GateView::Error);
        }
        assert_eq!(GateView::for_state(&AcquisitionState::<()>::Pending), GateView::Placeholder);
        assert!(GateView::for_state(&AcquisitionState::Ready(1)).hosts_chart());
    }
}
