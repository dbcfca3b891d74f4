use tracing::error;

use crate::error::ChartResult;

/// Log-and-continue policy for hosts that must never fail because of a chart.
///
/// ```
/// use canvas_charts::api::FailSoft;
/// use canvas_charts::{ChartError, ChartResult};
///
/// let failed: ChartResult<u32> = Err(ChartError::UnsupportedChartType("gauge".to_owned()));
/// assert_eq!(failed.or_log("create dashboard chart"), None);
/// ```
pub trait FailSoft<T> {
    /// Returns the value, or logs the error at `error` level and returns `None`.
    fn or_log(self, context: &str) -> Option<T>;
}

impl<T> FailSoft<T> for ChartResult<T> {
    fn or_log(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                error!(context, error = %err, "chart operation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FailSoft;
    use crate::error::{ChartError, ChartResult};

    #[test]
    fn passes_values_through() {
        let ok: ChartResult<u8> = Ok(7);
        assert_eq!(ok.or_log("ok"), Some(7));
        let err: ChartResult<u8> = Err(ChartError::InvalidData("bad".to_owned()));
        assert_eq!(err.or_log("err"), None);
    }
}
