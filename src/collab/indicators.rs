//! Reference indicator computation over close prices.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Dataset, IndicatorSeries, IndicatorValues};
use crate::error::ChartResult;

/// Produces indicator samples aligned 1:1 with a dataset.
pub trait IndicatorEngine {
    fn compute(&self, dataset: &Dataset) -> ChartResult<IndicatorSeries>;
}

/// Periods used by [`StandardIndicators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPeriods {
    pub ma: usize,
    pub rsi: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            ma: 20,
            rsi: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// MA, RSI and MACD as a name-keyed series: `ma`, `rsi`, `macd`, `signal`,
/// `hist`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardIndicators {
    pub periods: IndicatorPeriods,
}

impl IndicatorEngine for StandardIndicators {
    fn compute(&self, dataset: &Dataset) -> ChartResult<IndicatorSeries> {
        let closes = dataset.closes();
        let periods = self.periods;
        let macd = macd(&closes, periods.macd_fast, periods.macd_slow, periods.macd_signal);

        let mut named = IndexMap::with_capacity(5);
        named.insert("ma".to_owned(), sma(&closes, periods.ma));
        named.insert("rsi".to_owned(), rsi(&closes, periods.rsi));
        named.insert("macd".to_owned(), macd.line);
        named.insert("signal".to_owned(), macd.signal);
        named.insert("hist".to_owned(), macd.histogram);
        Ok(IndicatorSeries::Named(named))
    }
}

/// Simple moving average; `None` until `period` samples are available.
#[must_use]
pub fn sma(values: &[f64], period: usize) -> IndicatorValues {
    if period == 0 {
        return vec![None; values.len()];
    }
    let mut out = vec![None; values.len()];
    let mut sum = 0.0;
    for (index, value) in values.iter().enumerate() {
        sum += value;
        if index >= period {
            sum -= values[index - period];
        }
        if index + 1 >= period {
            out[index] = Some(sum / period as f64);
        }
    }
    out
}

/// Exponential moving average seeded with the simple average of the first
/// `period` samples.
#[must_use]
pub fn ema(values: &[f64], period: usize) -> IndicatorValues {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = vec![None; values.len()];
    let mut previous = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(previous);
    for (index, value) in values.iter().enumerate().skip(period) {
        previous = value * k + previous * (1.0 - k);
        out[index] = Some(previous);
    }
    out
}

/// Wilder-smoothed RSI. A window without losses reads 100.
#[must_use]
pub fn rsi(values: &[f64], period: usize) -> IndicatorValues {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let (gain, loss) = values[..=period]
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gain, loss), delta| {
            if delta >= 0.0 {
                (gain + delta, loss)
            } else {
                (gain, loss - delta)
            }
        });
    let smoothing = period as f64;
    let mut avg_gain = gain / smoothing;
    let mut avg_loss = loss / smoothing;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    for index in period + 1..values.len() {
        let delta = values[index] - values[index - 1];
        avg_gain = (avg_gain * (smoothing - 1.0) + delta.max(0.0)) / smoothing;
        avg_loss = (avg_loss * (smoothing - 1.0) + (-delta).max(0.0)) / smoothing;
        out[index] = Some(rsi_value(avg_gain, avg_loss));
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: IndicatorValues,
    pub signal: IndicatorValues,
    pub histogram: IndicatorValues,
}

/// MACD line, signal and histogram.
///
/// The signal EMA runs over the MACD line with warm-up gaps read as zero.
#[must_use]
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast = ema(values, fast);
    let slow = ema(values, slow);
    let line: IndicatorValues = fast
        .iter()
        .zip(&slow)
        .map(|(fast, slow)| Some((*fast)? - (*slow)?))
        .collect();
    let filled: Vec<f64> = line.iter().map(|value| value.unwrap_or(0.0)).collect();
    let signal = ema(&filled, signal);
    let histogram = line
        .iter()
        .zip(&signal)
        .map(|(line, signal)| Some((*line)? - (*signal)?))
        .collect();
    MacdSeries {
        line,
        signal,
        histogram,
    }
}
