use crate::core::{Candle, Dataset, Timeframe};
use crate::error::{ChartError, ChartResult};

/// Re-buckets a dataset into a coarser timeframe.
pub trait Resampler {
    fn resample(&self, dataset: &Dataset, target: Timeframe) -> ChartResult<Dataset>;
}

/// Buckets consecutive candles by `ts - ts % bucket`.
///
/// A new bucket starts whenever the bucket time changes between neighbours;
/// candles are not regrouped across gaps or out-of-order rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeBucketResampler;

impl Resampler for TimeBucketResampler {
    fn resample(&self, dataset: &Dataset, target: Timeframe) -> ChartResult<Dataset> {
        let bucket = target.seconds();
        let mut out: Vec<Candle> = Vec::new();
        let mut current: Option<(i64, Candle)> = None;

        for candle in &dataset.candles {
            if !candle.time.is_finite() {
                return Err(ChartError::InvalidData(
                    "candle time must be finite".to_owned(),
                ));
            }
            let ts = candle.time.floor() as i64;
            let bucket_time = ts - ts.rem_euclid(bucket);
            current = Some(match current {
                Some((start, acc)) if start == bucket_time => (start, merge(acc, candle)),
                Some((_, acc)) => {
                    out.push(acc);
                    (bucket_time, opened_at(bucket_time, candle))
                }
                None => (bucket_time, opened_at(bucket_time, candle)),
            });
        }
        if let Some((_, acc)) = current {
            out.push(acc);
        }

        Ok(Dataset::new(dataset.source_path.clone(), out))
    }
}

fn opened_at(bucket_time: i64, candle: &Candle) -> Candle {
    Candle {
        time: bucket_time as f64,
        ..*candle
    }
}

fn merge(acc: Candle, next: &Candle) -> Candle {
    Candle {
        high: acc.high.max(next.high),
        low: acc.low.min(next.low),
        close: next.close,
        volume: acc.volume + next.volume,
        ..acc
    }
}
