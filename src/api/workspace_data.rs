use tracing::{info, warn};

use crate::collab::{DatasetHistory, IndicatorEngine, IngestResult, Ingestor, Resampler};
use crate::core::{Dataset, IndicatorSeries, Timeframe};
use crate::error::{ChartError, ChartResult, strip_error_prefix};
use crate::render::Renderer;

use super::{ChartWorkspace, IngestInfo, WorkspaceEvent};

impl<R: Renderer> ChartWorkspace<R> {
    /// Installs a freshly ingested dataset on the active pane.
    ///
    /// The window resets to the start, `bars` becomes the row count and a
    /// performance advisory is raised for very large datasets.
    pub fn apply_ingest(&mut self, result: IngestResult, indicators: Option<IndicatorSeries>) {
        let rows = result.dataset.len();
        info!(
            path = %result.dataset.source_path,
            rows,
            used_cache = result.used_cache,
            "dataset ingested"
        );
        self.last_error = None;
        self.last_ingest = Some(IngestInfo {
            path: result.dataset.source_path.clone(),
            rows,
            used_cache: result.used_cache,
        });
        self.perf_warning = (rows >= self.config.large_dataset_bars).then(|| {
            warn!(rows, threshold = self.config.large_dataset_bars, "large dataset");
            format!(
                "large dataset ({rows} bars, threshold {}); interaction may slow down",
                self.config.large_dataset_bars
            )
        });

        let index = self.active;
        self.panes[index].raw_dataset = Some(result.dataset.clone());
        self.install_dataset(index, result.dataset, indicators);
    }

    /// Installs a resampled dataset on the active pane and records its
    /// timeframe. The raw source dataset is kept for later switches.
    pub fn apply_resample(
        &mut self,
        timeframe: Timeframe,
        dataset: Dataset,
        indicators: Option<IndicatorSeries>,
    ) {
        let index = self.active;
        self.panes[index].timeframe = timeframe;
        self.install_dataset(index, dataset, indicators);
    }

    /// Ingests `path`, computes indicators and installs the result.
    ///
    /// On failure the message lands in [`Self::last_error`] and the active
    /// pane keeps its previous dataset.
    pub fn load_dataset<I, E>(
        &mut self,
        path: &str,
        ingestor: &mut I,
        indicators: &E,
        history: Option<&mut DatasetHistory>,
    ) -> ChartResult<()>
    where
        I: Ingestor + ?Sized,
        E: IndicatorEngine + ?Sized,
    {
        self.last_error = None;
        self.perf_warning = None;
        let outcome = ingestor.ingest(path).and_then(|result| {
            if let Some(history) = history {
                history.record(path);
            }
            let series = indicators.compute(&result.dataset)?;
            Ok((result, series))
        });
        match outcome {
            Ok((result, series)) => {
                self.apply_ingest(result, Some(series));
                Ok(())
            }
            Err(err) => Err(self.record_collaborator_error(err)),
        }
    }

    /// Switches the active pane's timeframe, resampling from its raw dataset.
    ///
    /// The timeframe label changes even when there is no data to resample.
    pub fn switch_timeframe<S, E>(
        &mut self,
        timeframe: Timeframe,
        resampler: &S,
        indicators: &E,
    ) -> ChartResult<()>
    where
        S: Resampler + ?Sized,
        E: IndicatorEngine + ?Sized,
    {
        let pane = &mut self.panes[self.active];
        pane.timeframe = timeframe;
        let source = match (&pane.raw_dataset, pane.has_data()) {
            (Some(raw), _) => raw.clone(),
            (None, true) => pane.dataset.clone(),
            (None, false) => return Ok(()),
        };

        let outcome = resampler.resample(&source, timeframe).and_then(|dataset| {
            let series = indicators.compute(&dataset)?;
            Ok((dataset, series))
        });
        match outcome {
            Ok((dataset, series)) => {
                self.apply_resample(timeframe, dataset, Some(series));
                Ok(())
            }
            Err(err) => Err(self.record_collaborator_error(err)),
        }
    }

    /// Stores a collaborator failure for display and hands the error back.
    pub fn record_collaborator_error(&mut self, err: ChartError) -> ChartError {
        let message = strip_error_prefix(&err.to_string());
        warn!(error = %message, "collaborator failed");
        self.last_error = Some(message);
        err
    }

    fn install_dataset(
        &mut self,
        index: usize,
        dataset: Dataset,
        indicators: Option<IndicatorSeries>,
    ) {
        let pane = &mut self.panes[index];
        let before = pane.window;
        let was_playing = pane.playing;
        pane.replace_dataset(
            dataset,
            indicators,
            self.config.default_view_bars,
            self.config.min_view_bars,
        );
        let (id, bars, now_playing) = (pane.id, pane.bars, pane.playing);
        let window = std::mem::replace(&mut pane.window, before);

        self.install_window(index, window);
        self.events.push(WorkspaceEvent::DatasetChanged { pane: id, bars });
        if was_playing && !now_playing {
            self.events.push(WorkspaceEvent::PlaybackChanged {
                pane: id,
                playing: false,
            });
        }
        self.reconcile_clock();
    }
}
