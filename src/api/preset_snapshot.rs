use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_VIEW_BARS, IndicatorKind, PaneState, SplitLayout, Timeframe};
use crate::error::{ChartError, ChartResult};

fn default_view_bars() -> usize {
    DEFAULT_VIEW_BARS
}

fn default_speed() -> f64 {
    1.0
}

/// Serializable subset of a pane's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneSnapshot {
    #[serde(default)]
    pub id: Option<usize>,
    pub pair: String,
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub indicator: IndicatorKind,
    #[serde(default = "default_view_bars")]
    pub view_bars: usize,
    #[serde(default)]
    pub view_offset: usize,
    /// Always written as `false`; playback never resumes from a preset.
    #[serde(default)]
    pub playing: bool,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub seek: usize,
    #[serde(default)]
    pub bars: usize,
}

impl PaneSnapshot {
    #[must_use]
    pub fn capture(pane: &PaneState) -> Self {
        Self {
            id: Some(pane.id.index()),
            pair: pane.pair.clone(),
            timeframe: pane.timeframe,
            indicator: pane.indicator,
            view_bars: pane.view_bars(),
            view_offset: pane.view_offset(),
            playing: false,
            speed: pane.speed,
            seek: pane.seek(),
            bars: pane.bars,
        }
    }
}

/// Named workspace layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub split: SplitLayout,
    pub panes: Vec<PaneSnapshot>,
}

impl Preset {
    pub fn new(name: impl Into<String>, split: SplitLayout, panes: Vec<PaneSnapshot>) -> ChartResult<Self> {
        let preset = Self {
            name: name.into(),
            split,
            panes,
        };
        preset.validate()?;
        Ok(preset)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChartError::InvalidData("preset name is required".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PaneSnapshot, Preset};
    use crate::core::{IndicatorKind, PaneId, PaneState, SplitLayout, Timeframe};

    #[test]
    fn capture_never_persists_playing() {
        let mut pane = PaneState::new(PaneId::new(1), "EUR/USD", Timeframe::H1, 240);
        pane.playing = true;
        pane.indicator = IndicatorKind::Rsi;
        let snapshot = PaneSnapshot::capture(&pane);
        assert!(!snapshot.playing);
        assert_eq!(snapshot.id, Some(1));
        assert_eq!(snapshot.indicator, IndicatorKind::Rsi);
    }

    #[test]
    fn missing_view_fields_use_defaults() {
        let snapshot: PaneSnapshot =
            serde_json::from_str(r#"{"pair":"USD/JPY","timeframe":"M5"}"#).expect("snapshot");
        assert_eq!(snapshot.view_bars, 240);
        assert_eq!(snapshot.view_offset, 0);
        assert_eq!(snapshot.timeframe, Timeframe::M5);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(Preset::new("  ", SplitLayout::Single, Vec::new()).is_err());
    }
}
