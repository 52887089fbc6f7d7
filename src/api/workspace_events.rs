use serde::{Deserialize, Serialize};

use crate::core::{PaneId, SplitLayout};

/// Outward notifications for host controls (sliders, counters, toggles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkspaceEvent {
    ViewChange {
        pane: PaneId,
        view_bars: usize,
        view_offset: usize,
    },
    SeekChange {
        pane: PaneId,
        seek: usize,
    },
    PlaybackChanged {
        pane: PaneId,
        playing: bool,
    },
    SplitChanged {
        split: SplitLayout,
    },
    ActivePaneChanged {
        pane: PaneId,
    },
    SyncChanged {
        enabled: bool,
    },
    DatasetChanged {
        pane: PaneId,
        bars: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::WorkspaceEvent;
    use crate::core::PaneId;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(WorkspaceEvent::SeekChange {
            pane: PaneId::new(1),
            seek: 12,
        })
        .expect("json");
        assert_eq!(json["type"], "seek_change");
        assert_eq!(json["seek"], 12);
    }
}
