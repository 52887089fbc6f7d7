use indexmap::IndexMap;

use crate::api::Preset;
use crate::error::{ChartError, ChartResult};

/// Named layout persistence.
pub trait PresetStore {
    fn list(&self) -> ChartResult<Vec<Preset>>;
    /// Saves `preset`, replacing any preset with the same name.
    fn save(&mut self, preset: Preset) -> ChartResult<()>;
    fn load(&self, name: &str) -> ChartResult<Preset>;
    /// Returns whether a preset was removed.
    fn delete(&mut self, name: &str) -> ChartResult<bool>;
}

/// Process-local store keeping save order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPresetStore {
    presets: IndexMap<String, Preset>,
}

impl InMemoryPresetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store contents as JSON, in save order.
    pub fn to_json(&self) -> ChartResult<String> {
        let presets: Vec<&Preset> = self.presets.values().collect();
        serde_json::to_string_pretty(&presets)
            .map_err(|err| ChartError::Collaborator(format!("failed to encode presets: {err}")))
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        let presets: Vec<Preset> = serde_json::from_str(json)
            .map_err(|err| ChartError::Collaborator(format!("failed to decode presets: {err}")))?;
        let mut store = Self::new();
        for preset in presets {
            store.save(preset)?;
        }
        Ok(store)
    }
}

impl PresetStore for InMemoryPresetStore {
    fn list(&self) -> ChartResult<Vec<Preset>> {
        Ok(self.presets.values().cloned().collect())
    }

    fn save(&mut self, preset: Preset) -> ChartResult<()> {
        preset.validate()?;
        // Re-saving moves the preset to the end, like a fresh save.
        self.presets.shift_remove(&preset.name);
        self.presets.insert(preset.name.clone(), preset);
        Ok(())
    }

    fn load(&self, name: &str) -> ChartResult<Preset> {
        self.presets
            .get(name)
            .cloned()
            .ok_or_else(|| ChartError::Collaborator(format!("preset not found: {name}")))
    }

    fn delete(&mut self, name: &str) -> ChartResult<bool> {
        Ok(self.presets.shift_remove(name).is_some())
    }
}
