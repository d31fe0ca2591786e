use serde::Deserialize;

const DEFAULT_MAX_CYCLE_CAP: u64 = 10_000;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_pipeline: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_forwarding")]
    pub forwarding: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forwarding: default_forwarding(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_max_cycle_cap")]
    pub max_cycle_cap: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_cycle_cap: default_max_cycle_cap(),
        }
    }
}

fn default_forwarding() -> bool {
    true
}

fn default_max_cycle_cap() -> u64 {
    DEFAULT_MAX_CYCLE_CAP
}
