use crate::geometry::NodeLayout;
use crate::planner::OrderingPolicy;
use crate::run::{FailurePolicy, RunTiming};
use crate::store::DEFAULT_DROP_POSITION;
use crate::Point;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Editor configuration, read from TOML. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Where a palette drop lands when no pointer position is known
    #[serde(default = "default_drop_fallback")]
    pub drop_fallback: Point,
    #[serde(default)]
    pub layout: NodeLayout,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            drop_fallback: default_drop_fallback(),
            layout: NodeLayout::default(),
        }
    }
}

fn default_drop_fallback() -> Point {
    DEFAULT_DROP_POSITION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
    #[serde(default)]
    pub ordering: OrderingPolicy,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            highlight_ms: default_highlight_ms(),
            ordering: OrderingPolicy::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

fn default_settle_delay_ms() -> u64 {
    800
}

fn default_highlight_ms() -> u64 {
    500
}

impl RunConfig {
    pub fn timing(&self) -> RunTiming {
        RunTiming {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            highlight_duration: Duration::from_millis(self.highlight_ms),
        }
    }
}

impl EditorConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
