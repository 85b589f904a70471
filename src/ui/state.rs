//! Application state management structures.
//!
//! The flowchart itself lives in the core [`Canvas`]; this module holds the
//! UI-only state around it and the settings persisted between sessions.

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::constants::INITIAL_VIEWPORT;
use crate::coords::Viewport;
use crate::error::Result;
use crate::events::EventManager;
use crate::seed;
use serde::{Deserialize, Serialize};

/// Storage key for the persisted settings.
pub const APP_STATE_KEY: &str = "app_state";

/// State shared between the toolbox and the rest of the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderContext {
    /// Whether the toolbox side panel is open
    pub toolbox_open: bool,
}

impl Default for BuilderContext {
    fn default() -> Self {
        Self { toolbox_open: true }
    }
}

/// Settings that survive restarts. Flowchart content is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Shared builder flags
    pub context: BuilderContext,
    /// Canvas configuration
    pub config: CanvasConfig,
}

impl AppSettings {
    /// Serializes the settings to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The main application structure: the canvas plus the builder's UI state.
///
/// This struct implements the `eframe::App` trait and adapts egui input and
/// painting to the core canvas.
#[derive(Debug)]
pub struct FlowchartBuilderApp {
    /// The canvas being edited
    pub canvas: Canvas,
    /// Shared builder flags
    pub context: BuilderContext,
}

impl FlowchartBuilderApp {
    /// Boots a canvas from the given settings.
    pub fn new(settings: AppSettings) -> Result<Self> {
        let (width, height) = INITIAL_VIEWPORT;
        let canvas = seed::bootstrap(
            settings.config,
            Viewport::new(width, height)?,
            EventManager::new(),
        )?;
        Ok(Self {
            canvas,
            context: settings.context,
        })
    }

    /// Boots from persisted settings, falling back to defaults when there are
    /// none or they fail to parse.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Result<Self> {
        let settings = storage
            .and_then(|storage| storage.get_string(APP_STATE_KEY))
            .and_then(|json| match AppSettings::from_json(&json) {
                Ok(settings) => Some(settings),
                Err(err) => {
                    log::warn!("ignoring unreadable app state: {err}");
                    None
                }
            })
            .unwrap_or_default();

        match settings.config.validate() {
            Ok(()) => Self::new(settings),
            Err(err) => {
                log::warn!("ignoring invalid stored canvas configuration: {err}");
                Self::new(AppSettings {
                    context: settings.context,
                    config: CanvasConfig::default(),
                })
            }
        }
    }

    /// The settings to persist.
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            context: self.context.clone(),
            config: self.canvas.config().clone(),
        }
    }

    /// Opens or closes the toolbox.
    pub fn toggle_toolbox(&mut self) {
        self.context.toolbox_open = !self.context.toolbox_open;
    }

    /// Answers the canvas's pending confirmation prompt.
    pub fn answer_confirmation(&mut self, accepted: bool) {
        self.canvas.resolve_confirmation(accepted);
    }
}
