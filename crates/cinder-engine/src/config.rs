//! Runner configuration.
//!
//! Provides the parameters of a headless simulation run: stepping, which
//! emitters to build, how the anchor moves and where the obstacle sits.
//! Configuration can be loaded from and saved to a TOML file.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "cinder.toml";

/// Headless run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    // === Stepping ===
    /// Fixed time step in seconds
    pub time_step: f32,
    /// Number of frames to simulate
    pub frames: u32,
    /// Frames between statistics reports (0 = only the final report)
    pub report_interval: u32,
    /// Random seed (None = random)
    pub seed: Option<u64>,

    // === Emitters ===
    /// Presets to instantiate, by name
    pub presets: Vec<String>,
    /// Frame at which emitters waiting for a trigger are started
    pub trigger_frame: u32,
    /// Force added to every emitter each frame
    pub wind: Vec2,

    // === Anchor ===
    /// Radius of the anchor's circular path
    pub orbit_radius: f32,
    /// Angular speed of the anchor in radians per second
    pub orbit_speed: f32,

    // === Obstacle ===
    /// Place a box obstacle below the anchor
    pub obstacle_enabled: bool,
    /// Half extents of the obstacle box
    pub obstacle_half_extents: Vec2,
    /// Position of the obstacle centre
    pub obstacle_offset: Vec2,
    /// Rotation of the obstacle in radians
    pub obstacle_rotation: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            // Stepping
            time_step: 1.0 / 60.0,
            frames: 600,
            report_interval: 60,
            seed: None,

            // Emitters
            presets: vec!["fire".to_string(), "sparks".to_string()],
            trigger_frame: 0,
            wind: Vec2::ZERO,

            // Anchor
            orbit_radius: 2.0,
            orbit_speed: 0.5,

            // Obstacle
            obstacle_enabled: true,
            obstacle_half_extents: Vec2::new(6.0, 0.5),
            obstacle_offset: Vec2::new(0.0, -3.0),
            obstacle_rotation: 0.0,
        }
    }
}

impl RunConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Stepping
        if !self.time_step.is_finite() {
            self.time_step = 1.0 / 60.0;
        }
        self.time_step = self.time_step.clamp(1.0 / 1000.0, 0.25);
        self.frames = self.frames.clamp(1, 1_000_000);

        // Emitters
        if self.presets.is_empty() {
            warn!("No presets configured, falling back to 'fire'");
            self.presets.push("fire".to_string());
        }
        if !self.wind.is_finite() {
            self.wind = Vec2::ZERO;
        }

        // Anchor
        self.orbit_radius = self.orbit_radius.clamp(0.0, 100.0);
        self.orbit_speed = self.orbit_speed.clamp(-10.0, 10.0);

        // Obstacle
        self.obstacle_half_extents = self
            .obstacle_half_extents
            .clamp(Vec2::splat(0.01), Vec2::splat(1000.0));
    }

    /// Simulated duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.time_step
    }
}
