//! Simulation configuration
//!
//! Sources, later ones winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config sim.toml`)
//! 3. Environment: `NPC_SIM_SEED`, `NPC_SIM_TICKS`, `NPC_SIM_AGENTS`
//! 4. Command line flags (applied by the binary)
//!
//! # Example Config File
//!
//! ```toml
//! waypoints = [[40.0, 0.0, 0.0], [0.0, 0.0, 40.0], [-40.0, 0.0, 0.0]]
//!
//! [sim]
//! ticks = 900
//! delta_time = 0.033
//! seed = 7
//! agents = 2
//!
//! [npc]
//! sight_range = 30.0
//! attack_range = 15.0
//!
//! [player]
//! path = [[0.0, 0.0, 0.0], [30.0, 0.0, 30.0]]
//! ```

use npc_fsm::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Fixed-step loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSection {
    /// Number of ticks to run
    pub ticks: u64,
    /// Seconds per tick
    pub delta_time: f32,
    /// Seed for every agent's random source
    pub seed: u64,
    /// Number of tank agents
    pub agents: usize,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            ticks: 600,
            delta_time: 1.0 / 30.0,
            seed: 42,
            agents: 3,
        }
    }
}

/// Tank tuning shared by every agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Turning rate (radians per second)
    pub rotation_speed: f32,
    /// Player is noticed within this distance
    pub sight_range: f32,
    /// Player can be fired upon within this distance
    pub attack_range: f32,
    /// Destination counts as reached within this distance
    pub arrival_range: f32,
    pub max_health: f32,
    /// Flee once health drops to this fraction of max
    pub flee_health_fraction: f32,
    /// Shots per second while attacking
    pub fire_rate: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 8.0,
            chase_speed: 12.0,
            rotation_speed: 3.0,
            sight_range: 30.0,
            attack_range: 15.0,
            arrival_range: 4.0,
            max_health: 100.0,
            flee_health_fraction: 0.3,
            fire_rate: 2.0,
        }
    }
}

/// Scripted player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    /// Tanks within this distance get hit
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Seconds between attacks
    pub attack_interval: f32,
    /// Looping path the player walks
    pub path: Vec<Vec3>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            attack_range: 10.0,
            attack_damage: 10.0,
            attack_interval: 1.0,
            path: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(35.0, 0.0, 35.0),
                Vec3::new(-35.0, 0.0, 35.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -45.0),
            ],
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub sim: SimSection,
    pub npc: NpcConfig,
    pub player: PlayerConfig,
    /// Patrol points shared by every tank
    pub waypoints: Vec<Vec3>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sim: SimSection::default(),
            npc: NpcConfig::default(),
            player: PlayerConfig::default(),
            waypoints: default_waypoints(),
        }
    }
}

/// Eight points on a ring of radius 50
fn default_waypoints() -> Vec<Vec3> {
    (0..8)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / 8.0;
            Vec3::from_yaw(angle) * 50.0
        })
        .collect()
}

impl SimConfig {
    /// Load from defaults, an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load from defaults, an optional file and an environment lookup
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                let config = Self::load_from_file(path)?;
                log::info!("Loaded sim config from {}", path.display());
                config
            }
            None => Self::default(),
        };

        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("NPC_SIM_SEED") {
            self.sim.seed = parse_env("NPC_SIM_SEED", &value)?;
            log::info!("Seed from env: {}", self.sim.seed);
        }
        if let Some(value) = lookup("NPC_SIM_TICKS") {
            self.sim.ticks = parse_env("NPC_SIM_TICKS", &value)?;
        }
        if let Some(value) = lookup("NPC_SIM_AGENTS") {
            self.sim.agents = parse_env("NPC_SIM_AGENTS", &value)?;
        }
        Ok(())
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sim.delta_time.is_nan() || self.sim.delta_time <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sim.delta_time must be positive, got {}",
                self.sim.delta_time
            )));
        }
        if self.waypoints.is_empty() {
            return Err(ConfigError::Invalid("waypoints must not be empty".into()));
        }
        if self.player.path.is_empty() {
            return Err(ConfigError::Invalid("player.path must not be empty".into()));
        }
        if self.npc.attack_range > self.npc.sight_range {
            return Err(ConfigError::Invalid(format!(
                "npc.attack_range ({}) exceeds npc.sight_range ({})",
                self.npc.attack_range, self.npc.sight_range
            )));
        }
        if self.npc.max_health <= 0.0 {
            return Err(ConfigError::Invalid("npc.max_health must be positive".into()));
        }
        if !self.npc.fire_rate.is_finite() || self.npc.fire_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "npc.fire_rate must be positive and finite, got {}",
                self.npc.fire_rate
            )));
        }
        Ok(())
    }
}

fn parse_env<V: std::str::FromStr>(key: &'static str, value: &str) -> Result<V, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}
