//! Board configuration.
//!
//! Every field has a default, so hosts only pass what they want to change:
//! `{"exitDelayMs": 600, "material": {"restitution": 0.2}}`.

use serde::{Deserialize, Serialize};

use crate::core::error::{BoardError, BoardResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// How long a deleted card stays on screen for its exit transition.
    pub exit_delay_ms: f64,
    /// Physics steps per second.
    pub step_hz: f32,
    /// Downward acceleration while gravity is on (px/s^2).
    pub gravity: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub wall_thickness: f32,
    pub wall_padding: f32,
    pub material: MaterialConfig,
    pub spawn_velocity: SpawnVelocity,
    pub drag: DragConfig,
    /// Fixed RNG seed (tests, replays). Clock-seeded when absent.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialConfig {
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    pub linear_damping: f32,
}

/// Full width of the random initial velocity range per axis (px/s),
/// centred on zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnVelocity {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            exit_delay_ms: 1000.0,
            step_hz: 60.0,
            gravity: 1000.0,
            card_width: 288.0,
            card_height: 120.0,
            wall_thickness: 100.0,
            wall_padding: 50.0,
            material: MaterialConfig::default(),
            spawn_velocity: SpawnVelocity::default(),
            drag: DragConfig::default(),
            seed: None,
        }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            friction: 0.4,
            restitution: 0.6,
            density: 0.001,
            linear_damping: 1.2,
        }
    }
}

impl Default for SpawnVelocity {
    fn default() -> Self {
        Self { x: 240.0, y: 120.0 }
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            stiffness: 0.2,
            damping: 0.1,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> BoardResult<()> {
        fn positive(name: &str, v: f32) -> BoardResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(BoardError::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f32) -> BoardResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(BoardError::InvalidConfig(format!("{name} must be finite and non-negative, got {v}")))
            }
        }
        fn unit(name: &str, v: f32) -> BoardResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(BoardError::InvalidConfig(format!("{name} must be within 0..=1, got {v}")))
            }
        }

        if !(self.exit_delay_ms.is_finite() && self.exit_delay_ms >= 0.0) {
            return Err(BoardError::InvalidConfig(format!(
                "exitDelayMs must be non-negative, got {}",
                self.exit_delay_ms
            )));
        }
        positive("stepHz", self.step_hz)?;
        positive("cardWidth", self.card_width)?;
        positive("cardHeight", self.card_height)?;
        positive("wallThickness", self.wall_thickness)?;
        positive("material.density", self.material.density)?;
        non_negative("gravity", self.gravity)?;
        non_negative("wallPadding", self.wall_padding)?;
        non_negative("material.friction", self.material.friction)?;
        non_negative("material.linearDamping", self.material.linear_damping)?;
        non_negative("spawnVelocity.x", self.spawn_velocity.x)?;
        non_negative("spawnVelocity.y", self.spawn_velocity.y)?;
        unit("material.restitution", self.material.restitution)?;
        unit("drag.stiffness", self.drag.stiffness)?;
        unit("drag.damping", self.drag.damping)?;
        Ok(())
    }

    /// Length of one physics step in seconds.
    pub fn step_dt(&self) -> f32 {
        1.0 / self.step_hz
    }

    /// Step interval for the browser timer, in whole milliseconds.
    pub fn step_interval_ms(&self) -> u32 {
        ((1000.0 / self.step_hz).round() as u32).max(1)
    }
}
