//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`MARBLES_SECTION__KEY`)
//!
//! Every field has a compiled-in default, so the demo runs without any config file.

use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use marbles_physics::{DEFAULT_GRAVITY, DEFAULT_TIMESTEP};

use crate::interaction::{DEFAULT_CARRY_DISTANCE, DEFAULT_MARBLE_RADIUS, DEFAULT_THROW_STRENGTH};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Pick, carry, throw and respawn tunables
    #[serde(default)]
    pub interaction: InteractionConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. compiled-in defaults
    /// 2. `config/default.toml`
    /// 3. `config/user.toml`
    /// 4. Environment variables (`MARBLES_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User overrides are optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // MARBLES_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("MARBLES_").split("__"));

        let config: AppConfig = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the demo misbehave rather than fail loudly later
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interaction = &self.interaction;
        if !interaction.throw_strength.is_finite() || interaction.throw_strength < 0.0 {
            return Err(ConfigError::invalid("interaction.throw_strength must be finite and not negative"));
        }
        if !interaction.marble_radius.is_finite() || interaction.marble_radius <= 0.0 {
            return Err(ConfigError::invalid("interaction.marble_radius must be positive"));
        }
        if !interaction.carry_distance.is_finite() || interaction.carry_distance < 0.0 {
            return Err(ConfigError::invalid("interaction.carry_distance must not be negative"));
        }
        if interaction.spawn_points.is_empty() {
            return Err(ConfigError::invalid("interaction.spawn_points must not be empty"));
        }
        if interaction.spawn_points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ConfigError::invalid("interaction.spawn_points must be finite"));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(ConfigError::invalid("camera.near must be positive and below camera.far"));
        }
        Ok(())
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Marbles".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Point the camera faces at start [x, y, z]
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [5.0, 5.0, 10.0],
            look_at: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// Mouse sensitivity for looking around
    pub mouse_sensitivity: f32,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 0.003,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity (negative = downward)
    pub gravity: f32,
    /// Fixed step advanced once per frame, in seconds
    pub timestep: f32,
    /// Edge length of the square floor
    pub floor_size: f32,
    /// Half the thickness of the floor collider
    pub floor_half_thickness: f32,
    /// Marble bounciness (0 = no bounce, 1 = perfect bounce)
    pub marble_restitution: f32,
    /// Marble friction coefficient
    pub marble_friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            timestep: DEFAULT_TIMESTEP,
            floor_size: 100.0,
            floor_half_thickness: 0.1,
            marble_restitution: 1.0,
            marble_friction: 0.5,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's configuration
    pub fn to_physics_config(&self) -> marbles_physics::PhysicsConfig {
        marbles_physics::PhysicsConfig::new(self.gravity).with_timestep(self.timestep)
    }

    /// Collision response of a marble
    pub fn marble_material(&self) -> marbles_physics::PhysicsMaterial {
        marbles_physics::PhysicsMaterial::new(self.marble_friction, self.marble_restitution)
    }
}

/// Interaction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Impulse magnitude applied along the camera's forward direction on throw
    pub throw_strength: f32,
    /// Keep the held marble in front of the camera
    pub carry_enabled: bool,
    /// Distance in front of the camera a carried marble is held at
    pub carry_distance: f32,
    /// Thrown marbles queue for replacement at their spawn point
    pub respawn_enabled: bool,
    /// Radius of every marble
    pub marble_radius: f32,
    /// Marble spawn locations [x, y, z]; one marble per entry
    pub spawn_points: Vec<[f32; 3]>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            throw_strength: DEFAULT_THROW_STRENGTH,
            carry_enabled: true,
            carry_distance: DEFAULT_CARRY_DISTANCE,
            respawn_enabled: false,
            marble_radius: DEFAULT_MARBLE_RADIUS,
            spawn_points: vec![[0.0, 5.0, 0.0]],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color as 0xRRGGBB
    pub background_color: u32,
    /// Floor color as 0xRRGGBB
    pub floor_color: u32,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Directional light position; it shines toward the origin
    pub light_position: [f32; 3],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: 0x87CEEB,
            floor_color: 0x808080,
            ambient_intensity: 0.3,
            directional_intensity: 1.5,
            light_position: [10.0, 10.0, 10.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show camera position in the window title
    pub show_position_in_title: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_position_in_title: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        ConfigError {
            message: message.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
