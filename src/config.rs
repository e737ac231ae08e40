//! Application settings.

use std::path::PathBuf;
use std::time::Duration;

use crate::colors;
use crate::projection::Projection;
use crate::render::RenderStyle;

/// Camera control tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Units per second.
    pub move_speed: f32,
    /// Radians per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_sensitivity: 0.002,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Zero runs unthrottled.
    pub target_fps: u32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub style: RenderStyle,
    pub background: u32,
    pub model_path: PathBuf,
    /// Distance from the camera start position to the model's pivot.
    pub model_distance: f32,
    pub camera: CameraSettings,
    pub screenshot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "polyrast".to_owned(),
            width: 800,
            height: 600,
            target_fps: 60,
            fov_y_degrees: 90.0,
            z_near: 0.1,
            z_far: 1000.0,
            style: RenderStyle::default(),
            background: colors::BACKGROUND,
            model_path: PathBuf::from("assets/models/cube.obj"),
            model_distance: 3.0,
            camera: CameraSettings::default(),
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Defaults, with the model path taken from the first argument if one
    /// is given. `args` excludes the program name.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.model_path = PathBuf::from(path.into());
        }
        config
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn projection(&self) -> Projection {
        Projection::from_degrees(self.fov_y_degrees, self.aspect_ratio(), self.z_near, self.z_far)
    }

    pub fn frame_duration(&self) -> Duration {
        if self.target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / self.target_fps
        }
    }
}
