use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default = "default_meshes")]
    pub meshes: Vec<MeshConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            meshes: default_meshes(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default)]
    pub save_every_frame: bool,

    // --- Projection ---
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_tint")]
    pub tint: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            frames: default_frames(),
            save_every_frame: false,
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            tint: default_tint(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_frames() -> usize {
    1
}
fn default_fov() -> f32 {
    0.78
}
fn default_near() -> f32 {
    0.01
}
fn default_far() -> f32 {
    1.0
}
fn default_tint() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 10.0]
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: default_light_position(),
        }
    }
}

fn default_light_position() -> [f32; 3] {
    [0.0, 0.0, 10.0]
}

#[derive(Debug, Deserialize, Clone)]
pub struct MeshConfig {
    /// `"cube"`, `"triangle"`, or a path to a `.babylon`/`.json`/`.obj` file.
    pub source: String,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Initial rotation about the x, y and z axes in radians
    /// (pitch, yaw, roll).
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Rotation added every frame, same axis order as `rotation`.
    #[serde(default = "default_spin")]
    pub spin: [f32; 3],

    // --- Geometry ---
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default)]
    pub fit: bool,
    pub texture: Option<String>,
}

fn default_spin() -> [f32; 3] {
    [0.0, 0.01, 0.0]
}
fn default_size() -> f32 {
    1.0
}

fn default_meshes() -> Vec<MeshConfig> {
    vec![MeshConfig {
        source: "cube".to_string(),
        position: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0],
        spin: default_spin(),
        size: default_size(),
        fit: false,
        texture: None,
    }]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::parse(&content).with_context(|| format!("failed to parse config file {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.render.width, 800);
        assert_eq!(config.render.height, 600);
        assert_eq!(config.render.fov, 0.78);
        assert_eq!(config.camera.position, [0.0, 0.0, 10.0]);
        assert_eq!(config.light.position, [0.0, 0.0, 10.0]);
        assert_eq!(config.meshes.len(), 1);
        assert_eq!(config.meshes[0].source, "cube");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::parse(
            r#"
            [render]
            width = 320
            height = 240
            frames = 5
            save_every_frame = true

            [camera]
            position = [0.0, 2.0, 8.0]

            [[meshes]]
            source = "scenes/monkey.babylon"
            position = [1.0, 0.0, 0.0]
            spin = [0.0, 0.0, 0.0]
            fit = true

            [[meshes]]
            source = "triangle"
            "#,
        )
        .unwrap();

        assert_eq!((config.render.width, config.render.height), (320, 240));
        assert_eq!(config.render.frames, 5);
        assert!(config.render.save_every_frame);
        assert_eq!(config.render.output, "output.png");
        assert_eq!(config.camera.position, [0.0, 2.0, 8.0]);
        assert_eq!(config.camera.target, [0.0, 0.0, 0.0]);
        assert_eq!(config.meshes.len(), 2);
        assert!(config.meshes[0].fit);
        assert_eq!(config.meshes[0].spin, [0.0, 0.0, 0.0]);
        assert_eq!(config.meshes[1].spin, [0.0, 0.01, 0.0]);
        assert_eq!(config.meshes[1].size, 1.0);
    }

    #[test]
    fn default_config_matches_empty_document() {
        let config = Config::default();
        assert_eq!(config.meshes.len(), 1);
        assert_eq!(config.render.output, "output.png");
        assert_eq!(config.render.frames, 1);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(Config::parse("[render]\nwidth = \"wide\"").is_err());
    }
}
