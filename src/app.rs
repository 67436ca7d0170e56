use crate::core::math::transform::TransformFactory;
use crate::io::babylon::load_babylon;
use crate::io::config::{Config, MeshConfig};
use crate::io::image::save_argb_image;
use crate::io::obj_loader::load_obj;
use crate::pipeline::renderer::{FrameStats, RenderSettings, Renderer};
use crate::scene::camera::Camera;
use crate::scene::light::PointLight;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use crate::scene::utils::normalize_and_center;
use anyhow::{Context, Result, bail, ensure};
use log::{debug, info};
use nalgebra::{Matrix4, Point3, Vector3};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-mesh animation state driven by the host loop.
#[derive(Debug, Clone, Copy)]
struct Motion {
    /// World transform the loader produced (e.g. a Babylon `position`).
    placement: Matrix4<f32>,
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    spin: Vector3<f32>,
}

impl Motion {
    fn world_matrix(&self) -> Matrix4<f32> {
        TransformFactory::rotation_yaw_pitch_roll(self.rotation.y, self.rotation.x, self.rotation.z)
            * self.placement
            * TransformFactory::translation(&self.position)
    }
}

/// Everything the host loop renders: the camera plus meshes and their motion.
pub struct Scene {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    motions: Vec<Motion>,
}

impl Scene {
    /// Advances every mesh by its spin and rebuilds its world transform.
    pub fn advance(&mut self) {
        for (mesh, motion) in self.meshes.iter_mut().zip(self.motions.iter_mut()) {
            motion.rotation += motion.spin;
            mesh.world_matrix = motion.world_matrix();
        }
    }
}

/// Builds the camera and meshes described by `config`.
pub fn build_scene(config: &Config) -> Result<Scene> {
    let camera = Camera::new(
        Point3::from(config.camera.position),
        Point3::from(config.camera.target),
    );

    let mut meshes = Vec::new();
    let mut motions = Vec::new();

    for mesh_config in &config.meshes {
        let loaded = load_mesh_source(mesh_config)
            .with_context(|| format!("failed to build mesh '{}'", mesh_config.source))?;

        for mut mesh in loaded {
            let motion = Motion {
                placement: mesh.world_matrix,
                position: Vector3::from(mesh_config.position),
                rotation: Vector3::from(mesh_config.rotation),
                spin: Vector3::from(mesh_config.spin),
            };
            mesh.world_matrix = motion.world_matrix();
            meshes.push(mesh);
            motions.push(motion);
        }
    }

    info!(
        "Scene ready: {} meshes, {} vertices, {} faces",
        meshes.len(),
        meshes.iter().map(|m| m.vertices.len()).sum::<usize>(),
        meshes.iter().map(|m| m.faces.len()).sum::<usize>()
    );

    Ok(Scene {
        camera,
        meshes,
        motions,
    })
}

fn load_mesh_source(mesh_config: &MeshConfig) -> Result<Vec<Mesh>> {
    let mut meshes = match mesh_config.source.as_str() {
        "cube" => vec![Mesh::cube("cube", mesh_config.size)],
        "triangle" => vec![Mesh::triangle("triangle")],
        path => {
            let extension = Path::new(path)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase);
            match extension.as_deref() {
                Some("babylon") | Some("json") => load_babylon(path)?,
                Some("obj") => load_obj(path)?,
                _ => bail!("unsupported mesh source '{}'", path),
            }
        }
    };

    if mesh_config.fit {
        let (center, scale) = normalize_and_center(&mut meshes);
        debug!(
            "Fitted '{}': center {:?}, scale {:.4}",
            mesh_config.source, center, scale
        );
    }

    if let Some(path) = &mesh_config.texture {
        let texture = Arc::new(Texture::load(path)?);
        for mesh in &mut meshes {
            mesh.texture = Some(Arc::clone(&texture));
        }
    }

    Ok(meshes)
}

fn render_settings(config: &Config) -> RenderSettings {
    RenderSettings {
        fov: config.render.fov,
        near: config.render.near,
        far: config.render.far,
        light: PointLight::new(Point3::from(config.light.position)),
        tint: Vector3::from(config.render.tint),
    }
}

/// `output.png` -> `output_0007.png` for frame 7.
pub fn frame_path(output: &str, frame: usize) -> PathBuf {
    let path = Path::new(output);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("png");
    path.with_file_name(format!("{}_{:04}.{}", stem, frame, extension))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {:?}", parent))?;
    }
    Ok(())
}

/// Runs the headless render loop described by `config` and writes the
/// resulting image(s).
pub fn run(config: &Config) -> Result<()> {
    let width = config.render.width;
    let height = config.render.height;
    let frames = config.render.frames;
    ensure!(width > 0 && height > 0, "render size must be non-zero");
    ensure!(frames > 0, "frame count must be at least 1");

    info!("Starting render: {}x{}, {} frame(s)", width, height, frames);

    let mut scene = build_scene(config)?;
    let mut renderer = Renderer::with_settings(width, height, render_settings(config));

    let output = Path::new(&config.render.output);
    ensure_parent_dir(output)?;

    let mut total = Duration::ZERO;
    let mut last_stats = FrameStats::default();

    for frame in 1..=frames {
        scene.advance();

        let start = Instant::now();
        renderer.clear();
        last_stats = renderer.render(&scene.camera, &scene.meshes);
        let elapsed = start.elapsed();
        total += elapsed;

        debug!(
            "Frame {}: {:.2?} ({} faces drawn, {} culled)",
            frame, elapsed, last_stats.faces_drawn, last_stats.faces_culled
        );

        if config.render.save_every_frame {
            let path = frame_path(&config.render.output, frame);
            save_argb_image(renderer.pixels(), width, height, &path)?;
            debug!("Saved {:?}", path);
        }
    }

    let seconds = total.as_secs_f32();
    let fps = if seconds > 0.0 {
        frames as f32 / seconds
    } else {
        f32::INFINITY
    };
    info!(
        "Rendered {} frame(s) in {:.2?} ({:.1} fps); last frame: {} faces drawn, {} culled",
        frames, total, fps, last_stats.faces_drawn, last_stats.faces_culled
    );

    save_argb_image(renderer.pixels(), width, height, output)?;
    info!("Saved output to {:?}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_config(source: &str) -> MeshConfig {
        MeshConfig {
            source: source.to_string(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            spin: [0.0, 0.0, 0.0],
            size: 1.0,
            fit: false,
            texture: None,
        }
    }

    #[test]
    fn frame_paths_are_numbered() {
        assert_eq!(frame_path("output.png", 7), PathBuf::from("output_0007.png"));
        assert_eq!(
            frame_path("out/spin.bmp", 12),
            PathBuf::from("out/spin_0012.bmp")
        );
        assert_eq!(frame_path("render", 1), PathBuf::from("render_0001.png"));
    }

    #[test]
    fn builtin_sources_build_meshes() {
        let mut config = Config::default();
        config.meshes = vec![mesh_config("cube"), mesh_config("triangle")];

        let scene = build_scene(&config).unwrap();
        assert_eq!(scene.meshes.len(), 2);
        assert_eq!(scene.meshes[0].faces.len(), 12);
        assert_eq!(scene.meshes[1].faces.len(), 1);
    }

    #[test]
    fn unknown_source_is_an_error() {
        let mut config = Config::default();
        config.meshes = vec![mesh_config("teapot.fbx")];
        assert!(build_scene(&config).is_err());
    }

    #[test]
    fn advance_applies_spin_then_translation() {
        let mut config = Config::default();
        let mut cube = mesh_config("cube");
        cube.position = [1.0, 2.0, 3.0];
        cube.spin = [0.0, 0.5, 0.0];
        config.meshes = vec![cube];

        let mut scene = build_scene(&config).unwrap();
        scene.advance();
        scene.advance();

        let expected = TransformFactory::rotation_yaw_pitch_roll(1.0, 0.0, 0.0)
            * TransformFactory::translation(&Vector3::new(1.0, 2.0, 3.0));
        assert!((scene.meshes[0].world_matrix - expected).norm() < 1e-5);
    }

    #[test]
    fn run_writes_numbered_frames_and_output() {
        let dir = std::env::temp_dir().join(format!("softengine_run_{}", std::process::id()));
        let output = dir.join("frame.png");

        let mut config = Config::default();
        config.render.width = 40;
        config.render.height = 30;
        config.render.frames = 2;
        config.render.save_every_frame = true;
        config.render.output = output.to_string_lossy().into_owned();

        run(&config).unwrap();

        assert!(output.exists());
        assert!(dir.join("frame_0001.png").exists());
        assert!(dir.join("frame_0002.png").exists());
        fs::remove_dir_all(&dir).ok();
    }
}
