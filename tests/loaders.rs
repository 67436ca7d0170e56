use image::RgbImage;
use softengine::app::build_scene;
use softengine::core::color::CLEAR_COLOR;
use softengine::io::babylon::load_babylon;
use softengine::io::config::Config;
use softengine::pipeline::renderer::Renderer;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("softengine_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const QUAD_SCENE: &str = r#"{
    "materials": [
        { "name": "red", "id": "mat-red", "diffuseTexture": { "name": "red.png" } }
    ],
    "meshes": [
        {
            "name": "left", "materialId": "mat-red", "uvCount": 1,
            "position": [-0.6, 0.0, 0.0],
            "vertices": [
                -0.5,  0.5, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0,
                 0.5,  0.5, 0.0,  0.0, 0.0, 1.0,  1.0, 1.0,
                -0.5, -0.5, 0.0,  0.0, 0.0, 1.0,  0.0, 0.0,
                 0.5, -0.5, 0.0,  0.0, 0.0, 1.0,  1.0, 0.0
            ],
            "indices": [0, 1, 2, 1, 3, 2]
        },
        {
            "name": "right", "materialId": "mat-red", "uvCount": 1,
            "position": [0.6, 0.0, 0.0],
            "vertices": [
                -0.5,  0.5, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0,
                 0.5,  0.5, 0.0,  0.0, 0.0, 1.0,  1.0, 1.0,
                -0.5, -0.5, 0.0,  0.0, 0.0, 1.0,  0.0, 0.0
            ],
            "indices": [0, 1, 2]
        }
    ]
}"#;

fn write_scene(dir: &PathBuf) -> PathBuf {
    RgbImage::from_pixel(4, 4, image::Rgb([255, 0, 0]))
        .save(dir.join("red.png"))
        .unwrap();
    let scene = dir.join("quads.babylon");
    fs::write(&scene, QUAD_SCENE).unwrap();
    scene
}

#[test]
fn babylon_meshes_share_their_material_texture() {
    let dir = scratch_dir("babylon_share");
    let scene = write_scene(&dir);

    let meshes = load_babylon(&scene).unwrap();
    fs::remove_dir_all(&dir).ok();

    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].faces.len(), 2);
    assert_eq!(meshes[1].faces.len(), 1);

    let left = meshes[0].texture.as_ref().expect("left mesh is textured");
    let right = meshes[1].texture.as_ref().expect("right mesh is textured");
    assert!(Arc::ptr_eq(left, right));
    assert_eq!((left.width, left.height), (4, 4));
}

#[test]
fn configured_babylon_scene_renders_textured_pixels() {
    let dir = scratch_dir("babylon_render");
    let scene = write_scene(&dir);

    let config = Config::parse(&format!(
        r#"
        [[meshes]]
        source = "{}"
        spin = [0.0, 0.0, 0.0]
        "#,
        scene.to_string_lossy().replace('\\', "/")
    ))
    .unwrap();

    let mut loaded = build_scene(&config).unwrap();
    fs::remove_dir_all(&dir).ok();
    loaded.advance();

    let mut renderer = Renderer::new(200, 150);
    renderer.clear();
    let stats = renderer.render(&loaded.camera, &loaded.meshes);
    assert_eq!(stats.faces_drawn, 3);

    let lit: Vec<u32> = renderer
        .pixels()
        .iter()
        .copied()
        .filter(|&p| p != CLEAR_COLOR)
        .collect();
    assert!(!lit.is_empty());
    // A pure red texture under white light leaves green and blue at zero.
    assert!(lit.iter().all(|&p| p & 0x0000_FFFF == 0));
}
