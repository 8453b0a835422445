//! Scene demo application
//!
//! Builds a small scene headlessly, runs a few frames with scripted mouse
//! clicks, saves the scene to disk and loads it back.

use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use scene_engine::collaborators::Primitive;
use scene_engine::input::ButtonState;

/// Fixed step used for every frame
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Debug renderer that logs what it is asked to draw
#[derive(Default)]
struct LoggingRenderer {
    primitives: usize,
}

impl DebugRenderer for LoggingRenderer {
    fn render_debug_frustum(&mut self, frustum: &Frustum, _color: Color) {
        log::trace!("Frustum at {:?} facing {:?}", frustum.position(), frustum.front());
    }

    fn render_primitive(&mut self, primitive: &Primitive<'_>) {
        self.primitives += 1;
        if let Primitive::Box { bounds, .. } = primitive {
            log::trace!("Box {:?} .. {:?}", bounds.min, bounds.max);
        }
    }
}

fn spawn_cube(scene: &mut SceneManager, parent: Option<GameObjectHandle>, name: &str, position: Vec3) -> SceneResult<GameObjectHandle> {
    let handle = scene.create_game_object(parent, name)?;
    scene.attach_component(handle, ComponentKind::Transform)?;
    scene.attach_component(handle, ComponentKind::Mesh)?;

    if let Some(object) = scene.get_mut(handle) {
        if let Some(transform) = object.get_mut::<TransformComponent>() {
            transform.position = position;
        }
        if let Some(mesh) = object.get_mut::<MeshComponent>() {
            *mesh = MeshComponent::cube(Vec3::new(1.0, 1.0, 1.0));
        }
    }
    Ok(handle)
}

fn build_scene(scene: &mut SceneManager) -> SceneResult<()> {
    let camera = scene.create_game_object(None, "Main Camera")?;
    scene.attach_component(camera, ComponentKind::Transform)?;
    scene.attach_component(camera, ComponentKind::Camera)?;
    if let Some(camera) = scene.get_mut(camera).and_then(|o| o.get_mut::<CameraComponent>()) {
        camera.culling = true;
        camera.debug_frustum = true;
    }

    let house = spawn_cube(scene, None, "House", Vec3::new(0.0, 0.0, 10.0))?;
    spawn_cube(scene, Some(house), "Chimney", Vec3::new(0.5, 1.5, 0.0))?;
    spawn_cube(scene, None, "Shed", Vec3::new(-6.0, 0.0, 14.0))?;
    spawn_cube(scene, None, "Behind Camera", Vec3::new(0.0, 0.0, -10.0))?;
    Ok(())
}

fn selected_name(scene: &SceneManager) -> String {
    scene
        .selected()
        .and_then(|handle| scene.get(handle))
        .map_or_else(|| "nothing".to_string(), |object| object.name().to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);
    log::info!("Starting scene demo...");

    let config = SceneConfig::load_or_default("scene_demo.toml")?;
    let scene_path = config.scene_path.clone();
    let (width, height) = (config.viewport_width as f32, config.viewport_height as f32);
    let pick_button = config.pick_button;

    let mut scene = SceneManager::new(config);
    scene.init()?;
    build_scene(&mut scene)?;

    let mut renderer = LoggingRenderer::default();

    // Frame 0 settles world placement, then a few scripted clicks
    let clicks = [
        None,
        Some((width * 0.52, height * 0.49)),
        Some((width * 0.05, height * 0.05)),
        Some((width * 0.52, height * 0.49)),
    ];
    for click in clicks {
        let input = match click {
            Some((x, y)) => MouseState::at(x, y).with_press(pick_button),
            None => MouseState::default(),
        };
        scene.update(FRAME_TIME, &mut renderer, &input)?;

        if input.mouse_button_state(pick_button) == ButtonState::Down {
            log::info!("Clicked {:?}, selected {}", input.mouse_position(), selected_name(&scene));
        }
    }
    log::info!("Submitted {} primitives over {} frames", renderer.primitives, clicks.len());

    for entry in scene.hierarchy_outline() {
        log::info!(
            "{}{}{}",
            "  ".repeat(entry.depth),
            entry.name,
            if entry.selected { " *" } else { "" }
        );
    }

    let mut fs = NativeFileSystem::new(std::env::temp_dir());
    scene.save_scene_to(&mut fs, &scene_path)?;

    scene.clear_scene()?;
    scene.load_scene_from(&fs, &scene_path)?;
    scene.update(FRAME_TIME, &mut renderer, &MouseState::default())?;
    log::info!("Reloaded scene with {} game objects", scene.hierarchy().len());

    scene.shutdown()?;
    log::info!("Scene demo finished");
    Ok(())
}
