//! cursor-sandbox: try every cursor kind against a small in-memory scene
//!
//! Keys:
//! - 1..4: toggle full / ground / height / object cursor
//! - R: reload `cursors.ron` (a single `CursorConfig` applied to all)
//! - Left/Right: orbit the camera
//!
//! Set `RUST_LOG` to change log levels (default `sandbox_cursors=debug`).

use std::path::Path;

use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use sandbox_cursors::cursor::{HandleRole, HandleShape};
use sandbox_cursors::geometry::{self, rotate_y, Aabb};
use sandbox_cursors::input::sample_pointer;
use sandbox_cursors::scene::{StructureEdge, StructureGeometry};
use sandbox_cursors::{Cursor, CursorConfig, CursorEvent, EntityId, MemoryScene, Scene, Transform, VERSION};

const CONFIG_PATH: &str = "cursors.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("cursor-sandbox v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn mq(v: geometry::Vec3) -> Vec3 {
    vec3(v.x, v.y, v.z)
}

fn role_color(role: HandleRole) -> Color {
    match role {
        HandleRole::Xz => GREEN,
        HandleRole::Y => SKYBLUE,
        HandleRole::Rotate => ORANGE,
        HandleRole::Delete => RED,
        HandleRole::Confirm => LIME,
    }
}

/// Orbit camera shared by the renderer and the cursors' picking
struct Orbit {
    angle: f32,
    distance: f32,
    height: f32,
}

impl Orbit {
    fn eye(&self) -> geometry::Vec3 {
        geometry::Vec3::new(
            self.angle.sin() * self.distance,
            self.height,
            -self.angle.cos() * self.distance,
        )
    }

    fn picking_camera(&self) -> geometry::Camera {
        geometry::Camera::looking_at(self.eye(), geometry::Vec3::ZERO)
            .with_viewport(screen_width(), screen_height())
    }

    fn render_camera(&self, picking: &geometry::Camera) -> Camera3D {
        Camera3D {
            position: mq(self.eye()),
            target: vec3(0.0, 0.0, 0.0),
            up: vec3(0.0, 1.0, 0.0),
            fovy: picking.fov_y,
            ..Default::default()
        }
    }
}

struct Sandbox {
    scene: MemoryScene,
    prop: Option<EntityId>,
    cursors: Vec<Cursor>,
}

impl Sandbox {
    fn new() -> Self {
        let mut scene = MemoryScene::new();
        let prop = scene.add_object(
            Transform::from_position(geometry::Vec3::new(2.0, 0.5, 2.0)),
            Some(Aabb::from_center(geometry::Vec3::ZERO, geometry::Vec3::new(0.5, 0.5, 0.5))),
        );
        let wall = scene.add_wall(vec![
            geometry::Vec3::new(-5.0, 0.0, -2.0),
            geometry::Vec3::new(-2.0, 0.0, 3.0),
        ]);
        let house = scene.add_structure(StructureGeometry {
            position: geometry::Vec3::new(4.0, 0.0, -4.0),
            yaw: 30.0,
            width: 4.0,
            depth: 3.0,
            left_anchor: geometry::Vec3::new(0.0, 2.5, 0.0),
            right_anchor: geometry::Vec3::new(0.0, 2.5, 0.0),
        });

        let mut full = Cursor::full_control_point();
        full.update_position(geometry::Vec3::new(-2.0, 1.0, -4.0));

        let mut ground = Cursor::ground_control_point();
        ground.update_position(geometry::Vec3::new(0.0, 0.1, -2.0));

        let mut wall_height = Cursor::height_control_point();
        wall_height.update_position(geometry::Vec3::new(0.0, 2.0, 0.0));
        wall_height.set_target_wall(wall);

        let mut house_height = Cursor::height_control_point();
        house_height.set_target_house(house, StructureEdge::Left);

        let mut object = Cursor::object();
        object.set_target_object(Some(prop));

        let mut cursors = vec![full, ground, wall_height, house_height, object];
        for cursor in &mut cursors {
            cursor.set_visible(true);
        }

        Self { scene, prop: Some(prop), cursors }
    }

    fn reload_config(&mut self) {
        let path = Path::new(CONFIG_PATH);
        if !path.exists() {
            tracing::info!(path = CONFIG_PATH, "no config file, keeping current settings");
            return;
        }
        match CursorConfig::load(path) {
            Ok(config) => {
                for cursor in &mut self.cursors {
                    cursor.set_config(config.clone());
                }
                tracing::info!(path = CONFIG_PATH, "config reloaded");
            }
            Err(e) => tracing::warn!("failed to reload {}: {}", CONFIG_PATH, e),
        }
    }

    fn toggle(&mut self, slot: usize) {
        // Slot 3 drives both height cursors
        let indices: &[usize] = match slot {
            0 => &[0],
            1 => &[1],
            2 => &[2, 3],
            _ => &[4],
        };
        for &i in indices {
            if let Some(cursor) = self.cursors.get_mut(i) {
                let visible = !cursor.is_visible();
                cursor.set_visible(visible);
            }
        }
    }

    fn update(&mut self, camera: &geometry::Camera) {
        let pointer = sample_pointer();
        let mut deleted = false;
        let mut confirmed = false;

        // First cursor to start a drag claims the pointer-down
        let mut claimed = false;
        for cursor in &mut self.cursors {
            cursor.set_camera(Some(camera.clone()));
            let mut sample = pointer;
            if claimed {
                sample.pressed = false;
            }
            for event in cursor.update(&sample, &mut self.scene) {
                match event {
                    CursorEvent::DragStarted(_) => claimed = true,
                    CursorEvent::DeleteRequested => {
                        claimed = true;
                        deleted = true;
                    }
                    CursorEvent::ConfirmRequested => {
                        claimed = true;
                        confirmed = true;
                    }
                    CursorEvent::SnapCue => {}
                    other => tracing::trace!(?other, "cursor event"),
                }
            }
        }

        if deleted {
            if let Some(prop) = self.prop.take() {
                self.scene.remove(prop);
                tracing::info!(?prop, "prop deleted");
            }
            if let Some(object) = self.cursors.get_mut(4) {
                object.set_target_object(None);
                object.set_visible(false);
            }
        }
        if confirmed {
            tracing::info!("placement confirmed");
            if let Some(object) = self.cursors.get_mut(4) {
                object.set_visible(false);
            }
        }
    }

    fn draw_scene(&self) {
        draw_grid(20, 1.0, DARKGRAY, GRAY);

        for (_, object) in self.scene.objects() {
            let size = object
                .local_bounds
                .map(|b| b.size() * object.transform.scale)
                .unwrap_or(geometry::Vec3::new(1.0, 1.0, 1.0));
            let center = object
                .local_bounds
                .map(|b| object.transform.position + b.center() * object.transform.scale)
                .unwrap_or(object.transform.position);
            draw_cube(mq(center), mq(size), None, BEIGE);
            draw_cube_wires(mq(center), mq(size), BROWN);
        }

        for (_, points) in self.scene.walls() {
            for pair in points.windows(2) {
                draw_line_3d(mq(pair[0]), mq(pair[1]), MAROON);
                draw_line_3d(
                    mq(pair[0].with_y(2.0)),
                    mq(pair[1].with_y(2.0)),
                    MAROON,
                );
            }
        }

        for (_, s) in self.scene.structures() {
            let hw = s.width * 0.5;
            let hd = s.depth * 0.5;
            let corners = [(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)]
                .map(|(x, z)| s.position + rotate_y(geometry::Vec3::new(x, 0.0, z), s.yaw));
            for i in 0..4 {
                let a = corners[i];
                let b = corners[(i + 1) % 4];
                draw_line_3d(mq(a), mq(b), PURPLE);
                draw_line_3d(mq(a), mq(a.with_y(s.left_anchor.y)), PURPLE);
            }
        }
    }

    fn draw_cursors(&self) {
        for cursor in self.cursors.iter().filter(|c| c.is_visible()) {
            let origin = cursor.position();
            for region in cursor.handles().regions() {
                let center = mq(region.center(origin, cursor.yaw()));
                let color = role_color(region.role);
                match region.shape {
                    HandleShape::Sphere { radius } => draw_sphere(center, radius, None, color),
                    HandleShape::Box { half_extents } => {
                        draw_cube_wires(center, mq(half_extents * 2.0), color)
                    }
                }
            }

            if let Some(grid) = cursor.grid_plane() {
                let corners = grid.corners();
                for i in 0..4 {
                    draw_line_3d(mq(corners[i]), mq(corners[(i + 1) % 4]), YELLOW);
                }
                if grid.cell_size > 0.0 {
                    let steps = (grid.size.0 / grid.cell_size) as i32;
                    for s in 1..steps {
                        let t = s as f32 * grid.cell_size;
                        let a = corners[0] + geometry::Vec3::new(t, 0.0, 0.0);
                        let b = corners[3] + geometry::Vec3::new(t, 0.0, 0.0);
                        draw_line_3d(mq(a), mq(b), Color::new(1.0, 1.0, 0.0, 0.25));
                    }
                }
            }
        }
    }

    fn draw_hud(&self) {
        let names = ["1 full", "2 ground", "3 height", "3 height (house)", "4 object"];
        for (i, (cursor, name)) in self.cursors.iter().zip(names).enumerate() {
            let state = match (cursor.is_visible(), cursor.drag_mode()) {
                (false, _) => "hidden".to_string(),
                (true, Some(mode)) => format!("dragging {:?}", mode),
                (true, None) => "idle".to_string(),
            };
            let p = cursor.position();
            let line = format!("{:<18} {:<14} ({:.2}, {:.2}, {:.2})", name, state, p.x, p.y, p.z);
            draw_text(&line, 12.0, 24.0 + i as f32 * 20.0, 20.0, WHITE);
        }
        if let Some(prop) = self.prop.and_then(|id| self.scene.transform(id)) {
            let line = format!("prop yaw {:.1}", prop.yaw());
            draw_text(&line, 12.0, 24.0 + 5.0 * 20.0, 20.0, WHITE);
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sandbox_cursors=debug,cursor_sandbox=info")),
        )
        .init();

    let mut sandbox = Sandbox::new();
    sandbox.reload_config();
    let mut orbit = Orbit { angle: 0.4, distance: 14.0, height: 9.0 };

    loop {
        if is_key_down(KeyCode::Left) {
            orbit.angle -= get_frame_time();
        }
        if is_key_down(KeyCode::Right) {
            orbit.angle += get_frame_time();
        }
        for (slot, key) in [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4]
            .into_iter()
            .enumerate()
        {
            if is_key_pressed(key) {
                sandbox.toggle(slot);
            }
        }
        if is_key_pressed(KeyCode::R) {
            sandbox.reload_config();
        }

        let picking = orbit.picking_camera();
        sandbox.update(&picking);

        clear_background(Color::new(0.08, 0.09, 0.12, 1.0));
        set_camera(&orbit.render_camera(&picking));
        sandbox.draw_scene();
        sandbox.draw_cursors();
        set_default_camera();
        sandbox.draw_hud();

        next_frame().await;
    }
}
