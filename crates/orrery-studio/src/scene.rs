use clap::ValueEnum;

use orrery_engine::anim::{Axis, BodyRegistry, NodeHandle, OrbitingBody, RegistryError, SceneGraph};

/// Which demo to build.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum SceneKind {
    /// A single cube tumbling about X and Y.
    Cube,
    /// A sun and eight planets, each turning about Y at its own rate.
    Solar,
}

/// Perspective camera, fixed for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 5.0],
        }
    }
}

/// A rotatable scene node. Rotation is Euler angles in radians, `[x, y, z]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: &'static str,
    pub rotation: [f32; 3],
}

/// Scene state handed to the renderer each frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub nodes: Vec<Node>,
    pub camera: Camera,
    pub background: wgpu::Color,
}

impl Scene {
    fn with_background(background: wgpu::Color) -> Self {
        Self { nodes: Vec::new(), camera: Camera::default(), background }
    }

    fn add_node(&mut self, name: &'static str) -> NodeHandle {
        self.nodes.push(Node { name, rotation: [0.0; 3] });
        NodeHandle(self.nodes.len() as u32 - 1)
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.0 as usize)
    }
}

impl SceneGraph for Scene {
    fn set_rotation(&mut self, handle: NodeHandle, axis: Axis, radians: f32) {
        let Some(node) = self.nodes.get_mut(handle.0 as usize) else {
            log::trace!("rotation for unknown node {handle:?} dropped");
            return;
        };
        let i = match axis {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };
        node.rotation[i] = radians;
    }
}

/// Cube spin in rad/s about each of X and Y (0.01 rad per frame at 60 Hz).
const CUBE_RATE: f32 = 0.6;

/// Per-body rates in rad/s. Small and hand-picked, not physically scaled.
const SOLAR_BODIES: &[(&str, f32)] = &[
    ("sun", 0.05),
    ("mercury", 0.48),
    ("venus", 0.35),
    ("earth", 0.30),
    ("mars", 0.24),
    ("jupiter", 0.13),
    ("saturn", 0.097),
    ("uranus", 0.068),
    ("neptune", 0.054),
];

/// Builds the scene nodes and the body table that drives them.
pub fn build(kind: SceneKind) -> Result<(Scene, BodyRegistry), RegistryError> {
    match kind {
        SceneKind::Cube => {
            let mut scene = Scene::with_background(wgpu::Color::BLACK);
            let cube = scene.add_node("cube");
            let bodies = BodyRegistry::from_bodies([
                OrbitingBody::new("cube.x", CUBE_RATE, cube, Axis::X),
                OrbitingBody::new("cube.y", CUBE_RATE, cube, Axis::Y),
            ])?;
            Ok((scene, bodies))
        }

        SceneKind::Solar => {
            let space = wgpu::Color { r: 0.01, g: 0.01, b: 0.03, a: 1.0 };
            let mut scene = Scene::with_background(space);
            let mut bodies = BodyRegistry::new();
            for &(name, rate) in SOLAR_BODIES {
                let node = scene.add_node(name);
                bodies.register(OrbitingBody::new(name, rate, node, Axis::Y))?;
            }
            Ok((scene, bodies))
        }
    }
}
