use std::f64::consts::TAU;
use std::fmt;

/// Opaque reference to a rotatable node owned by the scene collaborator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeHandle(pub u32);

/// Rotation axis in the node's local frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Scene-side contract: the only property the animation core ever writes.
pub trait SceneGraph {
    /// Sets the rotation about `axis` of the node behind `handle`, in radians.
    ///
    /// This is an absolute assignment; implementations must not accumulate.
    fn set_rotation(&mut self, handle: NodeHandle, axis: Axis, radians: f32);
}

/// Absolute angular position of a body after `elapsed` seconds.
///
/// Pure function of its inputs: recomputing it from elapsed time every frame
/// keeps the animation independent of frame rate.
pub fn orbit_angle(elapsed: f64, base_rate: f32, multiplier: f32) -> f32 {
    (elapsed * f64::from(base_rate) * f64::from(multiplier)) as f32
}

/// [`orbit_angle`] reduced to `[0, 2π)` before narrowing.
///
/// The unwrapped angle grows without bound, and after an hour or so an `f32`
/// can no longer resolve one frame's worth of movement.
fn wrapped_angle(elapsed: f64, base_rate: f32, multiplier: f32) -> f32 {
    (elapsed * f64::from(base_rate) * f64::from(multiplier)).rem_euclid(TAU) as f32
}

/// A visual entity whose angle about one axis is driven by elapsed time.
///
/// `base_rate` is fixed at creation; there is intentionally no setter.
#[derive(Debug, Clone)]
pub struct OrbitingBody {
    id: String,
    base_rate: f32,
    handle: NodeHandle,
    axis: Axis,
}

impl OrbitingBody {
    pub fn new(id: impl Into<String>, base_rate: f32, handle: NodeHandle, axis: Axis) -> Self {
        Self { id: id.into(), base_rate, handle, axis }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

/// Reasons a body table is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    DuplicateId(String),
    NonFiniteRate { id: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "orbiting body `{id}` registered twice"),
            Self::NonFiniteRate { id } => {
                write!(f, "orbiting body `{id}` has a non-finite base rate")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Fixed set of orbiting bodies, built once at startup.
///
/// Bodies are kept in registration order. There is no removal.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<OrbitingBody>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a static table, rejecting the whole table on the
    /// first invalid entry.
    pub fn from_bodies<I>(bodies: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = OrbitingBody>,
    {
        let mut registry = Self::new();
        for body in bodies {
            registry.register(body)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, body: OrbitingBody) -> Result<(), RegistryError> {
        if !body.base_rate.is_finite() {
            return Err(RegistryError::NonFiniteRate { id: body.id });
        }
        if self.get(&body.id).is_some() {
            return Err(RegistryError::DuplicateId(body.id));
        }
        log::debug!(
            "registered body `{}` (rate {} about {:?})",
            body.id,
            body.base_rate,
            body.axis
        );
        self.bodies.push(body);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&OrbitingBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitingBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Writes every body's absolute angle for `elapsed` into `scene`, reduced
    /// to one turn.
    pub fn apply<S>(&self, scene: &mut S, elapsed: f64, multiplier: f32)
    where
        S: SceneGraph + ?Sized,
    {
        for body in &self.bodies {
            let radians = wrapped_angle(elapsed, body.base_rate, multiplier);
            scene.set_rotation(body.handle, body.axis, radians);
        }
    }
}
