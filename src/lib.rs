pub mod body_store;
pub mod boundary;
pub mod error;
pub mod forces;
pub mod frame_driver;
pub mod links;
pub mod physics;
pub mod renderer;
pub mod scenario;
pub mod simulation;

pub use body_store::{Body, BodyId, BodyStore, Color, MIN_RADIUS};
pub use boundary::BoundaryReflector;
pub use error::{StoreError, StoreKind};
pub use forces::{pair_force, COLLISION_FORCE};
pub use frame_driver::{FixedClock, FrameClock, FrameInput, RealtimeClock};
pub use links::{Link, LinkStore};
pub use physics::PhysicsStepper;
pub use renderer::{ImageRenderer, NullRenderer, Renderer};
pub use scenario::ScenarioGenerator;
pub use simulation::Simulation;
