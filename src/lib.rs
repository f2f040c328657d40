pub mod automaton;
pub mod config;
pub mod controller;
pub mod controls;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod terminal;
pub mod view;

pub use controller::AnimationController;
pub use controller::ControllerState;
pub use controls::Action;
pub use controls::ControlSurface;
pub use engine::Density;
pub use engine::Engine;
pub use engine::EngineError;
pub use error::HarnessError;
pub use session::Session;
pub use view::GridBufferView;
