pub mod ai;
pub mod controller;

pub use ai::FirstMoveAI;
pub use controller::PlayerController;
