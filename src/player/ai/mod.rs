pub mod first_move;

pub use first_move::FirstMoveAI;
