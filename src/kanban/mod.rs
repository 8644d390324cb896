pub mod board;
pub mod column;
pub mod transition;

pub use board::{Board, BoardError, Moved};
pub use column::{Column, Direction};
pub use transition::{Transition, TransitionError, transition};
