use super::column::{Column, Direction};

/// Outcome of a legal move: where the issue lands and the state it must persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub destination: Column,
    pub new_state: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// No column exists before Backlog or after Done.
    #[error("Cannot move {direction} from {column}")]
    Boundary { column: Column, direction: Direction },
}

/// Computes the destination of moving an issue one column in `direction`.
///
/// The board is linear: Backlog -> Next -> Doing -> Done.
pub fn transition(current: Column, direction: Direction) -> Result<Transition, TransitionError> {
    let destination = match (current, direction) {
        (Column::Backlog, Direction::Forward) => Column::Next,
        (Column::Next, Direction::Forward) => Column::Doing,
        (Column::Doing, Direction::Forward) => Column::Done,
        (Column::Next, Direction::Backward) => Column::Backlog,
        (Column::Doing, Direction::Backward) => Column::Next,
        (Column::Done, Direction::Backward) => Column::Doing,
        (Column::Done, Direction::Forward) | (Column::Backlog, Direction::Backward) => {
            return Err(TransitionError::Boundary {
                column: current,
                direction,
            });
        }
    };

    Ok(Transition {
        destination,
        new_state: destination.state_value(),
    })
}
