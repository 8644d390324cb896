use serde::{Deserialize, Serialize};

/// A tracker issue as persisted on the board.
///
/// Everything except `state` is a snapshot taken when the issue was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub number: u64,
    pub comments: u64,
    pub created_at: String,
    /// `open`, `next`, `doing` or `done` place the issue in a column; any other value hides it.
    pub state: String,
}

impl Issue {
    /// Returns a copy of this issue carrying `state`.
    pub fn with_state(&self, state: &str) -> Issue {
        Issue {
            state: state.to_string(),
            ..self.clone()
        }
    }
}
