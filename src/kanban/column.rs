use std::fmt;

/// The four fixed workflow stages of the board, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Backlog,
    Next,
    Doing,
    Done,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Backlog, Column::Next, Column::Doing, Column::Done];

    /// The persisted `state` value for issues in this column.
    pub fn state_value(self) -> &'static str {
        match self {
            Column::Backlog => "open",
            Column::Next => "next",
            Column::Doing => "doing",
            Column::Done => "done",
        }
    }

    /// Maps a persisted `state` back to its column. Unrecognized states belong to no column.
    pub fn from_state(state: &str) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|column| column.state_value() == state)
    }

    /// Parses a column name as typed on the command line.
    pub fn from_name(name: &str) -> Option<Column> {
        match name.to_ascii_lowercase().as_str() {
            "backlog" | "open" => Some(Column::Backlog),
            "next" => Some(Column::Next),
            "doing" => Some(Column::Doing),
            "done" => Some(Column::Done),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Backlog => "Backlog",
            Column::Next => "Next",
            Column::Doing => "Doing",
            Column::Done => "Done",
        }
    }

    /// 1-based position on the board.
    pub fn position(self) -> usize {
        match self {
            Column::Backlog => 1,
            Column::Next => 2,
            Column::Doing => 3,
            Column::Done => 4,
        }
    }

    /// Pager label such as `2/4`.
    pub fn page_label(self) -> String {
        format!("{}/{}", self.position(), Column::ALL.len())
    }

    /// Whether a move in `direction` is allowed from this column.
    pub fn can_move(self, direction: Direction) -> bool {
        super::transition::transition(self, direction).is_ok()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Direction of a requested move along the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Direction> {
        match name.to_ascii_lowercase().as_str() {
            "forward" | "next" | ">" => Some(Direction::Forward),
            "backward" | "back" | "prev" | "previous" | "<" => Some(Direction::Backward),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}
