/// Direction the snake can move
///
/// The declaration order is the clockwise cycle Right → Down → Left → Up.
/// Relative turns step through this cycle, so the order matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in clockwise order
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Position of this direction in the clockwise cycle
    pub fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    /// Direction the snake faces after applying a relative action
    pub fn turned(self, action: RelativeAction) -> Direction {
        let idx = self.index();
        let next = match action {
            RelativeAction::Straight => idx,
            RelativeAction::TurnRight => (idx + 1) % 4,
            RelativeAction::TurnLeft => (idx + 3) % 4,
        };
        Self::CLOCKWISE[next]
    }

    /// Returns the unit delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Action chosen by the agent, relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeAction {
    /// Keep the current heading
    Straight,
    /// Turn clockwise
    TurnRight,
    /// Turn counter-clockwise
    TurnLeft,
}

impl RelativeAction {
    /// Number of actions
    pub const COUNT: usize = 3;

    /// All actions in wire order
    pub const ALL: [RelativeAction; 3] = [
        RelativeAction::Straight,
        RelativeAction::TurnRight,
        RelativeAction::TurnLeft,
    ];

    /// Slot of this action in the `[Straight, TurnRight, TurnLeft]` layout
    pub fn index(self) -> usize {
        match self {
            RelativeAction::Straight => 0,
            RelativeAction::TurnRight => 1,
            RelativeAction::TurnLeft => 2,
        }
    }

    /// Action for a slot index, `None` when out of range
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Encode as a 3-slot indicator array
    pub fn to_one_hot(self) -> [u8; 3] {
        let mut slots = [0; 3];
        slots[self.index()] = 1;
        slots
    }

    /// Decode a 3-slot indicator array; exactly one slot must be set
    pub fn from_one_hot(slots: [u8; 3]) -> Option<Self> {
        let mut set = slots.iter().enumerate().filter(|(_, v)| **v != 0);
        match (set.next(), set.next()) {
            (Some((idx, _)), None) => Self::from_index(idx),
            _ => None,
        }
    }
}
