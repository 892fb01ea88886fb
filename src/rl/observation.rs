use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::game::{Direction, GameState};

/// Number of features in an encoded state
pub const STATE_DIM: usize = 11;

/// Encoded state fed to the value network
pub type StateVector = [f32; STATE_DIM];

/// Absolute probe direction for (heading, [ahead, right, left])
///
/// Rows follow the clockwise heading order Right, Down, Left, Up.
const DANGER_PROBES: [[Direction; 3]; 4] = [
    // Heading Right
    [Direction::Right, Direction::Down, Direction::Up],
    // Heading Down
    [Direction::Down, Direction::Left, Direction::Right],
    // Heading Left
    [Direction::Left, Direction::Up, Direction::Down],
    // Heading Up
    [Direction::Up, Direction::Right, Direction::Left],
];

/// Encode the game state as 11 binary features
///
/// Layout:
/// - 0..3: danger ahead, to the right, to the left (relative to heading)
/// - 3..7: heading one-hot in the order Left, Right, Up, Down
/// - 7..11: food left of, right of, above, below the head
pub fn encode_state(state: &GameState) -> StateVector {
    let head = state.head();
    let heading = state.direction();

    // Collision probes one cell away, indexed by clockwise direction index
    let danger = Direction::CLOCKWISE.map(|dir| {
        state.is_collision(Some(head.moved_in_direction(dir, state.block_size)))
    });
    let probes = DANGER_PROBES[heading.index()];
    let danger_at = |slot: usize| danger[probes[slot].index()];

    let food = state.food;
    let features = [
        danger_at(0),
        danger_at(1),
        danger_at(2),
        heading == Direction::Left,
        heading == Direction::Right,
        heading == Direction::Up,
        heading == Direction::Down,
        food.x < head.x,
        food.x > head.x,
        food.y < head.y,
        food.y > head.y,
    ];

    features.map(|flag| if flag { 1.0 } else { 0.0 })
}

/// Stack encoded states into a `[batch, STATE_DIM]` tensor
pub fn states_to_tensor<B: Backend>(states: &[StateVector], device: &B::Device) -> Tensor<B, 2> {
    let data: Vec<f32> = states.iter().flatten().copied().collect();
    let tensor_data = TensorData::new(data, [states.len(), STATE_DIM]);

    Tensor::<B, 2>::from_data(tensor_data, device)
}
