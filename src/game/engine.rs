use super::{
    action::{Direction, RelativeAction},
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCause {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// Too many steps for the current length
    Stalled,
    /// No free cell is left for food
    BoardFull,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the episode ended, if it did
    pub terminal_cause: Option<TerminalCause>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Score after the step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine drawing food positions from `rng`
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    /// Create an engine with a deterministic food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let cell = self.config.block_size;
        let head = Position::new(
            self.config.columns() / 2 * cell,
            self.config.rows() / 2 * cell,
        );

        let snake = Snake::new(head, Direction::Right, self.config.initial_snake_length, cell);

        // A fresh snake never fills the board, validate() guarantees the room
        let food = self.spawn_food_avoid_snake(&snake).unwrap_or(head);

        GameState::new(snake, food, self.config.width, self.config.height, cell)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: RelativeAction) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    terminal_cause: None,
                },
            };
        }

        state.steps += 1;

        state.snake.direction = state.snake.direction.turned(action);
        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction, self.config.block_size);
        state.snake.push_head(new_head);

        // The body is left as-is on death so the final frame shows the crash
        if let Some(cause) = self.check_terminal(state) {
            state.is_alive = false;
            return StepResult {
                reward: self.config.death_penalty,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    terminal_cause: Some(cause),
                },
            };
        }

        if new_head != state.food {
            state.snake.pop_tail();
            return StepResult {
                reward: 0.0,
                terminated: false,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    terminal_cause: None,
                },
            };
        }

        state.score += 1;
        let terminal_cause = match self.spawn_food_avoid_snake(&state.snake) {
            Some(food) => {
                state.food = food;
                None
            }
            None => {
                state.is_alive = false;
                Some(TerminalCause::BoardFull)
            }
        };

        StepResult {
            reward: self.config.food_reward,
            terminated: terminal_cause.is_some(),
            score: state.score,
            info: StepInfo {
                ate_food: true,
                terminal_cause,
            },
        }
    }

    /// Terminal check run after the new head is in place
    fn check_terminal(&self, state: &GameState) -> Option<TerminalCause> {
        let head = state.head();

        if !state.is_in_bounds(head) {
            return Some(TerminalCause::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(TerminalCause::SelfCollision);
        }

        let limit = self.config.stall_factor as usize * state.snake.len();
        if state.steps as usize > limit {
            return Some(TerminalCause::Stalled);
        }

        None
    }

    /// Spawn food at a random free cell, `None` if the snake fills the board
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let columns = self.config.columns();
        let rows = self.config.rows();
        let cell = self.config.block_size;
        let total_cells = columns as usize * rows as usize;

        if snake.len() < total_cells / 2 {
            loop {
                let x = self.rng.gen_range(0..columns) * cell;
                let y = self.rng.gen_range(0..rows) * cell;
                let pos = Position::new(x, y);

                if !snake.occupies(pos) {
                    return Some(pos);
                }
            }
        }

        let free: Vec<Position> = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| Position::new(col * cell, row * cell)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }
}
