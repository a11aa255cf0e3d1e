//! One play session: snake + apple + score, plus the score-driven speed
//! ramp. Sessions are created fresh for every game and discarded on game
//! over; only the leaderboard outlives them.

use crate::apple::Apple;
use crate::difficulty::Difficulty;
use crate::snake::Snake;
use rand::rngs::ThreadRng;

/// Points between speed increases.
pub const SPEED_INCREASE_THRESHOLD: u32 = 5;
/// Multiplier gained per threshold crossing (0.1 = +10% of base speed).
pub const SPEED_INCREASE_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Snake advanced without incident.
    Moved,
    /// Head landed on the apple; score, growth, and speed already applied.
    AteApple,
    /// Head hit a wall or the body. The session is over.
    GameOver,
}

/// Speed for a given score: base speed plus 10% of base per full
/// threshold crossed, clamped to the tier ceiling.
pub fn speed_for(difficulty: Difficulty, score: u32) -> f64 {
    let base = difficulty.base_speed();
    if score == 0 {
        return base;
    }
    let increments = (score / SPEED_INCREASE_THRESHOLD) as f64;
    (base * (1.0 + increments * SPEED_INCREASE_FACTOR)).min(difficulty.max_speed())
}

pub struct GameSession {
    snake: Snake,
    apple: Apple,
    score: u32,
    difficulty: Difficulty,
    rng: ThreadRng,
}

impl GameSession {
    pub fn new(board_size: i32, difficulty: Difficulty) -> Self {
        let mut snake = Snake::new(board_size);
        snake.set_speed_factor(difficulty.base_speed());
        Self {
            snake,
            apple: Apple::new(board_size),
            score: 0,
            difficulty,
            rng: rand::thread_rng(),
        }
    }

    /// One simulation step: advance, then collision, then apple. Everything
    /// an eat implies (score, growth, eating animation, speed ramp, apple
    /// relocation) happens inside the same step, before the caller decides
    /// whether to run another.
    pub fn step(&mut self) -> StepOutcome {
        self.snake.advance();

        if self.snake.check_collision() {
            return StepOutcome::GameOver;
        }

        if self.apple.is_eaten(self.snake.head()) {
            self.score += 1;
            self.snake.grow();
            self.snake.set_eating();
            if self.score % SPEED_INCREASE_THRESHOLD == 0 {
                self.snake
                    .set_speed_factor(speed_for(self.difficulty, self.score));
            }
            self.apple.place(self.snake.segments(), &mut self.rng);
            return StepOutcome::AteApple;
        }

        StepOutcome::Moved
    }

    pub fn set_direction(&mut self, vel_x: i32, vel_y: i32) {
        self.snake.set_direction(vel_x, vel_y);
    }

    /// Render-side hook; see `Snake::tick_eating`.
    pub fn tick_eating(&mut self) {
        self.snake.tick_eating();
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn speed_factor(&self) -> f64 {
        self.snake.speed_factor()
    }

    #[cfg(test)]
    fn set_apple(&mut self, cell: crate::grid::Cell) {
        self.apple = Apple::at(cell, 20);
    }
}
