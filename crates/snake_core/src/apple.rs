//! Apple placement: uniform choice among cells the snake does not occupy.

use crate::grid::Cell;
use rand::Rng;
use std::collections::HashSet;

pub struct Apple {
    position: Cell,
    board_size: i32,
}

impl Apple {
    /// Fresh apple at the session start position, opposite the snake.
    pub fn new(board_size: i32) -> Self {
        Self {
            position: Cell::new(board_size - board_size / 4, board_size / 2),
            board_size,
        }
    }

    /// Apple pinned to a specific cell; used by tests to script eats.
    pub fn at(position: Cell, board_size: i32) -> Self {
        Self {
            position,
            board_size,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn is_eaten(&self, snake_head: Cell) -> bool {
        self.position == snake_head
    }

    /// Move the apple to a uniformly random free cell. The full-board
    /// case (snake everywhere) is an accepted non-goal; the apple then
    /// stays where it was.
    pub fn place(&mut self, occupied: &[Cell], rng: &mut impl Rng) {
        let taken: HashSet<Cell> = occupied.iter().copied().collect();

        let mut free = Vec::with_capacity((self.board_size * self.board_size) as usize);
        for x in 0..self.board_size {
            for y in 0..self.board_size {
                let cell = Cell::new(x, y);
                if !taken.contains(&cell) {
                    free.push(cell);
                }
            }
        }

        if free.is_empty() {
            log::warn!("No free cell left for the apple; board is full");
            return;
        }
        self.position = free[rng.gen_range(0..free.len())];
    }
}
