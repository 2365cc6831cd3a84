use serde::{Deserialize, Serialize};

use super::snake::Snake;
use super::types::Coord;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Snake>,
}

impl Board {
    pub fn on_board(&self, coord: Coord) -> bool {
        self.on_board_xy(coord.x, coord.y)
    }

    pub fn on_board_xy(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub fn has_food_at(&self, coord: Coord) -> bool {
        self.food.contains(&coord)
    }
}
