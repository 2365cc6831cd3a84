use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use common::{log, Color, Coord, Direction, GameId, GameState};
use rand::Rng;

use crate::controller::SnakeController;

/// Random mover that avoids walls and bodies when it can.
pub struct StarterController {
    color: Color,
    moves_made: Mutex<HashMap<GameId, u32>>,
}

impl StarterController {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            moves_made: Mutex::new(HashMap::new()),
        }
    }

    pub fn active_games(&self) -> usize {
        self.moves_made.lock().map(|games| games.len()).unwrap_or(0)
    }

    fn choose_direction(state: &GameState, rng: &mut impl Rng) -> Direction {
        let safe = Self::safe_directions(state);
        if safe.is_empty() {
            Direction::ALL[rng.random_range(0..Direction::ALL.len())]
        } else {
            safe[rng.random_range(0..safe.len())]
        }
    }

    fn safe_directions(state: &GameState) -> Vec<Direction> {
        let blocked = Self::blocked_cells(state);
        let head = state.you.head();

        Direction::ALL
            .into_iter()
            .filter(|&dir| {
                let next = head.advanced(dir);
                state.board.on_board(next) && !blocked.contains(&next)
            })
            .collect()
    }

    /// Cells still occupied after everyone moves. A tail that is not growing
    /// moves away this turn, so it stays free.
    fn blocked_cells(state: &GameState) -> HashSet<Coord> {
        let mut blocked = HashSet::new();
        for snake in &state.board.snakes {
            let body = snake.body();
            let keep = if snake.growth_left() == 0 {
                body.len() - 1
            } else {
                body.len()
            };
            blocked.extend(body[..keep].iter().copied());
        }
        blocked
    }
}

impl Default for StarterController {
    fn default() -> Self {
        Self::new(Color::CORNFLOWER_BLUE)
    }
}

impl SnakeController for StarterController {
    fn start(&self, state: &GameState) -> Result<Color, String> {
        let mut games = self.moves_made.lock().map_err(|_| "Move counter poisoned".to_string())?;
        games.insert(state.game.id.clone(), 0);

        log!(
            "Game {} started on a {}x{} board with {} snakes",
            state.game.id,
            state.board.width,
            state.board.height,
            state.board.snakes.len()
        );
        Ok(self.color)
    }

    fn make_move(&self, state: &GameState) -> Result<Direction, String> {
        let direction = Self::choose_direction(state, &mut rand::rng());

        let mut games = self.moves_made.lock().map_err(|_| "Move counter poisoned".to_string())?;
        *games.entry(state.game.id.clone()).or_default() += 1;

        Ok(direction)
    }

    fn end(&self, state: &GameState) -> Result<(), String> {
        let moves = self
            .moves_made
            .lock()
            .map_err(|_| "Move counter poisoned".to_string())?
            .remove(&state.game.id)
            .unwrap_or(0);

        let survived = state.board.snakes.iter().any(|s| s.id == state.you.id);
        log!(
            "Game {} ended on turn {} after {} moves ({})",
            state.game.id,
            state.turn,
            moves,
            if survived { "alive" } else { "eliminated" }
        );
        Ok(())
    }
}
