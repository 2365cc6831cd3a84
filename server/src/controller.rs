use common::{Color, Direction, GameState};

/// Decision logic plugged into the server.
///
/// One instance serves every game the server is asked to play, and calls for
/// different games arrive concurrently on different threads. Implementations
/// that keep per-game state must key it by `state.game.id` and guard it
/// themselves; the server never serializes calls.
///
/// Each call runs on a blocking worker thread, so implementations may do CPU
/// heavy work. An `Err` or a panic turns into a server error response for that
/// request only.
pub trait SnakeController: Send + Sync + 'static {
    /// Called once when a game starts. The colour is cosmetic.
    fn start(&self, state: &GameState) -> Result<Color, String>;

    /// Called once per turn. The only call whose result affects play.
    fn make_move(&self, state: &GameState) -> Result<Direction, String>;

    /// Called once when the game is over.
    fn end(&self, state: &GameState) -> Result<(), String>;
}
