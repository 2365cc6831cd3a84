use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::snake::Snake;
use crate::GameId;

/// Game instance description. Equality and hashing only look at the id, so a
/// `Game` (or its id) can key per-game state kept across turns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Everything the engine sends for one lifecycle call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Snake,
}

impl GameState {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Other snakes on the board, excluding the caller.
    pub fn opponents(&self) -> impl Iterator<Item = &Snake> {
        self.board.snakes.iter().filter(|s| s.id != self.you.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, SnakeId};

    const SAMPLE: &str = r#"{
        "game": {"id": "game-42"},
        "turn": 7,
        "board": {
            "width": 11,
            "height": 11,
            "food": [{"x": 3, "y": 4}],
            "snakes": [
                {"id": "me", "name": "Me", "health": 90, "body": [{"x": 5, "y": 5}, {"x": 5, "y": 6}]},
                {"id": "them", "name": "Them", "health": 80, "body": [{"x": 1, "y": 1}]}
            ]
        },
        "you": {"id": "me", "name": "Me", "health": 90, "body": [{"x": 5, "y": 5}, {"x": 5, "y": 6}]}
    }"#;

    #[test]
    fn test_parse_full_state() {
        let state = GameState::from_json(SAMPLE).unwrap();
        assert_eq!(state.game.id.as_str(), "game-42");
        assert_eq!(state.turn, 7);
        assert_eq!(state.board.width, 11);
        assert_eq!(state.board.food, vec![Coord::new(3, 4)]);
        assert_eq!(state.board.snakes.len(), 2);
        assert_eq!(state.you.id, SnakeId::new("me"));
        assert_eq!(state.you.head(), Coord::new(5, 5));

        let opponents: Vec<_> = state.opponents().map(|s| s.id.as_str()).collect();
        assert_eq!(opponents, vec!["them"]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let json = SAMPLE.replacen("\"turn\": 7,", "\"turn\": 7, \"ruleset\": {\"name\": \"standard\"},", 1);
        assert!(GameState::from_json(&json).is_ok());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        for field in ["\"turn\": 7,", "\"food\": [{\"x\": 3, \"y\": 4}],"] {
            let json = SAMPLE.replacen(field, "", 1);
            assert!(GameState::from_json(&json).is_err(), "accepted without {}", field);
        }

        let without_health = SAMPLE.replace("\"health\": 90, ", "");
        assert!(GameState::from_json(&without_health).is_err());
    }

    #[test]
    fn test_empty_and_null_bodies_are_rejected() {
        assert!(GameState::from_json("").is_err());
        assert!(GameState::from_json("null").is_err());
        assert!(GameState::from_json("{}").is_err());
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        let json = SAMPLE.replacen("\"turn\": 7", "\"turn\": \"seven\"", 1);
        assert!(GameState::from_json(&json).is_err());
    }

    #[test]
    fn test_game_equality_is_by_id() {
        let a = Game { id: GameId::new("x") };
        let b = Game { id: GameId::new("x") };
        let c = Game { id: GameId::new("y") };
        assert_eq!(a, b);
        assert_ne!(a, c);

        let none: Option<Game> = None;
        assert_eq!(none, None);
        assert_ne!(Some(a), none);
    }
}
