use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Stable for the whole game; safe to key cross-turn state on.
define_id!(GameId);

define_id!(SnakeId);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_ids_deserialize_from_plain_strings() {
        let id: GameId = serde_json::from_str("\"game-1\"").unwrap();
        assert_eq!(id.as_str(), "game-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"game-1\"");
    }

    #[test]
    fn test_ids_work_as_map_keys() {
        let mut turns: HashMap<GameId, u32> = HashMap::new();
        turns.insert(GameId::new("a"), 1);
        *turns.entry(GameId::from("a")).or_default() += 1;
        assert_eq!(turns.get(&GameId::new("a")), Some(&2));
        assert_eq!(turns.len(), 1);
    }
}
