use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::types::Coord;
use crate::SnakeId;

/// A snake as reported for one turn. Compare snakes through [`Snake::id`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    pub id: SnakeId,
    pub name: String,
    pub health: i32,
    /// Head first, tail last. The engine repeats the tail entry while the
    /// snake is still growing, so this can hold duplicates at the end.
    #[serde(deserialize_with = "non_empty_body")]
    body: Vec<Coord>,
}

fn non_empty_body<'de, D>(deserializer: D) -> Result<Vec<Coord>, D::Error>
where
    D: Deserializer<'de>,
{
    let body = Vec::<Coord>::deserialize(deserializer)?;
    if body.is_empty() {
        return Err(serde::de::Error::invalid_length(0, &"at least one body part"));
    }
    Ok(body)
}

impl Snake {
    /// Returns `None` when `body` is empty.
    pub fn new(id: SnakeId, name: String, health: i32, body: Vec<Coord>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            id,
            name,
            health,
            body,
        })
    }

    pub fn body(&self) -> &[Coord] {
        &self.body
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn tail(&self) -> Coord {
        self.body[self.body.len() - 1]
    }

    /// Number of turns this snake still grows, read off the repeated tail
    /// entries.
    pub fn growth_left(&self) -> usize {
        let tail = self.tail();
        self.body
            .iter()
            .rev()
            .skip(1)
            .take_while(|&&part| part == tail)
            .count()
    }

    /// Real length in parts, excluding tail entries that have not grown yet.
    pub fn effective_length(&self) -> usize {
        self.body.len() - self.growth_left()
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.body.contains(&coord)
    }
}

impl fmt::Display for Snake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Snake, ID={}, Health={}, GrowthLeft={}, Body=[",
            self.id,
            self.health,
            self.growth_left()
        )?;
        for (i, part) in self.body.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", part)?;
        }
        f.write_str("]>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(body: &[(i32, i32)]) -> Snake {
        let body = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Snake::new(SnakeId::new("s1"), "tester".to_string(), 100, body).unwrap()
    }

    #[test]
    fn test_single_part_snake() {
        let s = snake(&[(2, 2)]);
        assert_eq!(s.head(), Coord::new(2, 2));
        assert_eq!(s.tail(), Coord::new(2, 2));
        assert_eq!(s.growth_left(), 0);
        assert_eq!(s.effective_length(), 1);
    }

    #[test]
    fn test_no_trailing_duplicates_means_no_growth() {
        let s = snake(&[(1, 1), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(s.head(), Coord::new(1, 1));
        assert_eq!(s.tail(), Coord::new(2, 3));
        assert_eq!(s.growth_left(), 0);
        assert_eq!(s.effective_length(), 4);
    }

    #[test]
    fn test_trailing_duplicates_count_as_growth() {
        let s = snake(&[(1, 1), (1, 2), (1, 2)]);
        assert_eq!(s.growth_left(), 1);
        assert_eq!(s.effective_length(), 2);

        let s = snake(&[(1, 1), (1, 2), (1, 2), (1, 2), (1, 2)]);
        assert_eq!(s.growth_left(), 3);
        assert_eq!(s.effective_length(), 2);
    }

    #[test]
    fn test_fully_stacked_snake() {
        let s = snake(&[(5, 5), (5, 5), (5, 5)]);
        assert_eq!(s.growth_left(), 2);
        assert_eq!(s.effective_length(), 1);
    }

    #[test]
    fn test_duplicates_before_the_tail_run_are_not_counted() {
        let s = snake(&[(0, 0), (0, 1), (0, 0), (0, 0)]);
        assert_eq!(s.growth_left(), 1);
        assert_eq!(s.effective_length(), 3);
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert!(Snake::new(SnakeId::new("s"), String::new(), 1, Vec::new()).is_none());

        let json = r#"{"id": "s", "name": "n", "health": 1, "body": []}"#;
        assert!(serde_json::from_str::<Snake>(json).is_err());
    }

    #[test]
    fn test_display() {
        let s = snake(&[(1, 1), (1, 2), (1, 2)]);
        assert_eq!(
            s.to_string(),
            "<Snake, ID=s1, Health=100, GrowthLeft=1, Body=[(1, 1), (1, 2), (1, 2)]>"
        );
    }
}
