use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::games::SessionRng;
use super::puzzles::puzzle_count;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuSettings {
    /// Index into the built-in puzzles; a random one when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puzzle: Option<usize>,
}

impl SudokuSettings {
    pub fn pick_puzzle(&self, rng: &mut SessionRng) -> usize {
        self.puzzle.unwrap_or_else(|| rng.pick_index(puzzle_count()))
    }
}

impl Validate for SudokuSettings {
    fn validate(&self) -> Result<(), String> {
        match self.puzzle {
            Some(index) if index >= puzzle_count() => Err(format!(
                "Sudoku puzzle index {} is out of range, there are {} puzzles",
                index,
                puzzle_count()
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::from_yaml;

    #[test]
    fn test_puzzle_index_range() {
        assert!(SudokuSettings { puzzle: None }.validate().is_ok());
        assert!(SudokuSettings { puzzle: Some(4) }.validate().is_ok());
        assert!(SudokuSettings { puzzle: Some(5) }.validate().is_err());
    }

    #[test]
    fn test_fixed_puzzle_is_picked_as_is() {
        let mut rng = SessionRng::new(3);
        assert_eq!(SudokuSettings { puzzle: Some(2) }.pick_puzzle(&mut rng), 2);
        assert!(SudokuSettings::default().pick_puzzle(&mut rng) < puzzle_count());
    }

    #[test]
    fn test_empty_section_means_random() {
        let settings: SudokuSettings = from_yaml("{}").unwrap();
        assert_eq!(settings, SudokuSettings::default());
    }
}
