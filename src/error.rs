use thiserror::Error;

/// Failures that stop the game before or outside normal play
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnakeError {
    #[error("grid {width}x{height} is too small, both sides must be at least {min}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("grid {width}x{height} is too large, both sides must be at most {max}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("cannot place the snake, cell ({x}, {y}) is not empty")]
    SpawnBlocked { x: i32, y: i32 },

    #[error("snake has no segments left")]
    HeadlessSnake,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SnakeError {
    /// Numeric code reported to the user and used as the process exit status
    pub fn code(&self) -> u8 {
        match self {
            SnakeError::GridTooSmall { .. } => 2,
            SnakeError::SpawnBlocked { .. } => 3,
            SnakeError::HeadlessSnake => 4,
            SnakeError::Config(_) => 5,
            SnakeError::GridTooLarge { .. } => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_nonzero_and_distinct() {
        let errors = [
            SnakeError::GridTooSmall {
                width: 3,
                height: 3,
                min: 7,
            },
            SnakeError::GridTooLarge {
                width: 999,
                height: 9,
                max: 256,
            },
            SnakeError::SpawnBlocked { x: 1, y: 1 },
            SnakeError::HeadlessSnake,
            SnakeError::Config("bad".into()),
        ];

        let mut codes: Vec<u8> = errors.iter().map(SnakeError::code).collect();
        assert!(codes.iter().all(|&c| c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_messages() {
        let err = SnakeError::SpawnBlocked { x: 2, y: 5 };
        assert_eq!(
            err.to_string(),
            "cannot place the snake, cell (2, 5) is not empty"
        );
    }
}
