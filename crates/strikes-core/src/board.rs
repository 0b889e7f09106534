/// A completed grid: every cell in 1..=9, every row/column/box a
/// permutation of 1..=9.
pub type SolutionGrid = [[u8; 9]; 9];

/// The grid the player fills in. 0 marks an empty cell; non-given cells
/// only ever hold 0 or the matching solution value.
pub type BoardGrid = [[u8; 9]; 9];

/// Marks cells pre-filled by the puzzle, immutable for the life of the game.
pub type GivenMask = [[bool; 9]; 9];

/// Count non-empty cells on a board.
pub fn filled_count(board: &BoardGrid) -> usize {
    board
        .iter()
        .flat_map(|row| row.iter())
        .filter(|&&v| v != 0)
        .count()
}

/// Count cells marked as given.
pub fn given_count(mask: &GivenMask) -> usize {
    mask.iter()
        .flat_map(|row| row.iter())
        .filter(|&&g| g)
        .count()
}
