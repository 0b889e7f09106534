use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{BoardGrid, GivenMask, SolutionGrid};

/// Fewest givens we ever carve; below this the puzzle stops being "easy".
pub const MIN_GIVENS: usize = 30;

/// Every generated solution starts from this hand-verified solved grid.
const BASE_SOLUTION: SolutionGrid = [
    [1, 3, 8, 9, 6, 7, 5, 4, 2],
    [6, 9, 7, 5, 4, 2, 8, 1, 3],
    [5, 4, 2, 1, 3, 8, 9, 6, 7],
    [9, 7, 1, 3, 5, 6, 2, 8, 4],
    [2, 8, 5, 4, 7, 9, 1, 3, 6],
    [3, 6, 4, 2, 8, 1, 7, 9, 5],
    [4, 2, 3, 8, 9, 5, 6, 7, 1],
    [8, 5, 6, 7, 1, 4, 3, 2, 9],
    [7, 1, 9, 6, 2, 3, 4, 5, 8],
];

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Generate a random valid solution by applying symmetry-preserving
/// shuffles to the base grid: digit relabeling, row/column shuffles inside
/// each band/stack, then whole-band and whole-stack reordering. Each step
/// keeps every row, column, and box a permutation of 1..=9. Same seed,
/// same grid.
pub fn generate_solution(seed: Option<u64>) -> SolutionGrid {
    let mut rng = seeded_rng(seed);
    let mut grid = BASE_SOLUTION;

    relabel_digits(&mut grid, &mut rng);
    shuffle_rows_in_bands(&mut grid, &mut rng);
    shuffle_cols_in_stacks(&mut grid, &mut rng);
    reorder_bands(&mut grid, &mut rng);
    reorder_stacks(&mut grid, &mut rng);

    grid
}

/// Apply a random permutation of the digits 1..=9 to every cell.
fn relabel_digits(grid: &mut SolutionGrid, rng: &mut StdRng) {
    let mut relabeled: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    relabeled.shuffle(rng);
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = relabeled[(*cell - 1) as usize];
        }
    }
}

/// Permute the three rows inside each horizontal band. Rows never cross
/// band boundaries, so box membership is preserved.
fn shuffle_rows_in_bands(grid: &mut SolutionGrid, rng: &mut StdRng) {
    for band in [0, 3, 6] {
        let mut order = [0, 1, 2];
        order.shuffle(rng);
        let rows = [grid[band], grid[band + 1], grid[band + 2]];
        for (i, &src) in order.iter().enumerate() {
            grid[band + i] = rows[src];
        }
    }
}

/// Permute the three columns inside each vertical stack.
fn shuffle_cols_in_stacks(grid: &mut SolutionGrid, rng: &mut StdRng) {
    for stack in [0, 3, 6] {
        let mut order = [0, 1, 2];
        order.shuffle(rng);
        for row in grid.iter_mut() {
            let cols = [row[stack], row[stack + 1], row[stack + 2]];
            for (i, &src) in order.iter().enumerate() {
                row[stack + i] = cols[src];
            }
        }
    }
}

/// Reorder the three bands as whole 3-row blocks.
fn reorder_bands(grid: &mut SolutionGrid, rng: &mut StdRng) {
    let mut order = [0, 3, 6];
    order.shuffle(rng);
    let old = *grid;
    for (i, &band) in order.iter().enumerate() {
        for k in 0..3 {
            grid[i * 3 + k] = old[band + k];
        }
    }
}

/// Reorder the three stacks as whole 3-column blocks.
fn reorder_stacks(grid: &mut SolutionGrid, rng: &mut StdRng) {
    let mut order = [0, 3, 6];
    order.shuffle(rng);
    let old = *grid;
    for r in 0..9 {
        for (i, &stack) in order.iter().enumerate() {
            for k in 0..3 {
                grid[r][i * 3 + k] = old[r][stack + k];
            }
        }
    }
}

/// Carve a playable board from a solution by revealing `target_givens`
/// cells (clamped to [30, 81]) in a seeded random order. Revealed cells
/// become givens; everything else stays empty and editable.
///
/// The high reveal ratio is what makes the puzzle easy; the result is not
/// checked for having a unique completion.
pub fn carve(
    solution: &SolutionGrid,
    target_givens: usize,
    seed: Option<u64>,
) -> (BoardGrid, GivenMask) {
    let mut rng = seeded_rng(seed);
    let target = target_givens.clamp(MIN_GIVENS, 81);

    let mut cells: Vec<(usize, usize)> = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .collect();
    cells.shuffle(&mut rng);

    let mut board: BoardGrid = [[0; 9]; 9];
    let mut givens: GivenMask = [[false; 9]; 9];
    for &(r, c) in cells.iter().take(target) {
        board[r][c] = solution[r][c];
        givens[r][c] = true;
    }

    (board, givens)
}
