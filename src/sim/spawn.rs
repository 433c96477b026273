//! Food and obstacle placement
//!
//! Rejection sampling over the whole board, bounded by an attempt cap. Past
//! the cap the free cells are enumerated and one is drawn uniformly, so a
//! nearly full board still terminates and a full one reports `GridFull`.

use std::collections::HashSet;

use super::grid::{Cell, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// Every tile is occupied
    GridFull,
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GridFull => write!(f, "no free tile left on the board"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Pick a uniformly random cell of a `tiles`×`tiles` board outside `occupied`
pub fn spawn(
    occupied: &HashSet<Cell>,
    tiles: i32,
    max_attempts: u32,
    rng: &mut dyn RandomSource,
) -> Result<Cell, SpawnError> {
    let area = (tiles as usize) * (tiles as usize);
    if occupied.len() < area {
        for _ in 0..max_attempts {
            let cell = rng.cell(tiles);
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }
    }

    let free = free_cells(occupied, tiles);
    log::debug!(
        "Rejection sampling gave up after {} attempts, {} free cells",
        max_attempts,
        free.len()
    );
    if free.is_empty() {
        return Err(SpawnError::GridFull);
    }
    Ok(free[rng.below(free.len() as u32) as usize])
}

/// All cells outside `occupied`, row-major
pub fn free_cells(occupied: &HashSet<Cell>, tiles: i32) -> Vec<Cell> {
    (0..tiles)
        .flat_map(|y| (0..tiles).map(move |x| Cell::new(x, y)))
        .filter(|c| !occupied.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::tests::ScriptedSource;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rejects_occupied_draws() {
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(1, 0)].into_iter().collect();
        // (0,0) and (1,0) are rejected, (2,3) accepted
        let mut rng = ScriptedSource::new(&[0, 0, 1, 0, 2, 3], &[]);
        assert_eq!(spawn(&occupied, 5, 100, &mut rng), Ok(Cell::new(2, 3)));
    }

    #[test]
    fn test_falls_back_to_scan() {
        // 3x3 board with a single free tile; the script only ever draws (0,0)
        let mut occupied: HashSet<Cell> = free_cells(&HashSet::new(), 3).into_iter().collect();
        occupied.remove(&Cell::new(2, 1));
        let mut rng = ScriptedSource::new(&[], &[]);
        assert_eq!(spawn(&occupied, 3, 50, &mut rng), Ok(Cell::new(2, 1)));
    }

    #[test]
    fn test_full_grid() {
        let occupied: HashSet<Cell> = free_cells(&HashSet::new(), 4).into_iter().collect();
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(spawn(&occupied, 4, 1000, &mut rng), Err(SpawnError::GridFull));
    }

    #[test]
    fn test_zero_attempts_still_spawns() {
        let mut rng = Pcg32::seed_from_u64(4);
        let cell = spawn(&HashSet::new(), 6, 0, &mut rng).expect("free board");
        assert!(cell.in_bounds(6));
    }
}
