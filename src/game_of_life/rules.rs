//! Conway's B3/S23 transition rule

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Neighbor counts that bring a dead cell to life
    pub const BIRTH: [u8; 1] = [3];

    /// Neighbor counts that keep a living cell alive
    pub const SURVIVAL: [u8; 2] = [2, 3];

    /// Moore neighborhood size
    pub const MAX_NEIGHBORS: u8 = 8;

    /// (row, column) offsets of the eight orthogonal and diagonal neighbors
    pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    /// State of a cell in the next generation given its current state and
    /// living neighbor count
    pub fn next_state(alive: bool, neighbors: u8) -> bool {
        if alive {
            Self::SURVIVAL.contains(&neighbors)
        } else {
            Self::BIRTH.contains(&neighbors)
        }
    }
}
