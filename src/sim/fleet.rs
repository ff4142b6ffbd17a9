//! Enemy fleet formation
//!
//! The fleet moves as one rigid formation: a shared horizontal direction,
//! reversed (with a fixed downward drop) whenever any single alien touches
//! a side of the play area. The fire policy always shoots from the
//! bottommost occupied row, recomputed on every attempt because the bottom
//! row changes as aliens are destroyed.

use glam::Vec2;
use rand::Rng;

use super::collection::{Bounded, EntityCollection};
use super::state::{Alien, AlienBullet};
use crate::consts::*;

/// The full collection of currently-alive aliens plus formation movement
/// state.
#[derive(Debug, Clone)]
pub struct Fleet {
    aliens: EntityCollection<Alien>,
    /// Shared horizontal sign: +1 moves right, -1 moves left
    pub direction: f32,
    next_id: u32,
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

impl Fleet {
    pub fn new() -> Self {
        Self {
            aliens: EntityCollection::new(),
            direction: 1.0,
            next_id: 1,
        }
    }

    pub fn aliens(&self) -> &EntityCollection<Alien> {
        &self.aliens
    }

    pub fn aliens_mut(&mut self) -> &mut EntityCollection<Alien> {
        &mut self.aliens
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// Replace the formation with a fresh one for the given level.
    ///
    /// Rows grow with the level up to the cap. Columns fill left to right,
    /// leaving a one-alien-width margin on both sides and spacing aliens at
    /// two alien widths; rows sit two alien heights apart, offset one alien
    /// height from the top. Direction resets to rightward.
    pub fn spawn(&mut self, level: u32, width: f32) {
        self.aliens.clear();
        self.direction = 1.0;

        let rows = (level + 1).min(MAX_FLEET_ROWS);
        for row in 0..rows {
            let y = (ALIEN_HEIGHT + 2.0 * ALIEN_HEIGHT * row as f32) as i32;
            let mut x = ALIEN_WIDTH;
            while x < width - 2.0 * ALIEN_WIDTH {
                let id = self.next_id;
                self.next_id += 1;
                self.aliens.add(Alien { id, x, y });
                x += 2.0 * ALIEN_WIDTH;
            }
        }
    }

    /// Move every alien horizontally by the current speed and direction
    pub fn advance(&mut self, alien_speed: f32) {
        let dx = alien_speed * self.direction;
        for alien in self.aliens.iter_mut() {
            alien.x += dx;
        }
    }

    /// If any alien touches a side of the play area, drop the whole fleet
    /// and reverse direction. The flip happens exactly once per call no
    /// matter how many aliens are at the edge. Returns whether it fired.
    pub fn check_edges(&mut self, width: f32) -> bool {
        let at_edge = self
            .aliens
            .iter()
            .any(|a| a.bounds().right() >= width || a.bounds().left() <= 0.0);
        if !at_edge {
            return false;
        }
        for alien in self.aliens.iter_mut() {
            alien.y += FLEET_DROP;
        }
        self.direction = -self.direction;
        true
    }

    /// Has any alien reached the bottom boundary?
    pub fn reached_bottom(&self, height: f32) -> bool {
        self.aliens.iter().any(|a| a.bounds().bottom() >= height)
    }

    /// With probability 1-in-`fire_rate`, fire a bullet from a uniformly
    /// random alien in the bottommost occupied row. The bottom row is
    /// recomputed on every attempt. No bullet when the fleet is empty.
    pub fn maybe_fire(&self, rng: &mut impl Rng, fire_rate: u32) -> Option<AlienBullet> {
        if self.aliens.is_empty() || !rng.random_ratio(1, fire_rate) {
            return None;
        }

        let bottom_y = self.aliens.iter().map(|a| a.y).max()?;
        let bottom: Vec<&Alien> = self.aliens.iter().filter(|a| a.y == bottom_y).collect();
        let shooter = bottom[rng.random_range(0..bottom.len())];

        Some(AlienBullet {
            pos: Vec2::new(
                shooter.bounds().center_x() - BULLET_WIDTH / 2.0,
                shooter.bounds().bottom(),
            ),
            source_id: shooter.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_layout_level_one() {
        let mut fleet = Fleet::new();
        fleet.spawn(1, 1200.0);

        // Two rows of 11 columns: x = 50, 150, ... 1050
        assert_eq!(fleet.len(), 22);
        let ys: Vec<i32> = fleet.aliens().iter().map(|a| a.y).collect();
        assert!(ys.iter().all(|&y| y == 50 || y == 150));
        assert!(fleet.aliens().iter().all(|a| a.x >= ALIEN_WIDTH));
        assert!(
            fleet
                .aliens()
                .iter()
                .all(|a| a.bounds().right() <= 1200.0 - ALIEN_WIDTH)
        );
    }

    #[test]
    fn test_spawn_rows_grow_with_level_up_to_cap() {
        let rows_at = |level: u32| {
            let mut fleet = Fleet::new();
            fleet.spawn(level, 1200.0);
            let mut ys: Vec<i32> = fleet.aliens().iter().map(|a| a.y).collect();
            ys.sort_unstable();
            ys.dedup();
            ys.len() as u32
        };
        assert_eq!(rows_at(1), 2);
        assert_eq!(rows_at(2), 3);
        assert_eq!(rows_at(4), 5);
        assert_eq!(rows_at(10), MAX_FLEET_ROWS);
    }

    #[test]
    fn test_edge_reversal_drops_and_flips_once() {
        let mut fleet = Fleet::new();
        fleet.spawn(1, 1200.0);
        let before: Vec<i32> = fleet.aliens().iter().map(|a| a.y).collect();

        // Push two aliens onto the right edge; the flip must still be single
        {
            let mut aliens = fleet.aliens_mut().iter_mut();
            if let Some(a) = aliens.next() {
                a.x = 1200.0 - ALIEN_WIDTH;
            }
            if let Some(a) = aliens.next() {
                a.x = 1200.0 - ALIEN_WIDTH + 1.0;
            }
        }

        assert!(fleet.check_edges(1200.0));
        assert_eq!(fleet.direction, -1.0);
        for (alien, y0) in fleet.aliens().iter().zip(before) {
            assert_eq!(alien.y, y0 + FLEET_DROP);
        }
    }

    #[test]
    fn test_no_reversal_away_from_edges() {
        let mut fleet = Fleet::new();
        fleet.spawn(1, 1200.0);
        assert!(!fleet.check_edges(1200.0));
        assert_eq!(fleet.direction, 1.0);
    }

    #[test]
    fn test_left_edge_reverses_leftward_fleet() {
        let mut fleet = Fleet::new();
        fleet.spawn(1, 1200.0);
        fleet.direction = -1.0;
        if let Some(a) = fleet.aliens_mut().iter_mut().next() {
            a.x = 0.0;
        }
        assert!(fleet.check_edges(1200.0));
        assert_eq!(fleet.direction, 1.0);
    }

    #[test]
    fn test_advance_is_horizontal_only() {
        let mut fleet = Fleet::new();
        fleet.spawn(1, 1200.0);
        let before: Vec<(f32, i32)> = fleet.aliens().iter().map(|a| (a.x, a.y)).collect();
        fleet.advance(1.5);
        for (alien, (x0, y0)) in fleet.aliens().iter().zip(before) {
            assert!((alien.x - (x0 + 1.5)).abs() < 1e-6);
            assert_eq!(alien.y, y0);
        }
    }

    #[test]
    fn test_fire_comes_from_bottom_row() {
        let mut fleet = Fleet::new();
        fleet.spawn(2, 1200.0); // three rows
        let bottom_y = fleet.aliens().iter().map(|a| a.y).max().unwrap();

        let mut rng = Pcg32::seed_from_u64(7);
        // fire_rate 1 makes the probability draw certain
        let bullet = fleet.maybe_fire(&mut rng, 1).unwrap();
        let shooter = fleet
            .aliens()
            .iter()
            .find(|a| a.id == bullet.source_id)
            .unwrap();
        assert_eq!(shooter.y, bottom_y);
        assert!((bullet.pos.y - shooter.bounds().bottom()).abs() < 1e-6);
    }

    #[test]
    fn test_fire_row_recomputed_after_losses() {
        let mut fleet = Fleet::new();
        fleet.spawn(1, 1200.0);
        let bottom_y = fleet.aliens().iter().map(|a| a.y).max().unwrap();

        // Wipe out the entire bottom row
        fleet.aliens_mut().retain(|a| a.y != bottom_y);
        let new_bottom = fleet.aliens().iter().map(|a| a.y).max().unwrap();
        assert!(new_bottom < bottom_y);

        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            let bullet = fleet.maybe_fire(&mut rng, 1).unwrap();
            let shooter = fleet
                .aliens()
                .iter()
                .find(|a| a.id == bullet.source_id)
                .unwrap();
            assert_eq!(shooter.y, new_bottom);
        }
    }

    #[test]
    fn test_empty_fleet_never_fires() {
        let fleet = Fleet::new();
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(fleet.maybe_fire(&mut rng, 1).is_none());
    }
}
