//! Homogeneous entity containers and pairwise collision queries
//!
//! Each kind of live entity (player bullets, alien bullets, aliens,
//! power-ups) lives in its own `EntityCollection`. The container promises
//! nothing about ordering; removal during a collision pass is mark-then-sweep
//! so no element is skipped or visited twice.

use super::rect::Rect;

/// Capability required of entities that can be collision-tested
pub trait Bounded {
    /// The entity's current axis-aligned bounding box
    fn bounds(&self) -> Rect;
}

/// An unordered collection of live entities of one kind
#[derive(Debug, Clone)]
pub struct EntityCollection<T> {
    entities: Vec<T>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityCollection<T> {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    pub fn add(&mut self, entity: T) {
        self.entities.push(entity);
    }

    /// Keep only entities satisfying the predicate
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.entities.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl<T: Bounded> EntityCollection<T> {
    /// Does any entity overlap the probe box?
    pub fn overlaps_any(&self, probe: Rect) -> bool {
        self.entities.iter().any(|e| e.bounds().overlaps(&probe))
    }

    /// Remove and return every entity overlapping the probe box
    pub fn take_overlapping(&mut self, probe: Rect) -> Vec<T> {
        let mut taken = Vec::new();
        let mut i = 0;
        while i < self.entities.len() {
            if self.entities[i].bounds().overlaps(&probe) {
                taken.push(self.entities.swap_remove(i));
            } else {
                i += 1;
            }
        }
        taken
    }

    /// Pairwise collision query against another collection.
    ///
    /// Returns one entry per colliding self-entity: the entity itself and
    /// the set of other-entities it collided with. With `remove_other`, an
    /// other-entity consumed by one self-entity is not visible to later
    /// self-entities in the same pass. The colliding entities are removed
    /// from their collections according to the two flags.
    pub fn collide_pairs<U: Bounded>(
        &mut self,
        other: &mut EntityCollection<U>,
        remove_self: bool,
        remove_other: bool,
    ) -> Vec<(T, Vec<U>)>
    where
        T: Clone,
        U: Clone,
    {
        let mut self_hit = vec![false; self.entities.len()];
        let mut other_taken = vec![false; other.entities.len()];
        let mut pairs: Vec<(T, Vec<U>)> = Vec::new();

        for (i, entity) in self.entities.iter().enumerate() {
            let bounds = entity.bounds();
            let mut hits: Vec<usize> = Vec::new();
            for (j, o) in other.entities.iter().enumerate() {
                if !other_taken[j] && bounds.overlaps(&o.bounds()) {
                    hits.push(j);
                }
            }
            if hits.is_empty() {
                continue;
            }
            self_hit[i] = true;
            if remove_other {
                for &j in &hits {
                    other_taken[j] = true;
                }
            }
            let collided = hits.iter().map(|&j| other.entities[j].clone()).collect();
            pairs.push((entity.clone(), collided));
        }

        // Sweep after the full scan so indices stay stable above
        if remove_self {
            let mut keep = self_hit.iter().map(|&hit| !hit);
            self.entities.retain(|_| keep.next().unwrap_or(true));
        }
        if remove_other {
            let mut keep = other_taken.iter().map(|&taken| !taken);
            other.entities.retain(|_| keep.next().unwrap_or(true));
        }

        pairs
    }
}
