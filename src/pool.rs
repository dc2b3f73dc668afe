//! Object pool for particles.

use crate::config::EngineConfig;
use crate::particle::{Instance, Particle};

/// Free-list pool bounding steady-state allocation.
///
/// Every particle is in exactly one of the free list or the live set. The
/// pool allocates past its capacity when demand spikes, but recycles at most
/// `capacity` slots; releases beyond that are dropped rather than retained.
pub struct ParticlePool {
    live: Vec<Particle>,
    free: Vec<Particle>,
    capacity: usize,
    allocated: usize,
}

impl ParticlePool {
    /// Create a pool with `capacity` preallocated slots.
    pub fn new(capacity: usize) -> Self {
        let free: Vec<Particle> = (0..capacity).map(|_| Particle::inert()).collect();
        Self {
            live: Vec::with_capacity(capacity),
            free,
            capacity,
            allocated: capacity,
        }
    }

    /// Take a slot into the live set for spawning.
    ///
    /// The caller must `spawn` the returned particle immediately; until then
    /// it holds stale data from its previous life.
    pub fn acquire(&mut self) -> &mut Particle {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.allocated += 1;
                Particle::inert()
            }
        };
        self.live.push(slot);
        let last = self.live.len() - 1;
        &mut self.live[last]
    }

    /// Remove the particle at `index` from the live set.
    ///
    /// The slot is reset to inert and recycled while the free list is below
    /// capacity; past that it is dropped.
    pub fn release(&mut self, index: usize) {
        let mut particle = self.live.swap_remove(index);
        particle.reset();
        if self.free.len() < self.capacity {
            self.free.push(particle);
        } else {
            self.allocated -= 1;
        }
    }

    /// Step every live particle, releasing the ones that expired this pass.
    ///
    /// Iterates in reverse index order so `swap_remove` never skips an
    /// element.
    pub fn update_all(&mut self, now: f32, config: &EngineConfig) {
        for i in (0..self.live.len()).rev() {
            self.live[i].update(now, config);
            if !self.live[i].active {
                self.release(i);
            }
        }
    }

    /// Collect render instances in live-set order.
    ///
    /// Order is oldest-acquired first but not stable across releases.
    pub fn instances(&self, config: &EngineConfig, out: &mut Vec<Instance>) {
        out.extend(self.live.iter().filter_map(|p| p.instance(config)));
    }

    /// Iterate the live set.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter()
    }

    /// Number of currently live particles.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.live.len()
    }

    /// Number of slots waiting on the free list.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total particle objects held, live and free.
    #[inline]
    pub fn allocated_count(&self) -> usize {
        self.allocated
    }

    /// Configured recycling capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Release every live particle.
    pub fn clear(&mut self) {
        for i in (0..self.live.len()).rev() {
            self.release(i);
        }
    }
}
