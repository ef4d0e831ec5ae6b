//! The single published inventory shared between the scheduler and readers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use webdeck_common::service::Inventory;

/// What a reader sees, taken in one critical section.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub services: Arc<Inventory>,
    /// Empty inventory, whether or not a cycle has finished yet.
    pub no_services: bool,
    /// Number of publishes so far; `0` until the first cycle completes.
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Published {
    services: Arc<Inventory>,
    generation: u64,
}

/// Holds the live inventory as an immutable handle.
///
/// The lock only guards swapping and cloning the handle, so readers never
/// wait on scan work and never see a half-built inventory.
#[derive(Debug, Default)]
pub struct ServiceCache {
    published: Mutex<Published>,
}

impl ServiceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole inventory and returns the new generation.
    pub fn publish(&self, inventory: Inventory) -> u64 {
        let services: Arc<Inventory> = Arc::new(inventory);
        let mut published = self.lock();
        published.services = services;
        published.generation += 1;
        published.generation
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        let published = self.lock();
        CacheSnapshot {
            services: published.services.clone(),
            no_services: published.services.is_empty(),
            generation: published.generation,
        }
    }

    // A panic while holding the lock cannot leave a torn inventory behind.
    fn lock(&self) -> MutexGuard<'_, Published> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
