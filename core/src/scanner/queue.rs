use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU32, Ordering};

/// Shared work queue handing out ports in ascending order.
///
/// Each port is returned by exactly one call to [`PortQueue::pop`], no
/// matter how many workers pull concurrently.
#[derive(Debug)]
pub struct PortQueue {
    next: AtomicU32,
    end: u32,
}

impl PortQueue {
    pub fn new(range: RangeInclusive<u16>) -> Self {
        Self {
            next: AtomicU32::new(u32::from(*range.start())),
            end: u32::from(*range.end()),
        }
    }

    pub fn pop(&self) -> Option<u16> {
        let port = self.next.fetch_add(1, Ordering::Relaxed);
        if port <= self.end {
            u16::try_from(port).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn pops_ascending_then_drains() {
        let queue = PortQueue::new(65_533..=u16::MAX);
        assert_eq!(queue.pop(), Some(65_533));
        assert_eq!(queue.pop(), Some(65_534));
        assert_eq!(queue.pop(), Some(65_535));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn concurrent_consumers_split_range_without_overlap() {
        let queue = Arc::new(PortQueue::new(1..=u16::MAX));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = queue.clone();
                std::thread::spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(port) = queue.pop() {
                        taken.push(port);
                    }
                    taken
                })
            })
            .collect();

        let mut seen: HashSet<u16> = HashSet::new();
        let mut total = 0usize;
        for handle in handles {
            for port in handle.join().unwrap() {
                total += 1;
                seen.insert(port);
            }
        }
        assert_eq!(total, 65_535);
        assert_eq!(seen.len(), 65_535);
    }
}
