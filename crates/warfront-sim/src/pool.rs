//! Admission pool: caps how many of a faction's soldiers are simulated at once.
//!
//! Soldiers beyond the cap wait in a FIFO queue and are admitted in fixed
//! batches on the refill tick as casualties free up slots.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use warfront_core::enums::UnitClass;
use warfront_core::types::PlayerId;

/// A soldier waiting for a slot on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedSoldier {
    pub player: PlayerId,
    pub class: UnitClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionPool {
    cap: usize,
    batch_size: usize,
    on_field: usize,
    queue: VecDeque<QueuedSoldier>,
}

impl AdmissionPool {
    pub fn new(cap: usize, batch_size: usize) -> Self {
        Self {
            cap,
            batch_size,
            on_field: 0,
            queue: VecDeque::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn on_field(&self) -> usize {
        self.on_field
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn free_slots(&self) -> usize {
        self.cap.saturating_sub(self.on_field)
    }

    /// Claim a field slot. Returns false (and claims nothing) when full.
    pub fn try_admit(&mut self) -> bool {
        if self.on_field >= self.cap {
            return false;
        }
        self.on_field += 1;
        true
    }

    pub fn enqueue(&mut self, soldier: QueuedSoldier) {
        self.queue.push_back(soldier);
    }

    /// Give back a slot after a death or withdrawal.
    pub fn release(&mut self) {
        self.on_field = self.on_field.saturating_sub(1);
    }

    /// Pop up to one batch from the queue head, claiming a slot for each.
    pub fn take_batch(&mut self) -> Vec<QueuedSoldier> {
        let n = self.batch_size.min(self.free_slots()).min(self.queue.len());
        self.on_field += n;
        self.queue.drain(..n).collect()
    }

    /// Drop every queued soldier belonging to `player`. Returns how many were dropped.
    pub fn withdraw_player(&mut self, player: PlayerId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|s| s.player != player);
        before - self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soldier(player: u64) -> QueuedSoldier {
        QueuedSoldier {
            player: PlayerId(player),
            class: UnitClass::Spearman,
        }
    }

    #[test]
    fn test_admit_respects_cap() {
        let mut pool = AdmissionPool::new(2, 50);
        assert!(pool.try_admit());
        assert!(pool.try_admit());
        assert!(!pool.try_admit());
        assert_eq!(pool.on_field(), 2);
        assert_eq!(pool.free_slots(), 0);
    }

    #[test]
    fn test_take_batch_is_fifo_and_bounded() {
        let mut pool = AdmissionPool::new(10, 3);
        for p in 0..5 {
            pool.enqueue(soldier(p));
        }
        let batch = pool.take_batch();
        assert_eq!(
            batch.iter().map(|s| s.player.0).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(pool.on_field(), 3);
        assert_eq!(pool.queued(), 2);
    }

    #[test]
    fn test_take_batch_limited_by_free_slots() {
        let mut pool = AdmissionPool::new(4, 50);
        for _ in 0..3 {
            pool.try_admit();
        }
        for p in 0..10 {
            pool.enqueue(soldier(p));
        }
        assert_eq!(pool.take_batch().len(), 1);
        assert_eq!(pool.on_field(), 4);
        assert!(pool.take_batch().is_empty());
    }

    #[test]
    fn test_release_saturates() {
        let mut pool = AdmissionPool::new(4, 50);
        pool.release();
        assert_eq!(pool.on_field(), 0);
    }

    #[test]
    fn test_withdraw_player_keeps_order_of_others() {
        let mut pool = AdmissionPool::new(0, 50);
        for p in [1, 2, 1, 3] {
            pool.enqueue(soldier(p));
        }
        assert_eq!(pool.withdraw_player(PlayerId(1)), 2);
        assert_eq!(pool.queued(), 2);
        assert!(!pool.is_empty());
    }
}
