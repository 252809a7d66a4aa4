//! In-memory cache for the aggregated statistics.
//!
//! A single slot holds the last computed [`Statistics`] together with the
//! instant it was computed. The pair is always replaced as a whole under one
//! lock, so readers never see a value with someone else's timestamp.
//! Expiry is lazy: staleness is only noticed on the next read.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::db::Database;
use crate::error::Result;
use crate::models::Statistics;

/// Default time-to-live for cached statistics (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Observable state of the cache slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Fresh,
    Stale,
}

struct CacheEntry {
    value: Arc<Statistics>,
    populated_at: Instant,
}

impl CacheEntry {
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.populated_at)
    }
}

/// Single-slot TTL cache guarding [`Database::compute_statistics`]
pub struct StatisticsCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl StatisticsCache {
    /// Create a cache with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached statistics, recomputed from `db` when empty or expired
    pub fn get_statistics(&self, db: &Database) -> Result<Arc<Statistics>> {
        self.get_or_compute_at(Instant::now(), || db.compute_statistics())
    }

    /// Return the cached value if it is younger than the TTL at `now`,
    /// otherwise run `compute` and store its result stamped with `now`.
    ///
    /// The lock is held while computing, so concurrent misses wait for the
    /// first recomputation instead of each running their own. A failed
    /// computation leaves the previous entry in place.
    pub fn get_or_compute_at<F>(&self, now: Instant, compute: F) -> Result<Arc<Statistics>>
    where
        F: FnOnce() -> Result<Statistics>,
    {
        let mut slot = self.lock();

        if let Some(entry) = slot.as_ref() {
            let age = entry.age(now);
            if age < self.ttl {
                debug!(age_secs = age.as_secs(), "Serving cached statistics");
                return Ok(Arc::clone(&entry.value));
            }
        }

        info!("Recomputing statistics");
        let value = Arc::new(compute()?);
        *slot = Some(CacheEntry {
            value: Arc::clone(&value),
            populated_at: now,
        });
        Ok(value)
    }

    /// State of the slot as seen at `now`
    pub fn state_at(&self, now: Instant) -> CacheState {
        match self.lock().as_ref() {
            None => CacheState::Empty,
            Some(entry) if entry.age(now) < self.ttl => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    pub fn state(&self) -> CacheState {
        self.state_at(Instant::now())
    }

    /// Drop the cached value; the next read recomputes
    #[cfg(test)]
    pub(crate) fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        // The slot is only ever written as a complete entry, so a
        // poisoned lock still guards a consistent value.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StatisticsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::StatisticsSummary;
    use std::cell::Cell;

    fn stats(total: f64) -> Statistics {
        Statistics {
            resumo: StatisticsSummary {
                total_despesas: total,
                media_despesas: total,
                num_operadoras: 0,
            },
            top_operadoras: vec![],
            distribuicao_uf: vec![],
        }
    }

    #[test]
    fn test_starts_empty() {
        let cache = StatisticsCache::new();
        assert_eq!(cache.state(), CacheState::Empty);
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_hit_within_ttl_skips_recompute() {
        let cache = StatisticsCache::new();
        let calls = Cell::new(0);
        let t0 = Instant::now();

        let first = cache
            .get_or_compute_at(t0, || {
                calls.set(calls.get() + 1);
                Ok(stats(1.0))
            })
            .unwrap();
        assert_eq!(cache.state_at(t0), CacheState::Fresh);

        let second = cache
            .get_or_compute_at(t0 + Duration::from_secs(100), || {
                calls.set(calls.get() + 1);
                Ok(stats(2.0))
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.resumo.total_despesas, 1.0);
    }

    #[test]
    fn test_expired_entry_recomputed() {
        let cache = StatisticsCache::new();
        let t0 = Instant::now();

        cache.get_or_compute_at(t0, || Ok(stats(1.0))).unwrap();

        let t1 = t0 + Duration::from_secs(301);
        assert_eq!(cache.state_at(t1), CacheState::Stale);

        let refreshed = cache.get_or_compute_at(t1, || Ok(stats(2.0))).unwrap();
        assert_eq!(refreshed.resumo.total_despesas, 2.0);

        // New timestamp: fresh again relative to t1, not t0
        assert_eq!(
            cache.state_at(t1 + Duration::from_secs(299)),
            CacheState::Fresh
        );
    }

    #[test]
    fn test_age_equal_to_ttl_is_stale() {
        let cache = StatisticsCache::with_ttl(Duration::from_secs(10));
        let t0 = Instant::now();
        cache.get_or_compute_at(t0, || Ok(stats(1.0))).unwrap();

        assert_eq!(
            cache.state_at(t0 + Duration::from_secs(10)),
            CacheState::Stale
        );
    }

    #[test]
    fn test_failed_recompute_keeps_previous_entry() {
        let cache = StatisticsCache::new();
        let t0 = Instant::now();
        cache.get_or_compute_at(t0, || Ok(stats(1.0))).unwrap();

        let t1 = t0 + Duration::from_secs(400);
        let err = cache
            .get_or_compute_at(t1, || Err(Error::InvalidData("boom".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert_eq!(cache.state_at(t1), CacheState::Stale);
    }

    #[test]
    fn test_invalidate() {
        let cache = StatisticsCache::new();
        let t0 = Instant::now();
        cache.get_or_compute_at(t0, || Ok(stats(1.0))).unwrap();

        cache.invalidate();
        assert_eq!(cache.state_at(t0), CacheState::Empty);
    }

    #[test]
    fn test_concurrent_misses_compute_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cache = Arc::new(StatisticsCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let t0 = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    cache
                        .get_or_compute_at(t0, || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(stats(3.0))
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().resumo.total_despesas, 3.0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
