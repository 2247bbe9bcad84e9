use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A handle to a read-write lock that can be stored and reused
pub struct LockHandle {
    lock: Arc<RwLock<()>>,
}

impl LockHandle {
    /// Acquires a read lock
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read()
    }

    /// Acquires a write lock
    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write()
    }
}

/// Registry for managing named read-write locks.
///
/// Each collection gets a named lock which serializes its mutations while
/// allowing concurrent reads. Handles for the same name share the same
/// underlying lock.
///
/// # Examples
///
/// ```
/// use jdb::common::LockRegistry;
/// let lock_registry = LockRegistry::new();
/// let lock = lock_registry.get_lock("users");
/// {
///     let _read_guard = lock.read();
/// } // Read lock is held while _read_guard is in scope
/// {
///     let _write_guard = lock.write();
/// } // Write lock is held while _write_guard is in scope
/// ```
#[derive(Clone)]
pub struct LockRegistry {
    locks: Arc<DashMap<String, Arc<RwLock<()>>>>,
}

impl LockRegistry {
    /// Creates a new empty lock registry.
    pub fn new() -> Self {
        LockRegistry {
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Gets a lock for the given name, creating it if it does not exist.
    ///
    /// Multiple read locks can be held simultaneously for the same resource.
    /// Only one write lock can be held at a time, and no read locks can be
    /// held while a write lock is acquired.
    pub fn get_lock(&self, name: &str) -> LockHandle {
        let lock = self
            .locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone();
        LockHandle { lock }
    }

    /// Removes a lock from the registry if it's no longer needed.
    pub fn remove_lock(&self, name: &str) -> bool {
        self.locks.remove(name).is_some()
    }

    /// Returns the number of locks currently registered.
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc as StdArc;
    use std::thread;

    #[test]
    fn test_new_lock_registry() {
        let lock_registry = LockRegistry::new();
        assert_eq!(lock_registry.lock_count(), 0);
    }

    #[test]
    fn test_get_lock() {
        let lock_registry = LockRegistry::new();
        let handle = lock_registry.get_lock("users");
        let _read_guard = handle.read();
        assert_eq!(lock_registry.lock_count(), 1);
    }

    #[test]
    fn test_same_name_shares_lock() {
        let lock_registry = LockRegistry::new();
        let _a = lock_registry.get_lock("users");
        let _b = lock_registry.get_lock("users");
        assert_eq!(lock_registry.lock_count(), 1);
    }

    #[test]
    fn test_multiple_read_locks_same_name() {
        let lock_registry = StdArc::new(LockRegistry::new());
        let counter = StdArc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for _i in 0..3 {
            let registry = lock_registry.clone();
            let cnt = counter.clone();

            let handle = thread::spawn(move || {
                let lock_handle = registry.get_lock("users");
                let _read_guard = lock_handle.read();
                cnt.fetch_add(1, Ordering::SeqCst);
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(lock_registry.lock_count(), 1);
    }

    #[test]
    fn test_remove_lock() {
        let lock_registry = LockRegistry::new();
        let _handle = lock_registry.get_lock("users");
        assert_eq!(lock_registry.lock_count(), 1);

        let removed = lock_registry.remove_lock("users");
        assert!(removed);
        assert_eq!(lock_registry.lock_count(), 0);
    }

    #[test]
    fn test_remove_nonexistent_lock() {
        let lock_registry = LockRegistry::new();
        assert!(!lock_registry.remove_lock("nonexistent"));
    }
}
