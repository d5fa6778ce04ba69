use std::sync::{LockResult, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

// Map entries are immutable once inserted; a poisoned map holds no partial entry.
fn recover<G>(result: LockResult<G>, lock_kind: &'static str, op: &'static str) -> G {
    result.unwrap_or_else(|poisoned| {
        warn!(
            op,
            lock_kind,
            result = "poisoned_recovered",
            "Recovered from poisoned format set cache lock"
        );
        poisoned.into_inner()
    })
}

pub(crate) fn rw_read<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockReadGuard<'a, T> {
    recover(lock.read(), "rwlock.read", op)
}

pub(crate) fn rw_write<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockWriteGuard<'a, T> {
    recover(lock.write(), "rwlock.write", op)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn poisoned_lock_is_recovered() {
        let lock = Arc::new(RwLock::new(7));
        let poisoner = Arc::clone(&lock);
        let _ = thread::spawn(move || {
            let _guard = poisoner.write().expect("lock is healthy");
            panic!("poison the lock");
        })
        .join();

        assert!(lock.is_poisoned());
        assert_eq!(*rw_read(&lock, "test.read"), 7);
        *rw_write(&lock, "test.write") = 8;
        assert_eq!(*rw_read(&lock, "test.read"), 8);
    }
}
