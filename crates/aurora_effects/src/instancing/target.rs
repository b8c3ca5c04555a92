//! Render targets owned by the renderer and weakly linked from updaters.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard};

/// Strong handle to a surface. Held by the renderer.
#[derive(Debug)]
pub struct RenderTarget<B> {
    inner: Arc<Mutex<B>>,
}

impl<B> Clone for RenderTarget<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B> RenderTarget<B> {
    /// Wraps a freshly allocated surface.
    #[must_use]
    pub fn new(buffer: B) -> Self {
        Self {
            inner: Arc::new(Mutex::new(buffer)),
        }
    }

    /// Creates a weak link for the updater side.
    #[must_use]
    pub fn link(&self) -> TargetLink<B> {
        TargetLink {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Locks the surface.
    pub fn lock(&self) -> MutexGuard<'_, B> {
        self.inner.lock()
    }
}

/// Weak back-reference from an updater to its surface.
///
/// Once the renderer drops the [`RenderTarget`], every write through the
/// link becomes a no-op.
#[derive(Debug)]
pub struct TargetLink<B> {
    inner: Weak<Mutex<B>>,
}

impl<B> Clone for TargetLink<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<B> Default for TargetLink<B> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<B> TargetLink<B> {
    /// A link that never resolves (not yet mounted).
    #[must_use]
    pub const fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    /// True while the renderer still owns the surface.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Runs `f` against the surface if it is still alive.
    pub fn with<R>(&self, f: impl FnOnce(&mut B) -> R) -> Option<R> {
        let target = self.inner.upgrade()?;
        let mut guard = target.lock();
        Some(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_follows_owner() {
        let target = RenderTarget::new(5_u32);
        let link = target.link();

        assert!(link.is_live());
        assert_eq!(link.with(|v| { *v += 1; *v }), Some(6));

        drop(target);
        assert!(!link.is_live());
        assert_eq!(link.with(|v| *v), None);
    }

    #[test]
    fn test_detached_link() {
        let link: TargetLink<u32> = TargetLink::detached();
        assert!(link.with(|_| ()).is_none());
    }
}
