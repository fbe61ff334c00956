//=========================================================================
// Rendering Context
//
// Thread-affine activation bookkeeping for a window's draw target.
//
// Rules:
// - A context is bound to at most one thread at a time
// - Activating it on thread B while bound to thread A moves it to B;
//   A observes itself inactive from then on
// - Activating a different context on a thread releases the context that
//   thread held before
// - A released context (window closed) can no longer be activated
//
// The handle is cheap to clone and `Send + Sync`, so a render thread can
// hold one while the window itself stays on the event thread.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};

//=== External Crates =====================================================
use log::{debug, trace};

//=== Internal Modules ====================================================
use crate::core::settings::WindowSettings;

//=== Thread Binding ======================================================

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    /// Context most recently activated on this thread.
    static CURRENT: RefCell<Option<Weak<ContextInner>>> = const { RefCell::new(None) };
}

//=== ContextInner ========================================================

#[derive(Debug)]
struct ContextInner {
    id: u64,
    settings: WindowSettings,
    owner: Mutex<Option<ThreadId>>,
    released: AtomicBool,
}

impl ContextInner {
    fn owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unbinds from `thread` if it is the current owner.
    fn unbind_from(&self, thread: ThreadId) {
        let mut owner = self.owner();
        if *owner == Some(thread) {
            *owner = None;
        }
    }
}

//=== RenderContext =======================================================

/// Handle to a window's rendering context.
#[derive(Debug, Clone)]
pub struct RenderContext {
    inner: Arc<ContextInner>,
}

impl RenderContext {
    //--- Construction -----------------------------------------------------

    pub fn new(settings: WindowSettings) -> Self {
        let id = NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed);
        debug!(target: "context", "Context #{} created with {:?}", id, settings);
        Self {
            inner: Arc::new(ContextInner {
                id,
                settings,
                owner: Mutex::new(None),
                released: AtomicBool::new(false),
            }),
        }
    }

    //--- Activation -------------------------------------------------------

    /// Binds (`true`) or unbinds (`false`) the context on the calling thread.
    ///
    /// Returns `false` only when activation was requested on a released
    /// context. Unbinding a context the calling thread does not own is a
    /// successful no-op.
    pub fn set_active(&self, active: bool) -> bool {
        let this_thread = thread::current().id();

        if !active {
            self.inner.unbind_from(this_thread);
            self.forget_on_current_thread();
            return true;
        }

        if self.is_released() {
            debug!(target: "context", "Context #{} is released, activation refused", self.inner.id);
            return false;
        }

        self.release_previous_on_current_thread();

        let previous = self.inner.owner().replace(this_thread);
        match previous {
            Some(thread) if thread != this_thread => debug!(
                target: "context",
                "Context #{} moved from {:?} to {:?}",
                self.inner.id,
                thread,
                this_thread
            ),
            None => trace!(target: "context", "Context #{} bound to {:?}", self.inner.id, this_thread),
            _ => {}
        }

        CURRENT.with(|current| *current.borrow_mut() = Some(Arc::downgrade(&self.inner)));
        true
    }

    /// Whether the context is bound to the calling thread.
    pub fn is_active(&self) -> bool {
        *self.inner.owner() == Some(thread::current().id())
    }

    /// Whether the context is bound to any thread.
    pub fn is_bound(&self) -> bool {
        self.inner.owner().is_some()
    }

    /// Whether any context is bound to the calling thread.
    pub fn is_any_active() -> bool {
        CURRENT.with(|current| {
            current
                .borrow()
                .as_ref()
                .and_then(Weak::upgrade)
                .map(|inner| {
                    let owner = *inner.owner();
                    owner == Some(thread::current().id())
                })
                .unwrap_or(false)
        })
    }

    //--- Lifetime ---------------------------------------------------------

    /// Unbinds from every thread and refuses later activation.
    pub fn release(&self) {
        if !self.inner.released.swap(true, Ordering::AcqRel) {
            *self.inner.owner() = None;
            debug!(target: "context", "Context #{} released", self.inner.id);
        }
    }

    pub fn is_released(&self) -> bool {
        self.inner.released.load(Ordering::Acquire)
    }

    //--- Queries ----------------------------------------------------------

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Attributes requested at window creation.
    pub fn settings(&self) -> WindowSettings {
        self.inner.settings
    }

    //--- Internal Helpers -------------------------------------------------

    fn release_previous_on_current_thread(&self) {
        let this_thread = thread::current().id();
        CURRENT.with(|current| {
            let previous = current.borrow().as_ref().and_then(Weak::upgrade);
            if let Some(previous) = previous {
                if previous.id != self.inner.id {
                    previous.unbind_from(this_thread);
                    trace!(target: "context", "Context #{} unbound by switch", previous.id);
                }
            }
        });
    }

    fn forget_on_current_thread(&self) {
        CURRENT.with(|current| {
            let mut current = current.borrow_mut();
            let is_self = current
                .as_ref()
                .and_then(Weak::upgrade)
                .map(|inner| inner.id == self.inner.id)
                .unwrap_or(false);
            if is_self {
                *current = None;
            }
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RenderContext {
        RenderContext::new(WindowSettings::default())
    }

    #[test]
    fn new_context_is_inactive() {
        let ctx = context();
        assert!(!ctx.is_active());
        assert!(!ctx.is_bound());
        assert!(!ctx.is_released());
    }

    #[test]
    fn activate_and_deactivate_on_same_thread() {
        let ctx = context();
        assert!(ctx.set_active(true));
        assert!(ctx.is_active());
        assert!(RenderContext::is_any_active());

        assert!(ctx.set_active(false));
        assert!(!ctx.is_active());
        assert!(!RenderContext::is_any_active());
    }

    #[test]
    fn activating_on_other_thread_moves_binding() {
        let ctx = context();
        assert!(ctx.set_active(true));

        let remote = ctx.clone();
        let active_remotely = thread::spawn(move || {
            let ok = remote.set_active(true);
            ok && remote.is_active()
        })
        .join()
        .unwrap();

        assert!(active_remotely);
        assert!(!ctx.is_active(), "Original thread must lose the context");
        assert!(ctx.is_bound());
        assert!(!RenderContext::is_any_active());
    }

    #[test]
    fn switching_contexts_releases_previous() {
        let first = context();
        let second = context();

        first.set_active(true);
        second.set_active(true);

        assert!(!first.is_active());
        assert!(!first.is_bound());
        assert!(second.is_active());
        second.set_active(false);
    }

    #[test]
    fn deactivating_foreign_context_is_noop() {
        let ctx = context();
        let remote = ctx.clone();
        thread::spawn(move || {
            remote.set_active(true);
        })
        .join()
        .unwrap();

        assert!(ctx.set_active(false));
        assert!(ctx.is_bound(), "Other thread still owns the context");
    }

    #[test]
    fn released_context_refuses_activation() {
        let ctx = context();
        ctx.set_active(true);
        ctx.release();

        assert!(!ctx.is_bound());
        assert!(!ctx.set_active(true));
        assert!(ctx.set_active(false));
    }

    #[test]
    fn contexts_have_unique_ids_and_keep_settings() {
        let a = RenderContext::new(WindowSettings::new(16, 0, 2));
        let b = context();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.settings().antialiasing_level, 2);
    }
}
