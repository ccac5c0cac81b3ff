//! Privilege Gate
//!
//! The single crossing point between unprivileged callers and the kernel:
//! owns the handle pool and the kernel services instance, and brackets
//! every crossing in one place.
//!
//! # Design
//! ```text
//! unprivileged caller
//!        │  Handle<K> + plain data
//!        ▼
//! ┌─────────────────────────────────────────────┐
//! │ Gate::system_call                           │
//! │   raise ── fence ── translate+invoke ──     │
//! │                      fence ── lower ── fence│
//! └─────────────────────────────────────────────┘
//!        │  ObjectRef<K>
//!        ▼
//!   kernel services (privileged)
//! ```
//!
//! # Security Properties
//! - One bracket, one exit: privilege is restored on every path, including
//!   translation failures, so no per-service wrapper can forget the lower
//!   half of the sequence
//! - Idempotent re-entrancy: a caller that is already privileged crosses
//!   with no privilege transitions at all
//! - The interrupt variant performs translation only; interrupt entry is
//!   privileged by hardware and carries its own ordering guarantees

use core::marker::PhantomData;

use crate::kernel::Scheduler;
use crate::pool::{Handle, HandlePool, Kind, ObjectRef, SlotIndex};
use crate::port::Port;

/// The privilege gate. `K` is the kernel services implementation, `P` the
/// platform port, `N` the handle pool capacity.
///
/// Constructed once at boot, typically in a `static`; there is no
/// teardown.
pub struct Gate<K, P, const N: usize> {
    pub(crate) kernel: K,
    pub(crate) pool: HandlePool<N>,
    _port: PhantomData<P>,
}

impl<K, P: Port, const N: usize> Gate<K, P, N> {
    /// Creates a gate with an empty pool around a kernel instance.
    #[must_use]
    pub const fn new(kernel: K) -> Self {
        Self {
            kernel,
            pool: HandlePool::new(),
            _port: PhantomData,
        }
    }

    /// The kernel services instance. Privileged-side code may bypass the
    /// gate through this; unprivileged code cannot reach it.
    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The handle pool, for diagnostics such as occupancy reporting.
    #[inline]
    pub fn pool(&self) -> &HandlePool<N> {
        &self.pool
    }

    /// Runs `op` with privilege established, restoring the caller's level
    /// on the way out.
    ///
    /// The fences pin every access of `op` inside the privileged window:
    /// one after the raise, one before and one after the lower, matching
    /// the transition points the MPU reconfigures around.
    pub(crate) fn system_call<R>(&self, op: impl FnOnce() -> R) -> R {
        if P::is_privileged() {
            return op();
        }
        // SAFETY: entered via the kernel's system call path, which may
        // escalate; lowered again below on the only exit.
        unsafe { P::raise_privilege() };
        P::memory_fence();
        let result = op();
        P::memory_fence();
        // SAFETY: pairs with the raise above.
        unsafe { P::lower_privilege() };
        P::memory_fence();
        result
    }

    /// Runs `op` from an interrupt handler: translation and invocation
    /// without privilege transitions or fences.
    #[inline]
    pub(crate) fn from_interrupt<R>(&self, op: impl FnOnce() -> R) -> R {
        op()
    }
}

impl<K: Scheduler, P: Port, const N: usize> Gate<K, P, N> {
    /// Claims a pool slot with the scheduler suspended, so the first-fit
    /// scan is atomic with respect to every other task.
    pub(crate) fn reserve_slot(&self) -> Option<SlotIndex> {
        self.kernel.suspend_all();
        let index = self.pool.allocate();
        self.kernel.resume_all();
        index
    }

    /// Frees a pool slot inside an interrupt-masking critical section.
    /// Used both for rollback of a failed create and for retirement on
    /// delete; the store itself is a single word.
    pub(crate) fn retire_slot(&self, index: SlotIndex) {
        P::enter_critical();
        self.pool.release(index);
        P::exit_critical();
    }

    /// Exposes a kernel-discovered reference as an external handle,
    /// adopting it into the pool if it is not already there.
    pub(crate) fn expose<Kd: Kind>(&self, object: ObjectRef<Kd>) -> Option<Handle<Kd>> {
        self.kernel.suspend_all();
        let handle = self.pool.adopt(object);
        self.kernel.resume_all();
        handle
    }

    /// Slot currently publishing `object`, scanned with the scheduler
    /// suspended like every other task-level pool scan.
    pub(crate) fn locate_slot<Kd: Kind>(&self, object: ObjectRef<Kd>) -> Option<SlotIndex> {
        self.kernel.suspend_all();
        let index = self.pool.position_of(object);
        self.kernel.resume_all();
        index
    }

    /// The create protocol: reserve, construct, bind; roll back the slot
    /// if construction fails.
    ///
    /// Reserving first means exhaustion is detected before the kernel
    /// builds anything, and the Reserved sentinel keeps the slot stable
    /// while `construct` runs outside any lock.
    pub(crate) fn create_object<Kd: Kind>(
        &self,
        construct: impl FnOnce(&K) -> Option<ObjectRef<Kd>>,
    ) -> Option<Handle<Kd>> {
        let index = self.reserve_slot()?;
        match construct(&self.kernel) {
            Some(object) => Some(self.pool.bind(index, object)),
            None => {
                self.retire_slot(index);
                None
            }
        }
    }

    /// The delete protocol: translate, destroy, retire the slot. A failed
    /// translation destroys nothing; a successful destroy always retires,
    /// so no handle lingers bound to a destroyed object.
    pub(crate) fn delete_object<Kd: Kind>(
        &self,
        handle: Handle<Kd>,
        destroy: impl FnOnce(&K, ObjectRef<Kd>),
    ) {
        if let Some((index, object)) = self.pool.resolve_entry(handle) {
            destroy(&self.kernel, object);
            self.retire_slot(index);
        }
    }
}
