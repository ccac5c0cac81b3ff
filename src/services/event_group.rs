//! Event Group Boundary Services
//!
//! Event groups are bit masks tasks can wait on collectively. The gate
//! only moves `EventBits` values across; the group itself stays a kernel
//! reference behind the handle.

use crate::gate::Gate;
use crate::kernel::{EventBits, EventGroupServices, IsrWake, Scheduler, Ticks};
use crate::pool::EventGroupHandle;
use crate::port::Port;

impl<K, P, const N: usize> Gate<K, P, N>
where
    K: EventGroupServices + Scheduler,
    P: Port,
{
    /// Creates an event group with all bits clear.
    pub fn event_group_create(&self) -> Option<EventGroupHandle> {
        self.system_call(|| self.create_object(|kernel| kernel.event_group_create()))
    }

    /// Deletes an event group and retires its handle. Tasks waiting on
    /// it are unblocked by the kernel.
    pub fn event_group_delete(&self, handle: EventGroupHandle) {
        self.system_call(|| {
            self.delete_object(handle, |kernel, group| kernel.event_group_delete(group));
        });
    }

    /// Waits up to `ticks` for `bits`, all of them when `wait_all` is
    /// set. Returns the group's bits at the time the wait ended, or
    /// `None` when the handle does not translate.
    pub fn event_wait(
        &self,
        handle: EventGroupHandle,
        bits: EventBits,
        clear_on_exit: bool,
        wait_all: bool,
        ticks: Ticks,
    ) -> Option<EventBits> {
        self.system_call(|| {
            let group = self.pool.resolve(handle)?;
            Some(
                self.kernel
                    .event_wait(group, bits, clear_on_exit, wait_all, ticks),
            )
        })
    }

    /// Sets bits, waking any satisfied waiters. Returns the bits after
    /// the set.
    pub fn event_set(&self, handle: EventGroupHandle, bits: EventBits) -> Option<EventBits> {
        self.system_call(|| {
            let group = self.pool.resolve(handle)?;
            Some(self.kernel.event_set(group, bits))
        })
    }

    /// Clears bits. Returns the bits before the clear.
    pub fn event_clear(&self, handle: EventGroupHandle, bits: EventBits) -> Option<EventBits> {
        self.system_call(|| {
            let group = self.pool.resolve(handle)?;
            Some(self.kernel.event_clear(group, bits))
        })
    }

    /// Sets `set`, then waits up to `ticks` for all of `wait`. The
    /// rendezvous primitive for groups of tasks.
    pub fn event_sync(
        &self,
        handle: EventGroupHandle,
        set: EventBits,
        wait: EventBits,
        ticks: Ticks,
    ) -> Option<EventBits> {
        self.system_call(|| {
            let group = self.pool.resolve(handle)?;
            Some(self.kernel.event_sync(group, set, wait, ticks))
        })
    }

    /// Sets bits from an interrupt handler. The kernel defers the wake
    /// work to its daemon; a false return means the deferral queue was
    /// full.
    pub fn event_set_from_isr(
        &self,
        handle: EventGroupHandle,
        bits: EventBits,
        wake: &mut IsrWake,
    ) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(group) => self.kernel.event_set_from_isr(group, bits, wake),
            None => false,
        })
    }

    /// Clears bits from an interrupt handler.
    pub fn event_clear_from_isr(&self, handle: EventGroupHandle, bits: EventBits) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(group) => self.kernel.event_clear_from_isr(group, bits),
            None => false,
        })
    }

    /// Reads the current bits from an interrupt handler.
    pub fn event_get_from_isr(&self, handle: EventGroupHandle) -> Option<EventBits> {
        self.from_interrupt(|| {
            let group = self.pool.resolve(handle)?;
            Some(self.kernel.event_get_from_isr(group))
        })
    }
}
