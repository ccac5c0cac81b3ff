//! Queue Set Boundary Services
//!
//! Queue sets let one task block on several queues and semaphores at
//! once. Membership operations take two handles and both must translate
//! before the kernel sees either; a select returns whichever member
//! fired, translated back into the member's own handle.

use crate::gate::Gate;
use crate::kernel::{QueueSetServices, Scheduler, Ticks};
use crate::pool::{QueueHandle, QueueSetHandle};
use crate::port::Port;

impl<K, P, const N: usize> Gate<K, P, N>
where
    K: QueueSetServices + Scheduler,
    P: Port,
{
    /// Creates a queue set able to hold `event_capacity` pending events.
    pub fn queue_set_create(&self, event_capacity: usize) -> Option<QueueSetHandle> {
        self.system_call(|| self.create_object(|kernel| kernel.queue_set_create(event_capacity)))
    }

    /// Deletes a queue set and retires its handle. Members are not
    /// deleted, only the set itself.
    pub fn queue_set_delete(&self, handle: QueueSetHandle) {
        self.system_call(|| {
            self.delete_object(handle, |kernel, set| kernel.queue_set_delete(set));
        });
    }

    /// Adds a queue or semaphore to a set. Fails without reaching the
    /// kernel unless both handles translate.
    pub fn queue_set_add(&self, set: QueueSetHandle, member: QueueHandle) -> bool {
        self.system_call(|| {
            match (self.pool.resolve(set), self.pool.resolve(member)) {
                (Some(set), Some(member)) => self.kernel.queue_set_add(set, member),
                _ => false,
            }
        })
    }

    /// Removes a member from a set. Both handles must translate.
    pub fn queue_set_remove(&self, set: QueueSetHandle, member: QueueHandle) -> bool {
        self.system_call(|| {
            match (self.pool.resolve(set), self.pool.resolve(member)) {
                (Some(set), Some(member)) => self.kernel.queue_set_remove(set, member),
                _ => false,
            }
        })
    }

    /// Blocks up to `ticks` for a member to become ready and returns its
    /// handle. A member the kernel reports but the pool has never seen
    /// is adopted on the way out.
    pub fn queue_set_select(&self, handle: QueueSetHandle, ticks: Ticks) -> Option<QueueHandle> {
        self.system_call(|| {
            let set = self.pool.resolve(handle)?;
            let member = self.kernel.queue_set_select(set, ticks)?;
            self.expose(member)
        })
    }

    /// Polls a set from an interrupt handler. The returned member must
    /// already be pooled; interrupt context never adopts, so a member
    /// created behind the gate's back comes back as `None` here.
    pub fn queue_set_select_from_isr(&self, handle: QueueSetHandle) -> Option<QueueHandle> {
        self.from_interrupt(|| {
            let set = self.pool.resolve(handle)?;
            let member = self.kernel.queue_set_select_from_isr(set)?;
            self.pool.reverse_lookup_from_isr(member)
        })
    }
}
