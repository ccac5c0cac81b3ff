//! Queue Boundary Services
//!
//! Queues, mutexes and counting semaphores. All three are one kernel
//! object family and share the queue handle kind; what differs is the
//! construction call and which operations make sense afterwards.

use crate::gate::Gate;
use crate::kernel::{IsrWake, QueuePosition, QueueServices, Scheduler, Ticks};
use crate::pool::{QueueHandle, TaskHandle};
use crate::port::Port;

impl<K, P, const N: usize> Gate<K, P, N>
where
    K: QueueServices + Scheduler,
    P: Port,
{
    /// Creates a queue of `length` items of `item_size` bytes each.
    pub fn queue_create(&self, length: usize, item_size: usize) -> Option<QueueHandle> {
        self.system_call(|| self.create_object(|kernel| kernel.queue_create(length, item_size)))
    }

    /// Creates a mutex. Mutexes support priority inheritance and track
    /// their holder; use [`Self::semaphore_take`] and
    /// [`Self::semaphore_give`] to lock and unlock.
    pub fn mutex_create(&self) -> Option<QueueHandle> {
        self.system_call(|| self.create_object(|kernel| kernel.mutex_create()))
    }

    /// Creates a counting semaphore. A binary semaphore is the
    /// `max_count == 1` case.
    pub fn semaphore_create(&self, max_count: usize, initial_count: usize) -> Option<QueueHandle> {
        self.system_call(|| {
            self.create_object(|kernel| kernel.semaphore_create(max_count, initial_count))
        })
    }

    /// Deletes a queue, mutex or semaphore and retires its handle.
    pub fn queue_delete(&self, handle: QueueHandle) {
        self.system_call(|| {
            self.delete_object(handle, |kernel, queue| kernel.queue_delete(queue));
        });
    }

    /// Sends an item, blocking up to `ticks` for space.
    pub fn queue_send(
        &self,
        handle: QueueHandle,
        item: &[u8],
        ticks: Ticks,
        position: QueuePosition,
    ) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_send(queue, item, ticks, position),
            None => false,
        })
    }

    /// Receives an item into `buffer`, blocking up to `ticks` for one to
    /// arrive.
    pub fn queue_receive(&self, handle: QueueHandle, buffer: &mut [u8], ticks: Ticks) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_receive(queue, buffer, ticks),
            None => false,
        })
    }

    /// Copies the head item into `buffer` without removing it.
    pub fn queue_peek(&self, handle: QueueHandle, buffer: &mut [u8], ticks: Ticks) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_peek(queue, buffer, ticks),
            None => false,
        })
    }

    /// Empties a queue. Tasks blocked waiting for space become ready;
    /// the queued items are dropped.
    pub fn queue_reset(&self, handle: QueueHandle) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_reset(queue),
            None => false,
        })
    }

    /// Takes a semaphore or locks a mutex, blocking up to `ticks`.
    pub fn semaphore_take(&self, handle: QueueHandle, ticks: Ticks) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.semaphore_take(queue, ticks),
            None => false,
        })
    }

    /// Gives a semaphore or unlocks a mutex.
    pub fn semaphore_give(&self, handle: QueueHandle) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.semaphore_give(queue),
            None => false,
        })
    }

    /// Takes a mutex the calling task may already hold, blocking up to
    /// `ticks` on the first acquisition only. Each successful take must
    /// pair with one [`Self::mutex_give_recursive`].
    pub fn mutex_take_recursive(&self, handle: QueueHandle, ticks: Ticks) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(mutex) => self.kernel.mutex_take_recursive(mutex, ticks),
            None => false,
        })
    }

    /// Releases one level of a recursively held mutex. The mutex is
    /// freed for other tasks when the last level is given back.
    pub fn mutex_give_recursive(&self, handle: QueueHandle) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(mutex) => self.kernel.mutex_give_recursive(mutex),
            None => false,
        })
    }

    /// Task currently holding a mutex, if any. The holder surfaces as a
    /// task handle, minted on the spot when the holder was never exposed
    /// through the pool before.
    pub fn mutex_holder(&self, handle: QueueHandle) -> Option<TaskHandle> {
        self.system_call(|| {
            let mutex = self.pool.resolve(handle)?;
            let holder = self.kernel.mutex_holder(mutex)?;
            self.expose(holder)
        })
    }

    /// Number of items waiting in a queue.
    pub fn queue_messages_waiting(&self, handle: QueueHandle) -> Option<usize> {
        self.system_call(|| {
            let queue = self.pool.resolve(handle)?;
            Some(self.kernel.queue_messages_waiting(queue))
        })
    }

    /// Number of free item slots in a queue.
    pub fn queue_spaces_available(&self, handle: QueueHandle) -> Option<usize> {
        self.system_call(|| {
            let queue = self.pool.resolve(handle)?;
            Some(self.kernel.queue_spaces_available(queue))
        })
    }

    /// Sends an item from an interrupt handler. Never blocks.
    pub fn queue_send_from_isr(
        &self,
        handle: QueueHandle,
        item: &[u8],
        position: QueuePosition,
        wake: &mut IsrWake,
    ) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_send_from_isr(queue, item, position, wake),
            None => false,
        })
    }

    /// Receives an item from an interrupt handler. Never blocks.
    pub fn queue_receive_from_isr(
        &self,
        handle: QueueHandle,
        buffer: &mut [u8],
        wake: &mut IsrWake,
    ) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_receive_from_isr(queue, buffer, wake),
            None => false,
        })
    }

    /// Peeks at the head item from an interrupt handler.
    pub fn queue_peek_from_isr(&self, handle: QueueHandle, buffer: &mut [u8]) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.queue_peek_from_isr(queue, buffer),
            None => false,
        })
    }

    /// Gives a semaphore from an interrupt handler.
    pub fn semaphore_give_from_isr(&self, handle: QueueHandle, wake: &mut IsrWake) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(queue) => self.kernel.semaphore_give_from_isr(queue, wake),
            None => false,
        })
    }

    /// Task holding a mutex, readable from an interrupt handler.
    /// Interrupt context never adopts, so a holder that was never
    /// exposed through the pool reads as `None`.
    pub fn mutex_holder_from_isr(&self, handle: QueueHandle) -> Option<TaskHandle> {
        self.from_interrupt(|| {
            let mutex = self.pool.resolve(handle)?;
            let holder = self.kernel.mutex_holder_from_isr(mutex)?;
            self.pool.reverse_lookup_from_isr(holder)
        })
    }

    /// Number of items waiting, readable from an interrupt handler.
    pub fn queue_messages_waiting_from_isr(&self, handle: QueueHandle) -> Option<usize> {
        self.from_interrupt(|| {
            let queue = self.pool.resolve(handle)?;
            Some(self.kernel.queue_messages_waiting_from_isr(queue))
        })
    }

    /// Whether a queue is empty, readable from an interrupt handler.
    pub fn queue_is_empty_from_isr(&self, handle: QueueHandle) -> Option<bool> {
        self.from_interrupt(|| {
            let queue = self.pool.resolve(handle)?;
            Some(self.kernel.queue_is_empty_from_isr(queue))
        })
    }

    /// Whether a queue is full, readable from an interrupt handler.
    pub fn queue_is_full_from_isr(&self, handle: QueueHandle) -> Option<bool> {
        self.from_interrupt(|| {
            let queue = self.pool.resolve(handle)?;
            Some(self.kernel.queue_is_full_from_isr(queue))
        })
    }
}
