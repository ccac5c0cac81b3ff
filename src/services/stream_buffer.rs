//! Stream Buffer Boundary Services
//!
//! Byte pipes between exactly one writer and one reader. The message
//! variant frames each write so the reader gets whole messages back;
//! both variants cross the boundary through the same handle kind.
//!
//! Send and receive report byte counts, so a handle that does not
//! translate reads as a transfer of zero bytes.

use crate::gate::Gate;
use crate::kernel::{IsrWake, Scheduler, StreamBufferKind, StreamBufferServices, Ticks};
use crate::pool::StreamBufferHandle;
use crate::port::Port;

impl<K, P, const N: usize> Gate<K, P, N>
where
    K: StreamBufferServices + Scheduler,
    P: Port,
{
    /// Creates a stream or message buffer of `capacity` bytes. A reader
    /// blocked on the buffer wakes once `trigger_level` bytes are
    /// present.
    pub fn stream_create(
        &self,
        capacity: usize,
        trigger_level: usize,
        kind: StreamBufferKind,
    ) -> Option<StreamBufferHandle> {
        self.system_call(|| {
            self.create_object(|kernel| kernel.stream_create(capacity, trigger_level, kind))
        })
    }

    /// Deletes a stream buffer and retires its handle.
    pub fn stream_delete(&self, handle: StreamBufferHandle) {
        self.system_call(|| {
            self.delete_object(handle, |kernel, stream| kernel.stream_delete(stream));
        });
    }

    /// Writes `data`, blocking up to `ticks` for space. Returns the
    /// number of bytes accepted.
    pub fn stream_send(&self, handle: StreamBufferHandle, data: &[u8], ticks: Ticks) -> usize {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(stream) => self.kernel.stream_send(stream, data, ticks),
            None => 0,
        })
    }

    /// Reads into `buffer`, blocking up to `ticks` for the trigger
    /// level. Returns the number of bytes read.
    pub fn stream_receive(
        &self,
        handle: StreamBufferHandle,
        buffer: &mut [u8],
        ticks: Ticks,
    ) -> usize {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(stream) => self.kernel.stream_receive(stream, buffer, ticks),
            None => 0,
        })
    }

    /// Writes from an interrupt handler. Never blocks; returns the
    /// bytes accepted.
    pub fn stream_send_from_isr(
        &self,
        handle: StreamBufferHandle,
        data: &[u8],
        wake: &mut IsrWake,
    ) -> usize {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(stream) => self.kernel.stream_send_from_isr(stream, data, wake),
            None => 0,
        })
    }

    /// Reads from an interrupt handler. Never blocks.
    pub fn stream_receive_from_isr(
        &self,
        handle: StreamBufferHandle,
        buffer: &mut [u8],
        wake: &mut IsrWake,
    ) -> usize {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(stream) => self.kernel.stream_receive_from_isr(stream, buffer, wake),
            None => 0,
        })
    }

    /// Bytes currently readable.
    pub fn stream_bytes_available(&self, handle: StreamBufferHandle) -> Option<usize> {
        self.system_call(|| {
            let stream = self.pool.resolve(handle)?;
            Some(self.kernel.stream_bytes_available(stream))
        })
    }

    /// Bytes currently writable.
    pub fn stream_spaces_available(&self, handle: StreamBufferHandle) -> Option<usize> {
        self.system_call(|| {
            let stream = self.pool.resolve(handle)?;
            Some(self.kernel.stream_spaces_available(stream))
        })
    }

    /// Empties a buffer. Fails when a task is blocked on it.
    pub fn stream_reset(&self, handle: StreamBufferHandle) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(stream) => self.kernel.stream_reset(stream),
            None => false,
        })
    }

    /// Changes the wake threshold for blocked readers.
    pub fn stream_set_trigger_level(&self, handle: StreamBufferHandle, trigger_level: usize) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(stream) => self.kernel.stream_set_trigger_level(stream, trigger_level),
            None => false,
        })
    }

    /// Whether the buffer holds no data.
    pub fn stream_is_empty(&self, handle: StreamBufferHandle) -> Option<bool> {
        self.system_call(|| {
            let stream = self.pool.resolve(handle)?;
            Some(self.kernel.stream_is_empty(stream))
        })
    }

    /// Whether the buffer has no space.
    pub fn stream_is_full(&self, handle: StreamBufferHandle) -> Option<bool> {
        self.system_call(|| {
            let stream = self.pool.resolve(handle)?;
            Some(self.kernel.stream_is_full(stream))
        })
    }

    /// Length of the next message in a message buffer, zero when empty.
    pub fn stream_next_message_length(&self, handle: StreamBufferHandle) -> Option<usize> {
        self.system_call(|| {
            let stream = self.pool.resolve(handle)?;
            Some(self.kernel.stream_next_message_length(stream))
        })
    }
}
