//! Software Timer Boundary Services
//!
//! Timers are owned by the kernel's daemon task and driven by commands
//! on its queue. Deletion is therefore asynchronous: the handle is
//! retired only once the daemon has accepted the delete command, so a
//! full command queue never strands a live timer behind a dead handle.

use crate::gate::Gate;
use crate::kernel::{IsrWake, Scheduler, Ticks, TimerCallback, TimerCommand, TimerServices};
use crate::pool::{TaskHandle, TimerHandle};
use crate::port::Port;

impl<K, P, const N: usize> Gate<K, P, N>
where
    K: TimerServices + Scheduler,
    P: Port,
{
    /// Creates a dormant timer. `callback` runs in the daemon task each
    /// time the timer expires; start it with [`Self::timer_command`].
    pub fn timer_create(
        &self,
        period: Ticks,
        auto_reload: bool,
        id: usize,
        callback: TimerCallback,
    ) -> Option<TimerHandle> {
        self.system_call(|| {
            self.create_object(|kernel| kernel.timer_create(period, auto_reload, id, callback))
        })
    }

    /// Queues a delete command, blocking up to `ticks` for space on the
    /// daemon's queue. The handle is retired only when the command is
    /// accepted; on false the timer and its handle are both still live.
    pub fn timer_delete(&self, handle: TimerHandle, ticks: Ticks) -> bool {
        self.system_call(|| {
            let Some((index, timer)) = self.pool.resolve_entry(handle) else {
                return false;
            };
            if self.kernel.timer_delete(timer, ticks) {
                self.retire_slot(index);
                true
            } else {
                false
            }
        })
    }

    /// Queues a start, stop, reset or period-change command.
    pub fn timer_command(&self, handle: TimerHandle, command: TimerCommand, ticks: Ticks) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(timer) => self.kernel.timer_command(timer, command, ticks),
            None => false,
        })
    }

    /// Queues a timer command from an interrupt handler.
    pub fn timer_command_from_isr(
        &self,
        handle: TimerHandle,
        command: TimerCommand,
        wake: &mut IsrWake,
    ) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(timer) => self.kernel.timer_command_from_isr(timer, command, wake),
            None => false,
        })
    }

    /// A timer's period.
    pub fn timer_period(&self, handle: TimerHandle) -> Option<Ticks> {
        self.system_call(|| {
            let timer = self.pool.resolve(handle)?;
            Some(self.kernel.timer_period(timer))
        })
    }

    /// Tick count at which a timer will next expire.
    pub fn timer_expiry_time(&self, handle: TimerHandle) -> Option<Ticks> {
        self.system_call(|| {
            let timer = self.pool.resolve(handle)?;
            Some(self.kernel.timer_expiry_time(timer))
        })
    }

    /// Whether a timer is running.
    pub fn timer_is_active(&self, handle: TimerHandle) -> Option<bool> {
        self.system_call(|| {
            let timer = self.pool.resolve(handle)?;
            Some(self.kernel.timer_is_active(timer))
        })
    }

    /// Whether a timer restarts itself on expiry.
    pub fn timer_reload_mode(&self, handle: TimerHandle) -> Option<bool> {
        self.system_call(|| {
            let timer = self.pool.resolve(handle)?;
            Some(self.kernel.timer_reload_mode(timer))
        })
    }

    /// Switches a timer between one-shot and auto-reload.
    pub fn timer_set_reload_mode(&self, handle: TimerHandle, auto_reload: bool) {
        self.system_call(|| {
            if let Some(timer) = self.pool.resolve(handle) {
                self.kernel.timer_set_reload_mode(timer, auto_reload);
            }
        });
    }

    /// A timer's caller-assigned identifier.
    pub fn timer_id(&self, handle: TimerHandle) -> Option<usize> {
        self.system_call(|| {
            let timer = self.pool.resolve(handle)?;
            Some(self.kernel.timer_id(timer))
        })
    }

    /// Reassigns a timer's identifier.
    pub fn timer_set_id(&self, handle: TimerHandle, id: usize) {
        self.system_call(|| {
            if let Some(timer) = self.pool.resolve(handle) {
                self.kernel.timer_set_id(timer, id);
            }
        });
    }

    /// Handle for the daemon task itself. The daemon is created by the
    /// kernel before the gate exists, so its first exposure mints the
    /// handle here.
    pub fn daemon_task_handle(&self) -> Option<TaskHandle> {
        self.system_call(|| {
            let daemon = self.kernel.daemon_task()?;
            self.expose(daemon)
        })
    }
}
