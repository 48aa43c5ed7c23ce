//! Once-a-day reminder when today's entry is still empty.
//!
//! The scheduler holds no real timers. Each pending timer is a deadline in
//! local wall time, and the host event loop calls [`ReminderScheduler::poll`]
//! with the current time. Cancelling a timer replaces its deadline, so there
//! is never more than one chain pending.

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::model::week::WeeklyEntries;
use crate::notification::{Notification, Notifier, Permission};
use crate::time::{in_reminder_window, next_reminder_boundary, today, weekday_name};

pub const DEFAULT_REMINDER_HOUR: u32 = 22;
pub const REMINDER_PERIOD_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Unarmed,
    /// One-shot timer pending until the next window boundary.
    WaitingForWindow { fire_at: NaiveDateTime },
    /// Repeating every 24 hours.
    ArmedRecurring { next_fire: NaiveDateTime },
}

pub struct ReminderScheduler<N: Notifier> {
    notifier: N,
    hour: u32,
    permission: Option<Permission>,
    state: ReminderState,
}

impl<N: Notifier> ReminderScheduler<N> {
    pub fn new(notifier: N, hour: u32) -> Self {
        Self {
            notifier,
            hour,
            permission: None,
            state: ReminderState::Unarmed,
        }
    }

    pub fn state(&self) -> ReminderState {
        self.state
    }

    pub fn permission(&self) -> Option<Permission> {
        self.permission
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn next_deadline(&self) -> Option<NaiveDateTime> {
        match self.state {
            ReminderState::Unarmed => None,
            ReminderState::WaitingForWindow { fire_at } => Some(fire_at),
            ReminderState::ArmedRecurring { next_fire } => Some(next_fire),
        }
    }

    /// Asks for permission on first call, then schedules when granted.
    /// A denied or unsupported answer keeps the scheduler unarmed for the session.
    pub fn arm(&mut self, now: NaiveDateTime, entries: &WeeklyEntries) -> ReminderState {
        let permission = self.ensure_permission();
        if permission != Permission::Granted {
            debug!(?permission, "reminders unavailable");
            return self.state;
        }
        self.reschedule(now, entries);
        self.state
    }

    fn ensure_permission(&mut self) -> Permission {
        let notifier = &mut self.notifier;
        *self
            .permission
            .get_or_insert_with(|| notifier.request_permission())
    }

    /// Cancels whatever is pending and starts a fresh chain.
    ///
    /// Inside the window the check runs immediately and the next boundary is
    /// tomorrow's; before it, the boundary is today's.
    pub fn reschedule(&mut self, now: NaiveDateTime, entries: &WeeklyEntries) {
        self.cancel();
        if self.permission != Some(Permission::Granted) {
            return;
        }

        if in_reminder_window(now, self.hour) {
            self.remind_if_empty(now, entries);
        }
        let fire_at = next_reminder_boundary(now, self.hour);
        debug!(%fire_at, "reminder scheduled");
        self.state = ReminderState::WaitingForWindow { fire_at };
    }

    /// Fires the pending timer if its deadline has passed. Returns whether it fired.
    pub fn poll(&mut self, now: NaiveDateTime, entries: &WeeklyEntries) -> bool {
        let due = match self.state {
            ReminderState::Unarmed => return false,
            ReminderState::WaitingForWindow { fire_at } => fire_at,
            ReminderState::ArmedRecurring { next_fire } => next_fire,
        };
        if now < due {
            return false;
        }

        self.remind_if_empty(now, entries);
        self.state = ReminderState::ArmedRecurring {
            next_fire: next_period(due, now),
        };
        true
    }

    pub fn shutdown(&mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if self.state != ReminderState::Unarmed {
            debug!(state = ?self.state, "cancelling pending reminder");
        }
        self.state = ReminderState::Unarmed;
    }

    /// One immediate check outside any timer chain. Asks for permission on
    /// first use and stays silent unless it was granted.
    pub fn check_and_notify(&mut self, now: NaiveDateTime, entries: &WeeklyEntries) -> bool {
        let permission = self.ensure_permission();
        if permission != Permission::Granted {
            debug!(?permission, "reminder check skipped");
            return false;
        }
        self.remind_if_empty(now, entries)
    }

    /// Notifies when today's entry has nothing logged. Returns whether a notification was raised.
    fn remind_if_empty(&mut self, now: NaiveDateTime, entries: &WeeklyEntries) -> bool {
        let day = today(now);
        if entries.day(day).is_filled() {
            debug!(day = weekday_name(day), "today is logged, no reminder");
            return false;
        }

        let notification = Notification::missing_entry(day);
        match self.notifier.notify(&notification) {
            Ok(()) => {
                info!(tag = %notification.tag, "reminder raised");
                true
            }
            Err(e) => {
                warn!(tag = %notification.tag, error = %e, "failed to raise reminder");
                false
            }
        }
    }
}

/// Next repeat after `due`, skipping periods that were missed entirely.
fn next_period(due: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    let period = Duration::hours(REMINDER_PERIOD_HOURS);
    let mut next = due + period;
    while next <= now {
        next += period;
    }
    next
}
