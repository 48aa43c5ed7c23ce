#[cfg(test)]
mod tests {
    use crate::model::week::{DayEntry, WeeklyEntries};
    use crate::notification::{Notification, Notifier, NullNotifier, Permission};
    use crate::usecase::reminder::{ReminderScheduler, ReminderState};
    use anyhow::{anyhow, Result};
    use chrono::{NaiveDate, NaiveDateTime, Weekday};

    struct MockNotifier {
        permission: Permission,
        permission_requests: usize,
        sent: Vec<Notification>,
        fail: bool,
    }

    impl MockNotifier {
        fn granting() -> Self {
            Self::answering(Permission::Granted)
        }

        fn answering(permission: Permission) -> Self {
            Self {
                permission,
                permission_requests: 0,
                sent: Vec::new(),
                fail: false,
            }
        }
    }

    impl Notifier for MockNotifier {
        fn request_permission(&mut self) -> Permission {
            self.permission_requests += 1;
            self.permission
        }

        fn notify(&mut self, notification: &Notification) -> Result<()> {
            if self.fail {
                return Err(anyhow!("notification service gone"));
            }
            self.sent.push(notification.clone());
            Ok(())
        }
    }

    // 2026-10-19 is a Monday.
    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn monday_logged() -> WeeklyEntries {
        let mut entries = WeeklyEntries::default();
        *entries.day_mut(Weekday::Mon) = DayEntry::new("", "250", "", "");
        entries
    }

    #[test]
    fn test_arm_before_window_waits_for_today() {
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        let state = scheduler.arm(at(19, 9, 0), &WeeklyEntries::default());

        assert_eq!(state, ReminderState::WaitingForWindow { fire_at: at(19, 22, 0) });
        assert!(scheduler.notifier().sent.is_empty());
    }

    #[test]
    fn test_arm_inside_window_checks_now_and_waits_for_tomorrow() {
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        let state = scheduler.arm(at(19, 22, 30), &WeeklyEntries::default());

        assert_eq!(state, ReminderState::WaitingForWindow { fire_at: at(20, 22, 0) });
        let sent = &scheduler.notifier().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].tag, "macro-reminder-Monday");
    }

    #[test]
    fn test_denied_permission_stays_unarmed() {
        for answer in [Permission::Denied, Permission::Unsupported] {
            let mut scheduler = ReminderScheduler::new(MockNotifier::answering(answer), 22);
            let entries = WeeklyEntries::default();

            assert_eq!(scheduler.arm(at(19, 23, 0), &entries), ReminderState::Unarmed);
            scheduler.reschedule(at(19, 23, 0), &entries);
            assert_eq!(scheduler.state(), ReminderState::Unarmed);
            assert!(!scheduler.poll(at(25, 23, 0), &entries));

            assert_eq!(scheduler.arm(at(19, 23, 5), &entries), ReminderState::Unarmed);
            assert_eq!(scheduler.notifier().permission_requests, 1);
            assert!(scheduler.notifier().sent.is_empty());
        }
    }

    #[test]
    fn test_null_notifier_never_arms() {
        let mut scheduler = ReminderScheduler::new(NullNotifier, 22);
        assert_eq!(
            scheduler.arm(at(19, 9, 0), &WeeklyEntries::default()),
            ReminderState::Unarmed
        );
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_one_shot_fires_then_repeats_daily() {
        let entries = WeeklyEntries::default();
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        scheduler.arm(at(19, 8, 0), &entries);

        assert!(!scheduler.poll(at(19, 21, 59), &entries));
        assert!(scheduler.poll(at(19, 22, 0), &entries));
        assert_eq!(
            scheduler.state(),
            ReminderState::ArmedRecurring { next_fire: at(20, 22, 0) }
        );

        assert!(!scheduler.poll(at(20, 12, 0), &entries));
        assert!(scheduler.poll(at(20, 22, 0), &entries));
        assert_eq!(scheduler.next_deadline(), Some(at(21, 22, 0)));

        let tags: Vec<&str> = scheduler.notifier().sent.iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["macro-reminder-Monday", "macro-reminder-Tuesday"]);
    }

    #[test]
    fn test_logged_day_is_not_reminded() {
        let entries = monday_logged();
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        scheduler.arm(at(19, 8, 0), &entries);

        assert!(scheduler.poll(at(19, 22, 0), &entries));
        assert!(scheduler.notifier().sent.is_empty());

        // Tuesday is empty
        assert!(scheduler.poll(at(20, 22, 1), &entries));
        assert_eq!(scheduler.notifier().sent.len(), 1);
    }

    #[test]
    fn test_fire_reads_entries_at_fire_time() {
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        scheduler.arm(at(19, 8, 0), &WeeklyEntries::default());

        // Monday gets logged after scheduling
        assert!(scheduler.poll(at(19, 22, 0), &monday_logged()));
        assert!(scheduler.notifier().sent.is_empty());
    }

    #[test]
    fn test_reschedule_replaces_pending_chain() {
        let entries = WeeklyEntries::default();
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        scheduler.arm(at(19, 8, 0), &entries);
        scheduler.poll(at(19, 22, 0), &entries);
        assert!(matches!(scheduler.state(), ReminderState::ArmedRecurring { .. }));

        scheduler.reschedule(at(20, 10, 0), &entries);
        assert_eq!(
            scheduler.state(),
            ReminderState::WaitingForWindow { fire_at: at(20, 22, 0) }
        );
        assert_eq!(scheduler.notifier().permission_requests, 1);
    }

    #[test]
    fn test_late_poll_fires_once_and_skips_missed_days() {
        let entries = WeeklyEntries::default();
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        scheduler.arm(at(19, 8, 0), &entries);

        assert!(scheduler.poll(at(22, 23, 0), &entries));
        assert_eq!(scheduler.notifier().sent.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(at(23, 22, 0)));
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let entries = WeeklyEntries::default();
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);
        scheduler.arm(at(19, 8, 0), &entries);

        scheduler.shutdown();
        assert_eq!(scheduler.state(), ReminderState::Unarmed);
        assert!(!scheduler.poll(at(19, 23, 0), &entries));
        assert!(scheduler.notifier().sent.is_empty());
    }

    #[test]
    fn test_notify_failure_is_swallowed() {
        let mut notifier = MockNotifier::granting();
        notifier.fail = true;
        let entries = WeeklyEntries::default();
        let mut scheduler = ReminderScheduler::new(notifier, 22);
        scheduler.arm(at(19, 8, 0), &entries);

        assert!(scheduler.poll(at(19, 22, 0), &entries));
        assert!(matches!(scheduler.state(), ReminderState::ArmedRecurring { .. }));
    }

    #[test]
    fn test_custom_hour() {
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 7);
        scheduler.arm(at(19, 6, 59), &WeeklyEntries::default());
        assert_eq!(scheduler.next_deadline(), Some(at(19, 7, 0)));
    }

    #[test]
    fn test_direct_check_needs_permission() {
        for answer in [Permission::Denied, Permission::Unsupported] {
            let mut scheduler = ReminderScheduler::new(MockNotifier::answering(answer), 22);
            let entries = WeeklyEntries::default();

            assert!(!scheduler.check_and_notify(at(19, 23, 0), &entries));
            assert!(!scheduler.check_and_notify(at(19, 23, 5), &entries));
            assert_eq!(scheduler.notifier().permission_requests, 1);
            assert!(scheduler.notifier().sent.is_empty());
            assert_eq!(scheduler.state(), ReminderState::Unarmed);
        }
    }

    #[test]
    fn test_direct_check_with_permission_notifies_once_asked() {
        let mut scheduler = ReminderScheduler::new(MockNotifier::granting(), 22);

        assert!(scheduler.check_and_notify(at(19, 12, 0), &WeeklyEntries::default()));
        assert!(!scheduler.check_and_notify(at(19, 12, 0), &monday_logged()));
        assert_eq!(scheduler.permission(), Some(Permission::Granted));
        assert_eq!(scheduler.notifier().sent.len(), 1);

        // arming later does not ask again
        scheduler.arm(at(19, 12, 0), &WeeklyEntries::default());
        assert_eq!(scheduler.notifier().permission_requests, 1);
    }
}
