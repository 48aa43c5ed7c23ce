use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};
use macrobudget_core::{
    AppConfig, Field, KeyValueStore, MacroTracker, Notification, ReminderScheduler, TrackerError,
    WeeklySummary, WEEK,
};
use ratatui::widgets::TableState;

use crate::notifier::TerminalNotifier;

/// Row 0 is the daily budget, rows 1..=7 are Monday to Sunday.
pub const BUDGET_ROW: usize = 0;
pub const ROW_COUNT: usize = 1 + WEEK.len();

pub enum InputMode {
    Normal,
    Editing,
    ConfirmClear,
}

pub struct App<S: KeyValueStore> {
    pub tracker: MacroTracker<S>,
    pub scheduler: ReminderScheduler<TerminalNotifier>,
    pub summary: WeeklySummary,
    pub state: TableState,
    pub column: usize,
    pub input_mode: InputMode,
    pub status: Option<String>,
    /// Tag dismissed with `n` and the day it was dismissed on.
    dismissed: Option<(String, NaiveDate)>,
    clock: fn() -> NaiveDateTime,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn row_for_day(day: Weekday) -> usize {
    1 + day.num_days_from_monday() as usize
}

impl<S: KeyValueStore> App<S> {
    pub fn new(config: &AppConfig, tracker: MacroTracker<S>, notifier: TerminalNotifier) -> App<S> {
        App::with_clock(config, tracker, notifier, now)
    }

    pub fn with_clock(
        config: &AppConfig,
        tracker: MacroTracker<S>,
        notifier: TerminalNotifier,
        clock: fn() -> NaiveDateTime,
    ) -> App<S> {
        let mut scheduler = ReminderScheduler::new(notifier, config.reminder_hour);
        scheduler.arm(clock(), tracker.entries());

        let summary = tracker.summary();
        let mut state = TableState::default();
        state.select(Some(row_for_day(clock().weekday())));

        App {
            tracker,
            scheduler,
            summary,
            state,
            column: 1,
            input_mode: InputMode::Normal,
            status: None,
            dismissed: None,
            clock,
        }
    }

    pub fn selected_row(&self) -> usize {
        self.state.selected().unwrap_or(BUDGET_ROW)
    }

    pub fn selected_field(&self) -> Field {
        Field::ALL[self.column]
    }

    pub fn selected_day(&self) -> Option<Weekday> {
        self.selected_row().checked_sub(1).map(|i| WEEK[i])
    }

    pub fn next(&mut self) {
        let i = (self.selected_row() + 1) % ROW_COUNT;
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = (self.selected_row() + ROW_COUNT - 1) % ROW_COUNT;
        self.state.select(Some(i));
    }

    pub fn move_left(&mut self) {
        if self.column > 0 {
            self.column -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.column < Field::ALL.len() - 1 {
            self.column += 1;
        }
    }

    /// Text currently stored in the selected cell.
    pub fn current_value(&self) -> String {
        let field = self.selected_field();
        match self.selected_day() {
            Some(day) => self.tracker.entries().day(day).get(field).to_string(),
            None => self.tracker.budget().get(field).unwrap_or_default().to_string(),
        }
    }

    fn is_editable(&self) -> bool {
        !(self.selected_day().is_none() && self.selected_field() == Field::Calories)
    }

    pub fn enter_edit_mode(&mut self) {
        if !self.is_editable() {
            self.status = Some(TrackerError::DerivedField.to_string());
            return;
        }
        self.status = None;
        self.input_mode = InputMode::Editing;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    // Every keystroke is a complete edit; a rejected one leaves the cell as it was.
    pub fn input_char(&mut self, c: char) {
        let mut candidate = self.current_value();
        candidate.push(c);
        self.commit(&candidate);
    }

    pub fn delete_char(&mut self) {
        let mut candidate = self.current_value();
        if candidate.pop().is_some() {
            self.commit(&candidate);
        }
    }

    pub fn clear_cell(&mut self) {
        if self.is_editable() {
            self.commit("");
        }
    }

    fn commit(&mut self, raw: &str) {
        let field = self.selected_field();
        let result = match self.selected_day() {
            Some(day) => self.tracker.set_entry_field(day, field, raw),
            None => self.tracker.set_budget_field(field, raw),
        };
        match result {
            Ok(()) => {
                self.status = None;
                self.refresh();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn refresh(&mut self) {
        self.summary = self.tracker.summary();
        self.scheduler.reschedule((self.clock)(), self.tracker.entries());
    }

    pub fn request_clear(&mut self) {
        self.input_mode = InputMode::ConfirmClear;
    }

    pub fn confirm_clear(&mut self) {
        self.tracker.clear_all();
        self.status = Some("Cleared the budget and all seven days.".to_string());
        self.input_mode = InputMode::Normal;
        self.refresh();
    }

    /// Called on every pass of the event loop.
    pub fn tick(&mut self) {
        self.scheduler.poll((self.clock)(), self.tracker.entries());
    }

    pub fn notification_line(&self) -> Option<String> {
        self.scheduler
            .notifier()
            .latest()
            .filter(|n| !self.is_dismissed(n))
            .map(|n| format!("{}: {}", n.title, n.body))
    }

    // Rescheduling after an edit re-fires the same reminder; it stays hidden
    // for the rest of the day it was dismissed on.
    fn is_dismissed(&self, notification: &Notification) -> bool {
        let today = (self.clock)().date();
        matches!(&self.dismissed, Some((tag, day)) if *tag == notification.tag && *day == today)
    }

    pub fn dismiss_notification(&mut self) {
        let notifier = self.scheduler.notifier_mut();
        if let Some(latest) = notifier.latest() {
            self.dismissed = Some((latest.tag.clone(), (self.clock)().date()));
        }
        notifier.dismiss();
    }

    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}
