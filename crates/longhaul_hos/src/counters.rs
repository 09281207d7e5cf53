use jiff::{SignedDuration, Timestamp};

use crate::limits::{
    CYCLE_BUDGET_HOURS, DRIVE_HOURS_BEFORE_BREAK, MAX_DRIVING_HOURS_PER_DAY,
    MAX_ON_DUTY_WINDOW_HOURS, REST_TRIGGER_THRESHOLD_HOURS,
};

fn hours(value: f64) -> SignedDuration {
    SignedDuration::from_secs_f64(value * 3_600.0)
}

/// The four depleting duty budgets plus the simulation clock.
///
/// Created once per trip, mutated in place by the timeline builder through
/// both legs and the pickup/dropoff activities, discarded with the finished
/// plan.
#[derive(Debug, Clone, PartialEq)]
pub struct HosCounters {
    driving_hours_left_today: f64,
    on_duty_window_hours_left_today: f64,
    hours_until_break: f64,
    cycle_hours_left: f64,
    clock: Timestamp,
}

impl HosCounters {
    /// `start` is an explicit parameter so the simulation never reads the
    /// wall clock.
    pub fn new(cycle_hours_used: f64, start: Timestamp) -> Self {
        Self {
            driving_hours_left_today: MAX_DRIVING_HOURS_PER_DAY,
            on_duty_window_hours_left_today: MAX_ON_DUTY_WINDOW_HOURS,
            hours_until_break: DRIVE_HOURS_BEFORE_BREAK,
            cycle_hours_left: CYCLE_BUDGET_HOURS - cycle_hours_used,
            clock: start,
        }
    }

    pub fn driving_hours_left_today(&self) -> f64 {
        self.driving_hours_left_today
    }

    pub fn on_duty_window_hours_left_today(&self) -> f64 {
        self.on_duty_window_hours_left_today
    }

    pub fn hours_until_break(&self) -> f64 {
        self.hours_until_break
    }

    pub fn cycle_hours_left(&self) -> f64 {
        self.cycle_hours_left
    }

    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    /// The caller caps `hours_driven` by the driving and break budgets. The
    /// cycle budget is not a cap: it triggers rests instead, and goes
    /// negative once the supplied 70-hour figure is spent mid-trip.
    pub fn advance_by_driving(&mut self, hours_driven: f64) {
        self.driving_hours_left_today -= hours_driven;
        self.on_duty_window_hours_left_today -= hours_driven;
        self.hours_until_break -= hours_driven;
        self.cycle_hours_left -= hours_driven;
        self.clock += hours(hours_driven);
    }

    /// Fuel stops, pickup and dropoff consume the on-duty window and the
    /// cycle, but not the driving budget.
    pub fn advance_by_on_duty(&mut self, hours_on_duty: f64) {
        self.on_duty_window_hours_left_today -= hours_on_duty;
        self.cycle_hours_left -= hours_on_duty;
        self.clock += hours(hours_on_duty);
    }

    /// A 30-minute break only clears the continuous-driving counter. It does
    /// not replenish the daily or cycle budgets.
    pub fn advance_by_break(&mut self, hours_off: f64) {
        self.hours_until_break = DRIVE_HOURS_BEFORE_BREAK;
        self.clock += hours(hours_off);
    }

    /// A 10-hour rest starts a fresh duty day. The cycle budget persists
    /// across rests.
    pub fn advance_by_rest(&mut self, hours_resting: f64) {
        self.driving_hours_left_today = MAX_DRIVING_HOURS_PER_DAY;
        self.on_duty_window_hours_left_today = MAX_ON_DUTY_WINDOW_HOURS;
        self.hours_until_break = DRIVE_HOURS_BEFORE_BREAK;
        self.clock += hours(hours_resting);
    }

    pub fn needs_rest(&self) -> bool {
        self.driving_hours_left_today <= REST_TRIGGER_THRESHOLD_HOURS
            || self.on_duty_window_hours_left_today <= REST_TRIGGER_THRESHOLD_HOURS
            || self.cycle_hours_left <= REST_TRIGGER_THRESHOLD_HOURS
    }
}
