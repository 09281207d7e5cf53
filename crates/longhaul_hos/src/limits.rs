//! Federal Hours-of-Service limits for property-carrying drivers, plus the
//! planner's fixed operational figures.

pub const MAX_DRIVING_HOURS_PER_DAY: f64 = 11.0;
pub const MAX_ON_DUTY_WINDOW_HOURS: f64 = 14.0;
pub const REQUIRED_REST_HOURS: f64 = 10.0;
pub const DRIVE_HOURS_BEFORE_BREAK: f64 = 8.0;
pub const BREAK_DURATION_HOURS: f64 = 0.5;
pub const CYCLE_BUDGET_HOURS: f64 = 70.0;

/// A rest is forced slightly before a hard limit is reached, so a subsequent
/// minimal segment can never overshoot a legal cap.
pub const REST_TRIGGER_THRESHOLD_HOURS: f64 = 0.5;

pub const AVERAGE_SPEED_MPH: f64 = 60.0;

pub const FUEL_STOP_INTERVAL_MILES: f64 = 950.0;
pub const FUEL_STOP_DURATION_HOURS: f64 = 0.5;

pub const PICKUP_DURATION_HOURS: f64 = 1.0;
pub const DROPOFF_DURATION_HOURS: f64 = 1.0;
