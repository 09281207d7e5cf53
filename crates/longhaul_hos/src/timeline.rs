use jiff::Timestamp;
use longhaul_providers::route_leg::RouteLeg;
use serde::Serialize;
use tracing::debug;

use crate::{
    counters::HosCounters,
    fuel::FuelStop,
    limits::{
        AVERAGE_SPEED_MPH, BREAK_DURATION_HOURS, DROPOFF_DURATION_HOURS, PICKUP_DURATION_HOURS,
        REQUIRED_REST_HOURS, REST_TRIGGER_THRESHOLD_HOURS,
    },
};

/// Residual distances below this are rounding noise, not road left to drive.
const DISTANCE_EPSILON_MILES: f64 = 1e-6;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Driving,
    Fuel,
    Break,
    Rest,
    Pickup,
    Dropoff,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum DutyStatus {
    Driving,

    #[serde(rename = "On Duty (Not Driving)")]
    OnDutyNotDriving,

    #[serde(rename = "Off Duty")]
    OffDuty,

    #[serde(rename = "Sleeper Berth")]
    SleeperBerth,
}

/// One entry of the duty-status timeline. Append-only; segments are never
/// mutated once emitted, and their start times are non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,

    pub start_time: Timestamp,

    #[serde(rename = "duration")]
    pub duration_hours: f64,

    /// Driving segments only.
    #[serde(rename = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,

    /// Fuel, pickup and dropoff segments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(rename = "status")]
    pub duty_status: DutyStatus,
}

/// Drives the HOS counters across route legs and activities, emitting the
/// ordered duty-status timeline.
pub struct TimelineBuilder {
    counters: HosCounters,
    segments: Vec<TimelineSegment>,
}

impl TimelineBuilder {
    pub fn new(cycle_hours_used: f64, start: Timestamp) -> Self {
        Self {
            counters: HosCounters::new(cycle_hours_used, start),
            segments: Vec::new(),
        }
    }

    pub fn counters(&self) -> &HosCounters {
        &self.counters
    }

    pub fn into_segments(self) -> Vec<TimelineSegment> {
        self.segments
    }

    /// Drives one leg to completion, weaving in the planned fuel stops, the
    /// mandatory break and rests as the budgets deplete.
    ///
    /// Within one iteration the order is fixed: drive, then fuel if a stop
    /// is pending, then break if the continuous-driving budget ran out, then
    /// rest if any cap is near exhaustion. Fuel and break can both be due in
    /// the same iteration, and the rest check comes last because the three
    /// together may cross a cap.
    pub fn drive_leg(&mut self, leg: &RouteLeg, fuel_stops: &[FuelStop]) {
        let mut remaining_miles = leg.distance_miles;
        let mut fuel_index = 0;

        // A trip can begin with a budget already spent (an exhausted cycle
        // figure); the duty day then opens with the mandatory rest.
        if remaining_miles > DISTANCE_EPSILON_MILES && self.counters.needs_rest() {
            self.rest();
        }

        while remaining_miles > DISTANCE_EPSILON_MILES {
            let drive_hours = self
                .counters
                .driving_hours_left_today()
                .min(self.counters.hours_until_break())
                .min(remaining_miles / AVERAGE_SPEED_MPH);
            let drive_miles = drive_hours * AVERAGE_SPEED_MPH;

            self.segments.push(TimelineSegment {
                kind: SegmentKind::Driving,
                start_time: self.counters.clock(),
                duration_hours: drive_hours,
                distance_miles: Some(drive_miles),
                location: None,
                duty_status: DutyStatus::Driving,
            });
            self.counters.advance_by_driving(drive_hours);
            remaining_miles -= drive_miles;

            if fuel_index < fuel_stops.len() && remaining_miles > DISTANCE_EPSILON_MILES {
                let stop = &fuel_stops[fuel_index];
                self.segments.push(TimelineSegment {
                    kind: SegmentKind::Fuel,
                    start_time: self.counters.clock(),
                    duration_hours: stop.duration_hours,
                    distance_miles: None,
                    location: Some(stop.label.clone()),
                    duty_status: DutyStatus::OnDutyNotDriving,
                });
                self.counters.advance_by_on_duty(stop.duration_hours);
                fuel_index += 1;
            }

            if self.counters.hours_until_break() <= 0.0 && remaining_miles > DISTANCE_EPSILON_MILES
            {
                debug!(clock = %self.counters.clock(), "inserting 30-minute break");
                self.segments.push(TimelineSegment {
                    kind: SegmentKind::Break,
                    start_time: self.counters.clock(),
                    duration_hours: BREAK_DURATION_HOURS,
                    distance_miles: None,
                    location: None,
                    duty_status: DutyStatus::OffDuty,
                });
                self.counters.advance_by_break(BREAK_DURATION_HOURS);
            }

            if self.counters.needs_rest() {
                self.rest();
            }
        }
    }

    /// The 1-hour pickup between the legs. If loading exhausts the on-duty
    /// window, the second leg starts after a full rest.
    pub fn pickup(&mut self, location: &str) {
        self.segments.push(TimelineSegment {
            kind: SegmentKind::Pickup,
            start_time: self.counters.clock(),
            duration_hours: PICKUP_DURATION_HOURS,
            distance_miles: None,
            location: Some(location.to_owned()),
            duty_status: DutyStatus::OnDutyNotDriving,
        });
        self.counters.advance_by_on_duty(PICKUP_DURATION_HOURS);

        if self.counters.on_duty_window_hours_left_today() <= REST_TRIGGER_THRESHOLD_HOURS {
            self.rest();
        }
    }

    /// The trip ends at the dropoff, so no budget needs protecting and the
    /// counters are left as they stand.
    pub fn dropoff(&mut self, location: &str) {
        self.segments.push(TimelineSegment {
            kind: SegmentKind::Dropoff,
            start_time: self.counters.clock(),
            duration_hours: DROPOFF_DURATION_HOURS,
            distance_miles: None,
            location: Some(location.to_owned()),
            duty_status: DutyStatus::OnDutyNotDriving,
        });
    }

    fn rest(&mut self) {
        debug!(clock = %self.counters.clock(), "inserting 10-hour rest");
        self.segments.push(TimelineSegment {
            kind: SegmentKind::Rest,
            start_time: self.counters.clock(),
            duration_hours: REQUIRED_REST_HOURS,
            distance_miles: None,
            location: None,
            duty_status: DutyStatus::SleeperBerth,
        });
        self.counters.advance_by_rest(REQUIRED_REST_HOURS);
    }
}

#[cfg(test)]
mod tests {
    use geo_types::Point;
    use jiff::Timestamp;
    use longhaul_providers::route_leg::RouteLeg;

    use crate::fuel::plan_fuel_stops;

    use super::{DutyStatus, SegmentKind, TimelineBuilder, TimelineSegment};

    fn start() -> Timestamp {
        "2026-03-02T06:00:00Z".parse().unwrap()
    }

    fn leg(distance_miles: f64) -> RouteLeg {
        RouteLeg {
            distance_miles,
            duration_hours: distance_miles / 60.0,
            geometry: vec![Point::new(-87.63, 41.88), Point::new(-95.37, 29.76)],
        }
    }

    fn kinds(segments: &[TimelineSegment]) -> Vec<SegmentKind> {
        segments.iter().map(|segment| segment.kind).collect()
    }

    #[test]
    fn a_short_leg_is_one_driving_segment() {
        let mut builder = TimelineBuilder::new(0.0, start());

        builder.drive_leg(&leg(300.0), &[]);

        let segments = builder.into_segments();
        assert_eq!(kinds(&segments), vec![SegmentKind::Driving]);
        assert_eq!(segments[0].duration_hours, 5.0);
        assert_eq!(segments[0].distance_miles, Some(300.0));
        assert_eq!(segments[0].duty_status, DutyStatus::Driving);
    }

    #[test]
    fn the_break_splits_a_leg_longer_than_eight_driving_hours() {
        let mut builder = TimelineBuilder::new(0.0, start());

        builder.drive_leg(&leg(500.0), &[]);

        let segments = builder.into_segments();
        assert_eq!(
            kinds(&segments),
            vec![SegmentKind::Driving, SegmentKind::Break, SegmentKind::Driving]
        );

        assert_eq!(segments[0].duration_hours, 8.0);
        assert_eq!(segments[0].distance_miles, Some(480.0));

        assert_eq!(segments[1].duration_hours, 0.5);
        assert_eq!(segments[1].duty_status, DutyStatus::OffDuty);

        let tail = &segments[2];
        assert!((tail.duration_hours - 20.0 / 60.0).abs() < 1e-9);
        assert!((tail.distance_miles.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn an_exhausted_cycle_rests_before_any_driving() {
        let mut builder = TimelineBuilder::new(70.0, start());

        builder.drive_leg(&leg(300.0), &[]);

        let segments = builder.into_segments();
        assert_eq!(segments[0].kind, SegmentKind::Rest);
        assert_eq!(segments[0].duration_hours, 10.0);
        assert_eq!(segments[0].duty_status, DutyStatus::SleeperBerth);
        assert_eq!(segments[1].kind, SegmentKind::Driving);
    }

    #[test]
    fn a_zero_distance_leg_emits_nothing() {
        let mut builder = TimelineBuilder::new(70.0, start());

        builder.drive_leg(&leg(0.0), &[]);

        assert!(builder.into_segments().is_empty());
    }

    #[test]
    fn driving_distances_sum_to_the_leg_distance() {
        for distance in [35.0, 500.0, 1234.5, 2400.0] {
            let leg = leg(distance);
            let fuel_stops = plan_fuel_stops(&leg);
            let mut builder = TimelineBuilder::new(0.0, start());

            builder.drive_leg(&leg, &fuel_stops);

            let driven: f64 = builder
                .into_segments()
                .iter()
                .filter_map(|segment| segment.distance_miles)
                .sum();
            assert!((driven - distance).abs() < 1e-6, "distance {distance}");
        }
    }

    #[test]
    fn every_driving_segment_respects_the_budgets_before_it() {
        let leg = leg(2400.0);
        let fuel_stops = plan_fuel_stops(&leg);
        let mut builder = TimelineBuilder::new(10.0, start());

        builder.drive_leg(&leg, &fuel_stops);

        let mut driving_left = 11.0;
        let mut until_break = 8.0;
        for segment in builder.into_segments() {
            match segment.kind {
                SegmentKind::Driving => {
                    assert!(segment.duration_hours <= driving_left + 1e-9);
                    assert!(segment.duration_hours <= until_break + 1e-9);
                    driving_left -= segment.duration_hours;
                    until_break -= segment.duration_hours;
                }
                SegmentKind::Break => until_break = 8.0,
                SegmentKind::Rest => {
                    driving_left = 11.0;
                    until_break = 8.0;
                }
                _ => {}
            }
        }
    }

    #[test]
    fn a_long_leg_rests_when_the_daily_driving_cap_runs_out() {
        // 720 miles is 12 driving hours, one more than a duty day allows.
        let mut builder = TimelineBuilder::new(0.0, start());

        builder.drive_leg(&leg(720.0), &[]);

        let segments = builder.into_segments();
        assert_eq!(
            kinds(&segments),
            vec![
                SegmentKind::Driving,
                SegmentKind::Break,
                SegmentKind::Driving,
                SegmentKind::Rest,
                SegmentKind::Driving,
            ]
        );

        // 8h + 3h exhausts the 11-hour budget to within the rest margin.
        assert_eq!(segments[2].duration_hours, 3.0);
        assert_eq!(segments[3].duration_hours, 10.0);
        assert_eq!(segments[4].duration_hours, 1.0);
        assert_eq!(segments[4].distance_miles, Some(60.0));
    }

    #[test]
    fn fuel_stops_are_emitted_in_leg_order_between_drives() {
        let leg = leg(1000.0);
        let fuel_stops = plan_fuel_stops(&leg);
        assert_eq!(fuel_stops.len(), 1);

        let mut builder = TimelineBuilder::new(0.0, start());
        builder.drive_leg(&leg, &fuel_stops);

        let segments = builder.into_segments();
        let fuel: Vec<&TimelineSegment> = segments
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Fuel)
            .collect();

        assert_eq!(fuel.len(), 1);
        assert_eq!(fuel[0].location.as_deref(), Some("Fuel Stop 1"));
        assert_eq!(fuel[0].duty_status, DutyStatus::OnDutyNotDriving);
        assert_eq!(fuel[0].duration_hours, 0.5);
        assert_ne!(segments.last().unwrap().kind, SegmentKind::Fuel);
    }

    #[test]
    fn pickup_consumes_the_window_and_can_force_a_rest() {
        let mut builder = TimelineBuilder::new(0.0, start());
        // Burn the window down to exactly one hour of slack.
        builder.counters.advance_by_on_duty(12.5);

        builder.pickup("Toledo, OH");

        let segments = builder.into_segments();
        assert_eq!(kinds(&segments), vec![SegmentKind::Pickup, SegmentKind::Rest]);
        assert_eq!(segments[0].location.as_deref(), Some("Toledo, OH"));
        assert_eq!(segments[0].duty_status, DutyStatus::OnDutyNotDriving);
    }

    #[test]
    fn start_times_are_non_decreasing() {
        let first = leg(1400.0);
        let second = leg(900.0);
        let first_stops = plan_fuel_stops(&first);
        let second_stops = plan_fuel_stops(&second);

        let mut builder = TimelineBuilder::new(30.0, start());
        builder.drive_leg(&first, &first_stops);
        builder.pickup("Omaha, NE");
        builder.drive_leg(&second, &second_stops);
        builder.dropoff("Denver, CO");

        let segments = builder.into_segments();
        for pair in segments.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
        }
        assert_eq!(segments.last().unwrap().kind, SegmentKind::Dropoff);
    }
}
