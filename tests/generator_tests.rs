use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use shift_schedule::{
    Interval, IntervalKind, RestDayType, ScheduleConfig, StartTimeType, generate,
};

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn assert_contiguous(intervals: &[Interval]) {
    for interval in intervals {
        assert!(
            interval.start_time < interval.end_time,
            "empty or inverted interval {:?}",
            interval
        );
    }
    for pair in intervals.windows(2) {
        assert_eq!(pair[0].end_time, pair[1].start_time, "gap between {:?}", pair);
        assert!(pair[0].end_time < pair[1].end_time);
    }
}

fn assert_covers(intervals: &[Interval], anchor: NaiveDateTime, days: u32) {
    let horizon = anchor + Duration::days(i64::from(days));
    assert_eq!(intervals.first().unwrap().start_time, anchor);
    assert!(intervals.last().unwrap().end_time >= horizon);
    // only the in-progress cycle may run past the horizon
    let past: Vec<_> = intervals.iter().filter(|i| i.start_time >= horizon).collect();
    assert!(past.len() <= 1, "too many trailing intervals: {:?}", past);
}

#[test]
fn continuous_cycle_alternates_work_and_rest() {
    let config = ScheduleConfig::new(dt(2024, 1, 1, 8, 0)).with_hours(12.0, 24.0);
    let intervals = generate(&config, 2);

    assert_eq!(
        intervals,
        vec![
            Interval::new(dt(2024, 1, 1, 8, 0), dt(2024, 1, 1, 20, 0), IntervalKind::Work),
            Interval::new(dt(2024, 1, 1, 20, 0), dt(2024, 1, 2, 20, 0), IntervalKind::Rest),
            Interval::new(dt(2024, 1, 2, 20, 0), dt(2024, 1, 3, 8, 0), IntervalKind::Work),
            Interval::new(dt(2024, 1, 3, 8, 0), dt(2024, 1, 4, 8, 0), IntervalKind::Rest),
        ]
    );
}

#[test]
fn double_policy_starting_on_saturday_opens_with_weekend() {
    // 2024-01-06 is a Saturday
    let mut config = ScheduleConfig::new(dt(2024, 1, 6, 8, 0)).with_rest_day_type(RestDayType::Double);
    config.work_hours = 8.0;
    let intervals = generate(&config, 3);

    assert_eq!(
        intervals[0],
        Interval::new(dt(2024, 1, 6, 8, 0), dt(2024, 1, 8, 8, 0), IntervalKind::Weekend)
    );
    assert_eq!(
        intervals[1],
        Interval::new(dt(2024, 1, 8, 8, 0), dt(2024, 1, 8, 16, 0), IntervalKind::Work)
    );
    assert_eq!(
        intervals[2],
        Interval::new(dt(2024, 1, 8, 16, 0), dt(2024, 1, 9, 8, 0), IntervalKind::Rest)
    );
    assert_eq!(intervals.len(), 3);
}

#[test]
fn off_start_recovers_true_shift_start() {
    let config = ScheduleConfig::new(dt(2024, 1, 1, 20, 0))
        .with_hours(12.0, 24.0)
        .with_start_time_type(StartTimeType::Off);

    assert_eq!(config.anchor(), dt(2024, 1, 1, 8, 0));
    let intervals = generate(&config, 2);
    assert_eq!(
        intervals[0],
        Interval::new(dt(2024, 1, 1, 8, 0), dt(2024, 1, 1, 20, 0), IntervalKind::Work)
    );
}

#[test]
fn empty_custom_set_matches_no_rest_days() {
    let base = ScheduleConfig::new(dt(2024, 1, 3, 7, 30)).with_hours(10.0, 14.0);
    let custom = base.clone().with_custom_rest_days(Vec::new());

    assert_eq!(custom.rest_day_type, RestDayType::Custom);
    assert_eq!(generate(&custom, 5), generate(&base, 5));
}

#[test]
fn generated_sequences_are_contiguous_and_cover_horizon() {
    let start = dt(2024, 2, 27, 6, 15);
    let configs = vec![
        ScheduleConfig::new(start).with_hours(12.0, 24.0),
        ScheduleConfig::new(start).with_hours(8.0, 16.0),
        ScheduleConfig::new(start).with_hours(9.5, 30.25),
        ScheduleConfig::new(start).with_rest_day_type(RestDayType::Single),
        ScheduleConfig::new(start).with_rest_day_type(RestDayType::Double),
        ScheduleConfig::new(start)
            .with_hours(12.0, 36.0)
            .with_custom_rest_days([0, 3, 6]),
        ScheduleConfig::new(start)
            .with_hours(24.0, 48.0)
            .with_start_time_type(StartTimeType::Off),
    ];

    for config in configs {
        let intervals = generate(&config, 90);
        assert!(!intervals.is_empty());
        assert_contiguous(&intervals);
        assert_covers(&intervals, config.anchor(), 90);
    }
}

#[test]
fn double_policy_never_schedules_work_on_weekends() {
    let config = ScheduleConfig::new(dt(2024, 1, 3, 9, 0)).with_rest_day_type(RestDayType::Double);
    let intervals = generate(&config, 56);

    let mut day = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
    let last = NaiveDate::from_ymd_opt(2024, 2, 25).unwrap();
    while day <= last {
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            let day_start = day.and_hms_opt(0, 0, 0).unwrap();
            let day_end = day_start + Duration::days(1);
            let holder = intervals
                .iter()
                .find(|i| i.contains(day_start))
                .expect("weekend day covered");
            assert!(holder.end_time >= day_end, "{day} split across intervals");
            assert_ne!(holder.kind, IntervalKind::Work, "{day} holds work");
        }
        day = day + Duration::days(1);
    }

    assert!(
        intervals
            .iter()
            .filter(|i| i.kind == IntervalKind::Work)
            .all(|i| !matches!(i.start_time.weekday(), Weekday::Sat | Weekday::Sun))
    );
}

#[test]
fn fixed_policies_keep_work_start_time_stable() {
    for policy in [RestDayType::Single, RestDayType::Double] {
        let mut config = ScheduleConfig::new(dt(2024, 3, 1, 0, 0)).with_rest_day_type(policy);
        config.start_date = dt(2024, 3, 1, 7, 45);
        let intervals = generate(&config, 60);

        let work: Vec<_> = intervals
            .iter()
            .filter(|i| i.kind == IntervalKind::Work)
            .collect();
        assert!(work.len() > 30);
        for interval in work {
            assert_eq!(
                (interval.start_time.hour(), interval.start_time.minute()),
                (7, 45)
            );
        }
    }
}

#[test]
fn fixed_policy_with_off_start_uses_recovered_clock_time() {
    // Monday, shift ends at 16:00 so the shift started at 08:00
    let mut config = ScheduleConfig::new(dt(2024, 1, 8, 16, 0))
        .with_rest_day_type(RestDayType::Double)
        .with_start_time_type(StartTimeType::Off);
    config.start_date = dt(2024, 1, 8, 16, 0);

    let intervals = generate(&config, 14);
    assert_eq!(intervals[0].start_time, dt(2024, 1, 8, 8, 0));
    for interval in intervals.iter().filter(|i| i.kind == IntervalKind::Work) {
        assert_eq!(interval.start_time.hour(), 8);
    }
}

#[test]
fn single_policy_rolls_rest_over_sunday() {
    // Saturday start: Saturday works, Sunday is absorbed into the rest gap
    let config = ScheduleConfig::new(dt(2024, 1, 6, 8, 0)).with_rest_day_type(RestDayType::Single);
    let intervals = generate(&config, 3);

    assert_eq!(
        intervals[0],
        Interval::new(dt(2024, 1, 6, 8, 0), dt(2024, 1, 6, 16, 0), IntervalKind::Work)
    );
    assert_eq!(
        intervals[1],
        Interval::new(dt(2024, 1, 6, 16, 0), dt(2024, 1, 8, 8, 0), IntervalKind::Rest)
    );
    assert_eq!(
        intervals[2],
        Interval::new(dt(2024, 1, 8, 8, 0), dt(2024, 1, 8, 16, 0), IntervalKind::Work)
    );
}

#[test]
fn fixed_policy_ignores_rest_hours() {
    let short = ScheduleConfig::new(dt(2024, 1, 1, 8, 0))
        .with_rest_day_type(RestDayType::Double)
        .with_hours(8.0, 1.0);
    let long = short.clone().with_hours(8.0, 100.0);

    assert_eq!(generate(&short, 21), generate(&long, 21));
}

#[test]
fn custom_roll_forward_keeps_tentative_clock_time() {
    // Wednesday off; Monday 06:00 + 8h work + 43h rest lands on Wednesday 09:00
    let config = ScheduleConfig::new(dt(2024, 1, 1, 6, 0))
        .with_hours(8.0, 43.0)
        .with_custom_rest_days([3]);
    let intervals = generate(&config, 5);

    assert_eq!(
        intervals[0],
        Interval::new(dt(2024, 1, 1, 6, 0), dt(2024, 1, 1, 14, 0), IntervalKind::Work)
    );
    assert_eq!(
        intervals[1],
        Interval::new(dt(2024, 1, 1, 14, 0), dt(2024, 1, 4, 9, 0), IntervalKind::Rest)
    );
    assert_eq!(intervals[2].start_time, dt(2024, 1, 4, 9, 0));
    assert_eq!(intervals[2].kind, IntervalKind::Work);
}

#[test]
fn weekend_starts_at_cursor_and_ends_at_anchor_clock_time() {
    // Sunday 22:00 start under the single policy
    let mut config =
        ScheduleConfig::new(dt(2024, 1, 7, 0, 0)).with_rest_day_type(RestDayType::Single);
    config.start_date = dt(2024, 1, 7, 22, 0);

    let intervals = generate(&config, 2);
    assert_eq!(
        intervals[0],
        Interval::new(dt(2024, 1, 7, 22, 0), dt(2024, 1, 8, 22, 0), IntervalKind::Weekend)
    );
    assert_eq!(intervals[1].kind, IntervalKind::Work);
}

#[test]
fn consecutive_rest_days_form_one_weekend_interval() {
    // Friday, Saturday and Sunday off, starting on Friday
    let config = ScheduleConfig::new(dt(2024, 1, 5, 10, 0))
        .with_hours(8.0, 16.0)
        .with_custom_rest_days([5, 6, 0]);
    let intervals = generate(&config, 4);

    assert_eq!(
        intervals[0],
        Interval::new(dt(2024, 1, 5, 10, 0), dt(2024, 1, 8, 10, 0), IntervalKind::Weekend)
    );
    assert_eq!(intervals[1].kind, IntervalKind::Work);
}

#[test]
fn fractional_hours_are_honoured() {
    let config = ScheduleConfig::new(dt(2024, 1, 1, 8, 0)).with_hours(7.5, 16.25);
    let intervals = generate(&config, 1);

    assert_eq!(intervals[0].end_time, dt(2024, 1, 1, 15, 30));
    assert_eq!(intervals[1].end_time, dt(2024, 1, 2, 7, 45));
}

#[test]
fn long_fixed_shift_never_produces_inverted_rest() {
    let mut config = ScheduleConfig::new(dt(2024, 1, 1, 8, 0)).with_rest_day_type(RestDayType::Double);
    config.work_hours = 30.0;
    let intervals = generate(&config, 14);

    assert_contiguous(&intervals);
    assert_eq!(
        intervals[1],
        Interval::new(dt(2024, 1, 2, 14, 0), dt(2024, 1, 3, 8, 0), IntervalKind::Rest)
    );
}

#[test]
fn degenerate_inputs_yield_empty_schedule() {
    let start = dt(2024, 1, 1, 8, 0);
    assert!(generate(&ScheduleConfig::new(start), 0).is_empty());
    assert!(generate(&ScheduleConfig::new(start).with_hours(0.0, 24.0), 10).is_empty());
    assert!(generate(&ScheduleConfig::new(start).with_hours(-4.0, 24.0), 10).is_empty());
    assert!(generate(&ScheduleConfig::new(start).with_hours(12.0, 0.0), 10).is_empty());
    assert!(generate(&ScheduleConfig::new(start).with_hours(f64::NAN, 12.0), 10).is_empty());
}

#[test]
fn all_days_off_yields_single_weekend() {
    let config = ScheduleConfig::new(dt(2024, 1, 1, 8, 0)).with_custom_rest_days(0..=6);
    let intervals = generate(&config, 5);

    assert_eq!(
        intervals,
        vec![Interval::new(
            dt(2024, 1, 1, 8, 0),
            dt(2024, 1, 6, 8, 0),
            IntervalKind::Weekend
        )]
    );
}

#[test]
fn generation_is_deterministic() {
    let config = ScheduleConfig::new(dt(2024, 5, 17, 19, 0))
        .with_hours(11.0, 37.0)
        .with_custom_rest_days([2]);
    assert_eq!(generate(&config, 45), generate(&config, 45));
}
