use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use proptest::prelude::*;
use schedrun::cron::CronExpression;

// Instants between 2000-01-01 and ~2060.
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..2_840_140_800i64).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .expect("timestamp in range")
    })
}

// A single field item built from valid pieces for the given bounds.
fn item_strategy(min: u32, max: u32) -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        (min..=max).prop_map(|v| v.to_string()),
        (min..=max, min..=max).prop_map(|(a, b)| {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            format!("{lo}-{hi}")
        }),
        (1..=max.max(1)).prop_map(|step| format!("*/{step}")),
    ]
}

fn field_strategy(min: u32, max: u32) -> impl Strategy<Value = String> {
    proptest::collection::vec(item_strategy(min, max), 1..4).prop_map(|items| items.join(","))
}

fn expression_strategy() -> impl Strategy<Value = String> {
    (
        field_strategy(0, 59),
        field_strategy(0, 23),
        field_strategy(1, 31),
        field_strategy(1, 12),
        field_strategy(0, 7),
    )
        .prop_map(|(m, h, dom, mon, dow)| format!("{m} {h} {dom} {mon} {dow}"))
}

proptest! {
    #[test]
    fn generated_expressions_parse(expr in expression_strategy()) {
        prop_assert!(CronExpression::parse(&expr).is_ok(), "failed to parse {}", expr);
    }

    #[test]
    fn is_due_is_deterministic(expr in expression_strategy(), t in instant_strategy()) {
        let cron = CronExpression::parse(&expr).unwrap();
        prop_assert_eq!(cron.is_due(&t), cron.is_due(&t));
    }

    #[test]
    fn every_minute_matches_everything(t in instant_strategy()) {
        let cron = CronExpression::parse("* * * * *").unwrap();
        prop_assert!(cron.is_due(&t));
    }

    #[test]
    fn answer_is_constant_within_a_minute(
        expr in expression_strategy(),
        t in instant_strategy(),
        offset in 0i64..60,
    ) {
        let cron = CronExpression::parse(&expr).unwrap();
        let start = t.with_second(0).unwrap();
        let later = start + Duration::seconds(offset);
        prop_assert_eq!(cron.is_due(&start), cron.is_due(&later));
    }

    #[test]
    fn literal_minute_and_hour_match_only_that_time(
        t in instant_strategy(),
    ) {
        let expr = format!("{} {} * * *", t.minute(), t.hour());
        let cron = CronExpression::parse(&expr).unwrap();
        prop_assert!(cron.is_due(&t));
        prop_assert!(!cron.is_due(&(t + Duration::minutes(1))));
    }
}
