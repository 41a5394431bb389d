//! Calendar semantics tests for the generation and due-date rule vocabulary.

use super::date;
use crate::schedule::domain::{DueRule, GenerationRule, ServicePeriod};
use rstest::rstest;

fn period(year: i32, month: u32) -> ServicePeriod {
    ServicePeriod::new(year, month).expect("valid test period")
}

#[rstest]
fn service_month_start_is_day_one() {
    let resolved = GenerationRule::ServiceMonthStart.resolve(period(2024, 7));
    assert_eq!(resolved, Some(date(2024, 7, 1)));
}

#[rstest]
fn prev_month_last_x_days_starts_the_window_in_the_previous_month() {
    // February 2024 has 29 days, so a five-day window opens on the 25th.
    let rule = GenerationRule::PrevMonthLastXDays { days: 5 };
    assert_eq!(rule.resolve(period(2024, 3)), Some(date(2024, 2, 25)));
}

#[rstest]
fn prev_month_last_x_days_clamps_the_window_start_to_day_one() {
    let rule = GenerationRule::PrevMonthLastXDays { days: 45 };
    assert_eq!(rule.resolve(period(2024, 3)), Some(date(2024, 2, 1)));
}

#[rstest]
fn prev_month_x_day_uses_the_previous_month_length() {
    // Service month February 2024: the previous month is January, 31 days.
    let rule = GenerationRule::PrevMonthXDay { day: 31 };
    assert_eq!(rule.resolve(period(2024, 2)), Some(date(2024, 1, 31)));
}

#[rstest]
fn prev_month_x_day_clamps_to_the_previous_month() {
    // Service month March 2024: the previous month is a leap February.
    let rule = GenerationRule::PrevMonthXDay { day: 31 };
    assert_eq!(rule.resolve(period(2024, 3)), Some(date(2024, 2, 29)));
}

#[rstest]
fn next_month_start_rolls_the_year_over_in_december() {
    let rule = GenerationRule::NextMonthStart;
    assert_eq!(rule.resolve(period(2024, 12)), Some(date(2025, 1, 1)));
}

#[rstest]
#[case(2023, date(2023, 2, 28))]
#[case(2024, date(2024, 2, 29))]
fn monthly_x_day_clamps_to_february_length(#[case] year: i32, #[case] expected: chrono::NaiveDate) {
    let rule = GenerationRule::MonthlyXDay { day: 31 };
    assert_eq!(rule.resolve(period(year, 2)), Some(expected));
}

#[rstest]
fn end_of_month_resolves_to_the_last_day() {
    assert_eq!(
        DueRule::EndOfMonth.resolve(period(2024, 4)),
        Some(date(2024, 4, 30))
    );
}

#[rstest]
fn specific_day_clamps_to_the_service_month() {
    let rule = DueRule::SpecificDay { day: 31 };
    assert_eq!(rule.resolve(period(2024, 6)), Some(date(2024, 6, 30)));
}

#[rstest]
fn next_month_day_uses_the_given_day() {
    let rule = DueRule::NextMonthDay { day: Some(10) };
    assert_eq!(rule.resolve(period(2024, 5)), Some(date(2024, 6, 10)));
}

#[rstest]
fn next_month_day_defaults_to_the_end_of_the_next_month() {
    let rule = DueRule::NextMonthDay { day: None };
    assert_eq!(rule.resolve(period(2024, 12)), Some(date(2025, 1, 31)));
}

#[rstest]
fn n_months_end_lands_on_the_last_day_n_months_ahead() {
    let rule = DueRule::NMonthsEnd { months: 3 };
    assert_eq!(rule.resolve(period(2024, 11)), Some(date(2025, 2, 28)));
}

#[rstest]
fn fixed_deadline_clamps_the_day_into_the_target_month() {
    let rule = DueRule::FixedDeadline {
        year: 2024,
        month: 2,
        day: 31,
    };
    assert_eq!(rule.resolve(period(2024, 1)), Some(date(2024, 2, 29)));
}

#[rstest]
fn days_after_start_offsets_from_the_first_of_the_month() {
    let rule = DueRule::DaysAfterStart { days: 14 };
    assert_eq!(rule.resolve(period(2024, 9)), Some(date(2024, 9, 15)));
}

#[rstest]
fn unknown_rule_falls_back_to_the_end_of_the_service_month() {
    assert_eq!(
        DueRule::Unknown.resolve(period(2024, 2)),
        Some(date(2024, 2, 29))
    );
}

#[rstest]
fn due_rule_aliases_deserialize_to_their_canonical_variants() {
    let end: DueRule =
        serde_json::from_value(serde_json::json!({ "rule": "service_month_end" }))
            .expect("alias should parse");
    assert_eq!(end, DueRule::EndOfMonth);

    let fixed: DueRule =
        serde_json::from_value(serde_json::json!({ "rule": "fixed_date", "day": 15 }))
            .expect("alias should parse");
    assert_eq!(fixed, DueRule::SpecificDay { day: 15 });

    let next_end: DueRule = serde_json::from_value(serde_json::json!({ "rule": "next_month_end" }))
        .expect("alias should parse");
    assert_eq!(next_end, DueRule::NextMonthDay { day: None });
}

#[rstest]
fn unrecognized_rule_names_deserialize_to_unknown() {
    let parsed: DueRule = serde_json::from_value(serde_json::json!({ "rule": "quarterly_close" }))
        .expect("unknown names should still parse");
    assert_eq!(parsed, DueRule::Unknown);
}
