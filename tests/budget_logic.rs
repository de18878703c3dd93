use chrono::{DateTime, Datelike, TimeZone, Utc, Weekday};
use uuid::Uuid;

use mealbudget_core::core::services::{
    AdmissionService, AdmissionVerdict, AggregationService, RejectionReason, SnapshotService,
};
use mealbudget_core::domain::{BudgetConfig, Money, RecurrenceUnit, Transaction};
use mealbudget_core::period::Period;

fn sample_instant(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn spend(owner: Uuid, major: f64, at: DateTime<Utc>) -> Transaction {
    Transaction::new(owner, Money::from_major(major), Uuid::new_v4(), at)
}

#[test]
fn weekly_period_start_is_a_sunday_for_every_weekday() {
    // one reference on each weekday of October 2024
    for day in 13..20 {
        let reference = sample_instant(2024, 10, day, 15);
        let period = Period::resolve(RecurrenceUnit::Weekly, reference);
        assert_eq!(period.start.weekday(), Weekday::Sun);
        assert_eq!(period.start, sample_instant(2024, 10, 13, 0));
        assert_eq!(period.end, reference);
    }
}

#[test]
fn overspent_week_reports_negative_remaining_and_rejects_more() {
    // Scenario: 50 weekly budget, reference on a Wednesday, three
    // transactions of 10 + 15 + 30 already inside the week.
    let wednesday = sample_instant(2024, 10, 16, 12);
    assert_eq!(wednesday.weekday(), Weekday::Wed);

    let config = BudgetConfig::new(
        Uuid::new_v4(),
        Money::from_major(50.0),
        RecurrenceUnit::Weekly,
    )
    .expect("valid config");

    let transactions = vec![
        spend(config.owner_id, 10.0, sample_instant(2024, 10, 13, 9)),
        spend(config.owner_id, 15.0, sample_instant(2024, 10, 14, 19)),
        spend(config.owner_id, 30.0, sample_instant(2024, 10, 16, 8)),
    ];

    let period = Period::resolve(config.time_unit, wednesday);
    let total = AggregationService::total_spent(&transactions, &period);
    assert_eq!(total, Money::from_major(55.0));

    let snapshot = SnapshotService::snapshot(&config, total, period);
    assert_eq!(snapshot.remaining_budget, Money::from_major(-5.0));
    assert_eq!(snapshot.percentage_used, 110.0);

    let verdict = AdmissionService::admit(
        Money::from_major(1.0),
        Some(&config),
        &transactions,
        wednesday,
    );
    let AdmissionVerdict::Reject(reason) = verdict else {
        panic!("expected budget rejection");
    };
    match &reason {
        RejectionReason::ExceedsBudget { remaining, .. } => {
            assert_eq!(*remaining, Money::from_major(-5.0));
        }
        other => panic!("expected budget rejection, got {other:?}"),
    }
    assert_eq!(
        reason.message(),
        "Transaction would exceed your weekly budget. You have $-5.00 remaining."
    );
}

#[test]
fn zero_budget_reports_zero_percent_and_does_not_constrain() {
    let reference = sample_instant(2024, 10, 16, 12);
    let config = BudgetConfig::new(Uuid::new_v4(), Money::ZERO, RecurrenceUnit::Daily)
        .expect("zero budget is valid");
    let transactions = vec![spend(
        config.owner_id,
        321.0,
        sample_instant(2024, 10, 16, 9),
    )];

    let period = Period::resolve(config.time_unit, reference);
    let total = AggregationService::total_spent(&transactions, &period);
    let snapshot = SnapshotService::snapshot(&config, total, period);
    assert_eq!(snapshot.percentage_used, 0.0);

    let verdict = AdmissionService::admit(
        Money::from_major(25.0),
        Some(&config),
        &transactions,
        reference,
    );
    assert_eq!(verdict, AdmissionVerdict::Accept);

    // the absolute ceiling and positive-amount checks still apply
    let verdict = AdmissionService::admit(
        Money::from_major(10000.01),
        Some(&config),
        &transactions,
        reference,
    );
    assert_eq!(
        verdict,
        AdmissionVerdict::Reject(RejectionReason::AmountTooLarge)
    );
    let verdict = AdmissionService::admit(Money::ZERO, Some(&config), &transactions, reference);
    assert_eq!(
        verdict,
        AdmissionVerdict::Reject(RejectionReason::InvalidAmount)
    );
}

#[test]
fn monthly_period_on_the_first_at_midnight_is_empty_but_inclusive() {
    let boundary = sample_instant(2024, 11, 1, 0);
    let period = Period::resolve(RecurrenceUnit::Monthly, boundary);
    assert_eq!(period.start, boundary);
    assert_eq!(period.end, boundary);

    let config = BudgetConfig::new(
        Uuid::new_v4(),
        Money::from_major(200.0),
        RecurrenceUnit::Monthly,
    )
    .expect("valid config");
    let total = AggregationService::total_spent(&[], &period);
    assert_eq!(total, Money::ZERO);

    let snapshot = SnapshotService::snapshot(&config, total, period);
    assert_eq!(snapshot.total_spent, Money::ZERO);
    assert_eq!(snapshot.remaining_budget, Money::from_major(200.0));
    assert_eq!(snapshot.percentage_used, 0.0);
}

#[test]
fn snapshot_serializes_with_the_wire_field_names() {
    let reference = sample_instant(2024, 10, 16, 12);
    let config = BudgetConfig::new(
        Uuid::new_v4(),
        Money::from_major(50.0),
        RecurrenceUnit::Weekly,
    )
    .expect("valid config");
    let period = Period::resolve(config.time_unit, reference);
    let snapshot = SnapshotService::snapshot(&config, Money::from_major(55.0), period);

    let json = serde_json::to_value(&snapshot).expect("serializes");
    assert_eq!(json["budgetAmount"], 50.0);
    assert_eq!(json["timeUnit"], "weekly");
    assert_eq!(json["totalSpent"], 55.0);
    assert_eq!(json["remainingBudget"], -5.0);
    assert_eq!(json["percentageUsed"], 110.0);
    assert!(json["periodStart"].is_string());
    assert!(json["periodEnd"].is_string());
}
