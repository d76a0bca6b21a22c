use std::hint::black_box;

use calendar_core::calendar::{
    compute_calendar_view, month_grid_window, Recurrence, Transaction, TransactionDraft,
};
use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two years of history: a mix of weekly and monthly series plus scattered
/// one-offs, the shape a long-lived store converges to.
fn snapshot() -> Vec<Transaction> {
    let mut transactions = Vec::new();
    let mut id = 1;
    for offset in 0..40 {
        let anchor = day(2024, 1 + (offset % 12), 1 + offset % 27);
        let draft = TransactionDraft::new(-15.0 - offset as f64, format!("weekly {offset}"), anchor)
            .with_recurrence(Recurrence::Weekly, 1 + offset % 3);
        transactions.push(draft.into_transaction(id));
        id += 1;
    }
    for offset in 0..10 {
        let anchor = day(2024, 1 + (offset % 12), 15);
        let draft = TransactionDraft::new(2000.0, format!("monthly {offset}"), anchor)
            .with_recurrence(Recurrence::Monthly, 1);
        transactions.push(draft.into_transaction(id));
        id += 1;
    }
    for offset in 0..25 {
        let anchor = day(2025, 1 + (offset % 12), 1 + offset % 27);
        transactions.push(
            TransactionDraft::new(-120.0, format!("one-off {offset}"), anchor)
                .into_transaction(id),
        );
        id += 1;
    }
    transactions
}

fn bench_projection(c: &mut Criterion) {
    let transactions = snapshot();
    let window = month_grid_window(2026, 1).unwrap();

    c.bench_function("compute_calendar_view/january_2026", |b| {
        b.iter(|| {
            black_box(compute_calendar_view(
                black_box(&transactions),
                1000.0,
                window,
            ))
        })
    });
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
