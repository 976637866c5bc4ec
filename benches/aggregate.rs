//! This bench measures budget estimates over long itineraries, and loading a
//! planner with many trips from disk.

#![allow(missing_docs)]

use chrono::{Days, NaiveDate};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use globetrotter::{
    ActivityCategory, BudgetPolicy, DashboardStats, Directory, Trip, TripDetails, TripStore,
    domain::{Accommodation, ActivityDraft, Transport, TransportKind, budget, city, itinerary},
};
use non_empty_string::NonEmptyString;
use tempfile::TempDir;

/// Builds a trip with `stops` stops, each with a few activities and costs.
fn long_trip(stops: u64) -> Trip {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = start.checked_add_days(Days::new(stops * 2)).unwrap();
    let mut trip = Trip::new(TripDetails::new(
        NonEmptyString::new("Grand Tour".to_string()).unwrap(),
        start,
        end,
    ));

    let cities = city::catalog();
    for i in 0..stops {
        let arrive = start.checked_add_days(Days::new(i * 2)).unwrap();
        let leave = arrive.checked_add_days(Days::new(2)).unwrap();
        #[allow(clippy::cast_possible_truncation)]
        let city = &cities[i as usize % cities.len()];
        trip = itinerary::add_stop(&trip, city, arrive, leave);

        let stop_id = trip.stops().last().unwrap().id().clone();
        for (n, category) in ActivityCategory::ALL.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let draft = ActivityDraft::new(format!("Activity {n}"), 100.0 * n as f64, 2.0, category);
            trip = itinerary::add_activity(&trip, &stop_id, draft).unwrap();
        }
        trip = itinerary::set_transport(
            &trip,
            &stop_id,
            Some(Transport {
                kind: TransportKind::Train,
                cost: 800.0,
            }),
        )
        .unwrap();
        trip = itinerary::set_accommodation(
            &trip,
            &stop_id,
            Some(Accommodation {
                name: "Guest House".to_string(),
                cost: 2500.0,
            }),
        )
        .unwrap();
    }
    trip
}

fn summarize(c: &mut Criterion) {
    let trip = long_trip(500);
    let policy = BudgetPolicy::default();

    c.bench_function("summarize 500 stops", |b| {
        b.iter(|| budget::summarize(std::hint::black_box(trip.stops()), &policy));
    });

    let trips: Vec<Trip> = (0..50).map(|_| long_trip(20)).collect();
    c.bench_function("dashboard 50 trips", |b| {
        b.iter(|| DashboardStats::collect(std::hint::black_box(&trips), &policy));
    });
}

fn reload(c: &mut Criterion) {
    c.bench_function("open planner with 100 trips", |b| {
        b.iter_batched(
            || {
                let tmp_dir = TempDir::new().unwrap();
                let mut directory = Directory::open(tmp_dir.path().to_path_buf());
                *directory.store_mut() = TripStore::new((0..100).map(|_| long_trip(10)).collect());
                directory.flush().unwrap();
                tmp_dir
            },
            |tmp_dir| {
                let directory = Directory::open(tmp_dir.path().to_path_buf());
                (directory, tmp_dir)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, summarize, reload);
criterion_main!(benches);
