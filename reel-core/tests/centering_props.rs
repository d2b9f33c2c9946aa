//! Property checks for the stop-offset algorithm and full spins.

use proptest::prelude::*;
use reel_core::position::to_viewport_indices;
use reel_core::{
    HeadlessScheduler, PhysicsEngine, PhysicsTuning, RecordingObserver, Reel,
    ReelGeometry, ReelSettings, TargetRequest, build_working_set,
    run_until_idle,
};
use reel_model::{Deceleration, Entry, SpinDuration};

fn duration() -> impl Strategy<Value = SpinDuration> {
    prop_oneof![
        Just(SpinDuration::Short),
        Just(SpinDuration::Medium),
        Just(SpinDuration::Long),
    ]
}

fn deceleration() -> impl Strategy<Value = Deceleration> {
    prop_oneof![
        Just(Deceleration::Slow),
        Just(Deceleration::Medium),
        Just(Deceleration::Fast),
    ]
}

proptest! {
    #[test]
    fn target_lands_winner_in_center(
        len in 1usize..6_000,
        winner_seed in any::<usize>(),
        rested_slot in 0u32..200_000,
        duration in duration(),
        deceleration in deceleration(),
    ) {
        let geometry = ReelGeometry::default();
        let physics = PhysicsEngine::new(
            duration,
            deceleration,
            &PhysicsTuning::default(),
        );
        let winner_index = winner_seed % len;
        let current_position = f64::from(rested_slot) * geometry.item_height;

        let target = physics.target_offset(
            TargetRequest { winner_index, len, current_position },
            &geometry,
        );
        let circumference = geometry.circumference(len);
        let travelled = target - current_position;

        prop_assert!(travelled > 0.0);
        let rotations = physics.state().total_rotations;
        prop_assert!(travelled >= rotations * circumference);
        prop_assert!(travelled < (rotations + 1.0) * circumference);

        let ix = to_viewport_indices(target, len, geometry.item_height);
        prop_assert_eq!(ix.pixel_offset, 0.0);
        prop_assert_eq!(
            (ix.top_index + geometry.center_index) % len,
            winner_index
        );
    }

    #[test]
    fn pools_under_minimum_repeat_original_entries(
        n in 1usize..100,
        pick in any::<usize>(),
    ) {
        let entries: Vec<Entry> =
            (0..n).map(|i| Entry::new(format!("T-{i:04}"), "A", "B")).collect();
        let winner = entries[pick % n].ticket_id.clone();
        let set = build_working_set(&entries, &winner).unwrap();
        prop_assert_eq!(set.len(), 100);
        prop_assert!(set.entries().iter().all(|e| entries.contains(e)));
        prop_assert!(set.winner().matches_ticket(&winner));
    }

    #[test]
    fn pools_over_maximum_are_bounded(
        n in 5_001usize..12_000,
        pick in any::<usize>(),
    ) {
        let entries: Vec<Entry> =
            (0..n).map(|i| Entry::new(i.to_string(), "A", "B")).collect();
        let winner = (pick % n).to_string();
        let set = build_working_set(&entries, &winner).unwrap();
        prop_assert_eq!(set.len(), 5_000);
        prop_assert_eq!(&set.winner().ticket_id, &winner);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn full_spin_centers_winner_and_moves_forward(
        n in 1usize..400,
        pick in any::<usize>(),
        duration in duration(),
        deceleration in deceleration(),
    ) {
        let entries: Vec<Entry> =
            (1..=n).map(|i| Entry::new(format!("#{i}"), "A", "B")).collect();
        let winner = format!("{}", pick % n + 1);
        let mut reel = Reel::new(
            ReelSettings::default(),
            HeadlessScheduler::new(),
            RecordingObserver::new(),
        );

        reel.spin(&entries, &winner, duration, deceleration);
        let start = reel.position();
        let summary = run_until_idle(&mut reel, 20_000).unwrap();

        let observer = reel.observer();
        prop_assert_eq!(observer.completions.len(), 1);
        prop_assert!(summary.final_position > start);
        prop_assert!(observer.positions.windows(2).all(|w| w[0] <= w[1]));
        let center = observer.final_center().unwrap();
        prop_assert_eq!(center, format!("#{winner}"));
    }
}
