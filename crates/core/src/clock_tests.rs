// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_past_2020() {
    // 2020-01-01T00:00:00Z in nanoseconds
    let jan_2020 = 1_577_836_800_000_000_000_i64;
    assert!(SystemClock.epoch_ns() > jan_2020);
}

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock;
    let t1 = clock.epoch_ns();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.epoch_ns();
    assert!(t2 > t1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::at(100);
    clock.advance(Duration::from_nanos(150));
    assert_eq!(clock.epoch_ns(), 250);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.epoch_ns();
    clock2.advance(Duration::from_secs(30));
    assert_eq!(clock1.epoch_ns() - t1, 30_000_000_000);
}

#[test]
fn fake_clock_set() {
    let clock = FakeClock::default();
    clock.set_epoch_ns(42);
    assert_eq!(clock.epoch_ns(), 42);
}

#[test]
fn fake_clock_advance_saturates() {
    let clock = FakeClock::at(i64::MAX - 1);
    clock.advance(Duration::from_secs(1));
    assert_eq!(clock.epoch_ns(), i64::MAX);
}
