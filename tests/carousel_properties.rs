//! Behavioral properties of the carousel, exercised through the public API.

use proptest::prelude::*;
use vitrine::carousel::{
    Carousel, CarouselEvent, CarouselSettings, DEFAULT_INTERVAL, Outcome, Structure,
};
use vitrine::timer::Millis;

fn structure(slide_count: usize) -> Structure {
    Structure {
        track: true,
        slide_count,
        prev: true,
        next: true,
        dots: true,
    }
}

fn manual(slide_count: usize) -> Carousel {
    Carousel::new("c", structure(slide_count), CarouselSettings::default(), 0)
}

fn autoplaying(slide_count: usize, interval: &str) -> Carousel {
    let settings = CarouselSettings::from_attributes(Some("true"), Some(interval), false);
    Carousel::new("c", structure(slide_count), settings, 0)
}

#[derive(Debug, Clone)]
enum Action {
    Next,
    Prev,
    Dot(usize),
    GoTo(usize, bool),
    Swipe(f64, f64),
    Tick(Millis),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Next),
        Just(Action::Prev),
        (0usize..12).prop_map(Action::Dot),
        (0usize..20, any::<bool>()).prop_map(|(t, u)| Action::GoTo(t, u)),
        (0.0f64..400.0, 0.0f64..400.0).prop_map(|(a, b)| Action::Swipe(a, b)),
        (0u64..5000).prop_map(Action::Tick),
    ]
}

fn apply(carousel: &mut Carousel, action: &Action, now: &mut Millis) {
    match *action {
        Action::Next => {
            carousel.handle(CarouselEvent::NextClicked, *now);
        }
        Action::Prev => {
            carousel.handle(CarouselEvent::PrevClicked, *now);
        }
        Action::Dot(index) => {
            carousel.handle(CarouselEvent::DotClicked { index }, *now);
        }
        Action::GoTo(target, user) => {
            carousel.go_to(target, user, *now);
        }
        Action::Swipe(from, to) => {
            carousel.handle(CarouselEvent::PointerDown { x: from, pointer_id: 1 }, *now);
            carousel.handle(CarouselEvent::PointerUp { x: to }, *now);
        }
        Action::Tick(dt) => {
            *now += dt;
            carousel.tick(*now);
        }
    }
}

proptest! {
    #[test]
    fn index_stays_in_bounds(
        slides in 1usize..8,
        actions in proptest::collection::vec(action(), 0..60),
    ) {
        let mut carousel = autoplaying(slides, "700");
        let mut now = 0;
        for a in &actions {
            apply(&mut carousel, a, &mut now);
            prop_assert!(carousel.index() < slides);
            let view = carousel.view();
            prop_assert_eq!(view.slides.iter().filter(|s| s.visible).count(), 1);
            prop_assert_eq!(view.dots.iter().filter(|d| d.active).count(), 1);
            prop_assert!(view.slides[carousel.index()].visible);
        }
    }

    #[test]
    fn go_to_current_is_idempotent(slides in 1usize..8, target in 0usize..8) {
        let mut carousel = manual(slides);
        carousel.go_to(target, true, 0);
        let before = carousel.view();
        let outcome = carousel.go_to(carousel.index(), true, 0);
        prop_assert_eq!(outcome, Outcome::Unchanged);
        prop_assert_eq!(carousel.view(), before);
    }

    #[test]
    fn next_never_wraps(slides in 1usize..8, presses in 0usize..20) {
        let mut carousel = manual(slides);
        for _ in 0..presses {
            carousel.handle(CarouselEvent::NextClicked, 0);
        }
        prop_assert_eq!(carousel.index(), presses.min(slides - 1));
    }

    #[test]
    fn autoplay_runs_to_last_slide_then_stops(slides in 2usize..8, interval in 1u64..3000) {
        let mut carousel = autoplaying(slides, &interval.to_string());
        let advanced = carousel.tick(interval * (slides as u64 + 5));
        prop_assert_eq!(advanced, slides - 1);
        prop_assert_eq!(carousel.index(), slides - 1);
        prop_assert!(!carousel.autoplay_active());
        prop_assert!(carousel.autoplay_halted());
    }
}

#[test]
fn autoplay_advances_once_per_interval() {
    let mut carousel = autoplaying(3, "1000");
    assert_eq!(carousel.tick(999), 0);
    assert_eq!(carousel.tick(1000), 1);
    assert_eq!(carousel.index(), 1);
    assert_eq!(carousel.tick(2000), 1);
    assert_eq!(carousel.index(), 2);
    // next tick finds the last slide and cancels the timer
    assert!(carousel.autoplay_active());
    assert_eq!(carousel.tick(3000), 0);
    assert!(!carousel.autoplay_active());
    assert_eq!(carousel.tick(60_000), 0);
    assert_eq!(carousel.index(), 2);
}

#[test]
fn controls_follow_position_for_five_slides() {
    let mut carousel = manual(5);

    let view = carousel.view();
    let prev = view.prev.unwrap();
    let next = view.next.unwrap();
    assert!(prev.disabled() && prev.hidden());
    assert_eq!(prev.aria_disabled(), "true");
    assert!(!next.disabled() && !next.hidden());

    carousel.handle(CarouselEvent::DotClicked { index: 2 }, 0);
    let view = carousel.view();
    assert!(!view.prev.unwrap().disabled());
    assert!(!view.next.unwrap().disabled());
    assert_eq!(view.track_transform.as_deref(), Some("translateX(-200%)"));

    carousel.handle(CarouselEvent::DotClicked { index: 4 }, 0);
    let view = carousel.view();
    assert!(!view.prev.unwrap().disabled());
    let next = view.next.unwrap();
    assert!(next.disabled() && next.hidden());
    assert_eq!(next.aria_disabled(), "true");
}

#[test]
fn swipe_past_threshold_moves() {
    let mut carousel = manual(3);
    carousel.handle(CarouselEvent::PointerDown { x: 100.0, pointer_id: 7 }, 0);
    assert_eq!(carousel.captured_pointer(), Some(7));
    let outcome = carousel.handle(CarouselEvent::PointerUp { x: 55.0 }, 0);
    assert_eq!(outcome, Outcome::Moved { from: 0, to: 1 });
    assert_eq!(carousel.captured_pointer(), None);

    carousel.handle(CarouselEvent::PointerDown { x: 55.0, pointer_id: 7 }, 0);
    let outcome = carousel.handle(CarouselEvent::PointerUp { x: 100.0 }, 0);
    assert_eq!(outcome, Outcome::Moved { from: 1, to: 0 });
}

#[test]
fn short_swipe_is_a_tap() {
    let mut carousel = manual(3);
    carousel.handle(CarouselEvent::PointerDown { x: 100.0, pointer_id: 1 }, 0);
    carousel.handle(CarouselEvent::PointerUp { x: 70.0 }, 0);
    assert_eq!(carousel.index(), 0);

    // exactly at the threshold is still a tap
    carousel.handle(CarouselEvent::PointerDown { x: 100.0, pointer_id: 1 }, 0);
    carousel.handle(CarouselEvent::PointerUp { x: 60.0 }, 0);
    assert_eq!(carousel.index(), 0);
}

#[test]
fn cancelled_gesture_does_nothing() {
    let mut carousel = manual(3);
    carousel.handle(CarouselEvent::PointerDown { x: 300.0, pointer_id: 1 }, 0);
    carousel.handle(CarouselEvent::PointerCancel, 0);
    assert!(!carousel.gesture_in_progress());
    assert_eq!(carousel.handle(CarouselEvent::PointerUp { x: 0.0 }, 0), Outcome::Ignored);
    assert_eq!(carousel.index(), 0);
}

#[test]
fn reduced_motion_never_advances() {
    let settings = CarouselSettings::from_attributes(Some("true"), Some("100"), true);
    let mut carousel = Carousel::new("c", structure(4), settings, 0);
    assert!(!carousel.autoplay_active());
    assert_eq!(carousel.tick(100_000), 0);
    carousel.handle(CarouselEvent::NextClicked, 0);
    assert!(!carousel.autoplay_active());
    carousel.handle(CarouselEvent::PointerLeave, 0);
    assert!(!carousel.autoplay_active());
    assert_eq!(carousel.index(), 1);
}

#[test]
fn single_slide_is_inert() {
    let mut carousel = autoplaying(1, "100");
    assert!(!carousel.autoplay_active());
    let view = carousel.view();
    assert!(view.prev.unwrap().disabled());
    assert!(view.next.unwrap().disabled());
    assert_eq!(carousel.handle(CarouselEvent::NextClicked, 0), Outcome::EdgeHit);
    assert_eq!(carousel.handle(CarouselEvent::PrevClicked, 0), Outcome::Ignored);
    assert_eq!(carousel.index(), 0);
}

#[test]
fn malformed_interval_uses_default() {
    for raw in ["abc", "", "0", "-5", "5000ms"] {
        let settings = CarouselSettings::from_attributes(Some("true"), Some(raw), false);
        assert_eq!(settings.interval, DEFAULT_INTERVAL, "interval {raw:?}");
    }
    let mut carousel = autoplaying(3, "abc");
    assert_eq!(carousel.next_autoplay_due(), Some(7000));
    assert_eq!(carousel.tick(6999), 0);
    assert_eq!(carousel.tick(7000), 1);
}

#[test]
fn hover_pauses_and_leave_resumes() {
    let mut carousel = autoplaying(4, "1000");
    carousel.handle(CarouselEvent::PointerEnter, 500);
    assert!(!carousel.autoplay_active());
    assert_eq!(carousel.tick(5000), 0);
    carousel.handle(CarouselEvent::PointerLeave, 5000);
    assert_eq!(carousel.next_autoplay_due(), Some(6000));
    assert_eq!(carousel.tick(6000), 1);
}

#[test]
fn user_navigation_restarts_countdown() {
    let mut carousel = autoplaying(4, "1000");
    carousel.handle(CarouselEvent::NextClicked, 800);
    assert_eq!(carousel.next_autoplay_due(), Some(1800));
    assert_eq!(carousel.tick(1000), 0);
    assert_eq!(carousel.tick(1800), 1);
    assert_eq!(carousel.index(), 2);
}
