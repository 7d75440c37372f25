use drift_bt::{action, condition, invert, selector, sequence, Inverter, Node, Sequence, Status};

#[derive(Debug, Default)]
struct Recorder {
    ticked: Vec<&'static str>,
}

fn leaf(name: &'static str, status: Status) -> Box<dyn Node<Recorder>> {
    action(move |bb: &mut Recorder, _dt| {
        bb.ticked.push(name);
        status
    })
}

const ALL: [Status; 3] = [Status::Success, Status::Failure, Status::Running];

#[test]
fn sequence_stops_at_first_non_success() {
    for first in ALL {
        for second in ALL {
            let tree = sequence(vec![
                leaf("a", first),
                leaf("b", second),
                leaf("c", Status::Success),
            ]);
            let mut bb = Recorder::default();
            let status = tree.tick(&mut bb, 0.016);

            let (expected_status, expected_order): (Status, &[&str]) = match (first, second) {
                (Status::Success, Status::Success) => (Status::Success, &["a", "b", "c"][..]),
                (Status::Success, other) => (other, &["a", "b"][..]),
                (other, _) => (other, &["a"][..]),
            };
            assert_eq!(status, expected_status, "({first:?}, {second:?})");
            assert_eq!(bb.ticked, expected_order, "({first:?}, {second:?})");
        }
    }
}

#[test]
fn selector_stops_at_first_non_failure() {
    for first in ALL {
        for second in ALL {
            let tree = selector(vec![
                leaf("a", first),
                leaf("b", second),
                leaf("c", Status::Failure),
            ]);
            let mut bb = Recorder::default();
            let status = tree.tick(&mut bb, 0.016);

            let (expected_status, expected_order): (Status, &[&str]) = match (first, second) {
                (Status::Failure, Status::Failure) => (Status::Failure, &["a", "b", "c"][..]),
                (Status::Failure, other) => (other, &["a", "b"][..]),
                (other, _) => (other, &["a"][..]),
            };
            assert_eq!(status, expected_status, "({first:?}, {second:?})");
            assert_eq!(bb.ticked, expected_order, "({first:?}, {second:?})");
        }
    }
}

#[test]
fn empty_composites_return_their_identity() {
    let mut bb = Recorder::default();
    assert_eq!(Sequence::<Recorder>::new(vec![]).tick(&mut bb, 0.0), Status::Success);
    assert_eq!(selector::<Recorder>(vec![]).tick(&mut bb, 0.0), Status::Failure);
}

#[test]
fn inverter_swaps_outcomes_and_keeps_running() {
    let mut bb = Recorder::default();
    for (inner, expected) in [
        (Status::Success, Status::Failure),
        (Status::Failure, Status::Success),
        (Status::Running, Status::Running),
    ] {
        assert_eq!(invert(leaf("x", inner)).tick(&mut bb, 0.0), expected);
        assert_eq!(Inverter::new(leaf("y", inner)).tick(&mut bb, 0.0), expected);
    }
}

#[test]
fn condition_maps_bool_to_status() {
    let mut bb = Recorder::default();
    let yes = condition(|_: &mut Recorder| true);
    let no = condition(|bb: &mut Recorder| {
        bb.ticked.push("checked");
        false
    });
    assert_eq!(yes.tick(&mut bb, 0.0), Status::Success);
    assert_eq!(no.tick(&mut bb, 0.0), Status::Failure);
    assert_eq!(bb.ticked, vec!["checked"]);
}

#[test]
fn action_receives_dt() {
    #[derive(Default)]
    struct Clock {
        elapsed: f32,
    }

    let advance = action(|bb: &mut Clock, dt| {
        bb.elapsed += dt;
        Status::Success
    });
    let mut clock = Clock::default();
    advance.tick(&mut clock, 0.25);
    advance.tick(&mut clock, 0.5);
    assert!((clock.elapsed - 0.75).abs() < 1e-6);
}

#[test]
fn one_tree_serves_many_blackboards_without_cross_talk() {
    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    let tree = sequence(vec![
        condition(|bb: &mut Counter| bb.hits < 2),
        action(|bb: &mut Counter, _| {
            bb.hits += 1;
            Status::Running
        }),
    ]);

    let mut a = Counter::default();
    let mut b = Counter::default();
    assert_eq!(tree.tick(&mut a, 0.1), Status::Running);
    assert_eq!(tree.tick(&mut a, 0.1), Status::Running);
    assert_eq!(tree.tick(&mut a, 0.1), Status::Failure);
    assert_eq!(tree.tick(&mut b, 0.1), Status::Running);
    assert_eq!((a.hits, b.hits), (2, 1));
}

#[test]
fn status_helpers() {
    assert_eq!(Status::from(true), Status::Success);
    assert_eq!(Status::from(false), Status::Failure);
    assert!(Status::Running.is_running());
    assert_eq!(Status::Running.invert(), Status::Running);
    assert_eq!(Status::Failure.as_str(), "failure");
}
