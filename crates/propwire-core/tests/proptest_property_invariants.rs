//! Property-based invariant tests for observable properties and connections.
//!
//! 1. `set(v)` notifies iff `v` differs from the current value, once per
//!    live subscriber, with `v`.
//! 2. `set_forced(v)` notifies once per live subscriber, always.
//! 3. Released subscribers are never invoked again.
//! 4. Delivery order equals subscription order.
//! 5. `value()` always equals the last stored value.
//! 6. A derivation recomputes exactly once per trigger.

use std::cell::RefCell;
use std::rc::Rc;

use propwire_core::{Derivation, MutableObservableProperty, ScopedConnection};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(i8),
    Force(i8),
    Release(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i8>().prop_map(Op::Set),
        2 => any::<i8>().prop_map(Op::Force),
        1 => (0usize..8).prop_map(Op::Release),
    ]
}

type Log = Rc<RefCell<Vec<(usize, i8)>>>;

fn subscribe_all(
    property: &MutableObservableProperty<i8>,
    count: usize,
    log: &Log,
) -> Vec<ScopedConnection> {
    (0..count)
        .map(|idx| {
            let log = Rc::clone(log);
            property.observe(move |v| log.borrow_mut().push((idx, *v)))
        })
        .collect()
}

proptest! {
    #[test]
    fn notifications_match_a_reference_model(
        initial in any::<i8>(),
        subscribers in 1usize..8,
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let property = MutableObservableProperty::new(initial);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut conns = subscribe_all(&property, subscribers, &log);

        let mut model_value = initial;
        let mut live = vec![true; subscribers];
        let mut expected: Vec<(usize, i8)> = Vec::new();

        for op in ops {
            match op {
                Op::Set(v) => {
                    let notified = property.set(v);
                    prop_assert_eq!(notified, v != model_value);
                    if v != model_value {
                        model_value = v;
                        expected.extend((0..subscribers).filter(|i| live[*i]).map(|i| (i, v)));
                    }
                }
                Op::Force(v) => {
                    property.set_forced(v);
                    model_value = v;
                    expected.extend((0..subscribers).filter(|i| live[*i]).map(|i| (i, v)));
                }
                Op::Release(idx) => {
                    if let Some(conn) = conns.get_mut(idx) {
                        conn.release();
                        live[idx] = false;
                    }
                }
            }
            prop_assert_eq!(property.value(), model_value);
        }

        prop_assert_eq!(&*log.borrow(), &expected);
        prop_assert_eq!(property.subscriber_count(), live.iter().filter(|l| **l).count());
    }

    #[test]
    fn release_is_idempotent(releases in 1usize..5, values in proptest::collection::vec(any::<i8>(), 1..16)) {
        let property = MutableObservableProperty::new(0i8);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut conns = subscribe_all(&property, 1, &log);
        for _ in 0..releases {
            conns[0].release();
        }
        for v in values {
            property.set_forced(v);
        }
        prop_assert!(log.borrow().is_empty());
        prop_assert!(!conns[0].is_connected());
    }

    #[test]
    fn derivation_recomputes_once_per_trigger(
        upstream_values in proptest::collection::vec(-1000i32..1000, 0..32),
        local_updates in 0u64..16,
    ) {
        let source = MutableObservableProperty::new(0i32);
        let mut stage = Derivation::new((source.value(), 0u64), |(v, k): &(i32, u64)| i64::from(*v) + *k as i64);
        stage.track(&source, |inputs, v| inputs.0 = *v);

        let mut changes = 0u64;
        let mut last = 0;
        for v in upstream_values {
            if source.set(v) {
                changes += 1;
            }
            last = v;
        }
        for k in 0..local_updates {
            stage.update(|inputs| inputs.1 = k);
        }

        prop_assert_eq!(stage.recompute_count(), changes + local_updates);
        let last_local = local_updates.saturating_sub(1) as i64;
        prop_assert_eq!(stage.value(), i64::from(last) + last_local);
        prop_assert_eq!(stage.inputs(|inputs| inputs.0), last);
    }
}
