#![cfg(test)]

// Property tests for ChainedList kept inside the crate so they can check
// the private head/tail invariants after every step.

use crate::chain::ChainedList;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    PushBack(i32),
    // Indices are raw; they are reduced against the current length (with
    // some slack past the end to exercise the out-of-range paths).
    InsertAt(usize, i32),
    RemoveAt(usize),
    Get(usize),
    RemoveFirst(i32),
    PopFront,
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        3 => (0usize..64, any::<i32>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        3 => (0usize..64).prop_map(Op::RemoveAt),
        2 => (0usize..64).prop_map(Op::Get),
        2 => (-4i32..4).prop_map(Op::RemoveFirst),
        1 => Just(Op::PopFront),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..120)
}

// Index in [0, len + 2): mostly valid, occasionally one or two past the end.
fn pick(raw: usize, len: usize) -> usize {
    raw % (len + 2)
}

// Property: State-machine equivalence against Vec.
// Invariants exercised across random operation sequences:
// - `get(i)` matches the model for in-range and out-of-range indices.
// - `insert_at(len, x)` behaves as `push_back(x)`; `insert_at(> len)` is
//   rejected and returns the payload.
// - `remove_at`/`remove_first`/`pop_front` return the model's element and
//   keep head/tail/len consistent.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_matches_vec(ops in arb_ops()) {
        let mut sut: ChainedList<i32> = ChainedList::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    sut.push_back(v);
                    model.push(v);
                }
                Op::InsertAt(raw, v) => {
                    let i = pick(raw, model.len());
                    match sut.insert_at(i, v) {
                        Ok(()) => {
                            prop_assert!(i <= model.len());
                            model.insert(i, v);
                        }
                        Err(back) => {
                            prop_assert!(i > model.len());
                            prop_assert_eq!(back, v);
                        }
                    }
                }
                Op::RemoveAt(raw) => {
                    let i = pick(raw, model.len());
                    let expected = (i < model.len()).then(|| model.remove(i));
                    prop_assert_eq!(sut.remove_at(i), expected);
                }
                Op::Get(raw) => {
                    let i = pick(raw, model.len());
                    prop_assert_eq!(sut.get(i), model.get(i));
                }
                Op::RemoveFirst(v) => {
                    let pos = model.iter().position(|&x| x == v);
                    let expected = pos.map(|i| model.remove(i));
                    prop_assert_eq!(sut.remove_first(|&x| x == v), expected);
                }
                Op::PopFront => {
                    let expected = (!model.is_empty()).then(|| model.remove(0));
                    prop_assert_eq!(sut.pop_front(), expected);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            sut.assert_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.front(), model.first());
            prop_assert_eq!(sut.back(), model.last());
            prop_assert_eq!(sut.iter().copied().collect::<Vec<_>>(), model.clone());
        }
    }
}

// Property: for any sequence of appends, `get(i)` returns the i-th
// appended payload and the chain can be drained back in the same order.
proptest! {
    #[test]
    fn prop_append_order_preserved(xs in proptest::collection::vec(any::<i32>(), 0..200)) {
        let mut l: ChainedList<i32> = xs.iter().copied().collect();
        for (i, x) in xs.iter().enumerate() {
            prop_assert_eq!(l.get(i), Some(x));
        }
        prop_assert!(l.get(xs.len()).is_none());
        let drained: Vec<i32> = l.drain().collect();
        prop_assert_eq!(drained, xs);
        prop_assert!(l.is_empty());
        l.assert_invariants();
    }
}

// Property: `insert_at(len, x)` and `push_back(x)` produce the same list.
proptest! {
    #[test]
    fn prop_insert_at_len_is_append(
        xs in proptest::collection::vec(any::<i32>(), 0..50),
        x in any::<i32>()
    ) {
        let mut a: ChainedList<i32> = xs.iter().copied().collect();
        let mut b: ChainedList<i32> = xs.iter().copied().collect();
        prop_assert!(a.insert_at(a.len(), x).is_ok());
        b.push_back(x);
        prop_assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
        a.assert_invariants();
    }
}
