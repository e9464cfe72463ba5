use plasma_core::{FastHashSet, Handle, Heap, fast_set_new};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Allocate,
    Free(usize),
    Grow,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Allocate),
        3 => any::<usize>().prop_map(Step::Free),
        1 => Just(Step::Grow),
    ]
}

proptest! {
    #[test]
    fn live_slots_never_exceed_capacity(steps in prop::collection::vec(step(), 0..400)) {
        let mut heap: Heap<u32> = Heap::new(8);
        let mut live: Vec<Handle<u32>> = Vec::new();
        let mut issued: FastHashSet<Handle<u32>> = fast_set_new();

        for s in steps {
            match s {
                Step::Allocate => {
                    if let Some(h) = heap.allocate() {
                        // A slot is only re-issued after it was given back.
                        prop_assert!(issued.insert(h), "handle {:?} issued twice", h);
                        live.push(h);
                    } else {
                        prop_assert!(heap.is_empty());
                    }
                }
                Step::Free(i) => {
                    if !live.is_empty() {
                        let h = live.swap_remove(i % live.len());
                        prop_assert!(heap.deallocate(h));
                        issued.remove(&h);
                    }
                }
                Step::Grow => {
                    let next = heap.max_page_capacity() * 2;
                    heap.new_page(next.min(256));
                }
            }
            let stats = heap.stats();
            prop_assert!(stats.live <= stats.capacity);
            prop_assert_eq!(stats.live, live.len());
            prop_assert_eq!(stats.live + stats.free, stats.capacity);
        }
    }
}

proptest! {
    #[test]
    fn remove_empty_pages_keeps_live_records(alloc in 1usize..40, grow in 1usize..4) {
        let mut heap: Heap<u64> = Heap::new(4);
        for _ in 0..grow {
            let next = heap.max_page_capacity() * 2;
            heap.new_page(next);
        }
        let mut live = Vec::new();
        for n in 0..alloc {
            match heap.allocate() {
                Some(h) => {
                    *heap.get_mut(h).unwrap() = n as u64;
                    live.push((h, n as u64));
                }
                None => break,
            }
        }
        heap.remove_empty_pages();
        for (h, n) in &live {
            prop_assert_eq!(heap.get(*h).copied(), Some(*n));
        }
        prop_assert!(heap.page_count() >= 1);
        prop_assert_eq!(heap.live(), live.len());
    }
}

#[test]
fn exhausted_heap_reports_empty_until_grown() {
    let mut heap: Heap<u8> = Heap::new(3);
    for _ in 0..3 {
        assert!(heap.allocate().is_some());
    }
    assert!(heap.is_empty());
    assert!(heap.allocate().is_none());

    let page = heap.new_page(heap.max_page_capacity() * 2);
    assert_eq!(heap.page(page).unwrap().capacity(), 6);
    assert_eq!(heap.available(), 6);
    assert!(heap.allocate().is_some());
}

#[test]
fn allocated_lists_every_live_handle_once() {
    let mut heap: Heap<u8> = Heap::new(5);
    let a = heap.allocate().unwrap();
    let b = heap.allocate().unwrap();
    let c = heap.allocate().unwrap();
    heap.deallocate(b);
    assert_eq!(heap.allocated(), vec![a, c]);
}
