mod common;

use common::*;
use plasma_ir::BinaryOperator;
use plasma_runtime::protocol::calculate_index;
use proptest::prelude::*;

proptest! {
    #[test]
    fn in_range_indices_normalise(len in 1usize..64, offset in 0usize..64) {
        let offset = offset % len;
        let forward = i64::try_from(offset).unwrap();
        let backward = forward - i64::try_from(len).unwrap();
        prop_assert_eq!(calculate_index(forward, len), Some(offset));
        prop_assert_eq!(calculate_index(backward, len), Some(offset));
    }

    #[test]
    fn out_of_range_indices_are_rejected(len in 0usize..64, beyond in 0i64..64) {
        let len_i = i64::try_from(len).unwrap();
        prop_assert_eq!(calculate_index(len_i + beyond, len), None);
        prop_assert_eq!(calculate_index(-len_i - 1 - beyond, len), None);
    }

    #[test]
    fn array_repeat_length_matches_count(items in 0usize..4, count in -4i64..5) {
        let elements = (0..items).map(|i| int(i64::try_from(i).unwrap())).collect();
        let code = call_named(
            "len",
            vec![binary(array(elements), BinaryOperator::Mul, int(count))],
        );
        let expected = items * usize::try_from(count.unsigned_abs()).unwrap();
        prop_assert_eq!(value_of(code), expected.to_string());
    }
}

#[test]
fn extreme_indices_do_not_overflow() {
    assert_eq!(calculate_index(i64::MIN, 3), None);
    assert_eq!(calculate_index(i64::MAX, 3), None);
}
