//! Property tests for coded index packing and the sorted table comparators.

use std::cmp::Ordering;

use cilmeta::prelude::*;
use proptest::prelude::*;
use strum::{EnumCount, IntoEnumIterator};

fn coded_index_type(index: usize) -> CodedIndexType {
    CodedIndexType::iter()
        .nth(index % CodedIndexType::COUNT)
        .unwrap()
}

fn target(kind: CodedIndexType, slot: usize) -> TableId {
    let targets: Vec<TableId> = kind.tables().iter().flatten().copied().collect();
    targets[slot % targets.len()]
}

fn custom_attribute(parent: (usize, u32), constructor: u32) -> CustomAttributeRaw {
    let kind = CodedIndexType::HasCustomAttribute;
    CustomAttributeRaw {
        parent: CodedIndex::new(kind, target(kind, parent.0), parent.1).unwrap(),
        constructor: CodedIndex::new(
            CodedIndexType::CustomAttributeType,
            TableId::MemberRef,
            constructor,
        )
        .unwrap(),
        value: 0,
    }
}

fn parent() -> impl Strategy<Value = (usize, u32)> {
    (0..32_usize, 1..0x1000_u32)
}

proptest! {
    /// Every (kind, table, row) triple survives packing and unpacking.
    #[test]
    fn coded_index_round_trip(kind in 0..32_usize, slot in 0..32_usize, row in 1..=0x07FF_FFFF_u32) {
        let kind = coded_index_type(kind);
        let table = target(kind, slot);

        let index = CodedIndex::new(kind, table, row).unwrap();
        let decoded = CodedIndex::decode(kind, index.encoded()).unwrap();

        prop_assert_eq!(decoded.tag, table);
        prop_assert_eq!(decoded.row, row);
        prop_assert_eq!(decoded.token, Token::from_parts(table, row));
    }

    /// The parent comparator is reflexive, antisymmetric and transitive.
    #[test]
    fn comparator_is_a_total_order(
        a in parent(),
        b in parent(),
        c in parent(),
        constructor in 1..100_u32,
    ) {
        let a = custom_attribute(a, constructor);
        let b = custom_attribute(b, constructor);
        let c = custom_attribute(c, constructor);

        prop_assert_eq!(a.compare(&a), Ordering::Equal);
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());

        if a.compare(&b) != Ordering::Greater && b.compare(&c) != Ordering::Greater {
            prop_assert_ne!(a.compare(&c), Ordering::Greater);
        }
    }

    /// Sorting keeps every row and leaves equal keys in insertion order.
    #[test]
    fn sort_is_stable(parents in prop::collection::vec(parent(), 1..64)) {
        let mut table = SortedTable::new();
        for (position, parent) in parents.iter().enumerate() {
            table.add_row(custom_attribute(*parent, position as u32 + 1));
        }
        table.sort();

        let rows: Vec<&CustomAttributeRaw> = table.iter().collect();
        prop_assert_eq!(rows.len(), parents.len());
        for pair in rows.windows(2) {
            match pair[0].compare(pair[1]) {
                Ordering::Less => {}
                Ordering::Equal => prop_assert!(pair[0].constructor.row < pair[1].constructor.row),
                Ordering::Greater => prop_assert!(false, "rows out of order"),
            }
        }
    }
}
