//! Property tests: encode/decode is the identity on valid trees and the
//! Modified UTF-8 codec round-trips any Rust string.

use nbtree::{BigEndian, Compound, LittleEndian, List, NbtString, Node, mutf8, read_slice};
use proptest::prelude::*;

/// Number of leaf tags `leaf_of` can generate.
const LEAF_KINDS: usize = 10;

fn leaf_of(kind: usize) -> BoxedStrategy<Node> {
    match kind {
        0 => any::<i8>().prop_map(Node::Byte).boxed(),
        1 => any::<i16>().prop_map(Node::Short).boxed(),
        2 => any::<i32>().prop_map(Node::Int).boxed(),
        3 => any::<i64>().prop_map(Node::Long).boxed(),
        4 => any::<f32>().prop_map(Node::Float).boxed(),
        5 => any::<f64>().prop_map(Node::Double).boxed(),
        6 => ".{0,16}".prop_map(Node::from).boxed(),
        7 => prop::collection::vec(any::<i8>(), 0..16)
            .prop_map(Node::from)
            .boxed(),
        8 => prop::collection::vec(any::<i32>(), 0..16)
            .prop_map(Node::from)
            .boxed(),
        _ => prop::collection::vec(any::<i64>(), 0..16)
            .prop_map(Node::from)
            .boxed(),
    }
}

fn leaf() -> impl Strategy<Value = Node> {
    (0..LEAF_KINDS).prop_flat_map(leaf_of)
}

fn into_list(nodes: Vec<Node>) -> Node {
    Node::from(List::from_nodes(nodes).unwrap())
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        let compound = prop::collection::vec((".{0,8}", inner.clone()), 0..6)
            .prop_map(|entries| Compound::from_entries(entries).unwrap());
        prop_oneof![
            // pick the element tag first, then independent values of it
            (0..LEAF_KINDS)
                .prop_flat_map(|kind| prop::collection::vec(leaf_of(kind), 0..6))
                .prop_map(into_list),
            prop::collection::vec(compound.clone().prop_map(Node::from), 0..4)
                .prop_map(into_list),
            // nested lists: repeat one generated node
            (inner, 0..4usize).prop_map(|(node, n)| into_list(vec![node; n])),
            compound.prop_map(Node::from),
        ]
    })
}

proptest! {
    #[test]
    fn prop_round_trip_big_endian(node in tree()) {
        let bytes = node.write_to_vec::<BigEndian>().unwrap();
        prop_assert_eq!(read_slice::<BigEndian>(&bytes).unwrap(), node);
    }

    #[test]
    fn prop_round_trip_little_endian(node in tree()) {
        let bytes = node.write_to_vec::<LittleEndian>().unwrap();
        prop_assert_eq!(read_slice::<LittleEndian>(&bytes).unwrap(), node);
    }

    #[test]
    fn prop_reencode_is_stable(node in tree()) {
        let first = node.write_to_vec::<BigEndian>().unwrap();
        let second = read_slice::<BigEndian>(&first).unwrap().write_to_vec::<BigEndian>().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_mutf8_round_trip(text in any::<String>()) {
        let encoded = mutf8::encode(&text);
        prop_assert!(!encoded.contains(&0));
        prop_assert_eq!(encoded.len(), mutf8::encoded_len(&text));
        prop_assert!(mutf8::validate(&encoded).is_ok());
        prop_assert_eq!(mutf8::decode(&encoded).unwrap(), text.as_str());
    }

    #[test]
    fn prop_nbt_string_round_trip(text in any::<String>()) {
        let owned = NbtString::from(text.as_str());
        prop_assert_eq!(owned.to_utf8_string(), text);
    }

    #[test]
    fn prop_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = read_slice::<BigEndian>(&data);
        let _ = mutf8::decode(&data);
    }
}
