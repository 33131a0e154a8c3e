//! Tests for Node, Array, List and Compound

use std::collections::{BTreeMap, HashMap};

use nbtree::{
    ByteArray, Compound, Error, IntArray, List, LongArray, NbtStr, NbtString, Node, Tag, kind,
};

// ==================== Node ====================

#[test]
fn test_node_default_is_end() {
    let node = Node::default();
    assert!(node.is_end());
    assert_eq!(node.tag(), Tag::End);
}

#[test]
fn test_node_from_conversions() {
    assert_eq!(Node::from(1i8), Node::Byte(1));
    assert_eq!(Node::from(true), Node::Byte(1));
    assert_eq!(Node::from(2i16), Node::Short(2));
    assert_eq!(Node::from(3i32), Node::Int(3));
    assert_eq!(Node::from(4i64), Node::Long(4));
    assert_eq!(Node::from(5.0f32), Node::Float(5.0));
    assert_eq!(Node::from(6.0f64), Node::Double(6.0));
    assert_eq!(Node::from("s").tag(), Tag::String);
    assert_eq!(Node::from(String::from("s")), Node::from("s"));
    assert_eq!(Node::from(vec![1i8, 2]).tag(), Tag::ByteArray);
    assert_eq!(Node::from(vec![1i32, 2]).tag(), Tag::IntArray);
    assert_eq!(Node::from(vec![1i64, 2]).tag(), Tag::LongArray);
    assert_eq!(Node::from(List::new()).tag(), Tag::List);
    assert_eq!(Node::from(Compound::new()).tag(), Tag::Compound);
}

#[test]
fn test_node_typed_accessors() {
    let node = Node::Int(42);
    assert_eq!(node.as_int().unwrap(), 42);
    assert!(node.is::<kind::Int>());
    assert!(!node.is::<kind::Long>());
    assert_eq!(*node.get::<kind::Int>().unwrap(), 42);

    match node.as_long() {
        Err(Error::TypeMismatch(Tag::Long, Tag::Int)) => {}
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
    match node.as_compound() {
        Err(Error::TypeMismatch(Tag::Compound, Tag::Int)) => {}
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn test_node_mutable_accessors() {
    let mut node = Node::from("abc");
    node.as_string_mut().unwrap().push_str("d");
    assert_eq!(node.as_string().unwrap(), "abcd");

    *node.get_mut::<kind::String>().unwrap() = NbtString::from("z");
    assert_eq!(node, Node::from("z"));
    assert!(node.get_mut::<kind::Int>().is_err());
}

#[test]
fn test_node_into_payload() {
    let node = Node::from(vec![7i32, 8]);
    let array = node.into_payload::<kind::IntArray>().unwrap();
    assert_eq!(array.as_slice(), &[7, 8]);

    match Node::Byte(1).into_payload::<kind::String>() {
        Err(Error::TypeMismatch(Tag::String, Tag::Byte)) => {}
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn test_node_take_leaves_end() {
    let mut node = Node::from("moved");
    let taken = node.take();
    assert_eq!(taken, Node::from("moved"));
    assert!(node.is_end());
}

#[test]
fn test_node_clone_is_deep() {
    let mut inner = Compound::new();
    inner.insert("v", 1i32).unwrap();
    let mut root = Compound::new();
    root.insert("inner", inner).unwrap();
    let original = Node::from(root);

    let mut copy = original.clone();
    copy.as_compound_mut()
        .unwrap()
        .get_mut("inner")
        .unwrap()
        .as_compound_mut()
        .unwrap()
        .insert("v", 2i32)
        .unwrap();

    assert_ne!(copy, original);
    assert_eq!(
        original.view().path(["inner", "v"]).unwrap().as_int().unwrap(),
        1
    );
}

#[test]
fn test_node_float_equality_by_bits() {
    assert_eq!(Node::Float(f32::NAN), Node::Float(f32::NAN));
    assert_ne!(Node::Double(0.0), Node::Double(-0.0));
    assert_ne!(Node::Int(1), Node::Long(1));
}

// ==================== Array ====================

#[test]
fn test_array_basics() {
    let mut array = IntArray::new();
    assert_eq!(array.tag(), Tag::IntArray);
    array.push(1);
    array.push(3);
    array.insert(1, 2).unwrap();
    assert_eq!(array.as_slice(), &[1, 2, 3]);
    assert!(matches!(array.insert(4, 9), Err(Error::InvalidLength(4))));
    array.insert(3, 4).unwrap();
    assert_eq!(array.pop(), Some(4));
    assert_eq!(array.remove(0), Some(1));
    assert_eq!(array.remove(5), None);
    assert_eq!(array.pop(), Some(3));
    assert_eq!(array.len(), 1);
    array.clear();
    assert!(array.is_empty());
}

#[test]
fn test_array_slice_api() {
    let mut array: LongArray = vec![3i64, 1, 2].into();
    array.sort();
    assert_eq!(array.into_vec(), vec![1, 2, 3]);

    let bytes: ByteArray = [1i8, -1].as_slice().into();
    assert_eq!(bytes.tag(), Tag::ByteArray);
    assert_eq!(bytes.iter().copied().sum::<i8>(), 0);

    let collected: ByteArray = (0..4i8).collect();
    assert_eq!(collected.len(), 4);
    assert_eq!(format!("{collected:?}"), "[0, 1, 2, 3]");
}

// ==================== List ====================

#[test]
fn test_empty_list_has_end_tag() {
    let list = List::new();
    assert_eq!(list.element_tag(), Tag::End);
    assert!(list.is_empty());
}

#[test]
fn test_list_push_fixes_tag() {
    let mut list = List::new();
    list.push(1i32).unwrap();
    assert_eq!(list.element_tag(), Tag::Int);
    list.push(2i32).unwrap();
    assert_eq!(list.len(), 2);

    match list.push(3i64) {
        Err(Error::TypeMismatch(Tag::Int, Tag::Long)) => {}
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
    assert_eq!(list.len(), 2);
}

#[test]
fn test_list_rejects_end() {
    let mut list = List::new();
    assert!(matches!(list.push(Node::End), Err(Error::InvalidTag(0))));
    assert!(list.is_empty());
}

#[test]
fn test_list_tag_resets_when_emptied() {
    let mut list = List::new();
    list.push("a").unwrap();
    assert_eq!(list.pop(), Some(Node::from("a")));
    assert_eq!(list.element_tag(), Tag::End);
    list.push(1i8).unwrap();
    assert_eq!(list.element_tag(), Tag::Byte);
    assert_eq!(list.remove(0), Some(Node::Byte(1)));
    assert_eq!(list.element_tag(), Tag::End);
    assert_eq!(list.remove(0), None);
}

#[test]
fn test_list_insert_and_index() {
    let mut list = List::new();
    list.push(1i16).unwrap();
    list.push(3i16).unwrap();
    list.insert(1, 2i16).unwrap();
    assert_eq!(list[1], Node::Short(2));
    assert_eq!(list.get(2), Some(&Node::Short(3)));
    assert_eq!(list.get(3), None);
    assert!(list.insert(0, 1.0f32).is_err());
    assert!(matches!(
        list.insert(4, 4i16),
        Err(Error::InvalidLength(4))
    ));
    assert_eq!(list.len(), 3);
    list.insert(3, 4i16).unwrap();
    assert_eq!(list[3], Node::Short(4));
}

#[test]
fn test_list_from_nodes() {
    let list = List::from_nodes([Node::Int(1), Node::Int(2)]).unwrap();
    assert_eq!(list.len(), 2);
    assert!(List::from_nodes([Node::Int(1), Node::Byte(2)]).is_err());
    assert!(List::try_from(vec![Node::End]).is_err());
}

#[test]
fn test_list_from_payloads_and_typed() {
    let list = List::from_payloads::<kind::Double, _>([0.5, 1.5]);
    assert_eq!(list.element_tag(), Tag::Double);
    let values: Vec<f64> = list.typed::<kind::Double>().unwrap().copied().collect();
    assert_eq!(values, vec![0.5, 1.5]);
    assert!(matches!(
        list.typed::<kind::Int>(),
        Err(Error::TypeMismatch(Tag::Int, Tag::Double))
    ));

    let empty = List::from_payloads::<kind::Int, _>([]);
    assert_eq!(empty.element_tag(), Tag::End);
    assert_eq!(empty.typed::<kind::Int>().unwrap().count(), 0);
}

#[test]
fn test_list_push_unchecked() {
    let mut list = List::new();
    list.push_unchecked(Node::Long(1));
    list.push_unchecked(Node::Long(2));
    assert_eq!(list.element_tag(), Tag::Long);
    assert_eq!(list.into_vec(), vec![Node::Long(1), Node::Long(2)]);
}

#[test]
fn test_list_iteration() {
    let list = List::from_payloads::<kind::Int, _>([1, 2, 3]);
    let sum: i32 = list.iter().map(|n| n.as_int().unwrap()).sum();
    assert_eq!(sum, 6);
    let owned: Vec<Node> = list.clone().into_iter().collect();
    assert_eq!(owned.len(), 3);
    assert_eq!((&list).into_iter().count(), 3);
}

#[test]
fn test_list_get_mut_keeps_tag() {
    let mut list = List::from_payloads::<kind::Int, _>([1, 2]);
    {
        let mut slot = list.get_mut(0).unwrap();
        assert_eq!(slot.replace(10i32).unwrap(), Node::Int(1));
        assert!(matches!(
            slot.replace(1i8),
            Err(Error::TypeMismatch(Tag::Int, Tag::Byte))
        ));
    }
    for mut item in list.iter_mut() {
        *item.payload_mut::<kind::Int>().unwrap() += 1;
    }
    assert_eq!(list.as_slice(), &[Node::Int(11), Node::Int(3)]);
}

// ==================== Compound ====================

#[test]
fn test_compound_insert_replace() {
    let mut compound = Compound::new();
    assert_eq!(compound.insert("a", 1i32).unwrap(), None);
    assert_eq!(compound.insert("a", "x").unwrap(), Some(Node::Int(1)));
    assert_eq!(compound.len(), 1);
    assert_eq!(compound.get("a"), Some(&Node::from("x")));
}

#[test]
fn test_compound_rejects_end() {
    let mut compound = Compound::new();
    assert!(matches!(
        compound.insert("a", Node::End),
        Err(Error::InvalidTag(0))
    ));
    assert!(compound.is_empty());
}

#[test]
fn test_compound_lookup_key_types() {
    let mut compound = Compound::new();
    compound.insert("nul\0key", 1i8).unwrap();

    assert!(compound.contains_key("nul\0key"));
    assert!(compound.contains_key(&String::from("nul\0key")));
    assert!(compound.contains_key(&NbtString::from("nul\0key")));
    let view = NbtStr::from_mutf8(b"nul\xC0\x80key").unwrap();
    assert!(compound.contains_key(view));
    assert!(!compound.contains_key("nul"));
}

#[test]
fn test_compound_remove_and_clear() {
    let mut compound = Compound::from_entries([("a", 1i32), ("b", 2i32)]).unwrap();
    assert_eq!(compound.remove("a"), Some(Node::Int(1)));
    assert_eq!(compound.remove("a"), None);
    assert_eq!(compound.len(), 1);
    compound.clear();
    assert!(compound.is_empty());
}

#[test]
fn test_compound_iteration_is_sorted() {
    let compound = Compound::from_entries([("b", 2i32), ("c", 3i32), ("a", 1i32)]).unwrap();
    let keys: Vec<String> = compound.keys().map(|k| k.to_utf8_string()).collect();
    assert_eq!(keys, ["a", "b", "c"]);
    let values: Vec<i32> = compound.values().map(|v| v.as_int().unwrap()).collect();
    assert_eq!(values, [1, 2, 3]);
    assert_eq!(compound.iter().count(), 3);
}

#[test]
fn test_compound_with_hash_map_storage() {
    let mut compound = Compound::<HashMap<NbtString, Node>>::default();
    assert_eq!(compound.insert("a", 1i32).unwrap(), None);
    assert_eq!(compound.insert("a", 2i32).unwrap(), Some(Node::Int(1)));
    compound.insert("nul\0", "x").unwrap();
    assert!(compound.insert("end", Node::End).is_err());

    assert_eq!(compound.len(), 2);
    assert_eq!(compound.get("a"), Some(&Node::Int(2)));
    assert!(compound.contains_key("nul\0"));
    compound.get_mut("a").unwrap().replace(Node::Int(5)).unwrap();
    assert_eq!(compound.remove("a"), Some(Node::Int(5)));
    assert_eq!(compound.into_map().len(), 1);
}

#[test]
fn test_compound_from_map() {
    let mut map = HashMap::new();
    map.insert(NbtString::from("k"), Node::Byte(1));
    let compound = Compound::from_map(map).unwrap();
    assert_eq!(compound.get("k"), Some(&Node::Byte(1)));

    let mut with_end = BTreeMap::new();
    with_end.insert(NbtString::from("k"), Node::End);
    assert!(matches!(
        Compound::from_map(with_end),
        Err(Error::InvalidTag(0))
    ));
}

#[test]
fn test_compound_merge_across_storages() {
    let mut sorted = Compound::from_entries([("a", 1i32), ("b", 2i32)]).unwrap();
    let mut hashed = Compound::<HashMap<NbtString, Node>>::default();
    hashed.insert("b", 20i32).unwrap();
    hashed.insert("c", 30i32).unwrap();

    sorted.merge(hashed);
    let values: Vec<i32> = sorted.values().map(|v| v.as_int().unwrap()).collect();
    assert_eq!(values, [1, 20, 30]);
}

#[test]
fn test_compound_equality_ignores_insertion_order() {
    let a = Compound::from_entries([("x", 1i32), ("y", 2i32)]).unwrap();
    let b = Compound::from_entries([("y", 2i32), ("x", 1i32)]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_compound_get_mut_rejects_end() {
    let mut compound = Compound::from_entries([("k", 1i32)]).unwrap();
    let mut value = compound.get_mut("k").unwrap();
    assert!(matches!(value.replace(Node::End), Err(Error::InvalidTag(0))));
    assert_eq!(value.replace("text").unwrap(), Node::Int(1));
    assert_eq!(compound.get("k"), Some(&Node::from("text")));
}

#[test]
fn test_compound_iter_mut_and_merge() {
    let mut compound = Compound::from_entries([("a", 1i32), ("b", 2i32)]).unwrap();
    for (_, mut value) in compound.iter_mut() {
        *value.payload_mut::<kind::Int>().unwrap() *= 10;
    }
    compound.merge(Compound::from_entries([("b", 0i32), ("c", 3i32)]).unwrap());
    let entries: Vec<(String, i32)> = compound
        .into_iter()
        .map(|(k, v)| (k.to_utf8_string(), v.as_int().unwrap()))
        .collect();
    assert_eq!(
        entries,
        vec![
            (String::from("a"), 10),
            (String::from("b"), 0),
            (String::from("c"), 3)
        ]
    );
}
