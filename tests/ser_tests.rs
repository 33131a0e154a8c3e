#![cfg(feature = "serde")]

use nbtree::{Compound, List, Node};
use serde::{Deserialize, Serialize};

#[test]
fn test_serialize_scalars() {
    assert_eq!(serde_json::to_string(&Node::Byte(-1)).unwrap(), "-1");
    assert_eq!(serde_json::to_string(&Node::Long(1 << 40)).unwrap(), "1099511627776");
    assert_eq!(serde_json::to_string(&Node::Double(0.5)).unwrap(), "0.5");
    assert_eq!(serde_json::to_string(&Node::End).unwrap(), "null");
}

#[test]
fn test_serialize_string_is_decoded() {
    let json = serde_json::to_string(&Node::from("a\0\u{1F34C}")).unwrap();
    assert_eq!(json, "\"a\\u0000\u{1F34C}\"");
}

#[test]
fn test_serialize_containers() {
    let mut list = List::new();
    list.push(1i16).unwrap();
    list.push(2i16).unwrap();

    let mut root = Compound::new();
    root.insert("list", list).unwrap();
    root.insert("bytes", vec![1i8, -1]).unwrap();
    root.insert("ints", vec![7i32]).unwrap();
    root.insert("empty", Compound::new()).unwrap();

    let json = serde_json::to_string(&Node::from(root)).unwrap();
    assert_eq!(
        json,
        r#"{"bytes":[1,-1],"empty":{},"ints":[7],"list":[1,2]}"#
    );
}

#[test]
fn test_deserialize_json() {
    let node: Node =
        serde_json::from_str(r#"{"hp": 20, "speed": 0.25, "name": "Steve", "tags": ["a", "b"], "neg": -3}"#)
            .unwrap();
    let root = node.as_compound().unwrap();
    assert_eq!(root.get("hp"), Some(&Node::Long(20)));
    assert_eq!(root.get("neg"), Some(&Node::Long(-3)));
    assert_eq!(root.get("speed"), Some(&Node::Double(0.25)));
    assert_eq!(root.get("name"), Some(&Node::from("Steve")));
    let tags = root.get("tags").unwrap().as_list().unwrap();
    assert_eq!(tags.element_tag(), nbtree::Tag::String);
    assert_eq!(tags.len(), 2);
}

#[test]
fn test_deserialize_bool_and_empty_array() {
    let node: Node = serde_json::from_str(r#"{"on": true, "none": []}"#).unwrap();
    let root = node.as_compound().unwrap();
    assert_eq!(root.get("on"), Some(&Node::Byte(1)));
    assert!(root.get("none").unwrap().as_list().unwrap().is_empty());
}

#[test]
fn test_deserialize_rejects_mixed_list() {
    let result = serde_json::from_str::<Node>(r#"[1, "two"]"#);
    assert!(result.is_err());
}

#[test]
fn test_deserialize_rejects_null_entry() {
    let result = serde_json::from_str::<Node>(r#"{"gone": null}"#);
    assert!(result.is_err());
}

#[test]
fn test_deserialize_rejects_huge_unsigned() {
    assert!(serde_json::from_str::<Node>("18446744073709551615").is_err());
    assert_eq!(
        serde_json::from_str::<Node>("9223372036854775807").unwrap(),
        Node::Long(i64::MAX)
    );
}

#[derive(Serialize, Deserialize)]
struct Player {
    name: String,
    data: Node,
}

#[test]
fn test_node_inside_derived_struct() {
    let mut data = Compound::new();
    data.insert("level", 5i32).unwrap();
    let player = Player {
        name: "Alex".into(),
        data: Node::from(data),
    };

    let json = serde_json::to_string(&player).unwrap();
    assert_eq!(json, r#"{"name":"Alex","data":{"level":5}}"#);

    let back: Player = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, "Alex");
    // JSON numbers come back as the widest integer tag
    assert_eq!(back.data.view().get("level").unwrap(), Node::Long(5));
}
