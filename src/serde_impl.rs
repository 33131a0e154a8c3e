//! Serde support for [`Node`] trees.
//!
//! A tree serializes through the serde data model: scalars as themselves,
//! strings as UTF-8 text, arrays and lists as sequences, compounds as maps and
//! End as unit. Deserializing picks the narrowest tag that holds each value.
//!
//! ```
//! use nbtree::{Compound, Node};
//!
//! let mut compound = Compound::new();
//! compound.insert("hp", 20i32).unwrap();
//! let json = serde_json::to_string(&Node::from(compound)).unwrap();
//! assert_eq!(json, r#"{"hp":20}"#);
//! ```

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};

use crate::{Compound, CompoundMap, List, NbtString, Node};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::End => serializer.serialize_unit(),
            Node::Byte(value) => serializer.serialize_i8(*value),
            Node::Short(value) => serializer.serialize_i16(*value),
            Node::Int(value) => serializer.serialize_i32(*value),
            Node::Long(value) => serializer.serialize_i64(*value),
            Node::Float(value) => serializer.serialize_f32(*value),
            Node::Double(value) => serializer.serialize_f64(*value),
            Node::ByteArray(array) => serializer.collect_seq(array.iter()),
            Node::String(text) => serializer.serialize_str(&text.decode()),
            Node::List(list) => list.serialize(serializer),
            Node::Compound(compound) => compound.serialize(serializer),
            Node::IntArray(array) => serializer.collect_seq(array.iter()),
            Node::LongArray(array) => serializer.collect_seq(array.iter()),
        }
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<M: CompoundMap> Serialize for Compound<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(&*key.decode(), value)?;
        }
        map.end()
    }
}

impl Serialize for NbtString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.decode())
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an NBT value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Byte(v as i8))
    }

    fn visit_i8<E>(self, v: i8) -> Result<Node, E> {
        Ok(Node::Byte(v))
    }

    fn visit_i16<E>(self, v: i16) -> Result<Node, E> {
        Ok(Node::Short(v))
    }

    fn visit_i32<E>(self, v: i32) -> Result<Node, E> {
        Ok(Node::Int(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Long(v))
    }

    fn visit_u8<E>(self, v: u8) -> Result<Node, E> {
        Ok(Node::Short(v as i16))
    }

    fn visit_u16<E>(self, v: u16) -> Result<Node, E> {
        Ok(Node::Int(v as i32))
    }

    fn visit_u32<E>(self, v: u32) -> Result<Node, E> {
        Ok(Node::Long(v as i64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        i64::try_from(v)
            .map(Node::Long)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &"an integer within i64"))
    }

    fn visit_f32<E>(self, v: f32) -> Result<Node, E> {
        Ok(Node::Float(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Double(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Node, E> {
        Ok(Node::ByteArray(v.iter().map(|&b| b as i8).collect()))
    }

    fn visit_unit<E>(self) -> Result<Node, E> {
        Ok(Node::End)
    }

    fn visit_none<E>(self) -> Result<Node, E> {
        Ok(Node::End)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut list = List::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element::<Node>()? {
            list.push(item).map_err(de::Error::custom)?;
        }
        Ok(Node::List(list))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut compound = Compound::new();
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            compound.insert(key, value).map_err(de::Error::custom)?;
        }
        Ok(Node::Compound(compound))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Node, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}
