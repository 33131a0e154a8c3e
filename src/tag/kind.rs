//! Type-level tag table.
//!
//! Every tag has a zero-sized marker type here that implements [`NbtType`],
//! tying the [`Tag`] value to the Rust payload type a [`Node`] stores for it.
//! Generic accessors such as [`Node::get`] dispatch through this table.
//!
//! ```
//! use nbtree::{Node, kind};
//!
//! let node = Node::from(7i32);
//! assert_eq!(node.get::<kind::Int>().ok(), Some(&7));
//! assert!(node.get::<kind::Long>().is_err());
//! ```

use crate::{Node, Tag};

pub trait NbtType: Send + Sync + Sized + Clone + Copy + 'static {
    const TAG: Tag;
    type Payload;

    fn payload(node: &Node) -> Option<&Self::Payload>;

    fn payload_mut(node: &mut Node) -> Option<&mut Self::Payload>;

    fn into_node(payload: Self::Payload) -> Node;

    /// Moves the payload out, handing the node back unchanged on a tag mismatch.
    fn from_node(node: Node) -> std::result::Result<Self::Payload, Node>;
}

macro_rules! define_kind {
    ($($name:ident => $payload:ty),* $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug)]
            pub struct $name;

            impl NbtType for $name {
                const TAG: Tag = Tag::$name;
                type Payload = $payload;

                #[inline]
                fn payload(node: &Node) -> Option<&Self::Payload> {
                    match node {
                        Node::$name(value) => Some(value),
                        _ => None,
                    }
                }

                #[inline]
                fn payload_mut(node: &mut Node) -> Option<&mut Self::Payload> {
                    match node {
                        Node::$name(value) => Some(value),
                        _ => None,
                    }
                }

                #[inline]
                fn into_node(payload: Self::Payload) -> Node {
                    Node::$name(payload)
                }

                #[inline]
                fn from_node(node: Node) -> std::result::Result<Self::Payload, Node> {
                    match node {
                        Node::$name(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

define_kind!(
    Byte => i8,
    Short => i16,
    Int => i32,
    Long => i64,
    Float => f32,
    Double => f64,
    ByteArray => crate::ByteArray,
    String => crate::NbtString,
    List => crate::List,
    Compound => crate::Compound,
    IntArray => crate::IntArray,
    LongArray => crate::LongArray,
);

#[derive(Clone, Copy, Debug)]
pub struct End;

impl NbtType for End {
    const TAG: Tag = Tag::End;
    type Payload = ();

    #[inline]
    fn payload(node: &Node) -> Option<&()> {
        match node {
            Node::End => Some(&()),
            _ => None,
        }
    }

    #[inline]
    fn payload_mut(node: &mut Node) -> Option<&mut ()> {
        match node {
            // zero-sized, leaking does not allocate
            Node::End => Some(Box::leak(Box::new(()))),
            _ => None,
        }
    }

    #[inline]
    fn into_node(_: ()) -> Node {
        Node::End
    }

    #[inline]
    fn from_node(node: Node) -> std::result::Result<(), Node> {
        match node {
            Node::End => Ok(()),
            other => Err(other),
        }
    }
}
