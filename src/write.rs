use std::{io::Write, marker::PhantomData};

use tracing::trace;

use crate::{
    Array, ArrayElement, BigEndian, ByteOrder, Compound, CompoundMap, DEFAULT_MAX_DEPTH,
    Endianness, Error, IoOutput, List, LittleEndian, NbtStr, Node, OutputStream, Result, Scalar,
    Tag, WriteConfig,
};

/// Encodes [`Node`] trees into byte streams.
///
/// Compound entries are written in ascending order of their Modified UTF-8
/// key bytes.
///
/// ```
/// use nbtree::{Compound, Node, WriteConfig, Writer};
///
/// let mut root = Compound::new();
/// root.insert("count", 3i32).unwrap();
/// root.insert("tag", "ok").unwrap();
///
/// let mut out = Vec::new();
/// Writer::new(WriteConfig::default())
///     .encode(&Node::from(root), &mut out)
///     .unwrap();
/// assert_eq!(out[0], 0x0A);
/// assert_eq!(*out.last().unwrap(), 0x00);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Writer {
    config: WriteConfig,
}

macro_rules! with_encoder {
    ($writer:expr, $output:expr, |$encoder:ident| $body:expr) => {
        match $writer.config.byte_order {
            Endianness::Big => {
                let mut $encoder = Encoder::<_, BigEndian>::new($output, $writer.config.max_depth);
                $body
            }
            Endianness::Little => {
                let mut $encoder =
                    Encoder::<_, LittleEndian>::new($output, $writer.config.max_depth);
                $body
            }
        }
    };
}

impl Writer {
    #[inline]
    pub fn new(config: WriteConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &WriteConfig {
        &self.config
    }

    /// Writes `node` as the root entry with an empty name.
    #[inline]
    pub fn encode(&self, node: &Node, output: impl OutputStream) -> Result<()> {
        self.encode_named(NbtStr::empty(), node, output)
    }

    /// Writes `node` as the root entry named `name`.
    ///
    /// [`Node::End`] is written as the single End byte, without a name.
    pub fn encode_named(
        &self,
        name: &NbtStr,
        node: &Node,
        output: impl OutputStream,
    ) -> Result<()> {
        trace!(tag = node.tag().name(), name = %name, "nbt encode");
        with_encoder!(self, output, |encoder| encoder.write_root(name, node))
    }

    /// Writes the entries of `compound` as consecutive named root entries,
    /// without a wrapping compound or trailing End.
    pub fn encode_entries<M: CompoundMap>(
        &self,
        compound: &Compound<M>,
        output: impl OutputStream,
    ) -> Result<()> {
        with_encoder!(self, output, |encoder| encoder.write_entries(compound))
    }
}

struct Encoder<W, O> {
    output: W,
    scratch: Vec<u8>,
    depth: usize,
    max_depth: usize,
    _order: PhantomData<O>,
}

impl<W: OutputStream, O: ByteOrder> Encoder<W, O> {
    fn new(output: W, max_depth: usize) -> Self {
        Self {
            output,
            scratch: Vec::with_capacity(8),
            depth: 0,
            max_depth,
            _order: PhantomData,
        }
    }

    #[inline]
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthExceeded(self.max_depth));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn write_root(&mut self, name: &NbtStr, node: &Node) -> Result<()> {
        if node.is_end() {
            return self.output.write_all(&[Tag::End as u8]);
        }
        self.write_entry(name, node)
    }

    fn write_entries<M: CompoundMap>(&mut self, compound: &Compound<M>) -> Result<()> {
        for (key, value) in compound {
            self.write_entry(key, value)?;
        }
        Ok(())
    }

    #[inline]
    fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        self.scratch.clear();
        value.write_to::<O>(&mut self.scratch);
        self.output.write_all(&self.scratch)
    }

    /// Writes a 32-bit signed count, rejecting lengths that do not fit.
    #[inline]
    fn write_count(&mut self, len: usize) -> Result<()> {
        let count = i32::try_from(len).map_err(|_| Error::InvalidLength(len as i64))?;
        self.write_scalar(count)
    }

    fn write_string(&mut self, text: &NbtStr) -> Result<()> {
        let len = u16::try_from(text.len()).map_err(|_| Error::InvalidLength(text.len() as i64))?;
        self.write_scalar(len)?;
        self.output.write_all(text.as_mutf8_bytes())
    }

    fn write_array<T: ArrayElement>(&mut self, array: &Array<T>) -> Result<()> {
        self.write_count(array.len())?;
        self.scratch.clear();
        self.scratch.reserve(array.len() * T::SIZE);
        for &value in array.iter() {
            value.write_to::<O>(&mut self.scratch);
        }
        self.output.write_all(&self.scratch)
    }

    fn write_entry(&mut self, name: &NbtStr, node: &Node) -> Result<()> {
        if node.is_end() {
            return Err(Error::InvalidTag(Tag::End as u8));
        }
        self.output.write_all(&[node.tag() as u8])?;
        self.write_string(name)?;
        self.write_payload(node)
    }

    fn write_payload(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::End => Err(Error::InvalidTag(Tag::End as u8)),
            Node::Byte(value) => self.write_scalar(*value),
            Node::Short(value) => self.write_scalar(*value),
            Node::Int(value) => self.write_scalar(*value),
            Node::Long(value) => self.write_scalar(*value),
            Node::Float(value) => self.write_scalar(*value),
            Node::Double(value) => self.write_scalar(*value),
            Node::ByteArray(array) => self.write_array(array),
            Node::String(text) => self.write_string(text),
            Node::List(list) => self.write_list(list),
            Node::Compound(compound) => self.write_compound(compound),
            Node::IntArray(array) => self.write_array(array),
            Node::LongArray(array) => self.write_array(array),
        }
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        self.enter()?;
        let tag = list.element_tag();
        self.output.write_all(&[tag as u8])?;
        self.write_count(list.len())?;
        for item in list {
            if item.tag() != tag {
                return Err(Error::TypeMismatch(tag, item.tag()));
            }
            self.write_payload(item)?;
        }
        self.leave();
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        self.enter()?;
        self.write_entries(compound)?;
        self.leave();
        self.output.write_all(&[Tag::End as u8])
    }
}

impl Node {
    /// Encodes this node as an unnamed root entry in byte order `O`.
    ///
    /// ```
    /// use nbtree::{BigEndian, Node, read_slice};
    ///
    /// let node = Node::from(vec![1i64, -1]);
    /// let bytes = node.write_to_vec::<BigEndian>().unwrap();
    /// assert_eq!(read_slice::<BigEndian>(&bytes).unwrap(), node);
    /// ```
    pub fn write_to_vec<O: ByteOrder>(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Encoder::<_, O>::new(&mut out, DEFAULT_MAX_DEPTH).write_root(NbtStr::empty(), self)?;
        Ok(out)
    }

    /// Encodes this node as an unnamed root entry into `writer`.
    pub fn write_to_writer<O: ByteOrder>(&self, writer: impl Write) -> Result<()> {
        let mut output = IoOutput::new(writer);
        Encoder::<_, O>::new(&mut output, DEFAULT_MAX_DEPTH).write_root(NbtStr::empty(), self)?;
        output.finish().map(drop)
    }
}
