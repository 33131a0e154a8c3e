use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::{
    Array, ArrayElement, BigEndian, ByteOrder, Compound, CompoundMap, DuplicateKeyPolicy,
    Endianness, Error, InputStream, List, LittleEndian, NbtString, Node, ReadConfig, Result,
    Scalar, SliceInput, Tag, TextPolicy,
};

/// Upper bound for allocations made ahead of data that has not arrived yet.
/// Streams of unknown length are read in chunks of this size so that a forged
/// count cannot reserve more memory than the stream actually delivers.
const CHUNK: usize = 64 * 1024;

/// Runs `$body` on a decoder monomorphized for the configured byte order.
macro_rules! with_decoder {
    ($reader:expr, $input:expr, |$decoder:ident| $body:expr) => {
        match $reader.config.byte_order {
            Endianness::Big => {
                let mut $decoder = Decoder::<_, BigEndian>::new($input, &$reader.config);
                $body
            }
            Endianness::Little => {
                let mut $decoder = Decoder::<_, LittleEndian>::new($input, &$reader.config);
                $body
            }
        }
    };
}

/// Decodes byte streams into [`Node`] trees.
///
/// A decode either returns a complete tree or an error; it never returns a
/// partially built tree. After an error the stream position is unspecified.
///
/// ```
/// use nbtree::{Node, Reader, ReadConfig};
///
/// let bytes = [0x03, 0x00, 0x01, b'n', 0x00, 0x00, 0x00, 0x2A];
/// let (name, node) = Reader::new(ReadConfig::default())
///     .decode_named(&bytes[..])
///     .unwrap();
/// assert_eq!(name, "n");
/// assert_eq!(node, Node::Int(42));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Reader {
    config: ReadConfig,
}

impl Reader {
    #[inline]
    pub fn new(config: ReadConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Decodes one named root entry and returns its value.
    ///
    /// A stream starting with End decodes to [`Node::End`].
    #[inline]
    pub fn decode(&self, input: impl InputStream) -> Result<Node> {
        self.decode_named(input).map(|(_, node)| node)
    }

    /// Decodes one named root entry: tag, name, payload.
    pub fn decode_named(&self, input: impl InputStream) -> Result<(NbtString, Node)> {
        let result = with_decoder!(self, input, |decoder| decoder.read_root());
        log_failure(&result, None);
        result
    }

    /// Decodes named root entries until the stream ends (or an End tag is
    /// met) and collects them into one compound.
    ///
    /// Standard files hold a single unnamed compound, which comes back as one
    /// entry with an empty key. Streams that store several named values back
    /// to back are read in full.
    #[inline]
    pub fn decode_entries(&self, input: impl InputStream) -> Result<Compound> {
        self.decode_entries_into(input)
    }

    /// Like [`decode_entries`](Self::decode_entries), collecting the root
    /// entries into caller-chosen storage.
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use nbtree::{Compound, NbtString, Node, Reader};
    ///
    /// let bytes = [0x01, 0x00, 0x01, b'a', 0x07];
    /// let entries: Compound<HashMap<NbtString, Node>> =
    ///     Reader::default().decode_entries_into(&bytes[..]).unwrap();
    /// assert_eq!(entries.get("a"), Some(&Node::Byte(7)));
    /// ```
    pub fn decode_entries_into<M: CompoundMap>(
        &self,
        input: impl InputStream,
    ) -> Result<Compound<M>> {
        let result = with_decoder!(self, input, |decoder| decoder.read_root_entries());
        log_failure(&result, None);
        result
    }
}

fn log_failure<T>(result: &Result<T>, position: Option<usize>) {
    if let Err(e) = result {
        debug!(error = %e, position, "nbt decode failed");
    }
}

struct Decoder<'c, I, O> {
    input: I,
    config: &'c ReadConfig,
    depth: usize,
    _order: PhantomData<O>,
}

impl<'c, I: InputStream, O: ByteOrder> Decoder<'c, I, O> {
    fn new(input: I, config: &'c ReadConfig) -> Self {
        Self {
            input,
            config,
            depth: 0,
            _order: PhantomData,
        }
    }

    fn read_root(&mut self) -> Result<(NbtString, Node)> {
        let tag = Tag::from_u8(self.read_u8()?)?;
        if tag == Tag::End {
            trace!("nbt root is End");
            return Ok((NbtString::new(), Node::End));
        }
        let name = self.read_string()?;
        trace!(tag = tag.name(), name = %name, "nbt root");
        let node = self.read_payload(tag)?;
        Ok((name, node))
    }

    /// The entry sequence is not a container: a root compound read here sits
    /// at depth 1, as it does through `read_root`.
    fn read_root_entries<M: CompoundMap>(&mut self) -> Result<Compound<M>> {
        let mut compound = Compound::<M>::default();
        while !self.input.is_at_end()? {
            let tag = Tag::from_u8(self.read_u8()?)?;
            if tag == Tag::End {
                break;
            }
            self.read_entry(tag, &mut compound)?;
        }
        Ok(compound)
    }

    #[inline]
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(Error::DepthExceeded(self.config.max_depth));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        self.depth -= 1;
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        let mut byte = [0u8];
        self.input.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    #[inline]
    fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        let mut raw = [0u8; 8];
        let raw = &mut raw[..T::SIZE];
        self.input.read_exact(raw)?;
        Ok(T::read_from::<O>(raw))
    }

    /// Reads a signed 32-bit count, rejecting negatives.
    #[inline]
    fn read_count(&mut self) -> Result<usize> {
        let count = self.read_scalar::<i32>()?;
        usize::try_from(count).map_err(|_| Error::InvalidLength(count as i64))
    }

    /// Fails early when `count` items of at least `unit` bytes each cannot fit
    /// in what the stream has left.
    #[inline]
    fn ensure_available(&self, count: usize, unit: usize) -> Result<()> {
        match self.input.remaining() {
            Some(remaining) if count.saturating_mul(unit) > remaining => Err(Error::TruncatedInput),
            _ => Ok(()),
        }
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if self.input.remaining().is_some() || len <= CHUNK {
            self.ensure_available(len, 1)?;
            let mut bytes = vec![0u8; len];
            self.input.read_exact(&mut bytes)?;
            return Ok(bytes);
        }
        let mut bytes = Vec::with_capacity(CHUNK);
        while bytes.len() < len {
            let start = bytes.len();
            let end = start + (len - start).min(CHUNK);
            bytes.resize(end, 0);
            self.input.read_exact(&mut bytes[start..end])?;
        }
        Ok(bytes)
    }

    fn read_string(&mut self) -> Result<NbtString> {
        let len = self.read_scalar::<u16>()? as usize;
        let bytes = self.read_bytes(len)?;
        match self.config.text {
            TextPolicy::Strict => NbtString::from_mutf8(bytes),
            TextPolicy::Lossy => Ok(NbtString::from_mutf8_lossy(&bytes)),
        }
    }

    fn read_array<T: ArrayElement>(&mut self) -> Result<Array<T>> {
        let count = self.read_count()?;
        let len = count
            .checked_mul(T::SIZE)
            .ok_or(Error::InvalidLength(count as i64))?;
        let bytes = self.read_bytes(len)?;
        Ok(bytes.chunks_exact(T::SIZE).map(T::read_from::<O>).collect())
    }

    fn read_payload(&mut self, tag: Tag) -> Result<Node> {
        Ok(match tag {
            Tag::End => return Err(Error::InvalidTag(Tag::End as u8)),
            Tag::Byte => Node::Byte(self.read_scalar()?),
            Tag::Short => Node::Short(self.read_scalar()?),
            Tag::Int => Node::Int(self.read_scalar()?),
            Tag::Long => Node::Long(self.read_scalar()?),
            Tag::Float => Node::Float(self.read_scalar()?),
            Tag::Double => Node::Double(self.read_scalar()?),
            Tag::ByteArray => Node::ByteArray(self.read_array()?),
            Tag::String => Node::String(self.read_string()?),
            Tag::List => Node::List(self.read_list()?),
            Tag::Compound => Node::Compound(self.read_compound()?),
            Tag::IntArray => Node::IntArray(self.read_array()?),
            Tag::LongArray => Node::LongArray(self.read_array()?),
        })
    }

    fn read_list(&mut self) -> Result<List> {
        self.enter()?;
        let tag = Tag::from_u8(self.read_u8()?)?;
        let count = self.read_count()?;
        if tag == Tag::End && count > 0 {
            return Err(Error::InvalidTag(Tag::End as u8));
        }
        self.ensure_available(count, tag.min_payload_size())?;

        let mut list = List::with_capacity(count.min(CHUNK));
        for _ in 0..count {
            list.push_unchecked(self.read_payload(tag)?);
        }
        self.leave();
        Ok(list)
    }

    fn read_compound(&mut self) -> Result<Compound> {
        self.enter()?;
        let mut compound = Compound::new();
        loop {
            let tag = Tag::from_u8(self.read_u8()?)?;
            if tag == Tag::End {
                break;
            }
            self.read_entry(tag, &mut compound)?;
        }
        self.leave();
        Ok(compound)
    }

    /// Reads the name and payload of one compound entry whose tag was already
    /// consumed.
    fn read_entry<M: CompoundMap>(&mut self, tag: Tag, compound: &mut Compound<M>) -> Result<()> {
        let name = self.read_string()?;
        if compound.contains_key(&name) {
            match self.config.duplicate_keys {
                DuplicateKeyPolicy::Fatal => return Err(Error::DuplicateKey(name)),
                DuplicateKeyPolicy::LastWins => {
                    warn!(key = %name, "duplicate compound key, keeping the later value");
                }
            }
        }
        let value = self.read_payload(tag)?;
        compound.insert_decoded(name, value);
        Ok(())
    }
}

/// Decodes a complete single-root slice with the given byte order.
///
/// Fails with [`Error::TrailingData`] when bytes remain after the root.
///
/// ```
/// use nbtree::{BigEndian, Node, read_slice};
///
/// let bytes = [0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, b'b', 0x05, 0x00];
/// let root = read_slice::<BigEndian>(&bytes).unwrap();
/// assert_eq!(root.view().get("b").unwrap().as_byte().unwrap(), 5);
/// ```
pub fn read_slice<O: ByteOrder>(data: &[u8]) -> Result<Node> {
    read_named_slice::<O>(data).map(|(_, node)| node)
}

/// Like [`read_slice`], also returning the root name.
pub fn read_named_slice<O: ByteOrder>(data: &[u8]) -> Result<(NbtString, Node)> {
    let config = ReadConfig::default();
    let mut input = SliceInput::new(data);
    let mut decoder = Decoder::<_, O>::new(&mut input, &config);
    let result = decoder.read_root();
    let result = match result {
        Ok(_) if !input.rest().is_empty() => Err(Error::TrailingData(input.rest().len())),
        other => other,
    };
    log_failure(&result, input.position());
    result
}
