//! The chunked container wire format.
//!
//! A container is a root chunk tagged [`ROOT_TAG`] holding a sequence of
//! tagged, length-prefixed chunks. A chunk tagged [`LIST_TAG`] nests: its
//! payload is a four-byte form tag followed by child chunks. All lengths
//! are little-endian `u32`s counting payload bytes only. Parsing is
//! strictly structural and fail-fast; chunk vocabulary beyond the two
//! structural tags belongs to the schema layer.

use std::fmt;

use crate::error::ContainerError;

/// A four-character chunk tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    /// Creates a tag from four bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({self})")
    }
}

/// Tag of the root chunk every container starts with.
pub const ROOT_TAG: ChunkTag = ChunkTag(*b"PRSM");

/// Tag of a nesting chunk: payload is a form tag followed by children.
pub const LIST_TAG: ChunkTag = ChunkTag(*b"LIST");

/// The payload of a parsed chunk.
pub enum ChunkBody<'a> {
    /// An opaque payload owned by the schema layer.
    Data(&'a [u8]),
    /// A nested sequence of chunks.
    List {
        /// The list's form tag.
        form: ChunkTag,
        /// The child chunks in order.
        children: Vec<Chunk<'a>>,
    },
}

/// A parsed chunk borrowing from the source buffer.
pub struct Chunk<'a> {
    /// The chunk's tag.
    pub tag: ChunkTag,
    /// The chunk's payload.
    pub body: ChunkBody<'a>,
}

/// A parsed container: the children of the root chunk.
pub struct Container<'a> {
    /// The root chunk's children in order.
    pub children: Vec<Chunk<'a>>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            end: bytes.len(),
        }
    }

    fn remaining(&self) -> usize {
        self.end - self.pos
    }

    fn take(&mut self, count: usize, what: &str) -> Result<&'a [u8], ContainerError> {
        if self.remaining() < count {
            return Err(ContainerError::Format {
                offset: self.pos,
                reason: format!(
                    "truncated {what}: need {count} bytes, {} remain",
                    self.remaining()
                ),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn read_tag(&mut self, what: &str) -> Result<ChunkTag, ContainerError> {
        let bytes = self.take(4, what)?;
        Ok(ChunkTag([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_len(&mut self) -> Result<usize, ContainerError> {
        let bytes = self.take(4, "chunk length")?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize)
    }
}

impl<'a> Container<'a> {
    /// Parses `bytes` as a container.
    ///
    /// Fails with [`ContainerError::Format`] on a bad root tag, a
    /// truncated buffer, a chunk length overrunning its enclosing chunk,
    /// or bytes trailing the root chunk.
    pub fn parse(bytes: &'a [u8]) -> Result<Container<'a>, ContainerError> {
        let mut reader = Reader::new(bytes);

        let tag = reader.read_tag("container tag")?;
        if tag != ROOT_TAG {
            return Err(ContainerError::Format {
                offset: 0,
                reason: format!("bad container tag '{tag}', expected '{ROOT_TAG}'"),
            });
        }
        let len = reader.read_len()?;
        if len != reader.remaining() {
            return Err(ContainerError::Format {
                offset: 4,
                reason: format!(
                    "root chunk length {len} does not match {} remaining bytes",
                    reader.remaining()
                ),
            });
        }

        let children = parse_chunks(&mut reader)?;
        Ok(Container { children })
    }
}

fn parse_chunks<'a>(reader: &mut Reader<'a>) -> Result<Vec<Chunk<'a>>, ContainerError> {
    let mut chunks = Vec::new();
    while reader.remaining() > 0 {
        chunks.push(parse_chunk(reader)?);
    }
    Ok(chunks)
}

fn parse_chunk<'a>(reader: &mut Reader<'a>) -> Result<Chunk<'a>, ContainerError> {
    let tag = reader.read_tag("chunk tag")?;
    let len_offset = reader.pos;
    let len = reader.read_len()?;
    if len > reader.remaining() {
        return Err(ContainerError::Format {
            offset: len_offset,
            reason: format!(
                "chunk '{tag}' length {len} overruns the {} remaining bytes",
                reader.remaining()
            ),
        });
    }

    let payload_start = reader.pos;
    reader.pos += len;

    if tag == LIST_TAG {
        let mut sub = Reader {
            bytes: reader.bytes,
            pos: payload_start,
            end: payload_start + len,
        };
        let form = sub.read_tag("list form tag")?;
        let children = parse_chunks(&mut sub)?;
        Ok(Chunk {
            tag,
            body: ChunkBody::List { form, children },
        })
    } else {
        Ok(Chunk {
            tag,
            body: ChunkBody::Data(&reader.bytes[payload_start..payload_start + len]),
        })
    }
}

/// Builds container bytes chunk by chunk.
///
/// Lengths are back-patched when a list or the container is closed, so
/// nested structures can be written in one forward pass.
pub struct ContainerWriter {
    bytes: Vec<u8>,
    // Offsets of the length fields still awaiting their final value.
    open: Vec<usize>,
}

impl ContainerWriter {
    /// Starts a container with an empty root chunk.
    pub fn new() -> Self {
        let mut writer = Self {
            bytes: Vec::new(),
            open: Vec::new(),
        };
        writer.begin(ROOT_TAG);
        writer
    }

    fn begin(&mut self, tag: ChunkTag) {
        self.bytes.extend_from_slice(&tag.0);
        self.open.push(self.bytes.len());
        self.bytes.extend_from_slice(&0u32.to_le_bytes());
    }

    fn patch(&mut self) {
        let offset = self.open.pop().expect("no open chunk to close");
        let len = (self.bytes.len() - offset - 4) as u32;
        self.bytes[offset..offset + 4].copy_from_slice(&len.to_le_bytes());
    }

    /// Appends a data chunk.
    pub fn chunk(&mut self, tag: ChunkTag, payload: &[u8]) {
        self.bytes.extend_from_slice(&tag.0);
        self.bytes
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.bytes.extend_from_slice(payload);
    }

    /// Opens a nested list chunk with the given form tag.
    pub fn begin_list(&mut self, form: ChunkTag) {
        self.begin(LIST_TAG);
        self.bytes.extend_from_slice(&form.0);
    }

    /// Closes the innermost open list.
    ///
    /// # Panics
    ///
    /// Panics if no list is open.
    pub fn end_list(&mut self) {
        assert!(self.open.len() > 1, "end_list without matching begin_list");
        self.patch();
    }

    /// Closes the root chunk and returns the container bytes.
    ///
    /// # Panics
    ///
    /// Panics if a list is still open.
    pub fn finish(mut self) -> Vec<u8> {
        assert!(self.open.len() == 1, "finish with an unclosed list");
        self.patch();
        self.bytes
    }
}

impl Default for ContainerWriter {
    fn default() -> Self {
        Self::new()
    }
}
