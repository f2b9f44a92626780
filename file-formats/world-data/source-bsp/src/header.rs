//! BSP header and lump directory

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

use crate::error::{BspError, Result};

/// Magic signature for Source BSP files ("VBSP")
pub const BSP_MAGIC: [u8; 4] = *b"VBSP";

/// Number of entries in the lump directory
pub const HEADER_LUMPS: usize = 64;

/// File offset of the first lump directory record (after magic and version)
pub const LUMP_DIRECTORY_OFFSET: u64 = 8;

/// Size of one lump directory record
pub const LUMP_ENTRY_SIZE: u64 = 16;

/// Lumps this crate knows how to interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LumpId {
    /// Entity key/value text
    Entities,
    /// Game lump directory (static props and friends)
    GameLump,
    /// Embedded zip archive with compiler generated content
    PakFile,
    /// NUL separated material names used by brush faces
    TexDataStringData,
}

impl LumpId {
    /// Position of this lump in the lump directory
    pub const fn index(self) -> usize {
        match self {
            Self::Entities => 0,
            Self::GameLump => 35,
            Self::PakFile => 40,
            Self::TexDataStringData => 43,
        }
    }
}

/// One lump directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LumpEntry {
    /// Absolute file offset of the lump data
    pub offset: i32,
    /// Length of the lump data in bytes
    pub length: i32,
    /// Lump format version
    pub version: i32,
    /// Four-CC, used by compressed lumps
    pub four_cc: [u8; 4],
}

impl LumpEntry {
    /// Read a lump directory record
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let offset = reader.read_i32::<LittleEndian>()?;
        let length = reader.read_i32::<LittleEndian>()?;
        let version = reader.read_i32::<LittleEndian>()?;
        let mut four_cc = [0u8; 4];
        reader.read_exact(&mut four_cc)?;

        Ok(Self {
            offset,
            length,
            version,
            four_cc,
        })
    }

    /// Whether the lump holds no data
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Seek to the lump and read exactly `length` bytes
    pub fn read_data<R: Read + Seek>(&self, reader: &mut R, id: usize) -> Result<Vec<u8>> {
        read_range(reader, id as i64, self.offset, self.length)
    }
}

/// Read `length` bytes at `offset`, rejecting bounds outside the stream
pub(crate) fn read_range<R: Read + Seek>(
    reader: &mut R,
    id: i64,
    offset: i32,
    length: i32,
) -> Result<Vec<u8>> {
    if offset < 0 || length < 0 {
        return Err(BspError::InvalidLumpBounds { id, offset, length });
    }
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if offset as u64 + length as u64 > stream_len {
        return Err(BspError::InvalidLumpBounds { id, offset, length });
    }

    reader.seek(SeekFrom::Start(offset as u64))?;
    let mut data = vec![0u8; length as usize];
    reader.read_exact(&mut data)?;
    Ok(data)
}

/// BSP file header
#[derive(Debug, Clone)]
pub struct BspHeader {
    /// Magic signature ("VBSP")
    pub magic: [u8; 4],
    /// Map format version
    pub version: i32,
    /// Lump directory, indexed by lump id
    pub lumps: Vec<LumpEntry>,
}

impl BspHeader {
    /// Parse the header and lump directory from the start of a map
    pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != BSP_MAGIC {
            return Err(BspError::InvalidMagic {
                expected: String::from_utf8_lossy(&BSP_MAGIC).to_string(),
                found: String::from_utf8_lossy(&magic).to_string(),
            });
        }

        let version = reader.read_i32::<LittleEndian>()?;

        let mut lumps = Vec::with_capacity(HEADER_LUMPS);
        for _ in 0..HEADER_LUMPS {
            lumps.push(LumpEntry::read(reader)?);
        }

        Ok(Self {
            magic,
            version,
            lumps,
        })
    }

    /// Directory record for a lump id
    pub fn lump(&self, id: usize) -> Result<&LumpEntry> {
        self.lumps.get(id).ok_or(BspError::InvalidLumpId(id))
    }
}
