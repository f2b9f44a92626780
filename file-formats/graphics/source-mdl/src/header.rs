//! Texture section of the studio model header

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Seek, SeekFrom};

use crate::error::{MdlError, Result};

/// Byte offset of the texture fields inside the studio header
pub const TEXTURE_HEADER_OFFSET: u64 = 204;

/// The header fields describing textures and skins
///
/// All offsets are absolute offsets into the model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureHeader {
    /// Number of texture records
    pub texture_count: usize,
    /// Offset of the texture records
    pub texture_offset: usize,
    /// Number of texture directory offsets
    pub texturedir_count: usize,
    /// Offset of the texture directory offsets
    pub texturedir_offset: usize,
    /// Texture slots per skin family
    pub skinreference_count: usize,
    /// Number of skin families
    pub skinfamily_count: usize,
    /// Offset of the skin table
    pub skinreference_offset: usize,
}

impl TextureHeader {
    /// Parse the texture fields from a model file
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        cursor.seek(SeekFrom::Start(TEXTURE_HEADER_OFFSET))?;

        let mut field = |name: &'static str| -> Result<usize> {
            let value = cursor.read_i32::<LittleEndian>()?;
            usize::try_from(value).map_err(|_| MdlError::InvalidHeader { field: name, value })
        };

        Ok(Self {
            texture_count: field("texture_count")?,
            texture_offset: field("texture_offset")?,
            texturedir_count: field("texturedir_count")?,
            texturedir_offset: field("texturedir_offset")?,
            skinreference_count: field("skinreference_count")?,
            skinfamily_count: field("skinfamily_count")?,
            skinreference_offset: field("skinreference_offset")?,
        })
    }
}
