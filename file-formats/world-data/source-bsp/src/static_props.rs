//! Game lump directory and static prop lump
//!
//! The game lump (lump 35) holds its own directory of sub-lumps, each tagged
//! with a four-byte id. Static props live in the `sprp` sub-lump, whose record
//! layout grows with the sub-lump version.

use byteorder::{LittleEndian, ReadBytesExt};
use memchr::memchr;
use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::error::{BspError, Result};

/// Game lump id of the static prop lump (`sprp`)
pub const STATIC_PROP_LUMP_ID: i32 = 1_936_749_168;

/// Size of one model dictionary slot
pub const MODEL_NAME_LENGTH: usize = 128;

/// Size of a version 4 static prop record, the smallest supported layout
pub const STATIC_PROP_BASE_SIZE: usize = 56;

/// One game lump directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLumpEntry {
    /// Four-byte tag identifying the sub-lump
    pub id: i32,
    /// Sub-lump flags
    pub flags: u16,
    /// Sub-lump version
    pub version: u16,
    /// Absolute file offset of the sub-lump
    pub offset: i32,
    /// Length of the sub-lump in bytes
    pub length: i32,
}

impl GameLumpEntry {
    fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            id: reader.read_i32::<LittleEndian>()?,
            flags: reader.read_u16::<LittleEndian>()?,
            version: reader.read_u16::<LittleEndian>()?,
            offset: reader.read_i32::<LittleEndian>()?,
            length: reader.read_i32::<LittleEndian>()?,
        })
    }

    /// Whether this record describes the static prop lump
    pub fn is_static_props(&self) -> bool {
        self.id == STATIC_PROP_LUMP_ID
    }
}

/// Parse the game lump directory from the contents of lump 35
pub fn parse_game_lump_directory(data: &[u8]) -> Result<Vec<GameLumpEntry>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut cursor = Cursor::new(data);
    let count = read_count(&mut cursor, "game lump")?;
    let mut entries = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        entries.push(GameLumpEntry::read(&mut cursor)?);
    }
    Ok(entries)
}

/// Size in bytes of one static prop record for a sub-lump version
pub fn static_prop_record_size(version: u16) -> usize {
    let mut size = STATIC_PROP_BASE_SIZE;
    // forced fade scale
    if version >= 5 {
        size += 4;
    }
    // min/max dx level
    if (6..=8).contains(&version) {
        size += 4;
    }
    // diffuse modulation
    if version >= 7 {
        size += 4;
    }
    // extended flags
    if version >= 10 {
        size += 4;
    }
    // disable x360, a bool padded to four bytes
    if version >= 9 {
        size += 4;
    }
    size
}

/// A model placed directly in the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProp {
    /// Model path from the dictionary
    pub model: String,
    /// Requested skin
    pub skin: i32,
}

/// Parsed static prop lump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPropLump {
    /// Sub-lump version the records were read with
    pub version: u16,
    /// Model dictionary
    pub models: Vec<String>,
    /// Placed props
    pub props: Vec<StaticProp>,
}

impl StaticPropLump {
    /// Parse the body of the `sprp` sub-lump
    pub fn parse(data: &[u8], version: u16) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let dict_count = read_count(&mut cursor, "model dictionary")?;
        let mut models = Vec::with_capacity(dict_count.min(4096));
        for _ in 0..dict_count {
            let mut slot = [0u8; MODEL_NAME_LENGTH];
            cursor.read_exact(&mut slot)?;
            let end = memchr(0, &slot).unwrap_or(MODEL_NAME_LENGTH);
            models.push(String::from_utf8_lossy(&slot[..end]).into_owned());
        }

        let leaf_count = read_count(&mut cursor, "leaf")?;
        cursor.seek(SeekFrom::Current(2 * leaf_count as i64))?;

        let prop_count = read_count(&mut cursor, "static prop")?;
        let record_size = static_prop_record_size(version);
        let mut props = Vec::with_capacity(prop_count.min(65536));
        for index in 0..prop_count {
            let start = cursor.position();

            // origin and angles
            cursor.seek(SeekFrom::Current(24))?;
            let model_index = cursor.read_u16::<LittleEndian>()? as usize;
            // first leaf, leaf count, solid, flags
            cursor.seek(SeekFrom::Current(6))?;
            let skin = cursor.read_i32::<LittleEndian>()?;

            let model = models.get(model_index).cloned().ok_or_else(|| {
                BspError::ParseError(format!(
                    "static prop {} references model {} but the dictionary has {} entries",
                    index,
                    model_index,
                    models.len()
                ))
            })?;
            props.push(StaticProp { model, skin });

            cursor.seek(SeekFrom::Start(start + record_size as u64))?;
        }

        // seeking past the end succeeds, so make sure the last record was really there
        if cursor.position() > data.len() as u64 {
            return Err(BspError::ParseError(format!(
                "static prop lump truncated: {} records of {} bytes need {} bytes, found {}",
                prop_count,
                record_size,
                cursor.position(),
                data.len()
            )));
        }

        log::debug!(
            "Static prop lump v{}: {} models, {} props",
            version,
            models.len(),
            props.len()
        );

        Ok(Self {
            version,
            models,
            props,
        })
    }
}

fn read_count<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let count = reader.read_i32::<LittleEndian>()?;
    usize::try_from(count)
        .map_err(|_| BspError::ParseError(format!("negative {} count: {}", what, count)))
}
