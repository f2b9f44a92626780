//! Skin table and skin filtering
//!
//! A model's skin table maps each texture slot ("skin reference") to a
//! texture index, once per skin family. Families are stored one after the
//! other, each holding `skinreference_count` little-endian `u16` values.
//!
//! Only a leading part of the table actually differs between families: the
//! remaining rows repeat texture indices already seen. [`SkinTable::last_column`]
//! finds where that leading part ends so that a requested skin pulls in only
//! the textures it can really display.

use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::{BTreeSet, HashSet};
use std::io::{Cursor, Seek, SeekFrom};

use crate::error::{MdlError, Result};

/// Which skins of a model are in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinSelection {
    /// Every skin may be shown, so every texture is needed
    All,
    /// Only these skin families are shown
    Skins(BTreeSet<u32>),
}

impl SkinSelection {
    /// Selection of a single skin
    pub fn single(skin: u32) -> Self {
        Self::Skins(BTreeSet::from([skin]))
    }

    /// Add a skin; a selection of all skins stays that way
    pub fn add(&mut self, skin: u32) {
        if let Self::Skins(skins) = self {
            skins.insert(skin);
        }
    }

    /// Whether every skin is selected
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Default for SkinSelection {
    fn default() -> Self {
        Self::Skins(BTreeSet::new())
    }
}

/// Skin table of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinTable {
    references: usize,
    families: usize,
    /// family-major, as stored in the file
    indices: Vec<u16>,
}

impl SkinTable {
    /// Build a table from rows indexed `[reference][family]`
    pub fn from_rows(rows: &[Vec<u16>]) -> Self {
        let references = rows.len();
        let families = rows.first().map_or(0, Vec::len);
        let mut indices = Vec::with_capacity(references * families);
        for family in 0..families {
            for row in rows {
                indices.push(row.get(family).copied().unwrap_or_default());
            }
        }
        Self {
            references,
            families,
            indices,
        }
    }

    /// Read the table from a model file
    pub fn read(data: &[u8], offset: usize, references: usize, families: usize) -> Result<Self> {
        let count = references.saturating_mul(families);
        let end = offset.saturating_add(count.saturating_mul(2));
        if end > data.len() {
            return Err(MdlError::OutOfBounds {
                what: "skin table",
                offset: offset as i64,
                len: data.len(),
            });
        }

        let mut cursor = Cursor::new(data);
        cursor.seek(SeekFrom::Start(offset as u64))?;
        let mut indices = Vec::with_capacity(count);
        for _ in 0..count {
            indices.push(cursor.read_u16::<LittleEndian>()?);
        }

        Ok(Self {
            references,
            families,
            indices,
        })
    }

    /// Number of skin references (rows)
    pub fn references(&self) -> usize {
        self.references
    }

    /// Number of skin families (columns)
    pub fn families(&self) -> usize {
        self.families
    }

    /// Texture index for a reference within a family
    pub fn get(&self, reference: usize, family: usize) -> Option<u16> {
        if reference >= self.references || family >= self.families {
            return None;
        }
        self.indices.get(family * self.references + reference).copied()
    }

    /// Last row that can contribute a distinct texture to some family
    ///
    /// This is the later of the last row where any family differs from family
    /// 0 and the last row where a texture index appears for the first time.
    pub fn last_column(&self) -> usize {
        let mut last_different = 0;
        let mut last_new_index = 0;
        let mut seen = HashSet::new();

        for x in 0..self.references {
            let Some(first) = self.get(x, 0) else {
                break;
            };
            for y in 0..self.families {
                let value = self.get(x, y).unwrap_or(first);
                if value != first {
                    last_different = x;
                }
                if seen.insert(value) {
                    last_new_index = x;
                }
            }
        }

        last_different.max(last_new_index)
    }

    /// Texture indices shown by one skin family
    pub fn textures_for_skin(&self, skin: u32) -> Result<BTreeSet<usize>> {
        let family = skin as usize;
        if family >= self.families {
            return Err(MdlError::InvalidSkin {
                skin,
                families: self.families,
            });
        }

        let last = self.last_column();
        Ok((0..self.references.min(last + 1))
            .filter_map(|x| self.get(x, family))
            .map(usize::from)
            .collect())
    }

    /// Union of the texture indices shown by the requested skins
    pub fn used_textures<'a, I>(&self, skins: I) -> Result<BTreeSet<usize>>
    where
        I: IntoIterator<Item = &'a u32>,
    {
        let mut used = BTreeSet::new();
        for &skin in skins {
            used.extend(self.textures_for_skin(skin)?);
        }
        Ok(used)
    }
}
