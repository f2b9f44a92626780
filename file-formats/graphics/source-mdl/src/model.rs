//! Material lookup for a whole model file

use byteorder::{ByteOrder, LittleEndian};
use memchr::memchr;
use std::collections::BTreeSet;

use crate::error::{MdlError, Result};
use crate::header::TextureHeader;
use crate::skin::{SkinSelection, SkinTable};

/// Size of one texture record
pub const TEXTURE_RECORD_SIZE: usize = 64;

/// File extensions that accompany every model, replacing the `.mdl` part
pub const COMPANION_EXTENSIONS: [&str; 5] = ["dx80.vtx", "dx90.vtx", "phy", "sw.vtx", "vvd"];

/// A model file held in memory
#[derive(Debug, Clone)]
pub struct MdlFile<'a> {
    data: &'a [u8],
    header: TextureHeader,
}

impl<'a> MdlFile<'a> {
    /// Parse the texture header of a model file
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = TextureHeader::parse(data)?;
        Ok(Self { data, header })
    }

    /// The texture header
    pub fn header(&self) -> &TextureHeader {
        &self.header
    }

    /// Read the skin table
    pub fn skin_table(&self) -> Result<SkinTable> {
        SkinTable::read(
            self.data,
            self.header.skinreference_offset,
            self.header.skinreference_count,
            self.header.skinfamily_count,
        )
    }

    /// Texture indices needed to display the selected skins
    pub fn used_textures(&self, selection: &SkinSelection) -> Result<BTreeSet<usize>> {
        self.check_texture_table()?;
        match selection {
            SkinSelection::All => Ok((0..self.header.texture_count).collect()),
            SkinSelection::Skins(skins) => self.skin_table()?.used_textures(skins),
        }
    }

    /// Fails unless every texture record lies inside the file
    fn check_texture_table(&self) -> Result<()> {
        if self.header.texture_count == 0 {
            return Ok(());
        }
        let fits = self
            .header
            .texture_count
            .checked_mul(TEXTURE_RECORD_SIZE)
            .and_then(|size| size.checked_add(self.header.texture_offset))
            .is_some_and(|end| end <= self.data.len());
        if fits {
            Ok(())
        } else {
            Err(MdlError::OutOfBounds {
                what: "texture table",
                offset: self.header.texture_offset as i64,
                len: self.data.len(),
            })
        }
    }

    /// Name of a texture record
    pub fn texture_name(&self, index: usize) -> Result<String> {
        let record = index
            .checked_mul(TEXTURE_RECORD_SIZE)
            .and_then(|offset| offset.checked_add(self.header.texture_offset))
            .filter(|&offset| offset + 4 <= self.data.len())
            .ok_or_else(|| MdlError::OutOfBounds {
                what: "texture record",
                offset: self.header.texture_offset as i64 + (index * TEXTURE_RECORD_SIZE) as i64,
                len: self.data.len(),
            })?;

        // name offsets are relative to the record
        let relative = LittleEndian::read_i32(&self.data[record..record + 4]) as i64;
        self.read_cstr("texture name", record as i64 + relative)
    }

    /// Texture directory prefixes
    pub fn texture_dirs(&self) -> Result<Vec<String>> {
        let start = self.header.texturedir_offset;
        let end = start.saturating_add(self.header.texturedir_count.saturating_mul(4));
        if end > self.data.len() {
            return Err(MdlError::OutOfBounds {
                what: "texture directory table",
                offset: start as i64,
                len: self.data.len(),
            });
        }

        self.data[start..end]
            .chunks_exact(4)
            .map(|chunk| self.read_cstr("texture directory", LittleEndian::read_i32(chunk) as i64))
            .collect()
    }

    /// Material names (directory + texture name) used by the selected skins
    ///
    /// Every directory is combined with every used texture, since the engine
    /// searches all of them.
    pub fn material_names(&self, selection: &SkinSelection) -> Result<Vec<String>> {
        let used = self.used_textures(selection)?;
        log::trace!("Skin selection {:?} uses textures {:?}", selection, used);
        let textures = used
            .into_iter()
            .filter(|&index| index < self.header.texture_count)
            .map(|index| self.texture_name(index))
            .collect::<Result<Vec<_>>>()?;

        let mut names = Vec::new();
        for dir in self.texture_dirs()? {
            for texture in &textures {
                names.push(format!("{}{}", dir, texture));
            }
        }
        Ok(names)
    }

    fn read_cstr(&self, what: &'static str, offset: i64) -> Result<String> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|&start| start <= self.data.len())
            .ok_or(MdlError::OutOfBounds {
                what,
                offset,
                len: self.data.len(),
            })?;
        let tail = &self.data[start..];
        let end = memchr(0, tail).unwrap_or(tail.len());
        Ok(String::from_utf8_lossy(&tail[..end]).into_owned())
    }
}

/// Files that ship alongside a model: vertex data, strip lists and physics
///
/// The companion name replaces everything after the first `.` of the path.
pub fn companion_files(model_path: &str) -> Vec<String> {
    let base = model_path.split_once('.').map_or(model_path, |(base, _)| base);
    COMPANION_EXTENSIONS
        .iter()
        .map(|extension| format!("{}.{}", base, extension))
        .collect()
}
