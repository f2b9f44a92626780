//! Reader for BSP map files
//!
//! [`BspReader`] parses the header once and then serves individual lumps on
//! demand, so only the lumps a caller asks for are ever read.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::entities::{Entity, parse_entities};
use crate::error::Result;
use crate::header::{BspHeader, LumpId, read_range};
use crate::pakfile::PakFile;
use crate::static_props::{GameLumpEntry, StaticPropLump, parse_game_lump_directory};
use crate::texdata::parse_material_names;

/// Reader for a Source BSP map
///
/// # Examples
///
/// ```rust,no_run
/// use source_bsp::BspReader;
///
/// let mut reader = BspReader::open("maps/de_example.bsp").unwrap();
/// for name in reader.material_names().unwrap() {
///     println!("{}", name);
/// }
/// ```
#[derive(Debug)]
pub struct BspReader<R> {
    reader: R,
    header: BspHeader,
}

impl BspReader<BufReader<File>> {
    /// Open a map file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> BspReader<R> {
    /// Create a reader, parsing the header and lump directory
    pub fn new(mut reader: R) -> Result<Self> {
        let header = BspHeader::parse(&mut reader)?;
        log::debug!("BSP version {}", header.version);
        Ok(Self { reader, header })
    }

    /// The parsed header
    pub fn header(&self) -> &BspHeader {
        &self.header
    }

    /// Read the exact bytes of a lump by directory index
    pub fn read_lump_by_index(&mut self, id: usize) -> Result<Vec<u8>> {
        let entry = *self.header.lump(id)?;
        entry.read_data(&mut self.reader, id)
    }

    /// Read the exact bytes of a lump
    pub fn read_lump(&mut self, id: LumpId) -> Result<Vec<u8>> {
        self.read_lump_by_index(id.index())
    }

    /// Entity lump decoded as text
    pub fn entity_text(&mut self) -> Result<String> {
        let data = self.read_lump(LumpId::Entities)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Parsed entities
    pub fn entities(&mut self) -> Result<Vec<Entity>> {
        let text = self.entity_text()?;
        parse_entities(&text)
    }

    /// Material names referenced by brush faces
    pub fn material_names(&mut self) -> Result<Vec<String>> {
        let data = self.read_lump(LumpId::TexDataStringData)?;
        Ok(parse_material_names(&data))
    }

    /// Game lump directory
    pub fn game_lumps(&mut self) -> Result<Vec<GameLumpEntry>> {
        let data = self.read_lump(LumpId::GameLump)?;
        parse_game_lump_directory(&data)
    }

    /// Static prop lump, if the map has one
    pub fn static_props(&mut self) -> Result<Option<StaticPropLump>> {
        let Some(entry) = self
            .game_lumps()?
            .into_iter()
            .find(GameLumpEntry::is_static_props)
        else {
            return Ok(None);
        };

        let data = read_range(
            &mut self.reader,
            entry.id as i64,
            entry.offset,
            entry.length,
        )?;
        StaticPropLump::parse(&data, entry.version).map(Some)
    }

    /// Embedded pak file, if the map has a non-empty one
    pub fn pak_file(&mut self) -> Result<Option<PakFile>> {
        let data = self.read_lump(LumpId::PakFile)?;
        if data.is_empty() {
            return Ok(None);
        }
        PakFile::new(data).map(Some)
    }
}
