//! Integration tests for material lookup on synthetic model files

use pretty_assertions::assert_eq;
use source_mdl::header::TEXTURE_HEADER_OFFSET;
use source_mdl::model::TEXTURE_RECORD_SIZE;
use source_mdl::{MdlError, MdlFile, SkinSelection};
use std::collections::BTreeSet;
use test_case::test_case;

/// Build a model file with the given textures, directories and skin table
/// rows (indexed `[reference][family]`)
fn build_mdl(textures: &[&str], dirs: &[&str], skin_rows: &[Vec<u16>]) -> Vec<u8> {
    let header_end = TEXTURE_HEADER_OFFSET as usize + 7 * 4;
    let mut data = vec![0u8; header_end];

    let texture_offset = data.len();
    data.resize(texture_offset + textures.len() * TEXTURE_RECORD_SIZE, 0);
    for (index, name) in textures.iter().enumerate() {
        let record = texture_offset + index * TEXTURE_RECORD_SIZE;
        let relative = (data.len() - record) as i32;
        data[record..record + 4].copy_from_slice(&relative.to_le_bytes());
        data.extend_from_slice(name.as_bytes());
        data.push(0);
    }

    let texturedir_offset = data.len();
    data.resize(texturedir_offset + dirs.len() * 4, 0);
    for (index, dir) in dirs.iter().enumerate() {
        let slot = texturedir_offset + index * 4;
        let absolute = data.len() as i32;
        data[slot..slot + 4].copy_from_slice(&absolute.to_le_bytes());
        data.extend_from_slice(dir.as_bytes());
        data.push(0);
    }

    let references = skin_rows.len();
    let families = skin_rows.first().map_or(0, Vec::len);
    let skin_offset = data.len();
    for family in 0..families {
        for row in skin_rows {
            data.extend_from_slice(&row[family].to_le_bytes());
        }
    }

    let fields = [
        textures.len(),
        texture_offset,
        dirs.len(),
        texturedir_offset,
        references,
        families,
        skin_offset,
    ];
    for (index, field) in fields.iter().enumerate() {
        let at = TEXTURE_HEADER_OFFSET as usize + index * 4;
        data[at..at + 4].copy_from_slice(&(*field as i32).to_le_bytes());
    }
    data
}

fn crate_model() -> Vec<u8> {
    build_mdl(
        &["crate", "crate_red", "crate_metal", "crate_blue"],
        &["models\\props\\"],
        &[vec![0, 0], vec![2, 2], vec![1, 3]],
    )
}

#[test]
fn test_all_skins_uses_every_texture() {
    let data = crate_model();
    let model = MdlFile::parse(&data).unwrap();

    assert_eq!(model.header().texture_count, 4);
    assert_eq!(
        model.used_textures(&SkinSelection::All).unwrap(),
        BTreeSet::from([0, 1, 2, 3])
    );
    assert_eq!(
        model.material_names(&SkinSelection::All).unwrap(),
        vec![
            "models\\props\\crate",
            "models\\props\\crate_red",
            "models\\props\\crate_metal",
            "models\\props\\crate_blue",
        ]
    );
}

#[test_case(0, &["models\\props\\crate", "models\\props\\crate_red", "models\\props\\crate_metal"] ; "first skin")]
#[test_case(1, &["models\\props\\crate", "models\\props\\crate_metal", "models\\props\\crate_blue"] ; "second skin")]
fn test_single_skin(skin: u32, expected: &[&str]) {
    let data = crate_model();
    let model = MdlFile::parse(&data).unwrap();
    assert_eq!(
        model.material_names(&SkinSelection::single(skin)).unwrap(),
        expected
    );
}

#[test]
fn test_invalid_skin() {
    let data = crate_model();
    let model = MdlFile::parse(&data).unwrap();
    let err = model
        .material_names(&SkinSelection::single(5))
        .unwrap_err();
    assert!(matches!(err, MdlError::InvalidSkin { skin: 5, families: 2 }));
}

#[test]
fn test_every_directory_is_combined() {
    let data = build_mdl(
        &["wall"],
        &["models/a/", "models/b/"],
        &[vec![0]],
    );
    let model = MdlFile::parse(&data).unwrap();
    assert_eq!(
        model.material_names(&SkinSelection::single(0)).unwrap(),
        vec!["models/a/wall", "models/b/wall"]
    );
}

#[test]
fn test_no_directories_means_no_materials() {
    let data = build_mdl(&["wall"], &[], &[vec![0]]);
    let model = MdlFile::parse(&data).unwrap();
    assert!(model.material_names(&SkinSelection::All).unwrap().is_empty());
}

#[test]
fn test_truncated_texture_directory() {
    let mut data = build_mdl(&["wall"], &["models/a/"], &[vec![0]]);
    let at = TEXTURE_HEADER_OFFSET as usize + 3 * 4;
    let len = data.len() as i32;
    data[at..at + 4].copy_from_slice(&len.to_le_bytes());
    let model = MdlFile::parse(&data).unwrap();
    assert!(matches!(
        model.material_names(&SkinSelection::All),
        Err(MdlError::OutOfBounds { .. })
    ));
}
