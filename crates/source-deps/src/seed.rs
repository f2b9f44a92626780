//! Initial dependencies taken from the map
//!
//! A map asks for content in several places: entity key values, the
//! material name table, placed static props, sounds mentioned anywhere in
//! the entity text, and the patched materials the compiler stored in the
//! embedded pak file. Besides those, a handful of files named after the map
//! are picked up if they exist.

use log::{debug, info};
use regex::Regex;
use source_bsp::{BspReader, Entity, StaticPropLump};
use std::collections::BTreeSet;
use std::io::{Read, Seek};
use std::sync::OnceLock;

use crate::error::{ResolveError, Result};
use crate::path::{material_path, normalize_path, sound_path};
use crate::resolver::{DependencySet, material_references};
use crate::skins::skin_from_value;

/// Entity keys whose value names a material
pub const MATERIAL_KEYS: [&str; 5] = ["texture", "material", "detailmaterial", "model", "ropematerial"];

/// Faces of a skybox, appended to the `skyname` value
pub const SKYBOX_FACES: [&str; 6] = ["bk", "dn", "ft", "lf", "rt", "up"];

/// Pak file directory holding the compiler's patched materials
pub const PATCH_MATERIAL_PREFIX: &str = "materials/maps/";

static SOUND_PATTERN: OnceLock<Regex> = OnceLock::new();

fn sound_pattern() -> &'static Regex {
    SOUND_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)[a-z0-9_\-/\\]+\.(?:wav|ogg|mp3)\b").expect("valid sound regex")
    })
}

/// Sound files mentioned anywhere in `text`, as `sound/` paths
pub fn find_sounds(text: &str) -> BTreeSet<String> {
    sound_pattern()
        .find_iter(text)
        .map(|found| sound_path(found.as_str()))
        .collect()
}

/// Seed models and materials named by entities
pub fn seed_entities(dependencies: &mut DependencySet, entities: &[Entity]) {
    for entity in entities {
        let forced_all = entity.contains_key("targetname");

        for (key, value) in entity.iter() {
            if value.is_empty() {
                continue;
            }

            if key == "model" && value.starts_with('*') {
                // brush model, part of the map itself
                continue;
            }

            if key == "model" {
                let skin = if forced_all {
                    None
                } else {
                    skin_from_value(entity.get("skin"))
                };
                dependencies.insert_model(value, skin);
            }

            if MATERIAL_KEYS.contains(&key) {
                dependencies.insert(&material_path(value));
            }

            if key == "skyname" {
                for face in SKYBOX_FACES {
                    dependencies.insert(&material_path(&format!("skybox/{}{}", value, face)));
                }
            }
        }
    }
}

/// Seed the models of static props with the skin of each placement
pub fn seed_static_props(dependencies: &mut DependencySet, lump: &StaticPropLump) {
    for prop in &lump.props {
        dependencies.insert_model(&prop.model, u32::try_from(prop.skin).ok());
    }
}

/// Seed the materials of the material name table
pub fn seed_material_names<S: AsRef<str>>(dependencies: &mut DependencySet, names: &[S]) {
    for name in names {
        dependencies.insert(&material_path(name.as_ref()));
    }
}

/// Files that belong to a map by name alone
pub fn map_companion_files(map_name: &str) -> Vec<String> {
    let map = normalize_path(map_name);
    vec![
        format!("maps/{map}.txt"),
        format!("maps/{map}.nav"),
        format!("maps/{map}.kv"),
        format!("maps/cfg/{map}.cfg"),
        format!("resource/overviews/{map}.txt"),
        format!("resource/overviews/{map}_radar.dds"),
        format!("resource/overviews/{map}_radar_spectate.dds"),
        format!("resource/overviews/{map}_lower_radar.dds"),
        format!("resource/overviews/{map}_higher_radar.dds"),
    ]
}

/// Paths listed one per line in an allow list
pub fn parse_pack_list(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize_path)
        .filter(|path| !path.is_empty())
        .collect()
}

/// Seed what the compiler's patched materials refer to
///
/// The patched materials live inside the map already and are not added
/// themselves. Returns how many were read.
pub fn seed_patch_materials(
    dependencies: &mut DependencySet,
    materials: &[(String, Vec<u8>)],
) -> Result<usize> {
    let mut count = 0;
    for (name, data) in materials {
        if !name.ends_with(".vmt") {
            continue;
        }
        let references = material_references(&String::from_utf8_lossy(data)).map_err(|source| {
            ResolveError::Material {
                path: name.into(),
                source,
            }
        })?;
        dependencies.extend(references);
        count += 1;
    }
    Ok(count)
}

/// Seed everything a map asks for directly
pub fn seed_map<R: Read + Seek>(
    dependencies: &mut DependencySet,
    map: &mut BspReader<R>,
) -> Result<()> {
    let entity_text = map.entity_text()?;
    let entities = source_bsp::parse_entities(&entity_text)?;
    seed_entities(dependencies, &entities);
    debug!("Seeded {} entities", entities.len());

    let sounds = find_sounds(&entity_text);
    debug!("Found {} sounds", sounds.len());
    dependencies.extend(sounds);

    let names = map.material_names()?;
    seed_material_names(dependencies, &names);
    debug!("Seeded {} brush materials", names.len());

    if let Some(lump) = map.static_props()? {
        seed_static_props(dependencies, &lump);
        debug!(
            "Seeded {} static props using {} models",
            lump.props.len(),
            lump.models.len()
        );
    }

    if let Some(mut pak) = map.pak_file()? {
        let patches = pak.read_prefixed(PATCH_MATERIAL_PREFIX)?;
        let count = seed_patch_materials(dependencies, &patches)?;
        debug!("Seeded references of {} patched materials", count);
    }

    info!("Map requests {} files", dependencies.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use source_bsp::parse_entities;
    use source_bsp::StaticProp;
    use source_mdl::SkinSelection;
    use std::collections::BTreeSet;

    fn paths(dependencies: &DependencySet) -> Vec<&str> {
        dependencies.paths().collect()
    }

    #[test]
    fn test_prop_entity_with_skin() {
        let entities = parse_entities(
            "{\n\"classname\" \"prop_dynamic\"\n\"model\" \"models/props/crate.mdl\"\n\"skin\" \"1\"\n}\n",
        )
        .unwrap();
        let mut dependencies = DependencySet::new();
        seed_entities(&mut dependencies, &entities);

        assert_eq!(
            paths(&dependencies),
            vec!["materials/models/props/crate.mdl.vmt", "models/props/crate.mdl"]
        );
        assert_eq!(
            dependencies.skins().get("models/props/crate.mdl"),
            SkinSelection::single(1)
        );
    }

    #[test]
    fn test_targetname_forces_all_skins() {
        let entities = parse_entities(
            "{\n\"model\" \"models/props/crate.mdl\"\n\"skin\" \"1\"\n\"targetname\" \"crate_1\"\n}\n",
        )
        .unwrap();
        let mut dependencies = DependencySet::new();
        seed_entities(&mut dependencies, &entities);
        assert!(dependencies.skins().get("models/props/crate.mdl").is_all());
    }

    #[test]
    fn test_negative_skin_means_all() {
        let entities =
            parse_entities("{\n\"model\" \"models/props/crate.mdl\"\n\"skin\" \"-1\"\n}\n").unwrap();
        let mut dependencies = DependencySet::new();
        seed_entities(&mut dependencies, &entities);
        assert!(dependencies.skins().get("models/props/crate.mdl").is_all());
    }

    #[test]
    fn test_brush_model_is_ignored() {
        let entities =
            parse_entities("{\n\"classname\" \"func_door\"\n\"model\" \"*12\"\n}\n").unwrap();
        let mut dependencies = DependencySet::new();
        seed_entities(&mut dependencies, &entities);
        assert!(dependencies.is_empty());
        assert!(dependencies.skins().is_empty());
    }

    #[test]
    fn test_skyname() {
        let entities =
            parse_entities("{\n\"classname\" \"worldspawn\"\n\"skyname\" \"sky_day01_01\"\n}\n").unwrap();
        let mut dependencies = DependencySet::new();
        seed_entities(&mut dependencies, &entities);
        assert_eq!(
            paths(&dependencies),
            vec![
                "materials/skybox/sky_day01_01bk.vmt",
                "materials/skybox/sky_day01_01dn.vmt",
                "materials/skybox/sky_day01_01ft.vmt",
                "materials/skybox/sky_day01_01lf.vmt",
                "materials/skybox/sky_day01_01rt.vmt",
                "materials/skybox/sky_day01_01up.vmt",
            ]
        );
    }

    #[test]
    fn test_material_keys() {
        let entities = parse_entities(
            "{\n\"classname\" \"move_rope\"\n\"ropematerial\" \"cable/cable2\"\n}\n{\n\"classname\" \"infodecal\"\n\"texture\" \"decals/blood1\"\n}\n",
        )
        .unwrap();
        let mut dependencies = DependencySet::new();
        seed_entities(&mut dependencies, &entities);
        assert_eq!(
            paths(&dependencies),
            vec!["materials/cable/cable2.vmt", "materials/decals/blood1.vmt"]
        );
    }

    #[test]
    fn test_find_sounds() {
        let text = r#"
"message" "Ambient\Drip1.WAV"
"StartSound" "doors/door_metal_thin_open1.wav"
"music" "music/theme.mp3"
"radio" "radio/chatter.ogg?"
"notes" "a file.wave is not a sound"
"#;
        assert_eq!(
            find_sounds(text),
            BTreeSet::from([
                "sound/ambient/drip1.wav".to_string(),
                "sound/doors/door_metal_thin_open1.wav".to_string(),
                "sound/music/theme.mp3".to_string(),
                "sound/radio/chatter.ogg".to_string(),
            ])
        );
    }

    #[test]
    fn test_static_props() {
        let lump = StaticPropLump {
            version: 10,
            models: vec!["models/props/crate.mdl".to_string()],
            props: vec![
                StaticProp {
                    model: "models/props/crate.mdl".to_string(),
                    skin: 0,
                },
                StaticProp {
                    model: "Models/Props/Crate.mdl".to_string(),
                    skin: 2,
                },
            ],
        };
        let mut dependencies = DependencySet::new();
        seed_static_props(&mut dependencies, &lump);
        assert_eq!(paths(&dependencies), vec!["models/props/crate.mdl"]);
        assert_eq!(
            dependencies.skins().get("models/props/crate.mdl"),
            SkinSelection::Skins(BTreeSet::from([0, 2]))
        );
    }

    #[test]
    fn test_map_companion_files() {
        let files = map_companion_files("de_test");
        assert_eq!(files.len(), 9);
        assert!(files.contains(&"maps/de_test.nav".to_string()));
        assert!(files.contains(&"maps/cfg/de_test.cfg".to_string()));
        assert!(files.contains(&"resource/overviews/de_test_radar.dds".to_string()));
    }

    #[test]
    fn test_parse_pack_list() {
        assert_eq!(
            parse_pack_list("Sound\\Extra\\Bell.wav\n\n  materials/extra/sign.vmt  \n"),
            vec!["sound/extra/bell.wav", "materials/extra/sign.vmt"]
        );
    }

    #[test]
    fn test_patch_materials_seed_references_only() {
        let patch = br#""patch" { "include" "materials/nature/water_canals.vmt" "replace" { "$envmap" "maps/de_test/c0_0_0" } }"#;
        let materials = vec![
            ("materials/maps/de_test/nature/water_canals_wvt_patch.vmt".to_string(), patch.to_vec()),
            ("materials/maps/de_test/c0_0_0.vtf".to_string(), vec![0; 16]),
        ];
        let mut dependencies = DependencySet::new();
        assert_eq!(seed_patch_materials(&mut dependencies, &materials).unwrap(), 1);
        assert_eq!(
            paths(&dependencies),
            vec!["materials/maps/de_test/c0_0_0.vtf", "materials/nature/water_canals.vmt"]
        );
    }
}
