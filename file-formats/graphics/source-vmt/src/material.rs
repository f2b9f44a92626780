//! References from a material to other content

use crate::error::Result;
use crate::tokenizer::tokenize;

/// Parameters whose value names a texture
///
/// The same parameter with a `2` suffix (the second blend layer, such as
/// `$basetexture2`) is treated identically.
pub const TEXTURE_KEYS: [&str; 22] = [
    "$texture",
    "$basetexture",
    "$detail",
    "$blendmodulatetexture",
    "$bumpmap",
    "$normalmap",
    "$parallaxmap",
    "$heightmap",
    "$selfillummask",
    "$lightwarptexture",
    "$envmap",
    "$envmapmask",
    "$displacementmap",
    "$reflecttexture",
    "$refracttexture",
    "$refracttinttexture",
    "$dudvmap",
    "$bumpmask",
    "$emissiveblendtexture",
    "$emissiveblendbasetexture",
    "$emissiveblendflowtexture",
    "$phongexponenttexture",
];

/// Parameters whose value names another material
pub const MATERIAL_KEYS: [&str; 2] = ["$bottommaterial", "$underwateroverlay"];

/// Key of a patch material naming the material it extends
pub const INCLUDE_KEY: &str = "include";

/// Content a material refers to, with the raw (lower-cased) value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MaterialReference {
    /// A texture, relative to `materials/`
    Texture(String),
    /// Another material, relative to `materials/`
    Material(String),
    /// A full relative path to a material extended by a patch material
    Include(String),
}

impl MaterialReference {
    /// The referenced value
    pub fn value(&self) -> &str {
        match self {
            Self::Texture(value) | Self::Material(value) | Self::Include(value) => value,
        }
    }
}

/// Whether a key names a texture parameter
pub fn is_texture_key(key: &str) -> bool {
    let key = key.strip_suffix('2').unwrap_or(key);
    TEXTURE_KEYS.contains(&key)
}

/// Whether a key names a material parameter
pub fn is_material_key(key: &str) -> bool {
    MATERIAL_KEYS.contains(&key)
}

/// Find everything a material document refers to
///
/// Tokens are examined in order. A recognised key consumes the following
/// token as its value; any other token is skipped on its own, so shader names
/// and braces never shift the key/value alignment.
pub fn parse_references(text: &str) -> Result<Vec<MaterialReference>> {
    let tokens = tokenize(&text.to_lowercase())?;
    let mut references = Vec::new();

    let mut index = 0;
    while index + 1 < tokens.len() {
        let key = tokens[index].as_str();
        let value = &tokens[index + 1];

        let reference = if is_texture_key(key) {
            Some(MaterialReference::Texture(value.clone()))
        } else if is_material_key(key) {
            Some(MaterialReference::Material(value.clone()))
        } else if key == INCLUDE_KEY {
            Some(MaterialReference::Include(value.clone()))
        } else {
            None
        };

        match reference {
            Some(reference) => {
                references.push(reference);
                index += 2;
            }
            None => index += 1,
        }
    }

    log::trace!("Found {} material references", references.len());
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VmtError;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("$basetexture", true)]
    #[test_case("$basetexture2", true)]
    #[test_case("$envmap2", true)]
    #[test_case("$bumpmap22", false)]
    #[test_case("$surfaceprop", false)]
    #[test_case("$bottommaterial", false)]
    fn test_is_texture_key(key: &str, expected: bool) {
        assert_eq!(is_texture_key(key), expected);
    }

    #[test]
    fn test_parse_references() {
        let text = r#"
"WorldVertexTransition"
{
    "$basetexture" "Nature\Dirt01"
    "$basetexture2" "nature/grass01"
    "$surfaceprop" "dirt"
    "$envmap" "env_cubemap" // cubemap
    "$bottommaterial" "nature/water_bottom"
    "Proxies"
    {
        "AnimatedTexture"
        {
            "animatedtextureframenumvar" "$frame"
        }
    }
}
"#;
        let references = parse_references(text).unwrap();
        assert_eq!(
            references,
            vec![
                MaterialReference::Texture("nature\\dirt01".to_string()),
                MaterialReference::Texture("nature/grass01".to_string()),
                MaterialReference::Texture("env_cubemap".to_string()),
                MaterialReference::Material("nature/water_bottom".to_string()),
            ]
        );
    }

    #[test]
    fn test_patch_include() {
        let text = "patch\n{\n\tinclude \"materials/concrete/wall01.vmt\"\n\treplace\n\t{\n\t\t$envmap \"maps/test/c0_0_0\"\n\t}\n}\n";
        let references = parse_references(text).unwrap();
        assert_eq!(
            references,
            vec![
                MaterialReference::Include("materials/concrete/wall01.vmt".to_string()),
                MaterialReference::Texture("maps/test/c0_0_0".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_without_value() {
        assert!(parse_references("lightmappedgeneric { $basetexture").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_quotes() {
        let err = parse_references("\"$basetexture\" \"foo").unwrap_err();
        assert_eq!(err, VmtError::UnterminatedQuote { line: 1 });
    }

    #[test]
    fn test_value_accessor() {
        assert_eq!(MaterialReference::Include("a.vmt".to_string()).value(), "a.vmt");
    }
}
