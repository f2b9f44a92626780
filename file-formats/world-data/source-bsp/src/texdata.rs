//! Material name table (texture data string data lump)

/// Split the material name table into its NUL separated names
///
/// Empty names, including the one produced by the trailing terminator, are
/// skipped.
pub fn parse_material_names(data: &[u8]) -> Vec<String> {
    data.split(|&b| b == 0)
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}
