//! Relative content path handling
//!
//! Every dependency is stored in one canonical form: lower-case, `/`
//! separators, no surrounding whitespace or slashes. Maps and materials may
//! spell the same file in any case and with either separator.

/// Normalize a relative content path
///
/// # Examples
///
/// ```
/// use source_deps::path::normalize_path;
///
/// assert_eq!(normalize_path(" Models\\Props\\Crate.MDL/ "), "models/props/crate.mdl");
/// ```
pub fn normalize_path(path: &str) -> String {
    path.to_lowercase()
        .replace('\\', "/")
        .trim_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

fn under_materials(value: &str, extension: &str) -> String {
    let mut path = normalize_path(&format!("materials/{}", normalize_path(value)));
    if !path.ends_with(extension) {
        path.push_str(extension);
    }
    path
}

/// Path of a texture named relative to `materials/`
pub fn texture_path(value: &str) -> String {
    under_materials(value, ".vtf")
}

/// Path of a material named relative to `materials/`
pub fn material_path(value: &str) -> String {
    under_materials(value, ".vmt")
}

/// Path of a sound named relative to `sound/`
pub fn sound_path(value: &str) -> String {
    normalize_path(&format!("sound/{}", normalize_path(value)))
}

/// Everything after the first `.` of the file name, used to group files
pub fn file_type(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.split_once('.').map_or("", |(_, extension)| extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Materials\\Concrete\\Wall01.vmt", "materials/concrete/wall01.vmt")]
    #[test_case("/sound/ambient/drip1.wav/", "sound/ambient/drip1.wav")]
    #[test_case("  models/props/crate.mdl\r\n", "models/props/crate.mdl")]
    #[test_case(" / a / ", "a")]
    #[test_case("", "")]
    fn test_normalize_path(input: &str, expected: &str) {
        assert_eq!(normalize_path(input), expected);
        // normalizing twice changes nothing
        assert_eq!(normalize_path(expected), expected);
    }

    #[test]
    fn test_texture_path() {
        assert_eq!(texture_path("Concrete\\Wall01"), "materials/concrete/wall01.vtf");
        assert_eq!(texture_path("concrete/wall01.vtf"), "materials/concrete/wall01.vtf");
    }

    #[test]
    fn test_material_path() {
        assert_eq!(material_path("skybox/sky_day01_01bk"), "materials/skybox/sky_day01_01bk.vmt");
        assert_eq!(material_path("/decals/blood1.vmt"), "materials/decals/blood1.vmt");
        assert_eq!(material_path("sprites/glow01.spr"), "materials/sprites/glow01.spr.vmt");
    }

    #[test]
    fn test_sound_path() {
        assert_eq!(sound_path("Ambient\\Drip1.wav"), "sound/ambient/drip1.wav");
    }

    #[test_case("models/props/crate.dx90.vtx", "dx90.vtx")]
    #[test_case("materials/concrete/wall01.vmt", "vmt")]
    #[test_case("models/v1.2/crate.mdl", "mdl")]
    #[test_case("maps/readme", "")]
    fn test_file_type(path: &str, expected: &str) {
        assert_eq!(file_type(path), expected);
    }
}
