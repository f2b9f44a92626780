//! Skins requested for each model

use source_mdl::SkinSelection;
use std::collections::BTreeMap;

/// Skins requested for each model, keyed by normalized model path
///
/// Once a model is marked as using all skins, individual skins recorded
/// later do not narrow it again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinUsage {
    models: BTreeMap<String, SkinSelection>,
}

impl SkinUsage {
    /// Create an empty usage table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skin for a model; `None` means every skin
    pub fn record(&mut self, model: &str, skin: Option<u32>) {
        let selection = self.models.entry(model.to_string()).or_default();
        match skin {
            Some(skin) => selection.add(skin),
            None => *selection = SkinSelection::All,
        }
    }

    /// Skins a model is used with
    ///
    /// A model nobody asked for a specific skin of, such as one reached
    /// through a material or an allow list, is treated as using all skins.
    pub fn get(&self, model: &str) -> SkinSelection {
        self.models.get(model).cloned().unwrap_or(SkinSelection::All)
    }

    /// Number of models with recorded usage
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over models and their selections
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkinSelection)> {
        self.models.iter().map(|(model, selection)| (model.as_str(), selection))
    }
}

/// Interpret a signed skin value from a map: negative means every skin
pub fn skin_from_signed(skin: i64) -> Option<u32> {
    u32::try_from(skin).ok()
}

/// Interpret an entity `skin` value; anything but a non-negative integer means every skin
pub fn skin_from_value(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(skin_from_signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use test_case::test_case;

    const CRATE: &str = "models/props/crate.mdl";

    #[test]
    fn test_record_accumulates() {
        let mut usage = SkinUsage::new();
        usage.record(CRATE, Some(0));
        usage.record(CRATE, Some(2));
        assert_eq!(usage.get(CRATE), SkinSelection::Skins(BTreeSet::from([0, 2])));
        assert_eq!(usage.len(), 1);
    }

    #[test]
    fn test_all_is_sticky() {
        let mut usage = SkinUsage::new();
        usage.record(CRATE, Some(1));
        usage.record(CRATE, None);
        usage.record(CRATE, Some(3));
        assert!(usage.get(CRATE).is_all());
    }

    #[test]
    fn test_unrecorded_model_uses_all() {
        assert!(SkinUsage::new().get(CRATE).is_all());
    }

    #[test_case(Some("2"), Some(2))]
    #[test_case(Some(" 0 "), Some(0))]
    #[test_case(Some("-1"), None)]
    #[test_case(Some("red"), None)]
    #[test_case(Some(""), None)]
    #[test_case(None, None)]
    fn test_skin_from_value(value: Option<&str>, expected: Option<u32>) {
        assert_eq!(skin_from_value(value), expected);
    }
}
