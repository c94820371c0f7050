//! Crop image lookup for result cards

use std::collections::HashMap;

/// Image shown when a crop has no catalog entry
pub const FALLBACK_CROP_IMAGE: &str = "images/crops/default.jpg";

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("rice", "images/crops/rice.jpg"),
    ("paddy", "images/crops/rice.jpg"),
    ("wheat", "images/crops/wheat.jpg"),
    ("maize", "images/crops/maize.jpg"),
    ("corn", "images/crops/maize.jpg"),
    ("millet", "images/crops/millet.jpg"),
    ("pearlmillet", "images/crops/millet.jpg"),
    ("bajra", "images/crops/millet.jpg"),
    ("sorghum", "images/crops/sorghum.jpg"),
    ("jowar", "images/crops/sorghum.jpg"),
    ("barley", "images/crops/barley.jpg"),
    ("chickpea", "images/crops/chickpea.jpg"),
    ("gram", "images/crops/chickpea.jpg"),
    ("lentil", "images/crops/lentil.jpg"),
    ("pigeonpea", "images/crops/pigeonpea.jpg"),
    ("moong", "images/crops/moong.jpg"),
    ("greengram", "images/crops/moong.jpg"),
    ("mustard", "images/crops/mustard.jpg"),
    ("groundnut", "images/crops/groundnut.jpg"),
    ("soybean", "images/crops/soybean.jpg"),
    ("cotton", "images/crops/cotton.jpg"),
    ("sugarcane", "images/crops/sugarcane.jpg"),
    ("watermelon", "images/crops/watermelon.jpg"),
    ("cucumber", "images/crops/cucumber.jpg"),
];

/// Normalize a crop name into a catalog key.
///
/// Lowercases, drops any parenthetical text, then keeps only ASCII letters:
/// `"Chickpea (gram)"` becomes `"chickpea"`.
pub fn normalize_crop_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut key = String::with_capacity(lowered.len());
    let mut depth = 0usize;

    for c in lowered.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            'a'..='z' if depth == 0 => key.push(c),
            _ => {}
        }
    }

    key
}

/// Static mapping from normalized crop names to image references
#[derive(Debug, Clone)]
pub struct CropImageCatalog {
    images: HashMap<String, String>,
    fallback: String,
}

impl CropImageCatalog {
    /// Create an empty catalog that resolves everything to `fallback`
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            images: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Add an entry; the name is normalized before insertion
    pub fn with_entry(mut self, name: &str, image: impl Into<String>) -> Self {
        self.images.insert(normalize_crop_name(name), image.into());
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resolve the image for a crop name as returned by the model
    pub fn image_for(&self, crop_name: &str) -> &str {
        self.images
            .get(&normalize_crop_name(crop_name))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for CropImageCatalog {
    fn default() -> Self {
        DEFAULT_ENTRIES
            .iter()
            .fold(Self::new(FALLBACK_CROP_IMAGE), |catalog, (name, image)| {
                catalog.with_entry(name, *image)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_parenthetical() {
        assert_eq!(normalize_crop_name("Chickpea (gram)"), "chickpea");
        assert_eq!(normalize_crop_name("Pearl Millet (Bajra)"), "pearlmillet");
    }

    #[test]
    fn test_normalize_strips_non_letters() {
        assert_eq!(normalize_crop_name("Green-Gram 2"), "greengram");
        assert_eq!(normalize_crop_name("  Maize! "), "maize");
        assert_eq!(normalize_crop_name("(fodder)"), "");
    }

    #[test]
    fn test_unclosed_parenthesis_drops_rest() {
        assert_eq!(normalize_crop_name("Sorghum (jowar"), "sorghum");
    }

    #[test]
    fn test_lookup_and_fallback() {
        let catalog = CropImageCatalog::default();
        assert_eq!(catalog.image_for("Chickpea (gram)"), "images/crops/chickpea.jpg");
        assert_eq!(catalog.image_for("WHEAT"), "images/crops/wheat.jpg");
        assert_eq!(catalog.image_for("Dragon fruit"), FALLBACK_CROP_IMAGE);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = CropImageCatalog::new("none.png").with_entry("Ragi (finger millet)", "ragi.png");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.image_for("ragi"), "ragi.png");
        assert_eq!(catalog.image_for("rice"), "none.png");
    }

    proptest! {
        #[test]
        fn prop_normalized_is_lowercase_ascii(name in "\\PC{0,40}") {
            let key = normalize_crop_name(&name);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase()));
        }

        #[test]
        fn prop_normalize_is_idempotent(name in "[A-Za-z ()0-9-]{0,40}") {
            let once = normalize_crop_name(&name);
            prop_assert_eq!(normalize_crop_name(&once), once.clone());
        }
    }
}
