use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Fallback when neither an override nor a template size is known.
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 160.0,
    height: 60.0,
};

/// Read-only capability mapping a node's type tag to its natural size.
/// Supplied by the caller at the entry point; the engine holds no global
/// dimension state.
pub trait DimensionLookup {
    fn size_of(&self, kind: &str) -> Option<Size>;
}

static BUILTIN_SIZES: Lazy<HashMap<&'static str, Size>> = Lazy::new(|| {
    let mut sizes = HashMap::new();
    sizes.insert("default", Size::new(160.0, 60.0));
    sizes.insert("process", Size::new(160.0, 60.0));
    sizes.insert("decision", Size::new(120.0, 120.0));
    sizes.insert("terminator", Size::new(140.0, 50.0));
    sizes.insert("database", Size::new(120.0, 100.0));
    sizes.insert("note", Size::new(180.0, 80.0));
    sizes.insert("actor", Size::new(80.0, 120.0));
    sizes
});

/// Map-backed [`DimensionLookup`] with an optional built-in template table.
#[derive(Debug, Clone, Default)]
pub struct TemplateDimensions {
    sizes: HashMap<String, Size>,
}

impl TemplateDimensions {
    pub fn with_sizes(pairs: impl IntoIterator<Item = (String, Size)>) -> Self {
        Self {
            sizes: pairs.into_iter().collect(),
        }
    }

    /// Table of common diagram node kinds, for callers without their own
    /// template registry.
    pub fn builtin() -> Self {
        Self {
            sizes: BUILTIN_SIZES
                .iter()
                .map(|(kind, size)| (kind.to_string(), *size))
                .collect(),
        }
    }
}

impl DimensionLookup for TemplateDimensions {
    fn size_of(&self, kind: &str) -> Option<Size> {
        self.sizes.get(kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_default_kind() {
        let dims = TemplateDimensions::builtin();
        let size = dims.size_of("default").unwrap();
        assert_eq!(size, DEFAULT_NODE_SIZE);
        assert!(dims.size_of("no-such-kind").is_none());
    }
}
