//! Development-index lookup and choropleth color bands.
//!
//! Region names arrive from two vocabularies: the boundary dataset and the
//! index table. Both resolve to the same value, so a lookup never fails only
//! because of which spelling was supplied.

mod style;
mod table;

pub use style::{parse_hex, ColorBand, RegionStyle};
pub use table::{DEVELOPMENT_INDEX, NAME_ALIASES};

use std::collections::HashMap;
use std::sync::LazyLock;

/// Alternate spelling -> canonical spelling
static ALIASES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NAME_ALIASES.iter().copied().collect());

/// Index values keyed by canonical name, extended with every alias whose
/// canonical name is indexed.
static INDEX: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut index: HashMap<&'static str, f64> = DEVELOPMENT_INDEX.iter().copied().collect();
    for &(alias, canonical) in NAME_ALIASES {
        if let Some(&value) = index.get(canonical) {
            index.insert(alias, value);
        }
    }
    index
});

/// Map a boundary-dataset spelling to the canonical one, or return it unchanged.
pub fn canonical_name(region: &str) -> &str {
    ALIASES.get(region).copied().unwrap_or(region)
}

/// Development index for a region under either spelling.
pub fn development_index(region: &str) -> Option<f64> {
    INDEX
        .get(canonical_name(region))
        .or_else(|| INDEX.get(region))
        .copied()
}

/// Color band for a map region. Unmapped regions get [`ColorBand::Unknown`].
pub fn color_for(region: &str) -> ColorBand {
    development_index(region).map_or(ColorBand::Unknown, ColorBand::from_index)
}
