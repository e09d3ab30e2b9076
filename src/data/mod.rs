use crate::map::{Polygon, Region};
use anyhow::{Context, Result};
use geojson::{Feature, GeoJson, Geometry, Value};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load world regions from a GeoJSON FeatureCollection keyed by a `name`
/// property. A missing or unreadable file yields an empty map.
pub fn load_regions_or_empty(path: &Path) -> Vec<Region> {
    if !path.exists() {
        warn!(path = %path.display(), "boundary data not found, map disabled");
        return Vec::new();
    }
    match load_regions(path) {
        Ok(regions) => regions,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load boundary data");
            Vec::new()
        }
    }
}

/// Load world regions from a GeoJSON file
pub fn load_regions(path: &Path) -> Result<Vec<Region>> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let regions = parse_regions(&mut bytes)?;
    let unknown = regions.iter().filter(|r| r.index.is_none()).count();
    info!(path = %path.display(), regions = regions.len(), unknown, "boundary data loaded");
    Ok(regions)
}

/// Parse GeoJSON bytes in place (simd-json mutates its input buffer)
pub fn parse_regions(bytes: &mut [u8]) -> Result<Vec<Region>> {
    let value: serde_json::Value = simd_json::serde::from_slice(bytes).context("invalid JSON")?;
    let geojson = GeoJson::from_json_value(value).context("invalid GeoJSON")?;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => anyhow::bail!("expected features with a `name` property"),
    };

    Ok(features.par_iter().filter_map(region_from_feature).collect())
}

fn region_from_feature(feature: &Feature) -> Option<Region> {
    let name = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str())?
        .to_string();

    let mut polygons = Vec::new();
    collect_polygons(feature.geometry.as_ref()?, &mut polygons);
    Region::new(name, polygons)
}

fn collect_polygons(geometry: &Geometry, polygons: &mut Vec<Polygon>) {
    let to_rings = |rings: &Vec<Vec<Vec<f64>>>| -> Polygon {
        rings
            .iter()
            .map(|ring| ring.iter().filter(|c| c.len() >= 2).map(|c| (c[0], c[1])).collect())
            .collect()
    };

    match &geometry.value {
        Value::Polygon(rings) => polygons.push(to_rings(rings)),
        Value::MultiPolygon(parts) => polygons.extend(parts.iter().map(to_rings)),
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, polygons);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdi::ColorBand;

    const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Czech Republic" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[12.0, 48.0], [19.0, 48.0], [19.0, 51.0], [12.0, 51.0], [12.0, 48.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Atlantis" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-40.0, 20.0], [-30.0, 20.0], [-30.0, 30.0], [-40.0, 20.0]]],
                        [[[-20.0, 20.0], [-10.0, 20.0], [-10.0, 30.0], [-20.0, 20.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "id": "XXX" },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            },
            {
                "type": "Feature",
                "properties": { "name": "Null Island" },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_regions() {
        let mut bytes = WORLD.as_bytes().to_vec();
        let regions = parse_regions(&mut bytes).unwrap();
        assert_eq!(regions.len(), 2);

        assert_eq!(regions[0].name, "Czech Republic");
        assert_eq!(regions[0].band, ColorBand::VeryHigh);
        assert_eq!(regions[0].bbox, (12.0, 48.0, 19.0, 51.0));

        assert_eq!(regions[1].name, "Atlantis");
        assert_eq!(regions[1].polygons.len(), 2);
        assert_eq!(regions[1].band, ColorBand::Unknown);
    }

    #[test]
    fn test_invalid_json() {
        let mut bytes = b"{ not json".to_vec();
        assert!(parse_regions(&mut bytes).is_err());
    }

    #[test]
    fn test_bundled_world_at_default_path() {
        use crate::config::Cli;
        use clap::Parser;

        let cli = Cli::parse_from(["ong-explorer"]);
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(&cli.world);
        let regions = load_regions(&path).unwrap();
        assert_eq!(regions.len(), 180);

        let czech = regions.iter().find(|r| r.name == "Czech Republic").unwrap();
        assert_eq!(czech.band, ColorBand::VeryHigh);
        let kenya = regions.iter().find(|r| r.name == "Kenya").unwrap();
        assert!(kenya.contains(37.9, 0.0));
    }

    #[test]
    fn test_missing_file_gives_empty_map() {
        assert!(load_regions_or_empty(Path::new("does/not/exist.json")).is_empty());
    }
}
