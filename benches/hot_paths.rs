use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ong_explorer::catalog::{filter, CountryMatch, FilterCriteria, OrganizationRecord};
use ong_explorer::hdi::{self, DEVELOPMENT_INDEX};
use ong_explorer::map::{MapRenderer, Region, Viewport};

const DOMAINS: [&str; 5] = ["Santé", "Éducation", "Eau", "Environnement", "Urgence"];

fn synthetic_catalog(n: usize) -> Vec<OrganizationRecord> {
    (0..n)
        .map(|i| {
            let (a, _) = DEVELOPMENT_INDEX[i % DEVELOPMENT_INDEX.len()];
            let (b, _) = DEVELOPMENT_INDEX[(i * 7 + 3) % DEVELOPMENT_INDEX.len()];
            OrganizationRecord {
                name: format!("Association {i}"),
                country: a.to_string(),
                interventions: format!("{a};{b}"),
                domain: DOMAINS[i % DOMAINS.len()].to_string(),
                website: Some(format!("https://ong{i}.org")),
                donation_url: (i % 3 == 0).then(|| format!("https://ong{i}.org/don")),
            }
        })
        .collect()
}

/// Square regions on a 10° lattice, one per index entry
fn lattice_regions() -> Vec<Region> {
    DEVELOPMENT_INDEX
        .iter()
        .enumerate()
        .filter_map(|(i, (name, _))| {
            let lon = -180.0 + (i % 36) as f64 * 10.0;
            let lat = -60.0 + (i / 36) as f64 * 10.0;
            let ring = vec![(lon, lat), (lon + 9.0, lat), (lon + 9.0, lat + 9.0), (lon, lat + 9.0), (lon, lat)];
            Region::new(name.to_string(), vec![vec![ring]])
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let records = synthetic_catalog(5_000);
    let criteria = FilterCriteria::default()
        .with_country("ken", CountryMatch::Contains)
        .with_domains(["Santé", "Eau"])
        .with_name("1");

    c.bench_function("filter_5000_records", |b| {
        b.iter(|| filter(black_box(&records), black_box(&criteria)).len())
    });
}

fn bench_color_for(c: &mut Criterion) {
    c.bench_function("color_for_all_regions", |b| {
        b.iter(|| {
            DEVELOPMENT_INDEX
                .iter()
                .map(|(name, _)| hdi::color_for(black_box(name)))
                .count()
        })
    });
}

fn bench_region_hit_test(c: &mut Criterion) {
    let renderer = MapRenderer::new(lattice_regions());
    let mut viewport = Viewport::world(0, 0);
    viewport.set_cells(160, 50);

    c.bench_function("region_at_cell_full_frame", |b| {
        b.iter(|| {
            let mut hits = 0;
            for row in 0..50 {
                for col in 0..160 {
                    if renderer.region_at_cell(black_box(&viewport), col, row).is_some() {
                        hits += 1;
                    }
                }
            }
            hits
        })
    });

    c.bench_function("render_frame", |b| {
        b.iter(|| renderer.render(160, 50, black_box(&viewport), Some(0)).fills.len())
    });
}

criterion_group!(benches, bench_filter, bench_color_for, bench_region_hit_test);
criterion_main!(benches);
