//! Organization catalog loaded from the `;`-delimited NGO table.

mod filter;

pub use filter::{filter, CountryMatch, FilterCriteria, NO_COUNTRY_FILTER};

use crate::hdi;
use csv::{ReaderBuilder, StringRecord};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Fatal problems while loading the catalog at startup
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot open catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// One row of the catalog
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganizationRecord {
    pub name: String,
    /// Country of registration
    pub country: String,
    /// Raw `;`-joined intervention field, kept as loaded
    pub interventions: String,
    pub domain: String,
    pub website: Option<String>,
    pub donation_url: Option<String>,
}

impl OrganizationRecord {
    /// Intervention countries: split on `;`, trimmed, empties dropped.
    /// Original order is kept; repeated entries are yielded once.
    pub fn intervention_countries(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = BTreeSet::new();
        self.interventions
            .split(';')
            .map(str::trim)
            .filter(move |c| !c.is_empty() && seen.insert(*c))
    }

    /// Registration country equals `region`, ignoring case
    pub fn is_registered_in(&self, region: &str) -> bool {
        !self.country.is_empty() && self.country.to_lowercase() == region.to_lowercase()
    }
}

/// Organizations present in one map region
#[derive(Debug, Default)]
pub struct RegionPresence<'a> {
    /// Registered in the region itself
    pub local: Vec<&'a OrganizationRecord>,
    /// Registered elsewhere
    pub international: Vec<&'a OrganizationRecord>,
}

impl RegionPresence<'_> {
    pub fn len(&self) -> usize {
        self.local.len() + self.international.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    country: usize,
    interventions: usize,
    domain: usize,
    website: usize,
    donation: Vec<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, CatalogError> {
        let find = |column: &str| headers.iter().position(|h| h.trim() == column);
        let require = |column: &'static str| find(column).ok_or(CatalogError::MissingColumn(column));

        Ok(Self {
            name: require("nom")?,
            country: require("pays")?,
            interventions: require("pays_intervention")?,
            domain: require("domaine")?,
            website: require("site_web")?,
            // First non-empty of the two spellings wins
            donation: ["liens_dons", "lien_don"].into_iter().filter_map(|c| find(c)).collect(),
        })
    }

    fn record(&self, row: &StringRecord) -> OrganizationRecord {
        let field = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();
        let optional = |idx: usize| Some(field(idx)).filter(|s| !s.is_empty());

        OrganizationRecord {
            name: field(self.name),
            country: field(self.country),
            interventions: field(self.interventions),
            domain: field(self.domain),
            website: optional(self.website),
            donation_url: self.donation.iter().find_map(|&idx| optional(idx)),
        }
    }
}

/// The full organization table, immutable once loaded
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<OrganizationRecord>,
}

impl Catalog {
    /// Load the catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), organizations = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse a `;`-delimited table with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::resolve(rdr.headers()?)?;

        let mut records = Vec::new();
        for row in rdr.records() {
            records.push(columns.record(&row?));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[OrganizationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Country choices for the search bar: the no-filter sentinel, then every
    /// intervention country, sorted and deduplicated
    pub fn country_options(&self) -> Vec<String> {
        let countries: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| r.intervention_countries())
            .collect();

        std::iter::once(NO_COUNTRY_FILTER)
            .chain(countries)
            .map(str::to_string)
            .collect()
    }

    /// Sorted unique non-empty domains
    pub fn domain_options(&self) -> Vec<String> {
        sorted_unique(self.records.iter().map(|r| r.domain.as_str()))
    }

    /// Sorted unique non-empty organization names
    pub fn organization_names(&self) -> Vec<String> {
        sorted_unique(self.records.iter().map(|r| r.name.as_str()))
    }

    /// First record with exactly this name
    pub fn find(&self, name: &str) -> Option<&OrganizationRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Records of a single domain, in catalog order
    pub fn by_domain<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = &'a OrganizationRecord> + 'a {
        self.records.iter().filter(move |r| !r.domain.is_empty() && r.domain == domain)
    }

    /// Organizations intervening in a map region, split into local and
    /// international by registration country. The region is matched under
    /// its boundary-dataset spelling and its canonical index spelling.
    pub fn presence_in(&self, region: &str) -> RegionPresence<'_> {
        let canonical = hdi::canonical_name(region);
        let spellings: Vec<&str> = std::iter::once(region)
            .chain((canonical != region).then_some(canonical))
            .collect();
        let criteria: Vec<FilterCriteria> = spellings
            .iter()
            .map(|name| FilterCriteria::default().with_country(name, CountryMatch::Contains))
            .collect();

        let (local, international): (Vec<_>, Vec<_>) = self
            .records
            .iter()
            .filter(|r| criteria.iter().any(|c| c.matches(r)))
            .partition(|r| spellings.iter().any(|name| r.is_registered_in(name)));

        RegionPresence { local, international }
    }

    /// Matching subset for a search
    pub fn search(&self, criteria: &FilterCriteria) -> Vec<&OrganizationRecord> {
        filter(&self.records, criteria)
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
nom;pays;pays_intervention;domaine;site_web;liens_dons
Médecins du Monde;France;\"Kenya;Uganda;France\";Santé;https://mdm.org;https://mdm.org/don
Save the Children;United Kingdom;\"Kenya ; Chad;;\";Éducation;https://stc.org;
Kenya Red Cross;Kenya;Kenya;Santé;;
";

    fn sample() -> Catalog {
        Catalog::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_sample() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);

        let mdm = catalog.find("Médecins du Monde").unwrap();
        assert_eq!(mdm.country, "France");
        assert_eq!(mdm.domain, "Santé");
        assert_eq!(mdm.website.as_deref(), Some("https://mdm.org"));
        assert_eq!(mdm.donation_url.as_deref(), Some("https://mdm.org/don"));

        let stc = catalog.find("Save the Children").unwrap();
        assert_eq!(stc.donation_url, None);
        assert_eq!(stc.interventions, "Kenya ; Chad;;");
    }

    #[test]
    fn test_intervention_countries_split() {
        let catalog = sample();
        let stc = catalog.find("Save the Children").unwrap();
        let countries: Vec<_> = stc.intervention_countries().collect();
        assert_eq!(countries, vec!["Kenya", "Chad"]);
    }

    #[test]
    fn test_intervention_countries_dedup() {
        let record = OrganizationRecord {
            interventions: "Mali;Niger; Mali".into(),
            ..Default::default()
        };
        assert_eq!(record.intervention_countries().collect::<Vec<_>>(), vec!["Mali", "Niger"]);
    }

    #[test]
    fn test_country_options() {
        let options = sample().country_options();
        assert_eq!(options, vec!["Tous", "Chad", "France", "Kenya", "Uganda"]);
    }

    #[test]
    fn test_domain_and_name_options() {
        let catalog = sample();
        assert_eq!(catalog.domain_options(), vec!["Santé", "Éducation"]);
        assert_eq!(catalog.organization_names().len(), 3);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "nom;pays;pays_intervention;site_web\nA;France;France;x\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("domaine")));
    }

    #[test]
    fn test_legacy_donation_column() {
        let csv = "nom;pays;pays_intervention;domaine;site_web;lien_don\nA;France;Mali;Eau;;https://a.org/don\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.records()[0].donation_url.as_deref(), Some("https://a.org/don"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = "nom;pays;pays_intervention;domaine;site_web\nA;France\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        let record = &catalog.records()[0];
        assert_eq!(record.name, "A");
        assert!(record.domain.is_empty());
        assert_eq!(record.website, None);
    }

    #[test]
    fn test_presence_in_region() {
        let catalog = sample();
        let kenya = catalog.presence_in("Kenya");
        assert_eq!(kenya.len(), 3);
        assert_eq!(kenya.local.len(), 1);
        assert_eq!(kenya.local[0].name, "Kenya Red Cross");
        assert_eq!(kenya.international.len(), 2);

        assert!(catalog.presence_in("Peru").is_empty());
    }

    #[test]
    fn test_presence_under_canonical_spelling() {
        let csv = "\
nom;pays;pays_intervention;domaine;site_web
Člověk v tísni;Czechia;\"Czechia;Ukraine\";Urgence;https://pinf.cz
Caritas;Austria;\"Czech Republic\";Santé;https://caritas.at
Oxfam;United Kingdom;Yemen;Eau;https://oxfam.org
";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        let czech = catalog.presence_in("Czech Republic");
        assert_eq!(czech.local.len(), 1);
        assert_eq!(czech.local[0].name, "Člověk v tísni");
        assert_eq!(czech.international.len(), 1);
        assert_eq!(czech.international[0].name, "Caritas");
    }

    #[test]
    fn test_by_domain() {
        let catalog = sample();
        let names: Vec<_> = catalog.by_domain("Santé").map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Médecins du Monde", "Kenya Red Cross"]);
    }
}
