use std::collections::BTreeSet;

use super::OrganizationRecord;

/// Country token meaning "no country filter"
pub const NO_COUNTRY_FILTER: &str = "Tous";

/// How a country token is compared with each intervention country
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountryMatch {
    /// Token is a case-insensitive substring of an intervention country
    #[default]
    Contains,
    /// Token equals an intervention country, ignoring case
    Member,
}

/// Search criteria, built per search. Inactive filters are `None`/empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub country: Option<String>,
    pub country_match: CountryMatch,
    pub domains: BTreeSet<String>,
    pub name_query: String,
}

impl FilterCriteria {
    /// Set the country filter from a UI token. The sentinels `Tous`/`All`
    /// and blank tokens disable it.
    pub fn with_country(mut self, token: &str, mode: CountryMatch) -> Self {
        let token = token.trim();
        self.country = if token.is_empty()
            || token.eq_ignore_ascii_case(NO_COUNTRY_FILTER)
            || token.eq_ignore_ascii_case("All")
        {
            None
        } else {
            Some(token.to_string())
        };
        self.country_match = mode;
        self
    }

    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, query: &str) -> Self {
        self.name_query = query.trim().to_string();
        self
    }

    /// No filter is active
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.domains.is_empty() && self.name_query.is_empty()
    }

    /// Record passes every active filter
    pub fn matches(&self, record: &OrganizationRecord) -> bool {
        self.matches_country(record) && self.matches_domain(record) && self.matches_name(record)
    }

    fn matches_country(&self, record: &OrganizationRecord) -> bool {
        let Some(token) = &self.country else {
            return true;
        };
        let token = token.to_lowercase();

        record.intervention_countries().any(|c| {
            let c = c.to_lowercase();
            match self.country_match {
                CountryMatch::Contains => c.contains(&token),
                CountryMatch::Member => c == token,
            }
        })
    }

    fn matches_domain(&self, record: &OrganizationRecord) -> bool {
        self.domains.is_empty() || (!record.domain.is_empty() && self.domains.contains(&record.domain))
    }

    fn matches_name(&self, record: &OrganizationRecord) -> bool {
        self.name_query.is_empty()
            || (!record.name.is_empty()
                && record.name.to_lowercase().contains(&self.name_query.to_lowercase()))
    }
}

/// Stable filter: the records passing every active filter, in input order
pub fn filter<'a>(records: &'a [OrganizationRecord], criteria: &FilterCriteria) -> Vec<&'a OrganizationRecord> {
    if criteria.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| criteria.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(name: &str, interventions: &str, domain: &str) -> OrganizationRecord {
        OrganizationRecord {
            name: name.into(),
            country: "France".into(),
            interventions: interventions.into(),
            domain: domain.into(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<OrganizationRecord> {
        vec![
            org("Greenpeace", "Brazil;Indonesia", "Environnement"),
            org("Action contre la Faim", "Kenya;Uganda;Tanzania", "Santé"),
            org("Aide et Action", "Niger;Mali", "Éducation"),
            org("", "Nigeria", ""),
            org("Solidarités International", "Nigeria;Chad", "Eau"),
        ]
    }

    fn names<'a>(records: &[&'a OrganizationRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_identity_when_inactive() {
        let records = sample();
        let result = filter(&records, &FilterCriteria::default());
        assert_eq!(result.len(), records.len());
        assert!(result.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));

        let sentinel = FilterCriteria::default().with_country("Tous", CountryMatch::Contains);
        assert_eq!(filter(&records, &sentinel).len(), records.len());
        let english = FilterCriteria::default().with_country("All", CountryMatch::Member);
        assert!(english.is_empty());
    }

    #[test]
    fn test_country_substring_case_insensitive() {
        let records = sample();
        let uganda = FilterCriteria::default().with_country("uganda", CountryMatch::Contains);
        assert_eq!(names(&filter(&records, &uganda)), vec!["Action contre la Faim"]);

        let chad = FilterCriteria::default().with_country("Chad", CountryMatch::Contains);
        assert_eq!(names(&filter(&records, &chad)), vec!["Solidarités International"]);
    }

    #[test]
    fn test_country_member_vs_contains() {
        let records = sample();
        let contains = FilterCriteria::default().with_country("Niger", CountryMatch::Contains);
        assert_eq!(filter(&records, &contains).len(), 3);

        let member = FilterCriteria::default().with_country("niger", CountryMatch::Member);
        assert_eq!(names(&filter(&records, &member)), vec!["Aide et Action"]);
    }

    #[test]
    fn test_country_does_not_span_separator() {
        let records = vec![org("A", "Kenya;Uganda", "Santé")];
        let spanning = FilterCriteria::default().with_country("kenya;uganda", CountryMatch::Contains);
        assert!(filter(&records, &spanning).is_empty());
    }

    #[test]
    fn test_domain_exact() {
        let records = sample();
        for record in &records {
            if record.domain.is_empty() {
                continue;
            }
            let including = FilterCriteria::default().with_domains([record.domain.clone()]);
            assert!(including.matches(record));
            let excluding = FilterCriteria::default().with_domains(["Autre"]);
            assert!(!excluding.matches(record));
        }

        let partial = FilterCriteria::default().with_domains(["San"]);
        assert!(filter(&records, &partial).is_empty());
    }

    #[test]
    fn test_name_case_insensitive() {
        let records = sample();
        let lower = filter(&records, &FilterCriteria::default().with_name("greenpeace"));
        let upper = filter(&records, &FilterCriteria::default().with_name("GREENPEACE"));
        assert_eq!(names(&lower), names(&upper));
        assert_eq!(names(&lower), vec!["Greenpeace"]);

        let accented = filter(&records, &FilterCriteria::default().with_name("SOLIDARITÉS"));
        assert_eq!(names(&accented), vec!["Solidarités International"]);
    }

    #[test]
    fn test_empty_fields_never_match_active_filters() {
        let records = sample();
        let by_domain = FilterCriteria::default().with_domains([""]);
        assert!(filter(&records, &by_domain).is_empty());

        let by_name = FilterCriteria::default().with_name("a");
        assert!(filter(&records, &by_name).iter().all(|r| !r.name.is_empty()));
    }

    #[test]
    fn test_conjunction_and_order() {
        let records = sample();
        let criteria = FilterCriteria::default()
            .with_country("Nigeria", CountryMatch::Member)
            .with_domains(["Eau", "Éducation"])
            .with_name("inter");
        assert_eq!(names(&filter(&records, &criteria)), vec!["Solidarités International"]);

        let stable = filter(&records, &FilterCriteria::default().with_name("a"));
        assert_eq!(
            names(&stable),
            vec!["Greenpeace", "Action contre la Faim", "Aide et Action", "Solidarités International"]
        );
    }

    #[test]
    fn test_end_to_end_domain() {
        let records = vec![org("Un", "Mali", "Santé"), org("Deux", "Mali", "Éducation")];
        let result = filter(&records, &FilterCriteria::default().with_domains(["Santé"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].domain, "Santé");
    }
}
