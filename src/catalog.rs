//! Selecting a certificate type from the CA's catalog.
//!
//! The catalog is a list of [`CertificateType`] entries as returned by the CA.
//! Products that are never requested automatically (EV, ECC, AMT, Elite) are
//! excluded first, then the remaining entries are searched by name for the
//! product matching the shape of a request: wildcard, multi-domain or a plain
//! single-name SSL certificate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::csr::Csr;

static EXCLUDED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(EV|Extended Validation|ECC|AMT|Elite)\b").expect("valid exclusion regex")
});
static WILDCARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Wildcard.*SSL").expect("valid wildcard regex"));
static MULTI_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Multi.?Domain.*SSL").expect("valid multi-domain regex"));
static SSL_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bSSL\b").expect("valid SSL regex"));
static NOT_STANDARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Multi ?Domain|Wildcard").expect("valid non-standard regex"));

/// A certificate product offered by the CA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateType {
    pub id: i64,
    pub name: String,
    /// Supported validity periods, in days.
    pub terms: Vec<u32>,
}

impl CertificateType {
    pub fn new(id: i64, name: impl Into<String>, terms: impl Into<Vec<u32>>) -> Self {
        Self {
            id,
            name: name.into(),
            terms: terms.into(),
        }
    }

    pub fn offers_term(&self, days: u32) -> bool {
        self.terms.contains(&days)
    }
}

/// Name pattern searched for in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Wildcard,
    MultiDomain,
    /// A single-name SSL product.
    Standard,
}

impl Pattern {
    /// The pattern a request's names call for.
    pub fn for_csr(csr: &Csr) -> Self {
        if csr.all_names().iter().any(|name| name.starts_with("*.")) {
            Pattern::Wildcard
        } else if !csr.subject_alt_names().is_empty() {
            Pattern::MultiDomain
        } else {
            Pattern::Standard
        }
    }
}

/// Classification of a catalog entry by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogTag {
    /// Never selected; `reason` is the word that excluded it.
    Excluded { reason: String },
    /// Candidate entry. Several flags may be set at once, e.g. a
    /// "Multi-Domain SSL" product is both multi-domain and standard.
    Offered {
        wildcard: bool,
        multi_domain: bool,
        standard: bool,
    },
}

impl CatalogTag {
    pub fn satisfies(&self, pattern: Pattern) -> bool {
        match self {
            CatalogTag::Excluded { .. } => false,
            CatalogTag::Offered {
                wildcard,
                multi_domain,
                standard,
            } => match pattern {
                Pattern::Wildcard => *wildcard,
                Pattern::MultiDomain => *multi_domain,
                Pattern::Standard => *standard,
            },
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, CatalogTag::Excluded { .. })
    }
}

/// Classifies a catalog entry name.
pub fn classify(name: &str) -> CatalogTag {
    if let Some(found) = EXCLUDED.find(name) {
        return CatalogTag::Excluded {
            reason: found.as_str().to_string(),
        };
    }
    CatalogTag::Offered {
        wildcard: WILDCARD.is_match(name),
        multi_domain: MULTI_DOMAIN.is_match(name),
        standard: SSL_WORD.is_match(name) && !NOT_STANDARD.is_match(name),
    }
}

/// A catalog with every entry classified up front.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    entries: Vec<(&'a CertificateType, CatalogTag)>,
}

impl<'a> Catalog<'a> {
    pub fn new(types: &'a [CertificateType]) -> Self {
        Self {
            entries: types.iter().map(|t| (t, classify(&t.name))).collect(),
        }
    }

    /// Entries that are not excluded and, if `days` is given, offer that term.
    pub fn standard(&self, days: Option<u32>) -> Vec<&'a CertificateType> {
        self.standard_entries(days).map(|(t, _)| t).collect()
    }

    fn standard_entries(
        &self,
        days: Option<u32>,
    ) -> impl Iterator<Item = (&'a CertificateType, &CatalogTag)> {
        self.entries
            .iter()
            .filter(move |(t, tag)| {
                !tag.is_excluded() && days.is_none_or(|days| t.offers_term(days))
            })
            .map(|(t, tag)| (*t, tag))
    }

    /// Picks the catalog entry for `csr`.
    ///
    /// A single remaining entry is returned whatever the request looks like. If
    /// no entry matches the request's pattern, the standard SSL pattern is
    /// tried instead.
    pub fn match_for_csr(&self, csr: &Csr, days: Option<u32>) -> Option<&'a CertificateType> {
        let candidates: Vec<_> = self.standard_entries(days).collect();
        if candidates.len() <= 1 {
            return candidates.first().map(|(t, _)| *t);
        }

        let pattern = Pattern::for_csr(csr);
        let find = |pattern: Pattern| {
            candidates
                .iter()
                .find(|(_, tag)| tag.satisfies(pattern))
                .map(|(t, _)| *t)
        };

        let found = find(pattern);
        if found.is_some() || pattern == Pattern::Standard {
            tracing::debug!(?pattern, id = found.map(|t| t.id), "matched certificate type");
            return found;
        }

        let fallback = find(Pattern::Standard);
        tracing::debug!(
            ?pattern,
            id = fallback.map(|t| t.id),
            "no certificate type for pattern, fell back to standard SSL"
        );
        fallback
    }

    pub fn find_by_name(&self, name: &str) -> Option<&'a CertificateType> {
        self.entries.iter().map(|(t, _)| *t).find(|t| t.name == name)
    }
}

/// Catalog entries eligible for automatic selection.
pub fn standard_catalog(types: &[CertificateType], days: Option<u32>) -> Vec<&CertificateType> {
    Catalog::new(types).standard(days)
}

/// Picks the entry of `types` matching `csr`, see [`Catalog::match_for_csr`].
pub fn match_for_csr<'a>(
    types: &'a [CertificateType],
    csr: &Csr,
    days: Option<u32>,
) -> Option<&'a CertificateType> {
    Catalog::new(types).match_for_csr(csr, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offered(wildcard: bool, multi_domain: bool, standard: bool) -> CatalogTag {
        CatalogTag::Offered {
            wildcard,
            multi_domain,
            standard,
        }
    }

    #[test]
    fn test_classify_names() {
        assert_eq!(classify("TestCompany SSL (SHA-2)"), offered(false, false, true));
        assert_eq!(
            classify("TestCompany Wildcard SSL Certificate (SHA-2)"),
            offered(true, false, false)
        );
        assert_eq!(
            classify("TestCompany Multi Domain SSL (SHA-2)"),
            offered(false, true, false)
        );
        assert_eq!(classify("Multi-Domain SSL"), offered(false, true, true));
        assert_eq!(classify("IGTF Server Cert"), offered(false, false, false));
        assert_eq!(classify("SSLv3 thing"), offered(false, false, false));
    }

    #[test]
    fn test_classify_exclusions_are_whole_words() {
        assert_eq!(
            classify("Comodo EV SSL Certificate"),
            CatalogTag::Excluded {
                reason: "EV".to_string()
            }
        );
        assert!(classify("TestCompany ECC SSL (SHA-2)").is_excluded());
        assert!(classify("Comodo Elite SSL Certificate (FileMaker)").is_excluded());
        assert!(classify("AMT SSL Certificate").is_excluded());
        assert!(!classify("Developer SSL").is_excluded());
        assert!(!classify("Eve SSL").is_excluded());
        assert!(!classify("ev SSL").is_excluded());
    }

    #[test]
    fn test_standard_catalog_filters_exclusions_and_terms() {
        let types = vec![
            CertificateType::new(1, "Basic SSL", [365, 730]),
            CertificateType::new(2, "Comodo EV SSL Certificate", [365, 730]),
            CertificateType::new(3, "Short SSL", [90]),
        ];
        let ids = |list: Vec<&CertificateType>| list.iter().map(|t| t.id).collect::<Vec<_>>();

        assert_eq!(ids(standard_catalog(&types, None)), [1, 3]);
        assert_eq!(ids(standard_catalog(&types, Some(90))), [3]);
        assert!(standard_catalog(&types, Some(42)).is_empty());
    }

    #[test]
    fn test_find_by_name() {
        let types = vec![
            CertificateType::new(25, "test SSL (SHA-2)", [90, 365, 730]),
            CertificateType::new(27, "test Multi Domain SSL (SHA-2)", [365, 730]),
        ];
        let catalog = Catalog::new(&types);
        assert_eq!(
            catalog.find_by_name("test SSL (SHA-2)").map(|t| t.id),
            Some(25)
        );
        assert!(catalog.find_by_name("test ssl (sha-2)").is_none());
    }

    #[test]
    fn test_deserialize_catalog() {
        let json = r#"[{"id": 25, "name": "test SSL (SHA-2)", "terms": [365, 730]}]"#;
        let types: Vec<CertificateType> = serde_json::from_str(json).unwrap();
        assert_eq!(types, [CertificateType::new(25, "test SSL (SHA-2)", [365, 730])]);
    }
}
