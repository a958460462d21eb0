use crate::catalog::CertificateType;
use crate::error::{CsrKitError, Result};

/// Days counted per requested year.
pub const DAYS_PER_YEAR: u32 = 365;

/// A requested validity period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Days(u32),
    Years(u32),
}

impl Term {
    /// Fails with [`CsrKitError::InvalidArgument`] when the year count does
    /// not fit in a day count.
    pub fn to_days(self) -> Result<u32> {
        match self {
            Term::Days(days) => Ok(days),
            Term::Years(years) => years.checked_mul(DAYS_PER_YEAR).ok_or_else(|| {
                CsrKitError::InvalidArgument(format!("term of {years} years is too long"))
            }),
        }
    }
}

/// Resolves the validity period, in days, of a certificate of type `type_id`.
///
/// An explicit `days` value always wins; otherwise the shortest term the type
/// offers is used.
pub fn resolve_term(days: Option<u32>, type_id: i64, catalog: &[CertificateType]) -> Result<u32> {
    if let Some(days) = days {
        return Ok(days);
    }

    let cert_type = catalog
        .iter()
        .find(|t| t.id == type_id)
        .ok_or_else(|| {
            CsrKitError::InvalidArgument(format!("certificate type {type_id} is not in the catalog"))
        })?;
    cert_type.terms.iter().copied().min().ok_or_else(|| {
        CsrKitError::InvalidArgument(format!("certificate type {type_id} offers no terms"))
    })
}
