//! The payload of a certificate enrollment request.

use bon::Builder;
use serde::Serialize;

use crate::catalog::{Catalog, CertificateType};
use crate::csr::Csr;
use crate::error::{CsrKitError, Result};
use crate::term::{Term, resolve_term};

/// Longest `comments` value accepted by the CA, in characters.
pub const COMMENTS_MAX_CHARS: usize = 1024;
/// Longest `externalRequester` value accepted by the CA, in characters.
pub const EXTERNAL_REQUESTER_MAX_CHARS: usize = 512;
/// Server software type sent with every request ("other").
pub const DEFAULT_SERVER_TYPE: i64 = -1;

/// Reference to a catalog entry, by id or by exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertTypeRef {
    Id(i64),
    Name(String),
}

impl From<i64> for CertTypeRef {
    fn from(id: i64) -> Self {
        CertTypeRef::Id(id)
    }
}

impl From<&str> for CertTypeRef {
    fn from(name: &str) -> Self {
        CertTypeRef::Name(name.to_string())
    }
}

impl From<String> for CertTypeRef {
    fn from(name: String) -> Self {
        CertTypeRef::Name(name)
    }
}

/// Optional inputs of [`SigningRequestParameters::build`].
///
/// # Example
/// ```
/// use csrkit::{enroll::{CertTypeRef, SignOptions}, term::Term};
/// let options = SignOptions::builder()
///     .cert_type(CertTypeRef::Id(27))
///     .term(Term::Years(1))
///     .comments("renewal")
///     .build();
/// assert_eq!(options.term, Some(Term::Years(1)));
/// ```
#[derive(Clone, Debug, Default, Builder)]
pub struct SignOptions {
    /// Certificate type; matched against the request when absent.
    #[builder(into)]
    pub cert_type: Option<CertTypeRef>,
    /// Validity period; the shortest term of the type when absent.
    pub term: Option<Term>,
    #[builder(into)]
    pub comments: Option<String>,
    #[builder(into)]
    pub external_requester: Option<String>,
}

/// Parameters of an SSL enrollment, serialized as the JSON body the CA expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningRequestParameters {
    pub org_id: i64,
    pub csr: String,
    #[serde(rename = "subjAltNames")]
    pub subject_alt_names: Vec<String>,
    pub cert_type: i64,
    pub term: u32,
    pub server_type: i64,
    pub comments: String,
    pub external_requester: String,
}

impl SigningRequestParameters {
    /// Builds the enrollment payload for `csr`.
    ///
    /// Without an explicit type the catalog entry is chosen with
    /// [`Catalog::match_for_csr`], restricted to types offering the requested
    /// term. Over-long comments and requester values are truncated, and a
    /// term of years too long to count in days is an
    /// [`CsrKitError::InvalidArgument`].
    pub fn build(
        org_id: i64,
        csr: &Csr,
        catalog: &[CertificateType],
        options: SignOptions,
    ) -> Result<Self> {
        let days = options.term.map(Term::to_days).transpose()?;
        let types = Catalog::new(catalog);

        let cert_type = match options.cert_type {
            Some(CertTypeRef::Id(id)) => id,
            Some(CertTypeRef::Name(name)) => types
                .find_by_name(&name)
                .map(|t| t.id)
                .ok_or_else(|| {
                    CsrKitError::InvalidArgument(format!("unknown certificate type {name:?}"))
                })?,
            None => types
                .match_for_csr(csr, days)
                .map(|t| t.id)
                .ok_or_else(|| {
                    CsrKitError::InvalidArgument(format!(
                        "no certificate type matches {:?}",
                        csr.all_names()
                    ))
                })?,
        };

        let term = resolve_term(days, cert_type, catalog)?;

        Ok(Self {
            org_id,
            csr: csr.to_pem(),
            subject_alt_names: csr.subject_alt_names().to_vec(),
            cert_type,
            term,
            server_type: DEFAULT_SERVER_TYPE,
            comments: truncate(options.comments.unwrap_or_default(), COMMENTS_MAX_CHARS),
            external_requester: truncate(
                options.external_requester.unwrap_or_default(),
                EXTERNAL_REQUESTER_MAX_CHARS,
            ),
        })
    }
}

fn truncate(mut value: String, max_chars: usize) -> String {
    if let Some((index, _)) = value.char_indices().nth(max_chars) {
        value.truncate(index);
    }
    value
}
