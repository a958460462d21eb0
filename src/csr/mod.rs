pub mod extensions;
pub mod params;

use std::fmt;
use std::str::FromStr;

use der::asn1::{Any, BitString};
use der::{Decode, Encode, Sequence};
use x509_cert::request::{CertReq, CertReqInfo};
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::error::{CsrKitError, Result};
use crate::key::{KeyInfo, PublicKey};
use crate::pem_utils;

/// `CertificationRequest` with the request info kept as raw DER, so the exact
/// signed bytes are available for verification.
#[derive(Clone, Debug, Sequence)]
struct SignedRequest {
    info: Any,
    algorithm: AlgorithmIdentifierOwned,
    signature: BitString,
}

/// A parsed and verified PKCS#10 certificate signing request.
///
/// A `Csr` only exists once its self-signature has been checked against its own
/// public key and it carries at least one identity (a subject CN or a DNS
/// subjectAltName). All names are lower-cased.
///
/// # Example
/// ```no_run
/// use csrkit::csr::Csr;
///
/// # fn main() -> Result<(), csrkit::error::CsrKitError> {
/// let pem = std::fs::read_to_string("request.csr").unwrap();
/// let csr: Csr = pem.parse()?;
/// println!("{:?} ({} bits)", csr.all_names(), csr.key_size()?);
/// assert_eq!(csr.serialize(), pem.as_bytes());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Csr {
    raw: Vec<u8>,
    der: Vec<u8>,
    request: CertReq,
    public_key: PublicKey,
    common_name: Option<String>,
    subject_alt_names: Vec<String>,
    all_names: Vec<String>,
}

impl Csr {
    /// Parses a PEM or DER encoded signing request and verifies its signature.
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self> {
        let raw = input.as_ref();
        let der = if pem_utils::is_pem(raw) {
            pem_utils::pem_to_der(raw)?
        } else {
            raw.to_vec()
        };

        let signed = SignedRequest::from_der(&der)?;
        let info_der = signed.info.to_der()?;
        let info = CertReqInfo::from_der(&info_der)?;

        let public_key = PublicKey::from_x509spki(&info.public_key)?;
        let signature = signed.signature.as_bytes().ok_or_else(|| {
            CsrKitError::SignatureInvalid("signature has unused bits".to_string())
        })?;
        if let Err(err) = public_key.verify(&info_der, &signed.algorithm, signature) {
            tracing::warn!(algorithm = %signed.algorithm.oid, "CSR signature does not verify");
            return Err(err);
        }

        let common_name = extensions::common_name(&info.subject)?.map(|cn| cn.to_lowercase());
        let subject_alt_names = extensions::subject_alt_names(&info)?;
        if common_name.is_none() && subject_alt_names.is_empty() {
            return Err(CsrKitError::MissingIdentity);
        }

        let mut all_names: Vec<String> = Vec::with_capacity(subject_alt_names.len() + 1);
        for name in common_name.iter().chain(subject_alt_names.iter()) {
            if !all_names.contains(name) {
                all_names.push(name.clone());
            }
        }

        tracing::debug!(
            common_name = common_name.as_deref(),
            subject_alt_names = subject_alt_names.len(),
            key = public_key.algorithm_name(),
            "parsed CSR"
        );

        Ok(Self {
            raw: raw.to_vec(),
            der,
            request: CertReq {
                info,
                algorithm: signed.algorithm,
                signature: signed.signature,
            },
            public_key,
            common_name,
            subject_alt_names,
            all_names,
        })
    }

    /// The exact bytes this request was parsed from.
    pub fn serialize(&self) -> &[u8] {
        &self.raw
    }

    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// PEM text of the request: the original text for PEM input, a fresh
    /// `CERTIFICATE REQUEST` block for DER input.
    pub fn to_pem(&self) -> String {
        if pem_utils::is_pem(&self.raw) {
            String::from_utf8_lossy(&self.raw).into_owned()
        } else {
            pem_utils::der_to_pem(&self.der, pem_utils::CSR_PEM_LABELS[0])
        }
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    pub fn subject_alt_names(&self) -> &[String] {
        &self.subject_alt_names
    }

    /// The CN followed by the subjectAltNames, without duplicates.
    pub fn all_names(&self) -> &[String] {
        &self.all_names
    }

    /// Fails with [`CsrKitError::UnknownKeyType`] for ECDSA keys.
    pub fn key_info(&self) -> Result<KeyInfo> {
        self.public_key.info()
    }

    /// Size of the public key in bits (RSA modulus or DSA prime).
    pub fn key_size(&self) -> Result<usize> {
        self.key_info().map(|info| info.bits())
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn request(&self) -> &CertReq {
        &self.request
    }
}

impl TryFrom<CertReq> for Csr {
    type Error = CsrKitError;

    fn try_from(request: CertReq) -> Result<Self> {
        let der = request
            .to_der()
            .map_err(|e| CsrKitError::EncodingError(e.to_string()))?;
        Csr::parse(pem_utils::der_to_pem(&der, pem_utils::CSR_PEM_LABELS[0]))
    }
}

impl FromStr for Csr {
    type Err = CsrKitError;

    fn from_str(s: &str) -> Result<Self> {
        Csr::parse(s)
    }
}

impl fmt::Display for Csr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pem())
    }
}
