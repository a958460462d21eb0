//! Building new signing requests.

use der::Encode;
use der::asn1::BitString;
use x509_cert::request::{CertReq, CertReqInfo, Version};

use crate::csr::Csr;
use crate::csr::extensions::{SubjectAltName, extension_request};
use crate::csr::params::{COMMON_NAME_KEY, ExtensionParam, SubjectAttributes};
use crate::error::{CsrKitError, Result};
use crate::key::KeyPair;

/// Size in bits of the DSA key generated when no key is supplied.
pub const DEFAULT_KEY_SIZE: usize = 4096;

/// Generates a signed request for `names`.
///
/// The subject is `subject` with `CN` set to `names[0]`; the subjectAltName
/// extension lists every name, the CN included. Without `key` a new
/// [`DEFAULT_KEY_SIZE`]-bit DSA key is generated, which takes a while.
///
/// Returns the key pair together with the parsed request.
///
/// # Example
/// ```no_run
/// use csrkit::{csr::params::SubjectAttributes, generator, key::KeyPair};
///
/// # fn main() -> Result<(), csrkit::error::CsrKitError> {
/// let key = KeyPair::generate_rsa(2048)?;
/// let subject = SubjectAttributes::new().with("O", "Example Corp");
/// let (_key, csr) = generator::generate(&["example.com", "www.example.com"], Some(key), &subject)?;
/// assert_eq!(csr.common_name(), Some("example.com"));
/// println!("{}", csr.to_pem());
/// # Ok(())
/// # }
/// ```
pub fn generate<S: AsRef<str>>(
    names: &[S],
    key: Option<KeyPair>,
    subject: &SubjectAttributes,
) -> Result<(KeyPair, Csr)> {
    let Some(first) = names.first() else {
        return Err(CsrKitError::InvalidArgument(
            "at least one name is required".to_string(),
        ));
    };

    let key = match key {
        Some(key) => key,
        None => KeyPair::generate_dsa(DEFAULT_KEY_SIZE)?,
    };

    let subject = subject.clone().with(COMMON_NAME_KEY, first.as_ref());
    let san = SubjectAltName {
        names: names.iter().map(|name| name.as_ref().to_string()).collect(),
    };

    let info = CertReqInfo {
        version: Version::V1,
        subject: subject.as_x509_name()?,
        public_key: key.as_spki()?,
        attributes: extension_request(&[ExtensionParam::from_extension(&san, false)?])?,
    };

    let info_der = info
        .to_der()
        .map_err(|e| CsrKitError::EncodingError(e.to_string()))?;
    let signature = key.sign_data(&info_der)?;

    let request = CertReq {
        info,
        algorithm: key.signature_algorithm(),
        signature: BitString::from_bytes(&signature)
            .map_err(|e| CsrKitError::EncodingError(e.to_string()))?,
    };

    tracing::debug!(names = ?san.names, key_bits = key.info().bits(), "generated CSR");
    let csr = Csr::try_from(request)?;
    Ok((key, csr))
}
