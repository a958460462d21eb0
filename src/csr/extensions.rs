use const_oid::{AssociatedOid, ObjectIdentifier};
use der::asn1::{
    Any, Ia5String, Ia5StringRef, PrintableStringRef, SetOfVec, TeletexStringRef, Utf8StringRef,
};
use der::{Decode, Encode, Tag, TagNumber, Tagged};
use x509_cert::attr::Attribute;
use x509_cert::ext::Extensions;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::name::Name;
use x509_cert::request::CertReqInfo;

use super::params::{COMMON_NAME, ExtensionParam};
use crate::error::{CsrKitError, Result};

/// PKCS#9 extensionRequest attribute (`1.2.840.113549.1.9.14`).
pub const EXTENSION_REQUEST: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.14");

/// `dNSName [2] IA5String` inside a GeneralName.
const DNS_NAME_TAG: Tag = Tag::ContextSpecific {
    constructed: false,
    number: TagNumber::N2,
};

/// Trait for converting to and from X.509 extensions.
///
/// # Example
/// ```
/// use csrkit::csr::extensions::{SubjectAltName, ToAndFromX509Extension};
/// let san = SubjectAltName { names: vec!["example.com".to_string()] };
/// let encoded = san.to_x509_extension_value().unwrap();
/// let decoded = SubjectAltName::from_x509_extension_value(&encoded).unwrap();
/// assert_eq!(san.names, decoded.names);
/// ```
pub trait ToAndFromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension into a DER-encoded byte vector.
    fn to_x509_extension_value(&self) -> Result<Vec<u8>>;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

/// The Subject Alternative Name (SAN) extension, restricted to DNS names.
///
/// Decoding is strict: every GeneralName must carry the dNSName tag, anything
/// else fails with [`CsrKitError::UnknownGeneralNameTag`]. Names are kept in
/// source order, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    pub names: Vec<String>,
}

impl ToAndFromX509Extension for SubjectAltName {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::SubjectAltName::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>> {
        let san = x509_cert::ext::pkix::SubjectAltName(
            self.names
                .iter()
                .map(|name| {
                    Ia5String::new(name)
                        .map(GeneralName::DnsName)
                        .map_err(|e| {
                            CsrKitError::InvalidArgument(format!("invalid DNS name {name:?}: {e}"))
                        })
                })
                .collect::<Result<Vec<_>>>()?,
        );

        san.to_der()
            .map_err(|e| CsrKitError::EncodingError(e.to_string()))
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self> {
        let entries = Vec::<Any>::from_der(extension)?;
        let names = entries
            .iter()
            .map(|entry| {
                if entry.tag() != DNS_NAME_TAG {
                    return Err(CsrKitError::UnknownGeneralNameTag(entry.tag()));
                }
                Ok(Ia5StringRef::new(entry.value())?.to_string())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { names })
    }
}

/// Returns the value of the first `CN` attribute of `subject`, as written.
pub fn common_name(subject: &Name) -> Result<Option<String>> {
    subject
        .0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .find(|atv| atv.oid == COMMON_NAME)
        .map(|atv| directory_string(&atv.value))
        .transpose()
}

fn directory_string(value: &Any) -> Result<String> {
    let text = match value.tag() {
        Tag::Utf8String => Utf8StringRef::try_from(value)?.as_str().to_string(),
        Tag::PrintableString => PrintableStringRef::try_from(value)?.as_str().to_string(),
        Tag::Ia5String => Ia5StringRef::try_from(value)?.as_str().to_string(),
        Tag::TeletexString => TeletexStringRef::try_from(value)?.as_str().to_string(),
        other => {
            return Err(CsrKitError::ParseError(format!(
                "unsupported string type {other} for CN"
            )));
        }
    };
    Ok(text)
}

/// Collects the extensions of every extensionRequest attribute.
///
/// Only the first value of each attribute is read.
pub fn requested_extensions(info: &CertReqInfo) -> Result<Vec<ExtensionParam>> {
    let mut params = Vec::new();
    for attribute in info.attributes.iter() {
        if attribute.oid != EXTENSION_REQUEST {
            continue;
        }
        let Some(value) = attribute.values.iter().next() else {
            return Err(CsrKitError::ParseError(
                "extensionRequest attribute has no value".to_string(),
            ));
        };
        let extensions = Extensions::from_der(&value.to_der()?)?;
        params.extend(extensions.into_iter().map(|ext| ExtensionParam {
            oid: ext.extn_id,
            critical: ext.critical,
            value: ext.extn_value.as_bytes().to_vec(),
        }));
    }
    Ok(params)
}

/// DNS subjectAltNames requested by `info`, lower-cased, in source order.
pub fn subject_alt_names(info: &CertReqInfo) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for param in requested_extensions(info)? {
        if param.oid != SubjectAltName::OID {
            continue;
        }
        let san: SubjectAltName = param.to_extension()?;
        names.extend(san.names.iter().map(|name| name.to_lowercase()));
    }
    Ok(names)
}

/// Builds the extensionRequest attribute set carrying `extensions`.
pub fn extension_request(extensions: &[ExtensionParam]) -> Result<SetOfVec<Attribute>> {
    let encoding_error = |e: der::Error| CsrKitError::EncodingError(e.to_string());

    let extensions = extensions
        .iter()
        .map(ExtensionParam::to_x509_extension)
        .collect::<Result<Extensions>>()?;
    let value = Any::from_der(&extensions.to_der().map_err(encoding_error)?)
        .map_err(encoding_error)?;

    let attribute = Attribute {
        oid: EXTENSION_REQUEST,
        values: SetOfVec::try_from(vec![value]).map_err(encoding_error)?,
    };
    SetOfVec::try_from(vec![attribute]).map_err(encoding_error)
}
