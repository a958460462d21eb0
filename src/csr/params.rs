use const_oid::ObjectIdentifier;
use der::Tag;
use der::asn1::{Any, Ia5StringRef, OctetString, PrintableStringRef, SetOfVec};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::ext::Extension;
use x509_cert::name::{Name, RdnSequence, RelativeDistinguishedName};

use super::extensions::ToAndFromX509Extension;
use crate::error::{CsrKitError, Result};

/// Common Name (`2.5.4.3`).
pub const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");
const COUNTRY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
const LOCALITY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
const STATE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
const ORGANIZATION: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
const ORGANIZATION_UNIT: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");
const EMAIL_ADDRESS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

/// Key under which [`SubjectAttributes`] stores the Common Name.
pub const COMMON_NAME_KEY: &str = "CN";

/// Subject attributes for a generated request, as an ordered `type => value` mapping.
///
/// Types are short names (`CN`, `C`, `ST`, `L`, `O`, `OU`, `emailAddress`,
/// `serialNumber`) or dotted OIDs. Insertion order is the order of the RDNs in
/// the encoded subject; setting an existing type replaces its value in place.
///
/// # Example
/// ```
/// use csrkit::csr::params::SubjectAttributes;
/// let subject = SubjectAttributes::new()
///     .with("O", "Test Company")
///     .with("C", "US")
///     .with("CN", "example.com");
/// let types: Vec<&str> = subject.iter().map(|(t, _)| t).collect();
/// assert_eq!(types, ["O", "C", "CN"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectAttributes {
    entries: Vec<(String, String)>,
}

impl SubjectAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `attr_type` to `value`, keeping its position if it is already present.
    pub fn with(mut self, attr_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(attr_type, value);
        self
    }

    pub fn insert(&mut self, attr_type: impl Into<String>, value: impl Into<String>) {
        let attr_type = attr_type.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(t, _)| *t == attr_type) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((attr_type, value)),
        }
    }

    pub fn get(&self, attr_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == attr_type)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the attributes to an X.509 name, one RDN per attribute.
    pub fn as_x509_name(&self) -> Result<Name> {
        let rdns = self
            .entries
            .iter()
            .map(|(attr_type, value)| {
                let atv = AttributeTypeAndValue {
                    oid: attribute_oid(attr_type)?,
                    value: encode_value(attr_type, value)?,
                };
                let set = SetOfVec::try_from(vec![atv])
                    .map_err(|e| CsrKitError::EncodingError(e.to_string()))?;
                Ok(RelativeDistinguishedName(set))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RdnSequence(rdns))
    }
}

impl<K, V> FromIterator<(K, V)> for SubjectAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (attr_type, value) in iter {
            attributes.insert(attr_type, value);
        }
        attributes
    }
}

/// Maps a short attribute name (or dotted OID) to its object identifier.
pub fn attribute_oid(attr_type: &str) -> Result<ObjectIdentifier> {
    match attr_type {
        "CN" => Ok(COMMON_NAME),
        "C" => Ok(COUNTRY),
        "ST" => Ok(STATE),
        "L" => Ok(LOCALITY),
        "O" => Ok(ORGANIZATION),
        "OU" => Ok(ORGANIZATION_UNIT),
        "emailAddress" => Ok(EMAIL_ADDRESS),
        "serialNumber" => Ok(SERIAL_NUMBER),
        other => ObjectIdentifier::new(other).map_err(|_| {
            CsrKitError::InvalidArgument(format!("unknown subject attribute type {other:?}"))
        }),
    }
}

fn encode_value(attr_type: &str, value: &str) -> Result<Any> {
    let invalid = |e: der::Error| {
        CsrKitError::InvalidArgument(format!("invalid value for {attr_type}: {e}"))
    };
    let tag = match attribute_oid(attr_type)? {
        COUNTRY | SERIAL_NUMBER => {
            PrintableStringRef::new(value).map_err(invalid)?;
            Tag::PrintableString
        }
        EMAIL_ADDRESS => {
            Ia5StringRef::new(value).map_err(invalid)?;
            Tag::Ia5String
        }
        _ => Tag::Utf8String,
    };
    Any::new(tag, value.as_bytes()).map_err(|e| CsrKitError::EncodingError(e.to_string()))
}

/// Represents an X.509 extension requested through the extensionRequest attribute.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: &E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }

    /// Decodes an `ExtensionParam` into a specific extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        E::from_x509_extension_value(&self.value)
    }

    pub fn to_x509_extension(&self) -> Result<Extension> {
        Ok(Extension {
            extn_id: self.oid,
            critical: self.critical,
            extn_value: OctetString::new(self.value.clone())
                .map_err(|e| CsrKitError::EncodingError(e.to_string()))?,
        })
    }
}
