//! # CsrKit - PKCS#10 Signing Requests for Certificate Enrollment
//!
//! CsrKit parses, verifies and generates PKCS#10 certificate signing requests
//! with rustcrypto libraries, and prepares them for enrollment with a
//! certificate authority: it picks the right product from the CA's catalog of
//! certificate types and resolves the validity period to request.
//!
//! ## Supported Key Types
//!
//! - **RSA**: any modulus size, signatures with PKCS#1 v1.5 (SHA-1 and SHA-2)
//! - **DSA**: any prime size, signatures with SHA-1, SHA-224 or SHA-256
//! - **ECDSA**: P-256 and P-384 requests are verified, but have no key size
//!
//! Generated requests are always signed with SHA-256.
//!
//! ## Supported Request Formats
//!
//! - **PEM**: `CERTIFICATE REQUEST` or `NEW CERTIFICATE REQUEST` blocks
//! - **DER**: raw binary encoding
//!
//! ## Key Features
//!
//! - **Verified Parsing**: a [`csr::Csr`] only exists once its self-signature checks out
//! - **Identity Extraction**: lower-cased subject CN and DNS subjectAltNames
//! - **Byte-Exact Serialization**: the original input is returned untouched
//! - **Generation**: new requests with a CN plus a subjectAltName for every name
//! - **Catalog Matching**: wildcard, multi-domain or single-name products
//!
//! ## Quick Start
//!
//! ### Parsing a Request
//!
//! ```rust,no_run
//! use csrkit::csr::Csr;
//!
//! # fn main() -> Result<(), csrkit::error::CsrKitError> {
//! let pem = std::fs::read("request.csr").unwrap();
//! let csr = Csr::parse(&pem)?;
//!
//! println!("CN: {:?}", csr.common_name());
//! println!("SANs: {:?}", csr.subject_alt_names());
//! println!("Key size: {} bits", csr.key_size()?);
//! assert_eq!(csr.serialize(), &pem[..]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Generating a Request
//!
//! ```rust,no_run
//! use csrkit::{csr::params::SubjectAttributes, generator, key::KeyPair};
//!
//! # fn main() -> Result<(), csrkit::error::CsrKitError> {
//! let subject = SubjectAttributes::new()
//!     .with("O", "Example Corp")
//!     .with("C", "US");
//!
//! // Without a key, a 4096-bit DSA key is generated.
//! let key = KeyPair::generate_rsa(2048)?;
//! let (_key, csr) = generator::generate(&["example.com", "www.example.com"], Some(key), &subject)?;
//!
//! println!("{}", csr);
//! # Ok(())
//! # }
//! ```
//!
//! ### Preparing an Enrollment
//!
//! ```rust,no_run
//! use csrkit::{
//!     catalog::CertificateType,
//!     csr::Csr,
//!     enroll::{SignOptions, SigningRequestParameters},
//!     term::Term,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog: Vec<CertificateType> = serde_json::from_str(
//!     r#"[{"id": 25, "name": "Example SSL (SHA-2)", "terms": [365, 730]},
//!         {"id": 27, "name": "Example Multi Domain SSL (SHA-2)", "terms": [365, 730]}]"#,
//! )?;
//! let csr: Csr = std::fs::read_to_string("request.csr")?.parse()?;
//!
//! let options = SignOptions::builder().term(Term::Years(2)).build();
//! let params = SigningRequestParameters::build(42, &csr, &catalog, options)?;
//! println!("{}", serde_json::to_string(&params)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use csrkit::{csr::Csr, error::CsrKitError};
//!
//! match Csr::parse("-----BEGIN CERTIFICATE REQUEST-----\nnot base64\n") {
//!     Ok(_) => println!("Parsed"),
//!     Err(CsrKitError::ParseError(msg)) => println!("Malformed request: {}", msg),
//!     Err(CsrKitError::SignatureInvalid(msg)) => println!("Bad signature: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`csr`]: Request parsing, verification, name extraction and serialization
//! - [`generator`]: Building and signing new requests
//! - [`key`]: Key generation, signing and signature verification
//! - [`catalog`]: Certificate-type classification and matching
//! - [`term`]: Validity-period resolution
//! - [`enroll`]: The enrollment payload handed to the CA client
//! - [`error`]: Error types, including the CA's response errors
//! - [`pem_utils`]: PEM helpers

pub mod catalog;
pub mod csr;
pub mod enroll;
pub mod error;
pub mod generator;
pub mod key;
pub mod pem_utils;
pub mod term;
