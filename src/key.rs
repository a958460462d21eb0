use std::fmt;

use const_oid::AssociatedOid;
use const_oid::ObjectIdentifier;
use const_oid::db::rfc5912::{
    DSA_WITH_SHA_1, DSA_WITH_SHA_224, DSA_WITH_SHA_256, ECDSA_WITH_SHA_256, ECDSA_WITH_SHA_384,
    ID_DSA, ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1,
    SHA_1_WITH_RSA_ENCRYPTION, SHA_224_WITH_RSA_ENCRYPTION, SHA_256_WITH_RSA_ENCRYPTION,
    SHA_384_WITH_RSA_ENCRYPTION, SHA_512_WITH_RSA_ENCRYPTION,
};
use der::asn1::{Any, AnyRef};
use der::{Decode, Encode};
use dsa::signature::{DigestSigner, DigestVerifier};
use dsa::{Components, KeySize};
use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt, RandPrime};
use pkcs8::DecodePublicKey;
use rand_core::OsRng;
use rsa::pkcs1v15::{
    Signature as RsaSignature, SigningKey as RsaSigningKey, VerifyingKey as RsaVerifyingKey,
};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};

use crate::error::{CsrKitError, Result};

/// Miller-Rabin rounds used when searching for DSA primes.
const PRIME_TEST_ROUNDS: usize = 20;

/// Smallest DSA prime size accepted for key generation.
const MIN_DSA_BITS: usize = 512;

/// Supported key types for signing requests.
#[derive(Clone)]
pub enum KeyPair {
    Rsa {
        private: Box<RsaPrivateKey>,
        public: RsaPublicKey,
    },
    Dsa {
        signing_key: Box<dsa::SigningKey>,
    },
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("info", &self.info())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate an RSA key pair with the specified number of bits.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        let mut rng = OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)?;
        let public = RsaPublicKey::from(&private);
        tracing::debug!(bits, "generated RSA key pair");
        Ok(KeyPair::Rsa {
            private: Box::new(private),
            public,
        })
    }

    /// Generate a DSA key pair whose prime `p` has the specified number of bits.
    ///
    /// The standard 2048 and 3072 bit sizes use the `dsa` crate's parameter
    /// generation; any other size goes through [`generate_dsa_components`].
    pub fn generate_dsa(bits: usize) -> Result<Self> {
        let mut rng = OsRng;
        let components = match bits {
            2048 => Components::generate(&mut rng, KeySize::DSA_2048_256),
            3072 => Components::generate(&mut rng, KeySize::DSA_3072_256),
            _ => generate_dsa_components(&mut rng, bits)?,
        };
        let signing_key = dsa::SigningKey::generate(&mut rng, components);
        tracing::debug!(bits, "generated DSA key pair");
        Ok(KeyPair::Dsa {
            signing_key: Box::new(signing_key),
        })
    }

    /// Returns the public half of the key pair.
    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyPair::Rsa { public, .. } => PublicKey::Rsa(public.clone()),
            KeyPair::Dsa { signing_key } => PublicKey::Dsa(signing_key.verifying_key().clone()),
        }
    }

    pub fn info(&self) -> KeyInfo {
        match self {
            KeyPair::Rsa { public, .. } => KeyInfo::Rsa {
                modulus_bytes: public.size(),
            },
            KeyPair::Dsa { signing_key } => dsa_info(signing_key.verifying_key()),
        }
    }

    /// Encodes the public key as a `SubjectPublicKeyInfo`.
    pub fn as_spki(&self) -> Result<SubjectPublicKeyInfoOwned> {
        let spki = match self {
            KeyPair::Rsa { public, .. } => SubjectPublicKeyInfoOwned::from_key(public.clone()),
            KeyPair::Dsa { signing_key } => {
                SubjectPublicKeyInfoOwned::from_key(signing_key.verifying_key().clone())
            }
        };
        spki.map_err(|e| CsrKitError::EncodingError(e.to_string()))
    }

    /// The algorithm identifier of the signatures produced by [`KeyPair::sign_data`].
    pub fn signature_algorithm(&self) -> AlgorithmIdentifierOwned {
        match self {
            KeyPair::Rsa { .. } => AlgorithmIdentifierOwned {
                oid: SHA_256_WITH_RSA_ENCRYPTION,
                parameters: Some(Any::from(AnyRef::NULL)),
            },
            KeyPair::Dsa { .. } => AlgorithmIdentifierOwned {
                oid: DSA_WITH_SHA_256,
                parameters: None,
            },
        }
    }

    /// Signs `data` with a SHA-256 digest.
    ///
    /// RSA signatures are PKCS#1 v1.5; DSA signatures are the DER encoding of
    /// `Dss-Sig-Value`.
    pub fn sign_data(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            KeyPair::Rsa { private, .. } => {
                let signing_key = RsaSigningKey::<Sha256>::new((**private).clone());
                let signature = signing_key
                    .try_sign(data)
                    .map_err(|e| CsrKitError::SigningError(e.to_string()))?;
                Ok(signature.to_vec())
            }
            KeyPair::Dsa { signing_key } => {
                let signature = signing_key
                    .try_sign_digest(Sha256::new_with_prefix(data))
                    .map_err(|e| CsrKitError::SigningError(e.to_string()))?;
                signature
                    .to_der()
                    .map_err(|e| CsrKitError::EncodingError(e.to_string()))
            }
        }
    }
}

/// Size information about a public key, tagged by algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInfo {
    Rsa { modulus_bytes: usize },
    Dsa { prime_bytes: usize },
}

impl KeyInfo {
    /// Key size in bits, rounded up to whole bytes.
    pub fn bits(&self) -> usize {
        match self {
            KeyInfo::Rsa { modulus_bytes } => modulus_bytes * 8,
            KeyInfo::Dsa { prime_bytes } => prime_bytes * 8,
        }
    }
}

/// A public key embedded in a signing request.
///
/// ECDSA keys are only good for checking the request's own signature; they
/// have no [`KeyInfo`].
#[derive(Clone, Debug)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Dsa(dsa::VerifyingKey),
    EcdsaP256(p256::ecdsa::VerifyingKey),
    EcdsaP384(p384::ecdsa::VerifyingKey),
}

impl PublicKey {
    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        key_pair.public_key()
    }

    /// Decodes a `SubjectPublicKeyInfo`.
    ///
    /// Fails with [`CsrKitError::UnknownKeyType`] for anything but RSA, DSA
    /// and P-256/P-384 ECDSA keys.
    pub fn from_x509spki(spki: &SubjectPublicKeyInfoOwned) -> Result<Self> {
        let der = spki
            .to_der()
            .map_err(|e| CsrKitError::ParseError(e.to_string()))?;

        match spki.algorithm.oid {
            RSA_ENCRYPTION => RsaPublicKey::from_public_key_der(&der)
                .map(PublicKey::Rsa)
                .map_err(|e| CsrKitError::ParseError(format!("invalid RSA public key: {e}"))),
            ID_DSA => dsa::VerifyingKey::from_public_key_der(&der)
                .map(PublicKey::Dsa)
                .map_err(|e| CsrKitError::ParseError(format!("invalid DSA public key: {e}"))),
            ID_EC_PUBLIC_KEY => {
                let curve = match &spki.algorithm.parameters {
                    Some(parameters) => Some(ObjectIdentifier::from_der(&parameters.to_der()?)?),
                    None => None,
                };
                match curve {
                    Some(SECP_256_R_1) => p256::ecdsa::VerifyingKey::from_public_key_der(&der)
                        .map(PublicKey::EcdsaP256)
                        .map_err(|e| CsrKitError::ParseError(format!("invalid P-256 key: {e}"))),
                    Some(SECP_384_R_1) => p384::ecdsa::VerifyingKey::from_public_key_der(&der)
                        .map(PublicKey::EcdsaP384)
                        .map_err(|e| CsrKitError::ParseError(format!("invalid P-384 key: {e}"))),
                    Some(curve) => Err(CsrKitError::UnknownKeyType(format!(
                        "{ID_EC_PUBLIC_KEY} on curve {curve}"
                    ))),
                    None => Err(CsrKitError::UnknownKeyType(ID_EC_PUBLIC_KEY.to_string())),
                }
            }
            other => Err(CsrKitError::UnknownKeyType(other.to_string())),
        }
    }

    /// Size information for RSA and DSA keys.
    ///
    /// Fails with [`CsrKitError::UnknownKeyType`] for ECDSA keys.
    pub fn info(&self) -> Result<KeyInfo> {
        match self {
            PublicKey::Rsa(key) => Ok(KeyInfo::Rsa {
                modulus_bytes: key.size(),
            }),
            PublicKey::Dsa(key) => Ok(dsa_info(key)),
            PublicKey::EcdsaP256(_) | PublicKey::EcdsaP384(_) => Err(
                CsrKitError::UnknownKeyType(format!("{} key", self.algorithm_name())),
            ),
        }
    }

    /// Verifies `signature` over `message` using the signature algorithm `algorithm`.
    pub fn verify(
        &self,
        message: &[u8],
        algorithm: &AlgorithmIdentifierOwned,
        signature: &[u8],
    ) -> Result<()> {
        match (self, algorithm.oid) {
            (PublicKey::Rsa(key), SHA_1_WITH_RSA_ENCRYPTION) => {
                verify_rsa::<Sha1>(key, message, signature)
            }
            (PublicKey::Rsa(key), SHA_224_WITH_RSA_ENCRYPTION) => {
                verify_rsa::<Sha224>(key, message, signature)
            }
            (PublicKey::Rsa(key), SHA_256_WITH_RSA_ENCRYPTION) => {
                verify_rsa::<Sha256>(key, message, signature)
            }
            (PublicKey::Rsa(key), SHA_384_WITH_RSA_ENCRYPTION) => {
                verify_rsa::<Sha384>(key, message, signature)
            }
            (PublicKey::Rsa(key), SHA_512_WITH_RSA_ENCRYPTION) => {
                verify_rsa::<Sha512>(key, message, signature)
            }
            (PublicKey::Dsa(key), oid @ (DSA_WITH_SHA_1 | DSA_WITH_SHA_224 | DSA_WITH_SHA_256)) => {
                let signature = dsa::Signature::from_der(signature)
                    .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))?;
                let verified = match oid {
                    DSA_WITH_SHA_1 => key.verify_digest(Sha1::new_with_prefix(message), &signature),
                    DSA_WITH_SHA_224 => {
                        key.verify_digest(Sha224::new_with_prefix(message), &signature)
                    }
                    _ => key.verify_digest(Sha256::new_with_prefix(message), &signature),
                };
                verified.map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))
            }
            (PublicKey::EcdsaP256(key), ECDSA_WITH_SHA_256) => {
                let signature = p256::ecdsa::Signature::from_der(signature)
                    .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))?;
                key.verify(message, &signature)
                    .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))
            }
            (PublicKey::EcdsaP384(key), ECDSA_WITH_SHA_384) => {
                let signature = p384::ecdsa::Signature::from_der(signature)
                    .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))?;
                key.verify(message, &signature)
                    .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))
            }
            (_, oid) => Err(CsrKitError::SignatureInvalid(format!(
                "unsupported signature algorithm {oid} for {} key",
                self.algorithm_name()
            ))),
        }
    }

    pub(crate) fn algorithm_name(&self) -> &'static str {
        match self {
            PublicKey::Rsa(_) => "RSA",
            PublicKey::Dsa(_) => "DSA",
            PublicKey::EcdsaP256(_) => "ECDSA P-256",
            PublicKey::EcdsaP384(_) => "ECDSA P-384",
        }
    }
}

fn dsa_info(key: &dsa::VerifyingKey) -> KeyInfo {
    KeyInfo::Dsa {
        prime_bytes: key.components().p().bits().div_ceil(8),
    }
}

fn verify_rsa<D>(key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> Result<()>
where
    D: Digest + AssociatedOid,
{
    let verifying_key = RsaVerifyingKey::<D>::new(key.clone());
    let signature = RsaSignature::try_from(signature)
        .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))?;
    verifying_key
        .verify(message, &signature)
        .map_err(|e| CsrKitError::SignatureInvalid(e.to_string()))
}

/// Generates DSA domain parameters `(p, q, g)` for a `bits`-sized prime `p`.
///
/// `q` is 160 bits for `p` up to 1024 bits and 256 bits above that. `p` is
/// searched as `X - (X mod 2q) + 1` over random `bits`-sized `X`, so `q | p - 1`.
fn generate_dsa_components(rng: &mut OsRng, bits: usize) -> Result<Components> {
    if bits < MIN_DSA_BITS {
        return Err(CsrKitError::KeyGenerationError(format!(
            "DSA key size must be at least {MIN_DSA_BITS} bits, got {bits}"
        )));
    }

    let one = BigUint::from(1u8);
    let q_bits = if bits <= 1024 { 160 } else { 256 };
    let q = rng.gen_prime(q_bits);
    let two_q = &q * BigUint::from(2u8);
    let top_bit = one.clone() << (bits - 1);

    let p = loop {
        let x = rng.gen_biguint(bits) | &top_bit;
        let remainder = &x % &two_q;
        let candidate = x - remainder + &one;
        if candidate.bits() == bits && probably_prime(&candidate, PRIME_TEST_ROUNDS) {
            break candidate;
        }
    };

    let exponent = (&p - &one) / &q;
    let mut h = BigUint::from(2u8);
    let g = loop {
        let g = h.modpow(&exponent, &p);
        if g != one {
            break g;
        }
        h += &one;
    };

    Components::from_components(p, q, g)
        .map_err(|e| CsrKitError::KeyGenerationError(e.to_string()))
}
