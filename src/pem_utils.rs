use crate::error::{CsrKitError, Result};

/// PEM labels accepted for signing requests.
pub const CSR_PEM_LABELS: [&str; 2] = ["CERTIFICATE REQUEST", "NEW CERTIFICATE REQUEST"];

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Convert a PEM‑encoded signing request to DER‑encoded bytes.
pub fn pem_to_der(pem_bytes: &[u8]) -> Result<Vec<u8>> {
    let pem = pem::parse(pem_bytes)?;
    if !CSR_PEM_LABELS.contains(&pem.tag()) {
        return Err(CsrKitError::ParseError(format!(
            "unexpected PEM label {:?}",
            pem.tag()
        )));
    }
    Ok(pem.contents().to_vec())
}

/// Whether `input` looks like PEM text rather than raw DER.
pub fn is_pem(input: &[u8]) -> bool {
    input.windows(10).any(|window| window == b"-----BEGIN")
}
