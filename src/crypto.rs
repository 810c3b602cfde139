//! Signature scheme of the CashBill protocol
//!
//! Every signed payload is a fixed, operation-specific list of field values
//! concatenated without a delimiter, followed by the shop's secret phrase.
//! The resulting string is hashed and sent (or compared) as lower-case hex.
//! Outgoing requests are signed with SHA-1, incoming notifications with MD5.

use md5::Md5;
use sha1::{Digest, Sha1};

/// Digest used to turn a canonical string into a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// 160-bit digest used for payment, transaction info and return URL requests
    Sha1,
    /// 128-bit digest used for inbound notifications
    Md5,
}

impl SignatureScheme {
    /// Hash `input` and render it as lower-case hex
    pub fn digest_hex(&self, input: &str) -> String {
        match self {
            Self::Sha1 => hex::encode(Sha1::digest(input.as_bytes())),
            Self::Md5 => hex::encode(Md5::digest(input.as_bytes())),
        }
    }
}

/// A data bundle that can be rendered into a canonical string and signed.
///
/// Implementors list their field values in the exact order the gateway
/// expects; absent optional values are rendered as empty strings. The
/// secret phrase is appended last and is never part of
/// [`canonical_fields`](Signable::canonical_fields).
pub trait Signable {
    /// Digest applied to the canonical string
    const SCHEME: SignatureScheme;

    /// Field values in signing order, excluding the secret phrase
    fn canonical_fields(&self) -> Vec<String>;

    /// Shared secret between the shop and the gateway
    fn secret_phrase(&self) -> &str;

    /// Concatenation of all field values followed by the secret phrase
    fn canonical_string(&self) -> String {
        let mut canonical = self.canonical_fields().concat();
        canonical.push_str(self.secret_phrase());
        canonical
    }

    /// Hex signature of the current field values
    fn signature(&self) -> String {
        Self::SCHEME.digest_hex(&self.canonical_string())
    }
}

/// Compare two signatures without leaking the position of the first mismatch
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    constant_time_eq::constant_time_eq(expected.as_bytes(), provided.as_bytes())
}
