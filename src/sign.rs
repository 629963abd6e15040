//! Signature primitives shared by both clients.
//!
//! Every provider signature is a hex digest over a plain concatenation of
//! request fields. The concatenation has no separators, so field order is the
//! only thing distinguishing `("ab", "c")` from `("a", "bc")` and must follow
//! the provider's table for each endpoint exactly.

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

use crate::{
    config::Secret,
    error::{Error, Result},
};

type HmacSha256 = Hmac<Sha256>;

/// Concatenate named fields in the given order.
///
/// Empty values are rejected before anything is hashed: the provider would
/// accept the request shape and fail the signature check much later.
pub fn concat(fields: &[(&'static str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(fields.iter().map(|(_, v)| v.len()).sum());
    for (name, value) in fields {
        if value.is_empty() {
            return Err(Error::MissingField(name));
        }
        out.push_str(value);
    }
    Ok(out)
}

/// Lowercase hex md5 digest
pub fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// Lowercase hex HMAC-SHA256 keyed by `key`
pub fn hmac_sha256_hex(key: &Secret, input: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.expose().as_bytes()).expect("hmac accepts any key length");
    mac.update(input.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compare a received hex signature with a locally computed one
pub fn matches(expected: &str, received: &str) -> bool {
    !received.is_empty() && expected.eq_ignore_ascii_case(received.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_known_vector() {
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn hmac_known_vector() {
        let key = Secret::new("K");
        assert_eq!(
            hmac_sha256_hex(&key, "5.00AAUTH1MYRhmac-sha256R1ST1v2"),
            "9a66a4db875e9bf7575e757168250cad243746b83746792f2aa813662b3078b8"
        );
    }

    #[test]
    fn concat_keeps_order() {
        let forward = concat(&[("a", "AA"), ("b", "BB")]).unwrap();
        let swapped = concat(&[("b", "BB"), ("a", "AA")]).unwrap();
        assert_eq!(forward, "AABB");
        assert_ne!(md5_hex(&forward), md5_hex(&swapped));
    }

    #[test]
    fn concat_rejects_empty_field() {
        let err = concat(&[("amount", "5.00"), ("orderId", "")]).unwrap_err();
        assert!(matches!(err, Error::MissingField("orderId")));
    }

    #[test]
    fn every_field_changes_digest() {
        let base = [("a", "5.00"), ("b", "M1"), ("c", "T1"), ("d", "V1")];
        let reference = md5_hex(&concat(&base).unwrap());
        for i in 0..base.len() {
            let mut changed = base;
            changed[i].1 = "X";
            assert_ne!(md5_hex(&concat(&changed).unwrap()), reference);
        }
    }

    #[test]
    fn signature_comparison() {
        let sig = "c9f946ff9d444b3b55c639a3351ac875";
        assert!(matches(sig, "C9F946FF9D444B3B55C639A3351AC875"));
        assert!(!matches(sig, ""));
        assert!(!matches(sig, "c9f946ff9d444b3b55c639a3351ac876"));
    }
}
