use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::PkceError;
use crate::models::ChallengeMethod;
use crate::verifier::validate_verifier;

/// Derive the code challenge for `verifier` using `method`.
///
/// `plain` returns the verifier unchanged. `S256` follows RFC 7636 section
/// 4.2: the SHA-256 digest of the verifier's ASCII bytes, Base64URL-encoded
/// without padding. The verifier is validated first; an invalid verifier is
/// rejected rather than transformed.
pub fn derive_challenge(verifier: &str, method: ChallengeMethod) -> Result<String, PkceError> {
    validate_verifier(verifier)?;
    let challenge = match method {
        ChallengeMethod::Plain => verifier.to_string(),
        ChallengeMethod::S256 => {
            let digest = Sha256::digest(verifier.as_bytes());
            general_purpose::URL_SAFE_NO_PAD.encode(digest)
        }
    };
    Ok(challenge)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7636 appendix B example pair.
    #[test]
    fn s256_matches_rfc_7636_appendix_b() {
        let challenge = derive_challenge(
            "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk",
            ChallengeMethod::S256,
        )
        .unwrap();
        assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }
}
