use rand::distributions::Uniform;
use rand::{CryptoRng, Rng};

use crate::error::PkceError;

/// Unreserved URL-safe characters from RFC 3986 section 2.3, the only
/// symbols allowed in a code verifier (RFC 7636 section 4.1).
pub const VERIFIER_ALPHABET: &[u8; 66] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Minimum code verifier length per RFC 7636.
pub const MIN_VERIFIER_LENGTH: usize = 43;
/// Maximum code verifier length per RFC 7636.
pub const MAX_VERIFIER_LENGTH: usize = 128;

/// Check that `length` is an acceptable code verifier length.
pub fn validate_length(length: usize) -> Result<(), PkceError> {
    if !(MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH).contains(&length) {
        return Err(PkceError::InvalidLength(length));
    }
    Ok(())
}

/// Check the full code verifier invariant: length range and alphabet.
pub fn validate_verifier(verifier: &str) -> Result<(), PkceError> {
    validate_length(verifier.len())?;
    if !verifier.bytes().all(|b| VERIFIER_ALPHABET.contains(&b)) {
        return Err(PkceError::InvalidCharacters);
    }
    Ok(())
}

/// Generate a code verifier of `length` characters using the process CSPRNG.
pub fn generate_verifier(length: usize) -> Result<String, PkceError> {
    generate_verifier_with_rng(length, &mut rand::thread_rng())
}

/// Generate a code verifier drawing entropy from the supplied generator.
///
/// Characters are sampled through rand's uniform integer distribution, which
/// maps random words onto the 66-symbol alphabet without modulo bias. Tests
/// pass a seeded `StdRng` here; production callers go through
/// [`generate_verifier`]. The `CryptoRng` bound keeps non-cryptographic
/// generators out.
pub fn generate_verifier_with_rng<R: Rng + CryptoRng>(
    length: usize,
    rng: &mut R,
) -> Result<String, PkceError> {
    validate_length(length)?;
    let indices = Uniform::from(0..VERIFIER_ALPHABET.len());
    let verifier = (0..length)
        .map(|_| VERIFIER_ALPHABET[rng.sample(indices)] as char)
        .collect();
    Ok(verifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_verifier_has_requested_length() {
        let v = generate_verifier(43).unwrap();
        assert_eq!(v.len(), 43);
        assert!(validate_verifier(&v).is_ok());
    }

    #[test]
    fn rejects_out_of_range_length() {
        assert!(matches!(
            generate_verifier(42),
            Err(PkceError::InvalidLength(42))
        ));
        assert!(matches!(
            generate_verifier(129),
            Err(PkceError::InvalidLength(129))
        ));
    }
}
