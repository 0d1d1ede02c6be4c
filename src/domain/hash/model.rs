use base64::{
    alphabet,
    engine::{general_purpose, GeneralPurpose},
    Engine as _,
};

use super::version::BcryptVersion;
use crate::support::errors::{MalformedReason, VerificationError};

/// Lowest cost factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Encoded salt length (16 raw bytes).
pub const SALT_LEN: usize = 22;
/// Encoded digest length (23 raw bytes).
pub const DIGEST_LEN: usize = 31;

const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(&alphabet::BCRYPT, general_purpose::NO_PAD);

/// Parsed view of `$<version>$<cost>$<salt><digest>`.
///
/// Parsing checks the whole grammar, including the base64 alphabet and
/// canonical trailing bits, so anything that parses is something the
/// hashing primitive can work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash<'a> {
    raw: &'a str,
    version: BcryptVersion,
    cost: u32,
    salt: [u8; 16],
    salt_text: &'a str,
    digest_text: &'a str,
}

impl<'a> EncodedHash<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, VerificationError> {
        let malformed = VerificationError::MalformedHash;

        let fields: Vec<&str> = raw.split('$').collect();
        let [prefix, tag, cost, payload] = fields[..] else {
            return Err(malformed(MalformedReason::Layout));
        };
        if !prefix.is_empty() {
            return Err(malformed(MalformedReason::Layout));
        }

        let version = parse_version(tag)?;
        let cost = parse_cost(cost)?;

        if payload.len() != SALT_LEN + DIGEST_LEN {
            return Err(malformed(MalformedReason::Layout));
        }
        // Non-ASCII would also make the split below land off a char boundary.
        if !payload.is_ascii() {
            return Err(malformed(MalformedReason::Encoding));
        }
        let (salt_text, digest_text) = payload.split_at(SALT_LEN);

        let salt: [u8; 16] = BCRYPT_B64
            .decode(salt_text)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(malformed(MalformedReason::Encoding))?;
        match BCRYPT_B64.decode(digest_text) {
            Ok(bytes) if bytes.len() == 23 => {}
            _ => return Err(malformed(MalformedReason::Encoding)),
        }

        Ok(Self {
            raw,
            version,
            cost,
            salt,
            salt_text,
            digest_text,
        })
    }

    /// The hash exactly as supplied.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn version(&self) -> BcryptVersion {
        self.version
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of expensive key-schedule rounds, `2^cost`.
    pub fn rounds(&self) -> u64 {
        1u64 << self.cost
    }

    /// Decoded 16-byte salt.
    pub fn salt(&self) -> &[u8; 16] {
        &self.salt
    }

    pub fn salt_text(&self) -> &'a str {
        self.salt_text
    }

    pub fn digest_text(&self) -> &'a str {
        self.digest_text
    }
}

impl<'a> TryFrom<&'a str> for EncodedHash<'a> {
    type Error = VerificationError;

    fn try_from(raw: &'a str) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

fn parse_version(tag: &str) -> Result<BcryptVersion, VerificationError> {
    let bytes = tag.as_bytes();
    let well_formed = match bytes {
        [major] => major.is_ascii_digit(),
        [major, minor] => major.is_ascii_digit() && minor.is_ascii_lowercase(),
        _ => false,
    };
    if !well_formed {
        return Err(VerificationError::MalformedHash(MalformedReason::Version));
    }

    match BcryptVersion::from_tag(tag) {
        Some(version) if version.is_supported() => Ok(version),
        _ => Err(VerificationError::UnsupportedVersion(tag.to_string())),
    }
}

fn parse_cost(text: &str) -> Result<u32, VerificationError> {
    if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VerificationError::MalformedHash(MalformedReason::CostFormat));
    }
    let cost: u32 = text
        .parse()
        .map_err(|_| VerificationError::MalformedHash(MalformedReason::CostFormat))?;
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(VerificationError::MalformedHash(MalformedReason::CostOutOfRange(cost)));
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO";

    fn malformed(reason: MalformedReason) -> VerificationError {
        VerificationError::MalformedHash(reason)
    }

    #[test]
    fn test_parse_reference_hash() {
        let hash = EncodedHash::parse(REFERENCE).unwrap();
        assert_eq!(hash.version(), BcryptVersion::TwoA);
        assert_eq!(hash.cost(), 10);
        assert_eq!(hash.rounds(), 1024);
        assert_eq!(hash.salt_text(), "D3AOObVxJq4T3VjWp7R2U.");
        assert_eq!(hash.digest_text(), "CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO");
        assert_eq!(hash.as_str(), REFERENCE);
    }

    #[test]
    fn test_parse_all_supported_tags() {
        for tag in ["2a", "2b", "2y"] {
            let raw = REFERENCE.replacen("2a", tag, 1);
            let hash = EncodedHash::try_from(raw.as_str()).unwrap();
            assert_eq!(hash.version().tag(), tag);
        }
    }

    #[test]
    fn test_salt_decodes_to_sixteen_bytes() {
        // "......................" is all-zero in the bcrypt alphabet
        let raw = "$2b$04$......................CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO";
        let hash = EncodedHash::parse(raw).unwrap();
        assert_eq!(hash.salt(), &[0u8; 16]);
    }

    #[test]
    fn test_layout_errors() {
        let cases = [
            "",
            "$",
            "2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO",
            "x$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO",
            "$2a$10D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO",
            "$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eI",
            "$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIOO",
            "$2a$10$D3AOObVxJq4T3VjWp7R2U.$CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO",
        ];
        for raw in cases {
            assert_eq!(
                EncodedHash::parse(raw),
                Err(malformed(MalformedReason::Layout)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_version_errors() {
        for tag in ["", "a2", "2A", "2ab", "22", "$"] {
            let raw = format!("${tag}$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO");
            let err = EncodedHash::parse(&raw).unwrap_err();
            assert!(err.is_malformed(), "{raw:?} gave {err:?}");
            assert!(!matches!(err, VerificationError::UnsupportedVersion(_)), "{raw:?}");
        }
    }

    #[test]
    fn test_unsupported_versions() {
        for tag in ["2", "2x", "2c", "3a", "1"] {
            let raw = format!("${tag}$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO");
            assert_eq!(
                EncodedHash::parse(&raw),
                Err(VerificationError::UnsupportedVersion(tag.to_string()))
            );
        }
    }

    #[test]
    fn test_cost_errors() {
        let with_cost =
            |cost: &str| format!("$2b${cost}$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO");

        for cost in ["", "1", "100", "1a", "+5", " 9"] {
            assert_eq!(
                EncodedHash::parse(&with_cost(cost)),
                Err(malformed(MalformedReason::CostFormat)),
                "{cost:?}"
            );
        }
        assert_eq!(
            EncodedHash::parse(&with_cost("03")),
            Err(malformed(MalformedReason::CostOutOfRange(3)))
        );
        assert_eq!(
            EncodedHash::parse(&with_cost("32")),
            Err(malformed(MalformedReason::CostOutOfRange(32)))
        );
        assert_eq!(EncodedHash::parse(&with_cost("04")).unwrap().cost(), 4);
        assert_eq!(EncodedHash::parse(&with_cost("31")).unwrap().cost(), 31);
    }

    #[test]
    fn test_encoding_errors() {
        let cases = [
            // '+' and '=' belong to standard base64, not bcrypt's
            "$2a$10$D3AOObVxJq4T3VjWp7R2U+CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO",
            "$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eI=",
            // last salt char carries bits that don't fit in 16 bytes
            "$2a$10$D3AOObVxJq4T3VjWp7R2U/CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO",
            // last digest char carries bits that don't fit in 23 bytes
            "$2a$10$D3AOObVxJq4T3VjWp7R2U.CeoTjpgLEA.vpHQ/L8clQjAXqFk.eIP",
        ];
        for raw in cases {
            assert_eq!(
                EncodedHash::parse(raw),
                Err(malformed(MalformedReason::Encoding)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_non_ascii_payload_does_not_panic() {
        // 'é' is two bytes, so the payload is 53 bytes but 52 chars
        let raw = "$2a$10$D3AOObVxJq4T3VjWp7R2éCeoTjpgLEA.vpHQ/L8clQjAXqFk.eIO";
        assert_eq!(
            EncodedHash::parse(raw),
            Err(malformed(MalformedReason::Encoding))
        );
    }
}
