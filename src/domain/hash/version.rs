//! bcrypt version tags
//!
//! The tag between the first two `$` of an encoded hash names the bcrypt
//! variant that produced it.

use std::fmt;

/// Known bcrypt variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BcryptVersion {
    /// `$2$`, the original OpenBSD format
    Two,
    /// `$2a$`
    TwoA,
    /// `$2b$`, OpenBSD fix for secrets longer than 255 bytes
    TwoB,
    /// `$2x$`, marks hashes from the buggy crypt_blowfish sign extension
    TwoX,
    /// `$2y$`, crypt_blowfish's correct output
    TwoY,
}

impl BcryptVersion {
    /// Tag as it appears between the delimiters.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::TwoA => "2a",
            Self::TwoB => "2b",
            Self::TwoX => "2x",
            Self::TwoY => "2y",
        }
    }

    /// Parse a tag without its `$` delimiters.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "2" => Some(Self::Two),
            "2a" => Some(Self::TwoA),
            "2b" => Some(Self::TwoB),
            "2x" => Some(Self::TwoX),
            "2y" => Some(Self::TwoY),
            _ => None,
        }
    }

    /// Variants whose digests this crate can reproduce.
    pub const SUPPORTED: &'static [BcryptVersion] = &[Self::TwoA, Self::TwoB, Self::TwoY];

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }
}

impl fmt::Display for BcryptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}$", self.tag())
    }
}
