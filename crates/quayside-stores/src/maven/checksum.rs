//! Checksum files uploaded next to artifacts

use sha2::{Digest, Sha256, Sha512};

/// Digest algorithms published as sidecar files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    /// SHA-256, `.sha256`
    Sha256,
    /// SHA-512, `.sha512`
    Sha512,
}

impl ChecksumAlgorithm {
    /// Algorithms uploaded for every file
    pub const ALL: [ChecksumAlgorithm; 2] = [Self::Sha256, Self::Sha512];

    /// File extension of the sidecar
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Hex digest of `content`
    pub fn hex_digest(&self, content: &[u8]) -> String {
        match self {
            Self::Sha256 => format!("{:x}", Sha256::digest(content)),
            Self::Sha512 => format!("{:x}", Sha512::digest(content)),
        }
    }
}

/// Sidecar files for a repository path: `(path, contents)`
pub fn checksum_files(path: &str, content: &[u8]) -> Vec<(String, Vec<u8>)> {
    ChecksumAlgorithm::ALL
        .iter()
        .map(|alg| {
            (
                format!("{}.{}", path, alg.extension()),
                alg.hex_digest(content).into_bytes(),
            )
        })
        .collect()
}
