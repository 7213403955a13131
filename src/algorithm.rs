//! Hash algorithms and the length based algorithm guesser.

use std::fmt;

use blake2::{digest::consts::U48, Blake2b, Blake2s256};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_384, Sha3_512};

/// BLAKE2b truncated to 48 bytes, the only BLAKE2b output that fits a 96 char digest.
type Blake2b384 = Blake2b<U48>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha3_256,
    Blake2s,
    Sha384,
    Sha3_384,
    Blake2b,
    Sha512,
    Sha3_512,
}

impl Algorithm {
    /// Every supported algorithm, in guess order.
    pub const ALL: [Algorithm; 11] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha3_256,
        Algorithm::Blake2s,
        Algorithm::Sha384,
        Algorithm::Sha3_384,
        Algorithm::Blake2b,
        Algorithm::Sha512,
        Algorithm::Sha3_512,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Blake2s => "blake2s",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Blake2b => "blake2b",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha3_512 => "sha3-512",
        }
    }

    /// Length of the digest in hex characters.
    pub fn hex_len(self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha224 => 56,
            Algorithm::Sha256 | Algorithm::Sha3_256 | Algorithm::Blake2s => 64,
            Algorithm::Sha384 | Algorithm::Sha3_384 | Algorithm::Blake2b => 96,
            Algorithm::Sha512 | Algorithm::Sha3_512 => 128,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the algorithms whose digest length matches `digest`.
///
/// Empty when the input is not hex or its length is not in the table.
pub fn guess(digest: &str) -> Vec<Algorithm> {
    if digest.is_empty() || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Vec::new();
    }
    Algorithm::ALL
        .into_iter()
        .filter(|algorithm| algorithm.hex_len() == digest.len())
        .collect()
}

pub fn gen_hash(data: &[u8], algorithm: Algorithm) -> Vec<u8> {
    match algorithm {
        Algorithm::Md5 => md5::compute(data).0.to_vec(),
        Algorithm::Sha1 => Sha1::digest(data).to_vec(),
        Algorithm::Sha224 => Sha224::digest(data).to_vec(),
        Algorithm::Sha256 => Sha256::digest(data).to_vec(),
        Algorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
        Algorithm::Blake2s => Blake2s256::digest(data).to_vec(),
        Algorithm::Sha384 => Sha384::digest(data).to_vec(),
        Algorithm::Sha3_384 => Sha3_384::digest(data).to_vec(),
        Algorithm::Blake2b => Blake2b384::digest(data).to_vec(),
        Algorithm::Sha512 => Sha512::digest(data).to_vec(),
        Algorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
    }
}
