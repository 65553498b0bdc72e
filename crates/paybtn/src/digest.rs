//! Content fingerprints for button parameters.
//!
//! MD5 is the wire format existing button signatures were produced with,
//! used purely as a content fingerprint, not a security boundary. SHA-256
//! is available for call sites that do not need compatibility with
//! already-issued signatures.
//!
//! Every function constructs a fresh digest context, so all of them are
//! safe to call from any number of threads without coordination.

use md5::{Digest, Md5};
use sha2::Sha256;

use crate::hex::encode_hex;

/// Computes the 128-bit MD5 fingerprint of raw bytes.
pub fn md5_bytes(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

/// Computes the MD5 fingerprint of the UTF-8 bytes of `text` as a
/// 32-character lowercase hex string.
pub fn md5_hex(text: &str) -> String {
    encode_hex(&md5_bytes(text.as_bytes()))
}

/// Computes the 256-bit SHA-256 fingerprint of raw bytes.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Computes the SHA-256 fingerprint of the UTF-8 bytes of `text` as a
/// 64-character lowercase hex string.
pub fn sha256_hex(text: &str) -> String {
    encode_hex(&sha256_bytes(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_vectors() {
        // RFC 1321 appendix A.5
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("a"), "0cc175b9c0f1b6a831c399e269772661");
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(md5_hex("message digest"), "f96b697d7cb7938d525a2f31aaf161d0");
    }

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hex_output_shape() {
        for input in ["", "x", "hello world", "unicode: \u{1F600}"] {
            let md5 = md5_hex(input);
            assert_eq!(md5.len(), 32);
            assert!(md5.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));

            let sha = sha256_hex(input);
            assert_eq!(sha.len(), 64);
            assert!(sha.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(md5_bytes(b"payload"), md5_bytes(b"payload"));
        assert_eq!(sha256_bytes(b"payload"), sha256_bytes(b"payload"));
        assert_ne!(md5_bytes(b"payload"), md5_bytes(b"payloae"));
    }

    #[test]
    fn test_concurrent_hashing_no_cross_talk() {
        let inputs: Vec<String> = (0..64).map(|i| format!("order-{i}/amount={}.00", i * 7)).collect();
        let expected: Vec<String> = inputs.iter().map(|s| md5_hex(s)).collect();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let inputs = inputs.clone();
                std::thread::spawn(move || inputs.iter().map(|s| md5_hex(s)).collect::<Vec<_>>())
            })
            .collect();

        for handle in handles {
            let results = handle.join().unwrap();
            assert_eq!(results, expected);
        }
    }
}
