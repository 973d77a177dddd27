// [tests/mirror/libs/core/crypto-envelope/envelope_roundtrip.test.rs]
#[cfg(test)]
mod tests {
    use iris_core_crypto_envelope::{open, seal, Keypair};

    // Law L1: open(sender_pub, seal(our_pub, m)) = m for any byte string m.
    #[test]
    fn law_l1_holds_for_empty_and_large_payloads() {
        let coordinator = Keypair::generate();
        let worker = Keypair::generate();

        for payload in [&b""[..], &b"x"[..], &vec![7u8; 64 * 1024][..]] {
            let blob = seal(&worker.private, &coordinator.public, payload).unwrap();
            let opened = open(&coordinator.private, &worker.public, &blob).unwrap();
            assert_eq!(opened, payload);
        }
    }

    #[test]
    fn each_seal_call_uses_a_fresh_nonce_and_salt() {
        let coordinator = Keypair::generate();
        let worker = Keypair::generate();

        let first = seal(&worker.private, &coordinator.public, b"same plaintext").unwrap();
        let second = seal(&worker.private, &coordinator.public, b"same plaintext").unwrap();

        assert_ne!(first, second, "identical plaintexts must not produce identical blobs");
    }
}
