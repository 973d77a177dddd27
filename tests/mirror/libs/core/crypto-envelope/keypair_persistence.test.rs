// [tests/mirror/libs/core/crypto-envelope/keypair_persistence.test.rs]
#[cfg(test)]
mod tests {
    use iris_core_crypto_envelope::Keypair;
    use tempfile::tempdir;

    #[test]
    fn load_or_generate_persists_and_reloads_the_same_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coordinator.key");

        let first = Keypair::load_or_generate(&path).unwrap();
        let second = Keypair::load_or_generate(&path).unwrap();

        assert_eq!(first.public.as_bytes(), second.public.as_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn persisted_keypair_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("coordinator.key");
        Keypair::load_or_generate(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
