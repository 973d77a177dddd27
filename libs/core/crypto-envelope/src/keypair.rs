// [libs/core/crypto-envelope/src/keypair.rs]
/*!
 * APARATO: SOVEREIGN KEYPAIR (V1.0)
 * RESPONSABILIDAD: GENERACION, PERSISTENCIA Y CARGA DEL PAR DE CLAVES X25519
 *
 * El archivo de persistencia guarda únicamente la clave privada en crudo
 * (32 bytes); la clave pública se deriva al cargar. Permisos 0600 en
 * sistemas Unix; en otros sistemas la restricción de permisos no aplica.
 */

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand_core::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::errors::EnvelopeError;

pub struct Keypair {
    pub private: StaticSecret,
    pub public: PublicKey,
}

impl Keypair {
    pub fn generate() -> Self {
        let private = StaticSecret::random_from_rng(OsRng);
        let public = PublicKey::from(&private);
        Self { private, public }
    }

    pub fn from_private_bytes(bytes: [u8; 32]) -> Self {
        let private = StaticSecret::from(bytes);
        let public = PublicKey::from(&private);
        Self { private, public }
    }

    pub fn public_base64(&self) -> String {
        BASE64.encode(self.public.as_bytes())
    }

    pub fn save(&self, path: &Path) -> Result<(), EnvelopeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.private.to_bytes())?;
        restrict_permissions(path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, EnvelopeError> {
        let raw = std::fs::read(path)?;
        let bytes: [u8; 32] = raw
            .clone()
            .try_into()
            .map_err(|_| EnvelopeError::MalformedKeyMaterial { expected: 32, found: raw.len() })?;
        Ok(Self::from_private_bytes(bytes))
    }

    /// Loads the keypair at `path`, generating and persisting a fresh one if absent.
    pub fn load_or_generate(path: &Path) -> Result<Self, EnvelopeError> {
        if path.exists() {
            Self::load(path)
        } else {
            let keypair = Self::generate();
            keypair.save(path)?;
            Ok(keypair)
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), EnvelopeError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), EnvelopeError> {
    Ok(())
}
