//! Session signing key loading.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use tracing::warn;
use zeroize::Zeroize;

/// `Key::derive_from` needs at least this much master key material.
const SESSION_KEY_MIN_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    #[error("failed to read session key at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Derive the cookie signing key from the file at `path`.
///
/// When the file is missing or too short and `allow_ephemeral` is set, a
/// random key is generated instead and a warning is logged. Sessions signed
/// with a generated key do not survive a restart.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    let error = match std::fs::read(path) {
        Ok(mut bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => {
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            return Ok(key);
        }
        Ok(mut bytes) => {
            let length = bytes.len();
            bytes.zeroize();
            SessionKeyError::TooShort {
                path: path.to_path_buf(),
                length,
                min_len: SESSION_KEY_MIN_LEN,
            }
        }
        Err(source) => SessionKeyError::Read {
            path: path.to_path_buf(),
            source,
        },
    };

    if allow_ephemeral {
        warn!(path = %path.display(), error = %error, "using temporary session key (dev only)");
        Ok(Key::generate())
    } else {
        Err(error)
    }
}
