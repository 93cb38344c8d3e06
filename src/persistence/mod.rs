//! JSON key/value persistence
//!
//! LocalStorage on wasm32. On native each key is a `<key>.json` file under
//! a data directory (`FRUIT_SLASH_DATA_DIR`, default `.fruit-slash`).

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read a value; `Ok(None)` when nothing has been stored yet
pub fn load_json<T: DeserializeOwned>(key: &str) -> anyhow::Result<Option<T>> {
    match backend::read(key)? {
        Some(json) => {
            let value = serde_json::from_str(&json)
                .with_context(|| format!("corrupt entry {key}"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(value).with_context(|| format!("cannot encode {key}"))?;
    backend::write(key, &json)
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use anyhow::anyhow;

    fn storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| anyhow!("LocalStorage unavailable"))
    }

    pub fn read(key: &str) -> anyhow::Result<Option<String>> {
        storage()?
            .get_item(key)
            .map_err(|e| anyhow!("LocalStorage read {key}: {e:?}"))
    }

    pub fn write(key: &str, json: &str) -> anyhow::Result<()> {
        storage()?
            .set_item(key, json)
            .map_err(|e| anyhow!("LocalStorage write {key}: {e:?}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::path::PathBuf;

    use anyhow::Context;

    pub const DATA_DIR_ENV: &str = "FRUIT_SLASH_DATA_DIR";

    pub fn data_dir() -> PathBuf {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".fruit-slash"))
    }

    fn path_for(key: &str) -> PathBuf {
        data_dir().join(format!("{key}.json"))
    }

    pub fn read(key: &str) -> anyhow::Result<Option<String>> {
        let path = path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
        }
    }

    pub fn write(key: &str, json: &str) -> anyhow::Result<()> {
        let path = path_for(key);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        std::fs::write(&path, json).with_context(|| format!("cannot write {}", path.display()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use backend::{DATA_DIR_ENV, data_dir};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let got: Option<u32> = load_json("fruit_slash_test_never_written_key").unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn test_save_then_load() {
        let key = format!("fruit_slash_test_{}", std::process::id());
        save_json(&key, &vec![3u64, 2, 1]).unwrap();
        let got: Option<Vec<u64>> = load_json(&key).unwrap();
        assert_eq!(got, Some(vec![3, 2, 1]));
        let _ = std::fs::remove_file(data_dir().join(format!("{key}.json")));
    }
}
