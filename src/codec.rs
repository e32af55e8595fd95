//! Named, composable byte-to-byte encode/decode functions.
//!
//! Codec functions are pure byte-to-byte transformations. They run outside
//! the facade's database mutex (see [`crate::Filesystem::write`] and
//! [`crate::Filesystem::read`]) and may recursively call back into the
//! registry (`call_encode`/`call_decode`) to compose other codecs — the
//! registry itself holds no database lock, so that reentrancy is safe.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A pure byte-to-byte transformation.
pub type CodecFn = Arc<dyn Fn(&Registry, &[u8]) -> Vec<u8> + Send + Sync>;

/// Name → (encode, decode) mapping.
///
/// Re-registering a name is a programming error and panics, matching the
/// original's `assert(!m_save_funcs.contains(name))`. Looking up a missing
/// name (`call_encode`/`call_decode`) panics for the same reason — both are
/// caller bugs, not runtime conditions a well-behaved program should ever
/// hit in production use.
pub struct Registry {
    encoders: Mutex<HashMap<String, CodecFn>>,
    decoders: Mutex<HashMap<String, CodecFn>>,
}

impl Registry {
    /// A fresh registry with only the built-in `raw` (identity) codec.
    pub fn new() -> Arc<Self> {
        let registry = Arc::new(Registry {
            encoders: Mutex::new(HashMap::new()),
            decoders: Mutex::new(HashMap::new()),
        });
        registry.register_encode("raw", |_, bytes| bytes.to_vec());
        registry.register_decode("raw", |_, bytes| bytes.to_vec());
        registry
    }

    pub fn register_encode<F>(&self, name: &str, f: F)
    where
        F: Fn(&Registry, &[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        let mut encoders = self.encoders.lock().unwrap();
        assert!(!encoders.contains_key(name), "codec '{name}' already registered for encode");
        encoders.insert(name.to_string(), Arc::new(f));
    }

    pub fn register_decode<F>(&self, name: &str, f: F)
    where
        F: Fn(&Registry, &[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        let mut decoders = self.decoders.lock().unwrap();
        assert!(!decoders.contains_key(name), "codec '{name}' already registered for decode");
        decoders.insert(name.to_string(), Arc::new(f));
    }

    pub fn call_encode(&self, name: &str, bytes: &[u8]) -> Vec<u8> {
        let f = {
            let encoders = self.encoders.lock().unwrap();
            encoders.get(name).cloned()
        };
        let f = f.unwrap_or_else(|| panic!("codec '{name}' has no registered encode function"));
        f(self, bytes)
    }

    pub fn call_decode(&self, name: &str, bytes: &[u8]) -> Vec<u8> {
        let f = {
            let decoders = self.decoders.lock().unwrap();
            decoders.get(name).cloned()
        };
        let f = f.unwrap_or_else(|| panic!("codec '{name}' has no registered decode function"));
        f(self, bytes)
    }
}
