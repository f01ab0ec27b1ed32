/// Settings that shape how a predictor is loaded and served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Check artifacts against `manifest.json` before decoding them
    pub verify_checksums: bool,
    /// Maximum number of memoized predictions; 0 disables the cache
    pub cache_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            verify_checksums: true,
            cache_capacity: 0,
        }
    }
}

impl RuntimeConfig {
    pub fn with_verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}
