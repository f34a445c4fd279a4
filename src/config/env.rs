// ABOUTME: Environment lookup capability
//
// Config expansion and runtime-context detection read variables through this
// trait instead of std::env directly, so tests can supply a fixed map.

use std::collections::HashMap;

/// Key -> value lookup over environment variables
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
