//! Proxy pool rotation
//!
//! [`ProxyManager`] hands out one proxy address at a time from a
//! configurable pool, optionally cycling back to the start indefinitely,
//! optionally in randomized order.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use tracing::warn;

use crate::error::{Result, ToolbeltError};

/// Rotation position within the active pool
///
/// `Exhausted` means no further address can be produced; a non-reusing
/// manager locks into it once the pool is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Positioned(usize),
    Exhausted,
}

/// Manages rotation over a pool of proxy addresses
///
/// The configured pool (`store`) is the append-only source of truth; the
/// active order is rebuilt from it on every mutation, with a fresh
/// shuffle when randomized. Rebuilding restarts rotation from the front.
///
/// Not internally synchronized; callers sharing a manager across threads
/// must provide their own locking.
pub struct ProxyManager {
    store: Vec<String>,
    reuse: bool,
    random_order: bool,
    active: Vec<String>,
    cursor: Cursor,
}

impl ProxyManager {
    pub fn new(proxies: Vec<String>, reuse: bool, random_order: bool) -> Self {
        let mut manager = Self {
            store: proxies,
            reuse,
            random_order,
            active: Vec::new(),
            cursor: Cursor::Exhausted,
        };
        manager.reset();
        manager
    }

    /// Add proxy addresses to the pool
    ///
    /// Unless `include_duplicates` is set, addresses already present in
    /// the pool (or earlier in the same batch) are skipped. Rotation
    /// progress restarts from a freshly rebuilt active order.
    pub fn add_proxies(&mut self, proxies: Vec<String>, include_duplicates: bool) {
        if include_duplicates {
            self.store.extend(proxies);
        } else {
            for address in proxies {
                if !self.store.contains(&address) {
                    self.store.push(address);
                }
            }
        }
        self.reset();
    }

    /// Replace the pool with the given addresses, duplicates included
    pub fn set_proxies(&mut self, proxies: Vec<String>) {
        self.store.clear();
        self.add_proxies(proxies, true);
    }

    /// Rebuild the active order from the store and restart rotation
    fn reset(&mut self) {
        self.active = self.store.clone();
        if self.random_order {
            self.active.shuffle(&mut rand::thread_rng());
        }
        self.cursor = if self.active.is_empty() {
            Cursor::Exhausted
        } else {
            Cursor::Positioned(0)
        };
    }

    /// Check if a cycle to the next proxy address can succeed
    pub fn can_cycle(&self) -> bool {
        match self.cursor {
            Cursor::Exhausted => false,
            Cursor::Positioned(index) => index + 1 < self.active.len() || self.reuse,
        }
    }

    /// Attempt to cycle to the next proxy address
    ///
    /// Past the end of the active order, a reusing manager rebuilds
    /// (fresh shuffle when randomized) and starts over; otherwise the
    /// pool locks as exhausted. Cycling an exhausted manager is a warned
    /// no-op, not an error.
    pub fn cycle(&mut self) {
        match self.cursor {
            Cursor::Exhausted => {
                warn!("attempted to cycle proxies after the pool was exhausted");
            }
            Cursor::Positioned(index) => {
                if index + 1 < self.active.len() {
                    self.cursor = Cursor::Positioned(index + 1);
                } else if self.reuse {
                    self.reset();
                } else {
                    self.cursor = Cursor::Exhausted;
                }
            }
        }
    }

    /// Current proxy address, or `None` when exhausted
    pub fn current(&self) -> Option<&str> {
        match self.cursor {
            Cursor::Positioned(index) => self.active.get(index).map(String::as_str),
            Cursor::Exhausted => None,
        }
    }

    /// Whether rotation has locked with no producible address
    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    /// Number of addresses in the configured pool
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Convert an HTTPS proxy address to HTTP
///
/// HTTP addresses pass through unchanged; anything else is rejected.
pub fn https_to_http(address: &str) -> Result<String> {
    if let Some(rest) = address.strip_prefix("https://") {
        return Ok(format!("http://{rest}"));
    }
    if address.starts_with("http://") {
        return Ok(address.to_string());
    }
    Err(ToolbeltError::InvalidProxyAddress(address.to_string()))
}

/// Prepare an HTTP(S) proxy address as environment-style variables
///
/// Returns the four conventional entries (`HTTP_PROXY`, `HTTPS_PROXY`,
/// and their lowercase forms) recognized by most HTTP clients.
pub fn prepare_proxy_env(address: &str) -> Result<HashMap<String, String>> {
    let (https, http) = if address.starts_with("https://") {
        (address.to_string(), https_to_http(address)?)
    } else if address.starts_with("http://") {
        (address.to_string(), address.to_string())
    } else {
        return Err(ToolbeltError::InvalidProxyAddress(address.to_string()));
    };

    let mut env = HashMap::with_capacity(4);
    env.insert("HTTPS_PROXY".to_string(), https.clone());
    env.insert("HTTP_PROXY".to_string(), http.clone());
    env.insert("https_proxy".to_string(), https);
    env.insert("http_proxy".to_string(), http);
    Ok(env)
}
