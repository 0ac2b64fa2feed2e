/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::client::Client;
use std::collections::HashMap;
use std::sync::RwLock;

/// Named clients shared across an application
///
/// The registry is a plain value: create one and pass it (or an `Arc` of it) to whatever needs
/// clients. Lookups may run concurrently; registering and removing take exclusive access.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: RwLock<HashMap<String, Client>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an HTTPS client from `config` and store it under `key`
    #[cfg(feature = "rustls")]
    pub fn register(&self, key: impl Into<String>, config: crate::Config) -> Client {
        let client = Client::from_conf(config);
        self.insert(key, client.clone());
        client
    }

    /// Store `client` under `key`, returning the client it replaces
    pub fn insert(&self, key: impl Into<String>, client: Client) -> Option<Client> {
        let key = key.into();
        tracing::debug!(key = %key, "registering client");
        self.clients.write().unwrap().insert(key, client)
    }

    pub fn get(&self, key: &str) -> Option<Client> {
        self.clients.read().unwrap().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Client> {
        self.clients.write().unwrap().remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.clients.read().unwrap().contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.clients.read().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.clients.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.read().unwrap().is_empty()
    }
}
