/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use dynamodb::registry::ClientRegistry;
use dynamodb::{Client, Config, Credentials, Region};
use smithy_client::test_connection::NeverService;
use std::sync::Arc;

fn client(region: &'static str) -> Client {
    let config = Config::builder()
        .region(Region::new(region))
        .credentials_provider(Credentials::from_keys("akid", "secret", None))
        .build();
    Client::from_conf_conn(config, NeverService::new())
}

#[test]
fn add_get_remove() {
    let registry = ClientRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.insert("east", client("us-east-1")).is_none());
    registry.insert("west", client("us-west-2"));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.keys(), vec!["east", "west"]);

    let west = registry.get("west").unwrap();
    assert_eq!(west.conf().region(), Some(&Region::new("us-west-2")));
    assert!(registry.get("north").is_none());

    let replaced = registry.insert("west", client("eu-west-1")).unwrap();
    assert_eq!(replaced.conf().region(), Some(&Region::new("us-west-2")));

    assert!(registry.remove("east").is_some());
    assert!(registry.remove("east").is_none());
    assert!(!registry.contains("east"));
    assert_eq!(registry.keys(), vec!["west"]);
}

#[test]
fn lookups_run_from_many_threads() {
    let registry = Arc::new(ClientRegistry::new());
    registry.insert("shared", client("us-east-1"));
    let threads: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                let key = format!("thread-{}", i);
                registry.insert(key.clone(), client("us-east-1"));
                assert!(registry.get("shared").is_some());
                assert!(registry.get(&key).is_some());
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }
    assert_eq!(registry.len(), 9);
}
