/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Client for Amazon DynamoDB.
//!
//! ```no_run
//! use dynamodb::input::GetItemInput;
//! use dynamodb::model::AttributeValue;
//! use dynamodb::{Client, Config, Region};
//! use std::collections::HashMap;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder().region(Region::new("us-east-1")).build();
//! let client = Client::from_conf(config);
//! let mut key = HashMap::new();
//! key.insert("id".to_string(), AttributeValue::S("42".into()));
//! let output = client
//!     .get_item(GetItemInput::builder().table_name("Music").key(key).build())
//!     .await?;
//! println!("{:?}", output.item);
//! # Ok(())
//! # }
//! ```
#![warn(missing_debug_implementations, rust_2018_idioms)]

#[macro_use]
mod macros;

pub mod batch;
pub mod blocking;
mod client;
pub mod config;
pub mod error;
pub mod handle;
pub mod input;
mod json_errors;
pub mod model;
pub mod operation;
pub mod output;
pub mod paginator;
pub mod registry;
pub mod validate;

pub static PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use aws_endpoint::StaticEndpoint;
pub use aws_types::region::Region;
pub use aws_types::Credentials;
pub use client::Client;
pub use config::Config;
pub use error::{ErrorKind, ErrorKindExt, ServiceError};
pub use json_errors::sanitize_error_code;
pub use smithy_client::{retry, timeout, SdkError};
