/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Future utilities and runtime-agnostic abstractions for the client runtime crates.

#![warn(missing_debug_implementations, missing_docs)]

pub mod future;
pub mod rt;
