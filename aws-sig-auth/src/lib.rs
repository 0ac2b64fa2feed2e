/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Signature Version 4 signing for requests sent through the smithy client.

pub mod middleware;
pub mod signer;
