/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Lazy, resumable pagination.
//!
//! ```no_run
//! # async fn list(client: dynamodb::Client) -> Result<(), dynamodb::SdkError<dynamodb::ServiceError>> {
//! use dynamodb::input::ListTablesInput;
//! let mut pages = client.paginate(ListTablesInput::builder().limit(10).build());
//! while let Some(page) = pages.next_page().await {
//!     for name in page?.table_names.unwrap_or_default() {
//!         println!("{}", name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::client::Client;
use crate::error::ServiceError;
use crate::input::*;
use crate::model::Item;
use crate::operation::DynamoDbOperation;
use smithy_client::SdkError;
use std::fmt;
use tokio_stream::Stream;

/// An operation whose output may continue on another page
pub trait Paginate: DynamoDbOperation + Clone {
    /// Opaque position of the next page
    type Token: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Position this input at `token`, or at the first page
    fn set_token(&mut self, token: Option<Self::Token>);

    /// The position of the page after `output`. `None` means `output` was the last page.
    fn next_token(output: &Self::Output) -> Option<Self::Token>;
}

trait NonEmpty {
    fn non_empty(self) -> Option<Self>
    where
        Self: Sized;
}

impl NonEmpty for String {
    fn non_empty(self) -> Option<Self> {
        Some(self).filter(|token| !token.is_empty())
    }
}

impl NonEmpty for Item {
    fn non_empty(self) -> Option<Self> {
        Some(self).filter(|key| !key.is_empty())
    }
}

macro_rules! paginated {
    ($($input:ty => $input_member:ident, $output_member:ident: $token:ty;)*) => {
        $(
            impl Paginate for $input {
                type Token = $token;

                fn set_token(&mut self, token: Option<Self::Token>) {
                    self.$input_member = token;
                }

                fn next_token(output: &Self::Output) -> Option<Self::Token> {
                    output.$output_member.clone().and_then(NonEmpty::non_empty)
                }
            }
        )*
    };
}

paginated! {
    QueryInput => exclusive_start_key, last_evaluated_key: Item;
    ScanInput => exclusive_start_key, last_evaluated_key: Item;
    ExecuteStatementInput => next_token, next_token: String;
    ListTablesInput => exclusive_start_table_name, last_evaluated_table_name: String;
    ListBackupsInput => exclusive_start_backup_arn, last_evaluated_backup_arn: String;
    ListGlobalTablesInput => exclusive_start_global_table_name, last_evaluated_global_table_name: String;
    ListTagsOfResourceInput => next_token, next_token: String;
    ListExportsInput => next_token, next_token: String;
    ListImportsInput => next_token, next_token: String;
    ListContributorInsightsInput => next_token, next_token: String;
}

#[derive(Debug)]
enum State<T> {
    Ready(Option<T>),
    Done,
}

/// Pages of a paginated operation, fetched one call at a time
///
/// Each page is an independent call, retried on its own. The paginator is finished after the
/// page without a continuation token, or after the first error. Use
/// [`last_token`](Paginator::last_token) and [`resume_from`](Paginator::resume_from) to continue
/// from a known position, eg. after an error or in another process.
pub struct Paginator<I: Paginate> {
    client: Client,
    input: I,
    state: State<I::Token>,
    last_token: Option<I::Token>,
}

impl<I: Paginate> fmt::Debug for Paginator<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("operation", &I::DESCRIPTOR.name)
            .field("state", &self.state)
            .field("last_token", &self.last_token)
            .finish()
    }
}

impl<I: Paginate> Paginator<I> {
    pub(crate) fn new(client: Client, input: I) -> Self {
        Paginator {
            client,
            input,
            state: State::Ready(None),
            last_token: None,
        }
    }

    /// Continue from `token` instead of the input's own position
    pub fn resume_from(mut self, token: I::Token) -> Self {
        self.last_token = Some(token.clone());
        self.state = State::Ready(Some(token));
        self
    }

    /// The most recent continuation token, if any page so far had one
    pub fn last_token(&self) -> Option<&I::Token> {
        self.last_token.as_ref()
    }

    /// Whether every page has been returned
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Fetch the next page, or `None` when there is none
    pub async fn next_page(&mut self) -> Option<Result<I::Output, SdkError<ServiceError>>> {
        let token = match std::mem::replace(&mut self.state, State::Done) {
            State::Done => return None,
            State::Ready(token) => token,
        };
        let mut input = self.input.clone();
        if token.is_some() {
            input.set_token(token);
        }
        let output = match self.client.send(input).await {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(operation = I::DESCRIPTOR.name, error = %err, "pagination stopped by an error");
                return Some(Err(err));
            }
        };
        match I::next_token(&output) {
            Some(next) => {
                tracing::trace!(operation = I::DESCRIPTOR.name, token = ?next, "another page follows");
                self.last_token = Some(next.clone());
                self.state = State::Ready(Some(next));
            }
            None => self.state = State::Done,
        }
        Some(Ok(output))
    }

    /// Adapt this paginator into a stream of pages
    pub fn into_stream(mut self) -> impl Stream<Item = Result<I::Output, SdkError<ServiceError>>> {
        async_stream::stream! {
            while let Some(page) = self.next_page().await {
                yield page;
            }
        }
    }
}
