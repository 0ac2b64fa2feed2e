/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use std::process;

use dynamodb::input::ListTablesInput;
use dynamodb::{Client, Config, Region, StaticEndpoint};

use structopt::StructOpt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(default_value = "us-west-2", short, long)]
    region: String,

    /// Send requests to this endpoint instead, eg. `http://localhost:8000` for DynamoDB Local
    #[structopt(short, long)]
    endpoint: Option<String>,

    /// Tables per page
    #[structopt(short, long, default_value = "10")]
    page_size: i32,

    #[structopt(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let opt = Opt::from_args();

    if opt.verbose {
        println!("DynamoDB client version: {}\n", dynamodb::PKG_VERSION);
        println!("Region: {}", opt.region);

        SubscriberBuilder::default()
            .with_env_filter("dynamodb=debug,smithy_client=debug")
            .with_span_events(FmtSpan::CLOSE)
            .init();
    }

    let mut config = Config::builder().region(Region::new(opt.region.clone()));
    if let Some(endpoint) = &opt.endpoint {
        match StaticEndpoint::parse(endpoint) {
            Ok(endpoint) => config = config.endpoint_resolver(endpoint),
            Err(e) => {
                println!("Invalid endpoint {}: {}", endpoint, e);
                process::exit(1);
            }
        }
    }
    let client = Client::from_conf(config.build());

    let mut pages = client.paginate(ListTablesInput::builder().limit(opt.page_size).build());
    let mut count = 0;
    while let Some(page) = pages.next_page().await {
        match page {
            Ok(page) => {
                for name in page.table_names.unwrap_or_default() {
                    count += 1;
                    println!("    {}", name);
                }
            }
            Err(e) => {
                println!("Got an error listing tables:");
                println!("{}", e);
                process::exit(1);
            }
        }
    }
    println!("\nFound {} tables in {} region.\n", count, opt.region);
}
