//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `onion_client` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use onion_client::auth::parse_header_lines;
use onion_client::config::{Opt, CONTENT_TYPE_JSON, HEADER_CONTENT_TYPE};
use onion_client::initialization::init_logger_with;
use onion_client::{
    sanitize_and_truncate_error_message, Client, ErrorClassifier, RequestDescriptor,
    ResponseDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let client = Client::new(opt.client_config()).context("Failed to create HTTP client")?;
    let classifier = ErrorClassifier::default().with_proxy_address(&opt.proxy);

    if opt.check_tor {
        match client.test_proxy_connection().await {
            Ok(()) => {
                println!("✅ Tor proxy at {} is accepting connections", opt.proxy);
                return Ok(());
            }
            Err(e) => exit_with_diagnosis(&classifier, e, "", opt.diagnose),
        }
    }

    // clap enforces the URL unless --check-tor is given
    let url = opt.url.clone().unwrap_or_default();

    let mut request = RequestDescriptor::new(&opt.method, &url);
    for (name, value) in parse_header_lines(&opt.headers.join("\n")) {
        request.set_header(name, value);
    }
    if opt.json {
        request.set_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
    }
    if let Some(body) = &opt.body {
        request.set_body(body.as_str());
    }

    let auth = match opt.auth_config() {
        Ok(auth) => auth,
        Err(e) => exit_with_diagnosis(&classifier, e, &url, opt.diagnose),
    };
    if let Err(e) = auth.apply(&mut request) {
        exit_with_diagnosis(&classifier, e, &url, opt.diagnose);
    }

    match client.send(&request).await {
        Ok(response) => {
            print_response(&response);
            if opt.diagnose {
                if let Some(diagnosis) = classifier.classify_response(&response, &request.url) {
                    eprint!("\n{}", diagnosis.summary());
                }
            }
            Ok(())
        }
        Err(e) => exit_with_diagnosis(&classifier, e, &request.url, opt.diagnose),
    }
}

fn print_response(response: &ResponseDescriptor) {
    println!("{}", response.status());

    let mut headers: Vec<(&String, &String)> = response.headers().iter().collect();
    headers.sort();
    for (name, value) in headers {
        println!("{}: {}", name, value);
    }

    println!();
    println!("{}", response.pretty_json());
    log::info!(
        "Completed in {} ms at {}",
        response.duration().as_millis(),
        response.timestamp().to_rfc3339()
    );
}

fn exit_with_diagnosis<E>(classifier: &ErrorClassifier, error: E, url: &str, full: bool) -> !
where
    E: Into<anyhow::Error>,
{
    let diagnosis = classifier.classify(error, url);

    if full {
        eprint!("{}", diagnosis.summary());
    } else {
        eprintln!(
            "❌ {}",
            sanitize_and_truncate_error_message(&diagnosis.message)
        );
        if let Some(hint) = diagnosis.suggestions.first() {
            eprintln!("   Hint: {} (use --diagnose for more)", hint);
        }
    }
    if diagnosis.is_retryable() {
        eprintln!("   This failure may be temporary; retrying may help.");
    }

    process::exit(1);
}
