mod cli;
mod config;
mod formatter;
mod jwt;
mod output;
mod path;
mod token;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::JwtDecodeArgs;
use config::AppConfig;
use formatter::EpochOptions;
use jwt::Jwt;

const JWT_ICON: char = '✻';

#[inline]
fn title(s: &str) -> String {
    format!("{} {}", JWT_ICON, s)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = JwtDecodeArgs::parse();

    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = AppConfig::load(&args)?;
    debug!(
        format = %config.output_format,
        epoch_unit = ?config.epoch_unit,
        output_file = %config.output_file,
        "configuration loaded"
    );

    let status = |message: String, color: fn(&str) -> colored::ColoredString| {
        if !config.silent {
            println!("{}", color(&title(&message)).bold());
        }
    };

    let encoded_jwt = config
        .token_source
        .acquire()
        .context("getting token")?;
    status(
        format!(
            "Token from {}: {}",
            config.token_source,
            token::snippet(&encoded_jwt)
        ),
        |s| s.cyan(),
    );

    token::validate(
        &encoded_jwt,
        config.max_token_bytes(),
        config.max_token_size_mb,
    )?;

    status("Decoding JWT token".to_string(), |s| s.yellow());

    let jwt = encoded_jwt
        .parse::<Jwt>()
        .context("Error parsing JWT token")?;
    debug!(
        alg = %jwt.header.alg,
        typ = ?jwt.header.typ,
        claims = jwt.claims.len(),
        signature_len = jwt.signature.len(),
        "decoded token without verifying the signature"
    );

    let epoch = EpochOptions::new(config.convert_epoch, config.epoch_unit);
    let rendered = formatter::dispatch(
        &jwt.claims,
        config.output_format,
        &epoch,
        config.max_output_bytes(),
    )
    .context("Error formatting output")?;

    output::write(&rendered, Path::new(&config.output_file))?;

    status(
        format!("Successfully wrote output to {}", config.output_file),
        |s| s.green(),
    );

    Ok(())
}
