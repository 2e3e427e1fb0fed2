use clap::Parser;
/// Decodes the claims of a JWT (without verifying its signature) and writes
/// them to a file as JSON, CSV or XML.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct JwtDecodeArgs {
    /// Access token passed as a string
    #[clap(long = "token-string", value_name = "JWT")]
    pub token_string: Option<String>,

    /// Access token read from a file
    #[clap(long = "token-file", value_name = "PATH")]
    pub token_file: Option<String>,

    /// Get the token from the environment variable JWT_TOKEN
    #[clap(long = "token-env")]
    pub token_env: bool,

    /// Output format (JSON, CSV, or XML). Defaults to JSON
    #[clap(long = "output-format", short = 'f', value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Path of the output file. Defaults to claims.<format>
    #[clap(long = "output-file", short = 'o', value_name = "PATH")]
    pub output_file: Option<String>,

    /// Path of a JSON config file. Must be the only argument when given
    #[clap(long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// Add human-readable dates for iat, exp, nbf and auth_time
    #[clap(long = "convert-epoch", short = 'c')]
    pub convert_epoch: bool,

    /// Epoch unit (s, ms, us, ns). Guessed from the magnitude when omitted
    #[clap(long = "epoch-unit", value_name = "UNIT")]
    pub epoch_unit: Option<String>,

    /// Suppress all status messages
    #[clap(long = "silent", short = 's')]
    pub silent: bool,

    /// Maximum JWT token size in MB
    #[clap(long = "max-token-size", value_name = "MB")]
    pub max_token_size: Option<u64>,

    /// Maximum formatted output size in MB
    #[clap(long = "max-output-size", value_name = "MB")]
    pub max_output_size: Option<u64>,

    /// No color output
    #[clap(long = "no-color", short = 'n')]
    pub no_color: bool,

    /// Log debug diagnostics to stderr
    #[clap(long = "verbose", short = 'v')]
    pub verbose: bool,
}
