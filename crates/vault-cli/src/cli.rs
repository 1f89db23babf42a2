use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use vault_core::VERSION;

use crate::constants::env_vars;

/// Vault - zero-knowledge encryption and password-derived identity
#[derive(Parser)]
#[command(name = "vault")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Config file path
    #[arg(long, global = true, env = env_vars::CONFIG, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set a master password and print its stored public key
    Keygen,

    /// Split a stored public key into salt and public key
    SplitKey(SplitKeyArgs),

    /// Encrypt text into an envelope
    Encrypt(EncryptArgs),

    /// Decrypt an envelope
    Decrypt(DecryptArgs),

    /// Encrypt a file into a JSON record
    EncryptFile(EncryptFileArgs),

    /// Decrypt a JSON file record
    DecryptFile(DecryptFileArgs),

    /// Issue a random challenge
    Challenge(ChallengeArgs),

    /// Sign a challenge with the password-derived key
    Sign(SignArgs),

    /// Verify a signed challenge against a stored public key
    Verify(VerifyArgs),

    /// Check a password against the policy
    CheckPassword,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `split-key` command
#[derive(Args)]
pub struct SplitKeyArgs {
    /// Stored public key (162 hex characters)
    #[arg(value_name = "STORED")]
    pub stored: String,
}

/// Arguments for the `encrypt` command
#[derive(Args)]
pub struct EncryptArgs {
    /// Text to encrypt (reads stdin if omitted)
    #[arg(long)]
    pub text: Option<String>,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// Envelope string (reads stdin if omitted)
    #[arg(value_name = "ENVELOPE")]
    pub envelope: Option<String>,
}

/// Arguments for the `encrypt-file` command
#[derive(Args)]
pub struct EncryptFileArgs {
    /// File to encrypt
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output path (defaults to <PATH>.vault.json)
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// MIME type recorded with the file
    #[arg(long, value_name = "MIME")]
    pub filetype: Option<String>,
}

/// Arguments for the `decrypt-file` command
#[derive(Args)]
pub struct DecryptFileArgs {
    /// Encrypted JSON record
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output path (defaults to the recorded filename next to PATH)
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,
}

/// Arguments for the `challenge` command
#[derive(Args)]
pub struct ChallengeArgs {
    /// Lifetime in seconds (overrides config)
    #[arg(long, value_name = "SECONDS")]
    pub ttl: Option<i64>,
}

/// Arguments for the `sign` command
#[derive(Args)]
pub struct SignArgs {
    /// Challenge text
    #[arg(value_name = "CHALLENGE")]
    pub challenge: String,

    /// Hex salt from the stored public key
    #[arg(long, value_name = "HEX")]
    pub salt: String,
}

/// Arguments for the `verify` command
#[derive(Args)]
pub struct VerifyArgs {
    /// Stored public key (162 hex characters)
    #[arg(long, value_name = "STORED")]
    pub public_key: String,

    /// Challenge text
    #[arg(long)]
    pub challenge: String,

    /// DER signature as hex
    #[arg(long)]
    pub signature: String,

    /// Challenge expiry (RFC 3339); expiry is checked first when given
    #[arg(long, value_name = "RFC3339")]
    pub expires: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show,
}
