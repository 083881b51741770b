use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::connector::api::ContainerConfig;
use crate::connector::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file holding the conversation log
    #[arg(long, global = true, env = "CHAT_DATA_FILE", default_value = "chat.json")]
    pub data_file: PathBuf,

    /// Completion model name
    #[arg(long, global = true, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Deadline for a single completion request, in seconds
    #[arg(long, global = true, env = "OPENAI_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Echo messages back instead of calling the completion API
    #[arg(long, global = true)]
    pub mock_llm: bool,

    #[arg(short, long, global = true, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, global = true, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Built frontend served for non-API paths
    #[arg(long, global = true, env = "CHAT_WEB_DIR", default_value = "front/build")]
    pub web_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Send one message and print the reply
    Send { message: String },

    /// Print the stored conversation
    History {
        /// Print the raw JSON array
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Resolves the container configuration. The API key only comes from
    /// `OPENAI_API_KEY`.
    pub fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            data_file: self.data_file.clone(),
            web_dir: self.web_dir.clone(),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            mock_llm: self.mock_llm,
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
