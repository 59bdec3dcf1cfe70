use clap::Parser;
use shared::models::{AppSettings, DEFAULT_API_BASE, DEFAULT_MODEL};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Chat with custom AI characters")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
    /// Where chat records and avatars are stored
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
    /// Pre-built UI to serve at the root
    #[arg(long)]
    pub dist_dir: Option<PathBuf>,
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
    /// Model used when detection finds nothing
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,
    #[arg(long, default_value_t = 1024)]
    pub max_tokens: u32,
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            request_timeout_secs: self.timeout_secs,
        }
    }
}
