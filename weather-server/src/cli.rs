use std::net::SocketAddr;

use clap::Parser;

/// Top-level argument struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather aggregation service")]
pub struct Args {
    /// openweathermap.org API key.
    #[arg(
        long,
        env = "OPENWEATHERMAP_API_KEY",
        default_value = "openweathermap-api-key"
    )]
    pub openweathermap_api_key: String,

    /// darksky.net API key.
    #[arg(long, env = "DARKSKY_API_KEY", default_value = "darksky-api-key")]
    pub darksky_api_key: String,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,
}
