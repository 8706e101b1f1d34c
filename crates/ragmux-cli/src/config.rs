//! Command-line configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Args, Parser};
use ragmux_rag::RagConfig;

/// Multi-tenant RAG backend server.
#[derive(Debug, Parser)]
#[command(name = "ragmux", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub pipeline: PipelineConfig,
}

/// HTTP server configuration.
#[derive(Debug, Args)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(
        long = "bind-address",
        env = "RAGMUX_BIND_ADDRESS",
        default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    )]
    pub address: IpAddr,

    /// Port to listen on.
    #[arg(long = "bind-port", env = "RAGMUX_BIND_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Whole-request timeout in seconds.
    #[arg(
        long = "handler-timeout-secs",
        env = "RAGMUX_HANDLER_TIMEOUT_SECS",
        default_value_t = 120
    )]
    pub handler_timeout_secs: u64,
}

impl ServerConfig {
    /// Returns the socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Returns the whole-request timeout.
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }
}

/// RAG pipeline configuration.
#[derive(Debug, Args)]
pub struct PipelineConfig {
    /// Nearest neighbors retrieved per query.
    #[arg(long = "top-k", env = "RAGMUX_TOP_K", default_value_t = 10)]
    pub top_k: usize,

    /// Maximum words per ingested chunk.
    #[arg(long = "word-limit", env = "RAGMUX_WORD_LIMIT", default_value_t = 200)]
    pub word_limit: usize,

    /// Pause before every search, in milliseconds. Zero disables it.
    #[arg(
        long = "settle-delay-ms",
        env = "RAGMUX_SETTLE_DELAY_MS",
        default_value_t = 1000
    )]
    pub settle_delay_ms: u64,

    /// Bound on a single remote call, in seconds.
    #[arg(
        long = "request-timeout-secs",
        env = "RAGMUX_REQUEST_TIMEOUT_SECS",
        default_value_t = 30
    )]
    pub request_timeout_secs: u64,
}

impl PipelineConfig {
    /// Converts the flags into a pipeline configuration.
    pub fn to_rag_config(&self) -> RagConfig {
        RagConfig::default()
            .with_top_k(self.top_k)
            .with_word_limit(self.word_limit)
            .with_settle_delay(Duration::from_millis(self.settle_delay_ms))
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_without_flags() {
        let cli = Cli::try_parse_from(["ragmux"]).unwrap();

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.pipeline.top_k, 10);
        assert_eq!(cli.pipeline.settle_delay_ms, 1000);
    }

    #[test]
    fn pipeline_flags_feed_the_rag_config() {
        let cli = Cli::try_parse_from([
            "ragmux",
            "--top-k",
            "5",
            "--settle-delay-ms",
            "0",
            "--word-limit",
            "50",
        ])
        .unwrap();

        let config = cli.pipeline.to_rag_config();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.word_limit, 50);
        assert!(config.settle_delay.is_zero());
    }
}
