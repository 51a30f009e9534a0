//! CLI entry point for the Pondwire demo.

pub mod demo;

use clap::Parser;

/// Pondwire demo CLI
#[derive(Parser, Debug)]
#[command(
    name = "pondwire",
    version,
    about = "Streaming Responses-over-WebSocket demo session"
)]
pub struct Cli {
    /// Model to target
    #[arg(long, default_value = "gpt-5.2")]
    pub model: String,

    /// Attach the beta opt-in header to the session open request
    #[arg(long)]
    pub use_beta_header: bool,

    /// Log every inbound event kind
    #[arg(long)]
    pub show_events: bool,

    /// Log tool call arguments and outputs
    #[arg(long)]
    pub show_tool_io: bool,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Tracing directives implied by the flags, if any.
    pub fn log_filter(&self) -> Option<String> {
        let mut directives = Vec::new();
        if self.show_events {
            directives.push("pondwire::run=debug");
            directives.push("pondwire::transport=debug");
        }
        if self.show_tool_io {
            directives.push("pondwire::turn=debug");
        }
        if directives.is_empty() {
            None
        } else {
            Some(directives.join(","))
        }
    }
}
