//! Pondwire — streaming Responses-over-WebSocket session client.
//!
//! Drives long-lived bidirectional sessions against a streaming model-serving
//! endpoint: each turn sends a `response.create` over the socket, folds the
//! inbound event stream into accumulated text and function-call requests,
//! executes requested tools, and resumes the response with their outputs
//! until the server stops asking for tools. Conversational state carries
//! forward between turns through the previous response id.
//!
//! # Quick Start
//!
//! ```no_run
//! use pondwire::prelude::*;
//!
//! # async fn example() -> pondwire::error::Result<()> {
//! let config = SessionConfig::from_env();
//! let registry = ToolRegistry::new();
//! let driver = SessionDriver::connect(&config, registry).await?;
//! let turns = vec![TurnScript::new("Hello!", "get_sku_inventory")];
//! driver
//!     .run(&turns, |_, _, outcome| println!("{}", outcome.assistant_text))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod run;
pub mod session;
pub mod tools;
pub mod transport;
pub mod turn;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
