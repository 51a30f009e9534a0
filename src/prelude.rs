//! Convenience re-exports for common use.

pub use crate::config::SessionConfig;
pub use crate::error::{PondwireError, Result};
pub use crate::protocol::{
    ClientEvent, FunctionTool, InputItem, InputPayload, ServerEvent, ToolChoice,
};
pub use crate::run::{FunctionCallRequest, RunOutcome};
pub use crate::session::{SessionDriver, TurnScript};
pub use crate::tools::{FnTool, Tool, ToolArguments, ToolParameters, ToolRegistry};
pub use crate::transport::{Transport, WsTransport};
pub use crate::turn::{TurnOptions, TurnOutcome};
