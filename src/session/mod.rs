//! Session Driver: owns the transport and the multi-turn loop.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::tools::ToolRegistry;
use crate::transport::{Transport, WsTransport};
use crate::turn::{self, TurnOptions, TurnOutcome};

/// One scripted turn: a user prompt plus the tool the server should be
/// steered to call first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnScript {
    pub prompt: String,
    pub tool_name: String,
}

impl TurnScript {
    pub fn new(prompt: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tool_name: tool_name.into(),
        }
    }
}

/// Drives a session: sequential turns over one exclusively-owned transport,
/// threading each turn's final response id into the next.
pub struct SessionDriver<T: Transport> {
    transport: T,
    registry: ToolRegistry,
    options: TurnOptions,
    previous_response_id: Option<String>,
}

impl SessionDriver<WsTransport> {
    /// Open a WebSocket session for the given config.
    pub async fn connect(config: &SessionConfig, registry: ToolRegistry) -> Result<Self> {
        let transport = WsTransport::connect(config).await?;
        Ok(Self::new(transport, registry, config.turn_options()))
    }
}

impl<T: Transport> SessionDriver<T> {
    /// Wrap an already-open transport.
    pub fn new(transport: T, registry: ToolRegistry, options: TurnOptions) -> Self {
        Self {
            transport,
            registry,
            options,
            previous_response_id: None,
        }
    }

    /// The continuation token carried into the next turn, if any turn has
    /// completed yet.
    pub fn previous_response_id(&self) -> Option<&str> {
        self.previous_response_id.as_deref()
    }

    /// Run one turn and adopt its final response id as the new continuation
    /// token.
    pub async fn run_turn(&mut self, prompt: &str, forced_tool: &str) -> Result<TurnOutcome> {
        let outcome = turn::run_turn(
            &mut self.transport,
            &self.registry,
            &self.options,
            self.previous_response_id.clone(),
            prompt,
            forced_tool,
        )
        .await?;
        self.previous_response_id = Some(outcome.response_id.clone());
        Ok(outcome)
    }

    /// Run every scripted turn in sequence, surfacing each outcome to the
    /// sink, then close the transport.
    ///
    /// The transport is closed on every exit path: normal completion and
    /// failure in any turn. A turn failure takes precedence over a close
    /// failure when both occur.
    pub async fn run<F>(mut self, turns: &[TurnScript], mut sink: F) -> Result<()>
    where
        F: FnMut(usize, &TurnScript, &TurnOutcome),
    {
        let result = self.drive(turns, &mut sink).await;
        let closed = self.transport.close().await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "session aborted");
        }
        result?;
        closed
    }

    async fn drive<F>(&mut self, turns: &[TurnScript], sink: &mut F) -> Result<()>
    where
        F: FnMut(usize, &TurnScript, &TurnOutcome),
    {
        for (index, script) in turns.iter().enumerate() {
            let outcome = self.run_turn(&script.prompt, &script.tool_name).await?;
            sink(index, script, &outcome);
        }
        Ok(())
    }

    /// Close the underlying transport. Safe to call more than once.
    pub async fn close(&mut self) -> Result<()> {
        self.transport.close().await
    }
}
