//! Turn Orchestrator: one logical exchange, possibly spanning several
//! response runs due to tool calls.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{PondwireError, Result};
use crate::protocol::{InputItem, InputPayload, ToolChoice};
use crate::run::{self, FunctionCallRequest, RunRequest};
use crate::tools::{validation, Tool, ToolArguments, ToolRegistry};
use crate::transport::Transport;

/// Per-turn options, derived from the session config.
#[derive(Debug, Clone)]
pub struct TurnOptions {
    pub model: String,
    pub run_timeout: Duration,
    pub max_tool_rounds: usize,
    pub tool_concurrency: usize,
}

/// Result of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Trimmed concatenation of every run's text in this turn.
    pub assistant_text: String,
    /// Id of the final response, the continuation token for the next turn.
    pub response_id: String,
}

/// Drive one turn to completion.
///
/// The first run sends the raw prompt with the forced tool selection; each
/// subsequent run feeds back the previous batch's tool outputs with
/// tool-choice `none`. The loop is an iterative fixpoint: it exits when a
/// run yields zero function calls, or fails once `max_tool_rounds`
/// dispatches have not reached that fixpoint.
pub async fn run_turn<T>(
    transport: &mut T,
    registry: &ToolRegistry,
    options: &TurnOptions,
    previous_response_id: Option<String>,
    prompt: &str,
    forced_tool: &str,
) -> Result<TurnOutcome>
where
    T: Transport + ?Sized,
{
    let mut assistant_text = String::new();
    let mut input = InputPayload::from(prompt);
    let mut tool_choice = ToolChoice::Function(forced_tool.to_string());
    let mut previous = previous_response_id;
    let mut tool_rounds = 0usize;

    loop {
        let outcome = run::run_response(
            transport,
            registry,
            RunRequest {
                model: &options.model,
                previous_response_id: previous.as_deref(),
                input,
                tool_choice,
                timeout: options.run_timeout,
            },
        )
        .await?;

        assistant_text.push_str(&outcome.text);
        previous = Some(outcome.response_id);

        if outcome.function_calls.is_empty() {
            break;
        }
        if tool_rounds >= options.max_tool_rounds {
            return Err(PondwireError::Protocol(format!(
                "turn exceeded {} tool round-trips",
                options.max_tool_rounds
            )));
        }
        tool_rounds += 1;

        let items =
            dispatch_tools(registry, outcome.function_calls, options.tool_concurrency).await?;
        input = InputPayload::from(items);
        // Once forced tools are satisfied, let the model respond freely;
        // it can still emit unsolicited calls, which keeps the loop going.
        tool_choice = ToolChoice::None;
    }

    let response_id = previous.ok_or_else(|| {
        PondwireError::Protocol("turn finished without any completed response".to_string())
    })?;

    Ok(TurnOutcome {
        assistant_text: assistant_text.trim().to_string(),
        response_id,
    })
}

struct PreparedCall {
    tool: Arc<dyn Tool>,
    call_id: String,
    args: ToolArguments,
}

/// Execute one batch of function calls and collect their outputs.
///
/// Arguments for the whole batch are parsed and validated up front, so a
/// malformed call fails the turn before any tool runs. Execution is
/// concurrent up to the configured limit; output order follows call arrival
/// order regardless of completion order.
async fn dispatch_tools(
    registry: &ToolRegistry,
    calls: Vec<FunctionCallRequest>,
    concurrency: usize,
) -> Result<Vec<InputItem>> {
    let mut prepared = Vec::with_capacity(calls.len());
    for call in calls {
        let tool = registry
            .get(&call.name)
            .ok_or_else(|| PondwireError::UnknownTool(call.name.clone()))?;
        let args = ToolArguments::from_json(&call.arguments)?;
        validation::validate_arguments(args.raw(), &tool.parameters().schema)
            .map_err(PondwireError::ArgumentParse)?;
        tracing::debug!(tool = %call.name, call_id = %call.call_id, arguments = %call.arguments, "tool call");
        prepared.push(PreparedCall {
            tool,
            call_id: call.call_id,
            args,
        });
    }

    stream::iter(prepared.into_iter().map(|call| async move {
        let output = call.tool.execute(&call.args).await?;
        let output = serde_json::to_string(&output)?;
        tracing::debug!(tool = call.tool.name(), call_id = %call.call_id, %output, "tool output");
        Ok::<InputItem, PondwireError>(InputItem::FunctionCallOutput {
            call_id: call.call_id,
            output,
        })
    }))
    .buffered(concurrency.max(1))
    .try_collect()
    .await
}
