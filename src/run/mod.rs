//! Response Run Engine: one create-and-stream-until-terminal exchange.

use std::time::Duration;

use crate::error::{PondwireError, Result};
use crate::protocol::{
    ClientEvent, InputPayload, OutputItem, ResponseCreate, ServerEvent, ToolChoice,
};
use crate::tools::ToolRegistry;
use crate::transport::Transport;
use crate::util::with_timeout;

/// Request for one response run.
#[derive(Debug, Clone)]
pub struct RunRequest<'a> {
    pub model: &'a str,
    pub previous_response_id: Option<&'a str>,
    pub input: InputPayload,
    pub tool_choice: ToolChoice,
    /// Deadline for the run to reach a terminal event.
    pub timeout: Duration,
}

/// Function-call request emitted by the server mid-stream.
///
/// Unique per call id within a run; ordering follows arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallRequest {
    pub name: String,
    pub call_id: String,
    /// Raw JSON argument string, parsed only at dispatch time.
    pub arguments: String,
}

/// Accumulated result of a completed response run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Text deltas concatenated in arrival order.
    pub text: String,
    /// Id of the completed response, threaded into the next run.
    pub response_id: String,
    /// Function-call requests in arrival order.
    pub function_calls: Vec<FunctionCallRequest>,
}

/// Drive exactly one request/response exchange over the transport.
///
/// Sends a single `response.create` carrying the registry's full declaration
/// set, then folds inbound events until a terminal disposition. Exactly one
/// of resolve or fail happens per invocation, and no events are consumed
/// after termination.
pub async fn run_response<T>(
    transport: &mut T,
    registry: &ToolRegistry,
    request: RunRequest<'_>,
) -> Result<RunOutcome>
where
    T: Transport + ?Sized,
{
    let create = ClientEvent::ResponseCreate(ResponseCreate {
        model: request.model.to_string(),
        input: request.input,
        stream: true,
        previous_response_id: request.previous_response_id.map(str::to_string),
        tools: registry.declarations(),
        tool_choice: request.tool_choice,
    });
    transport.send(&create).await?;
    tracing::debug!(
        model = request.model,
        previous_response_id = ?request.previous_response_id,
        "response.create sent"
    );

    with_timeout(request.timeout, accumulate(transport, registry)).await
}

/// Single-pass left-fold over the inbound event stream.
async fn accumulate<T>(transport: &mut T, registry: &ToolRegistry) -> Result<RunOutcome>
where
    T: Transport + ?Sized,
{
    let mut text = String::new();
    let mut function_calls: Vec<FunctionCallRequest> = Vec::new();

    loop {
        let event = match transport.recv().await {
            Some(Ok(event)) => event,
            Some(Err(e)) => return Err(e),
            None => {
                return Err(PondwireError::Protocol(
                    "transport closed before a terminal response event".to_string(),
                ))
            }
        };

        match event {
            ServerEvent::OutputTextDelta { delta } => text.push_str(&delta),
            ServerEvent::OutputItemDone {
                item:
                    OutputItem::FunctionCall {
                        name,
                        arguments,
                        call_id,
                    },
            } => {
                if !registry.contains(&name) {
                    return Err(PondwireError::UnknownTool(name));
                }
                function_calls.push(FunctionCallRequest {
                    name,
                    call_id,
                    arguments,
                });
            }
            ServerEvent::OutputItemDone { .. } => {
                tracing::debug!("ignoring non-function output item");
            }
            ServerEvent::Error { message } => {
                return Err(PondwireError::Protocol(
                    message.unwrap_or_else(|| "server error event".to_string()),
                ));
            }
            ServerEvent::Completed { response } => {
                tracing::debug!(response_id = %response.id, calls = function_calls.len(), "response completed");
                return Ok(RunOutcome {
                    text,
                    response_id: response.id,
                    function_calls,
                });
            }
            ServerEvent::Failed { response } => {
                return Err(PondwireError::ResponseFailed {
                    response_id: response.id,
                    disposition: "failed".to_string(),
                });
            }
            ServerEvent::Incomplete { response } => {
                return Err(PondwireError::ResponseFailed {
                    response_id: response.id,
                    disposition: "incomplete".to_string(),
                });
            }
            // Passive side channel only; never affects control flow.
            ServerEvent::Other { kind } => {
                tracing::debug!(kind = %kind, "ignoring event");
            }
        }
    }
}
