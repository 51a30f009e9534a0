//! Wire data model for the Responses WebSocket protocol.
//!
//! Outbound messages are modeled by [`ClientEvent`], inbound ones by the
//! tagged [`ServerEvent`] union. Unrecognized inbound kinds deserialize into
//! [`ServerEvent::Other`] so forward-compatible servers never break the
//! event fold; the kind string is kept for observability.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outbound message sent over the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Start one streamed response on the open session.
    #[serde(rename = "response.create")]
    ResponseCreate(ResponseCreate),
}

/// Payload of a `response.create` message.
///
/// The full tool declaration set is always sent, even with
/// [`ToolChoice::None`]: the server needs the schemas to correlate prior
/// function-call output items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCreate {
    pub model: String,
    pub input: InputPayload,
    pub stream: bool,
    pub previous_response_id: Option<String>,
    pub tools: Vec<FunctionTool>,
    pub tool_choice: ToolChoice,
}

/// Input for a response: a raw prompt or structured input items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputPayload {
    Text(String),
    Items(Vec<InputItem>),
}

impl From<&str> for InputPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<InputItem>> for InputPayload {
    fn from(items: Vec<InputItem>) -> Self {
        Self::Items(items)
    }
}

/// Structured input item carried in [`InputPayload::Items`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputItem {
    /// Output of a locally executed tool, keyed to the originating call.
    /// The call id must be echoed exactly; the server matches outputs to
    /// calls by identifier.
    #[serde(rename = "function_call_output")]
    FunctionCallOutput { call_id: String, output: String },
}

/// Static tool declaration advertised to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub strict: bool,
    pub parameters: serde_json::Value,
}

impl FunctionTool {
    /// Declare a strict function tool with the given JSON Schema parameters.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: "function".to_string(),
            name: name.into(),
            description: description.into(),
            strict: true,
            parameters,
        }
    }
}

/// Tool-choice directive for one response run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChoice {
    /// The model must not call any tool.
    None,
    /// The model decides freely.
    Auto,
    /// The model must call the named tool first.
    Function(String),
}

impl Serialize for ToolChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_str("none"),
            Self::Auto => serializer.serialize_str("auto"),
            Self::Function(name) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "function")?;
                map.serialize_entry("name", name)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ToolChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Forced {
                #[serde(rename = "type")]
                kind: String,
                name: String,
            },
            Mode(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Mode(mode) => match mode.as_str() {
                "none" => Ok(Self::None),
                "auto" => Ok(Self::Auto),
                other => Err(D::Error::custom(format!(
                    "unknown tool_choice mode: {other}"
                ))),
            },
            Repr::Forced { kind, name } => {
                if kind == "function" {
                    Ok(Self::Function(name))
                } else {
                    Err(D::Error::custom(format!("unknown tool_choice type: {kind}")))
                }
            }
        }
    }
}

/// Reference to a response carried by terminal events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseRef {
    pub id: String,
}

impl ResponseRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Completed output item carried by `response.output_item.done`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum OutputItem {
    #[serde(rename = "function_call")]
    FunctionCall {
        name: String,
        arguments: String,
        call_id: String,
    },
    #[serde(other)]
    Other,
}

/// Inbound event emitted by the server.
///
/// Dispatch is by the `type` tag; kinds the engine does not consume land in
/// [`ServerEvent::Other`] and never affect control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    OutputTextDelta { delta: String },
    OutputItemDone { item: OutputItem },
    Error { message: Option<String> },
    Completed { response: ResponseRef },
    Failed { response: ResponseRef },
    Incomplete { response: ResponseRef },
    Other { kind: String },
}

impl<'de> Deserialize<'de> for ServerEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct DeltaPayload {
            delta: String,
        }
        #[derive(Deserialize)]
        struct ItemPayload {
            item: OutputItem,
        }
        #[derive(Deserialize)]
        struct ErrorPayload {
            message: Option<String>,
        }
        #[derive(Deserialize)]
        struct ResponsePayload {
            response: ResponseRef,
        }

        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_string();

        let event = match kind.as_str() {
            "response.output_text.delta" => {
                let payload: DeltaPayload =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Self::OutputTextDelta {
                    delta: payload.delta,
                }
            }
            "response.output_item.done" => {
                let payload: ItemPayload =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Self::OutputItemDone { item: payload.item }
            }
            "error" => {
                let payload: ErrorPayload =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Self::Error {
                    message: payload.message,
                }
            }
            "response.completed" => {
                let payload: ResponsePayload =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Self::Completed {
                    response: payload.response,
                }
            }
            "response.failed" => {
                let payload: ResponsePayload =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Self::Failed {
                    response: payload.response,
                }
            }
            "response.incomplete" => {
                let payload: ResponsePayload =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Self::Incomplete {
                    response: payload.response,
                }
            }
            _ => Self::Other { kind },
        };
        Ok(event)
    }
}

impl ServerEvent {
    /// The wire kind string, for observability.
    pub fn kind(&self) -> &str {
        match self {
            Self::OutputTextDelta { .. } => "response.output_text.delta",
            Self::OutputItemDone { .. } => "response.output_item.done",
            Self::Error { .. } => "error",
            Self::Completed { .. } => "response.completed",
            Self::Failed { .. } => "response.failed",
            Self::Incomplete { .. } => "response.incomplete",
            Self::Other { kind } => kind,
        }
    }
}
