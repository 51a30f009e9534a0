//! Shared test support: a scripted in-memory transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pondwire::error::{PondwireError, Result};
use pondwire::protocol::{ClientEvent, OutputItem, ResponseRef, ServerEvent};
use pondwire::tools::{FnTool, ToolParameters, ToolRegistry};
use pondwire::transport::Transport;
use pondwire::turn::TurnOptions;

#[derive(Default)]
struct Inner {
    sent: Vec<ClientEvent>,
    scripts: VecDeque<Vec<Result<ServerEvent>>>,
    pending: VecDeque<Result<ServerEvent>>,
    close_calls: usize,
    stall_when_empty: bool,
}

/// Transport whose inbound events are scripted per outbound send.
///
/// Each call to `send` records the client event and releases the next
/// scripted reply batch to `recv`.
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

/// Cloneable view into the mock's recorded state, usable after the driver
/// has consumed the transport.
#[derive(Clone)]
pub struct MockHandle {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn handle(&self) -> MockHandle {
        MockHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Queue the reply batch for the next `send`.
    pub fn push_script(&self, events: Vec<Result<ServerEvent>>) {
        self.inner.lock().unwrap().scripts.push_back(events);
    }

    /// Make `recv` pend forever instead of reporting closure when no
    /// scripted events remain.
    pub fn stall_when_empty(&self) {
        self.inner.lock().unwrap().stall_when_empty = true;
    }
}

impl MockHandle {
    pub fn sent(&self) -> Vec<ClientEvent> {
        self.inner.lock().unwrap().sent.clone()
    }

    pub fn close_calls(&self) -> usize {
        self.inner.lock().unwrap().close_calls
    }

    /// Scripted events the engine never consumed.
    pub fn remaining_events(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.sent.push(event.clone());
        if let Some(batch) = inner.scripts.pop_front() {
            inner.pending.extend(batch);
        }
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<ServerEvent>> {
        let stall = {
            let mut inner = self.inner.lock().unwrap();
            if let Some(event) = inner.pending.pop_front() {
                return Some(event);
            }
            inner.stall_when_empty
        };
        if stall {
            std::future::pending::<()>().await;
        }
        None
    }

    async fn close(&mut self) -> Result<()> {
        self.inner.lock().unwrap().close_calls += 1;
        Ok(())
    }
}

// Event constructors, to keep the scripts readable.

pub fn delta(text: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::OutputTextDelta {
        delta: text.to_string(),
    })
}

pub fn function_call(name: &str, call_id: &str, arguments: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::OutputItemDone {
        item: OutputItem::FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
            call_id: call_id.to_string(),
        },
    })
}

pub fn completed(response_id: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::Completed {
        response: ResponseRef::new(response_id),
    })
}

pub fn failed(response_id: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::Failed {
        response: ResponseRef::new(response_id),
    })
}

pub fn incomplete(response_id: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::Incomplete {
        response: ResponseRef::new(response_id),
    })
}

pub fn error_event(message: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::Error {
        message: Some(message.to_string()),
    })
}

pub fn other(kind: &str) -> Result<ServerEvent> {
    Ok(ServerEvent::Other {
        kind: kind.to_string(),
    })
}

pub fn transport_failure(message: &str) -> Result<ServerEvent> {
    Err(PondwireError::Protocol(message.to_string()))
}

// Fixture tools.

fn sku_parameters() -> ToolParameters {
    ToolParameters::object()
        .string("sku", "Stock-keeping unit identifier.", true)
        .build()
}

/// A lookup tool returning a fixed inventory record for the requested SKU.
pub fn inventory_tool() -> FnTool {
    FnTool::new(
        "get_sku_inventory",
        "Return pond inventory details for a SKU.",
        sku_parameters(),
        |args| async move {
            let sku = args.get_str("sku")?;
            Ok(serde_json::json!({
                "sku": sku,
                "warehouse": "pond-west-1",
                "on_hand_units": 84,
            }))
        },
    )
}

/// A second lookup tool, for multi-call batches.
pub fn supplier_tool() -> FnTool {
    FnTool::new(
        "get_supplier_eta",
        "Return supplier restock ETA data for a SKU.",
        sku_parameters(),
        |args| async move {
            let sku = args.get_str("sku")?;
            Ok(serde_json::json!({
                "sku": sku,
                "supplier_shipments": [],
            }))
        },
    )
}

pub fn pond_registry() -> ToolRegistry {
    ToolRegistry::new().with(inventory_tool()).with(supplier_tool())
}

pub fn test_options() -> TurnOptions {
    TurnOptions {
        model: "gpt-test".to_string(),
        run_timeout: std::time::Duration::from_secs(5),
        max_tool_rounds: 8,
        tool_concurrency: 4,
    }
}
