//! MCP session against a spawned server process.
//!
//! The server binary talks the protocol on stdio; every tool reply is one
//! text content block holding a JSON record. Replies flagged as errors are
//! decoded into [`ErrorBody`] so callers can branch on the failure kind.

use anyhow::{anyhow, Context, Result};
use rmcp::model::CallToolRequestParam;
use rmcp::transport::TokioChildProcess;
use rmcp::ServiceExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;

use assistant_protocol::ErrorBody;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The server handled the call and answered with a failure record.
    #[error("{}", .0.message)]
    Tool(ErrorBody),
    /// The call never produced a well-formed reply.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub struct AssistantSession {
    service: rmcp::service::RunningService<rmcp::RoleClient, ()>,
}

impl AssistantSession {
    /// Spawn `server` (a path or a name resolved on PATH) and initialize
    /// the MCP session over its stdio.
    pub async fn connect(server: &str) -> Result<Self> {
        let cmd = Command::new(server);
        let transport = TokioChildProcess::new(cmd)
            .with_context(|| format!("spawn MCP server '{server}'"))?;
        let service = ()
            .serve(transport)
            .await
            .with_context(|| format!("initialize MCP session with '{server}'"))?;
        Ok(Self { service })
    }

    /// Names of the tools the server advertises.
    pub async fn tool_names(&self) -> Result<Vec<String>> {
        let listing = self
            .service
            .list_tools(Default::default())
            .await
            .context("list tools")?;
        Ok(listing
            .tools
            .iter()
            .map(|tool| tool.name.to_string())
            .collect())
    }

    /// Call a tool and return the decoded reply record.
    pub async fn call(&self, name: &'static str, args: Value) -> Result<Value, SessionError> {
        log::debug!("calling {name}");
        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.into(),
                arguments: args.as_object().cloned(),
            })
            .await
            .map_err(|err| anyhow!("call {name}: {err}"))?;

        let text = result
            .content
            .first()
            .and_then(|content| content.as_text())
            .map(|text| text.text.clone())
            .ok_or_else(|| anyhow!("{name} returned no text content"))?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|err| anyhow!("{name} reply is not JSON: {err}"))?;

        if result.is_error == Some(true) {
            let body: ErrorBody = serde_json::from_value(body)
                .map_err(|err| anyhow!("{name} failure reply is malformed: {err}"))?;
            return Err(SessionError::Tool(body));
        }
        Ok(body)
    }

    /// Call a tool and decode the success record into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        name: &'static str,
        args: Value,
    ) -> Result<T, SessionError> {
        let body = self.call(name, args).await?;
        serde_json::from_value(body)
            .map_err(|err| SessionError::Transport(anyhow!("{name} reply shape: {err}")))
    }

    /// Shut the server process down.
    pub async fn shutdown(self) -> Result<()> {
        self.service.cancel().await.context("stop MCP server")?;
        Ok(())
    }
}
