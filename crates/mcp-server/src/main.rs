//! Code Assistant MCP Server
//!
//! Exposes project editing, inspection, and Python analysis tools to AI
//! agents via MCP protocol.
//!
//! ## Tools
//!
//! - `get_file` / `create_file` / `update_file` / `delete_file` - file content
//! - `list_files` / `find_files` / `search_in_files` - discovery
//! - `get_project_tree` / `get_file_info` - inspection
//! - `analyze_code` / `generate_docstring` - Python structure analysis
//! - `run_tests` / `lint_code` - subprocess wrappers (pytest, flake8)
//! - directory, rename, archive, and temp-file management
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "code-assistant": {
//!       "command": "code-assistant-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod tools;

use tools::CodeAssistantService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Code Assistant MCP server");

    // Create and start the MCP server
    let service = CodeAssistantService::from_env();
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("Code Assistant MCP server stopped");
    Ok(())
}
