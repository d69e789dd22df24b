//! Sterling B2Bi MCP Server
//!
//! Exposes the read-only Sterling B2Bi operations as MCP tools. Failures
//! never cross the tool boundary: every tool degrades to an empty list or
//! `null` and the cause is logged.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData, Implementation, ServerCapabilities,
        ServerInfo, Tool,
    },
    schemars::JsonSchema,
    tool, tool_handler, tool_router, ServerHandler,
};
// Re-export schemars for derive macro
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sterling_b2b::{record_ids, records, Record, SterlingB2bClient, TradingPartnerQuery};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SERVER_NAME: &str = "Sterling B2Bi MCP";

const INSTRUCTIONS: &str = r#"
Sterling B2Bi / FileGateway (read-only)

Trading Partners:
- get_trading_partners: List the ids of all trading partners
- get_trading_partners_with_details: List trading partners with community, email, username and phone
- get_trading_partner_by_id: Get one trading partner by id

Communities:
- get_communities: List the ids of all communities

An empty list or null means the data could not be read, not that none exists.
"#;

/// Parameters for get_trading_partner_by_id tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetTradingPartnerByIdParams {
    /// The ID of the trading partner
    pub trading_partner_id: String,
}

/// MCP server backed by one [`SterlingB2bClient`].
///
/// Construction requires a client, and a client requires a validated
/// connection profile, so no tool is reachable without configuration.
#[derive(Clone)]
pub struct SterlingB2bServer {
    tool_router: ToolRouter<Self>,
    client: Arc<SterlingB2bClient>,
}

impl SterlingB2bServer {
    pub fn new(client: SterlingB2bClient) -> Self {
        let tool_router = Self::tool_router();
        info!(
            "Tool router initialized with {} tools",
            tool_router.list_all().len()
        );
        Self {
            tool_router,
            client: Arc::new(client),
        }
    }

    /// Tools advertised to MCP clients
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    /// Ids of all trading partners on the first page, empty on failure
    pub async fn trading_partner_ids(&self) -> Vec<String> {
        info!("List Trading Partners");
        match self
            .client
            .list_trading_partners(&TradingPartnerQuery::new())
            .await
        {
            Ok(body) => record_ids(&body),
            Err(e) => {
                error!(category = e.category(), "Failed to list trading partners: {}", e);
                Vec::new()
            }
        }
    }

    /// Trading partner records with contact details, empty on failure
    pub async fn trading_partners_with_details(&self) -> Vec<Record> {
        info!("List Trading Partners with details");
        match self.client.list_trading_partners_with_details().await {
            Ok(body) => records(body),
            Err(e) => {
                error!(
                    category = e.category(),
                    "Failed to list trading partners with details: {}", e
                );
                Vec::new()
            }
        }
    }

    /// One trading partner record, `None` when missing or unreadable
    pub async fn trading_partner(&self, trading_partner_id: &str) -> Option<Record> {
        info!("Get Trading Partner by ID: {}", trading_partner_id);
        match self.client.get_trading_partner_by_id(trading_partner_id).await {
            Ok(Value::Object(record)) if !record.is_empty() => Some(record),
            Ok(_) => {
                warn!("Trading Partner with ID {} not found.", trading_partner_id);
                None
            }
            Err(e) if e.status() == Some(404) => {
                warn!("Trading Partner with ID {} not found.", trading_partner_id);
                None
            }
            Err(e) => {
                error!(
                    category = e.category(),
                    "Failed to get trading partner by ID: {}", e
                );
                None
            }
        }
    }

    /// Ids of all communities, empty on failure
    pub async fn community_ids(&self) -> Vec<String> {
        info!("Get Communities");
        match self.client.list_communities().await {
            Ok(body) => record_ids(&body),
            Err(e) => {
                error!(category = e.category(), "Failed to get communities: {}", e);
                Vec::new()
            }
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router(router = tool_router)]
impl SterlingB2bServer {
    #[tool(
        name = "get_trading_partners",
        description = "List of all Trading Partners in Sterling B2Bi/Filegateway"
    )]
    pub async fn get_trading_partners(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.trading_partner_ids().await)
    }

    #[tool(
        name = "get_trading_partners_with_details",
        description = "List of all Trading Partners with details in Sterling B2Bi/Filegateway"
    )]
    pub async fn get_trading_partners_with_details(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.trading_partners_with_details().await)
    }

    #[tool(
        name = "get_trading_partner_by_id",
        description = "Get Trading Partners by ID"
    )]
    pub async fn get_trading_partner_by_id(
        &self,
        Parameters(params): Parameters<GetTradingPartnerByIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        json_result(&self.trading_partner(&params.trading_partner_id).await)
    }

    #[tool(
        name = "get_communities",
        description = "Get Communities in Sterling B2Bi/Filegateway"
    )]
    pub async fn get_communities(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.community_ids().await)
    }
}

#[tool_handler]
impl ServerHandler for SterlingB2bServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                title: Some("Sterling B2Bi / FileGateway".to_string()),
                ..Implementation::from_build_env()
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.trim().to_string()),
            ..Default::default()
        }
    }
}
