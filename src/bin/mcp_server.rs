//! Pick Lab Advisor MCP Server
//!
//! A Model Context Protocol server (rmcp, stdio transport) that exposes the
//! action advisor for LLM interaction. Reference data is read once at startup
//! from `$PICKLAB_DATA` (default `data`); the most recent hand-off snapshot is
//! kept between tool calls.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use picklab_advisor::mcp_interface::*;
use picklab_advisor::{
    Advisor, AdvisorConfig, Dex, PokemonType, PolicyFlags, Scenario, Selection, Side, Snapshot,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DATA_ENV: &str = "PICKLAB_DATA";
const NO_SNAPSHOT: &str = "No snapshot loaded. Use 'load_snapshot' first.";

#[derive(Debug, Clone)]
pub struct AdvisorService {
    tool_router: ToolRouter<AdvisorService>,
    dex: Arc<Dex>,
    config: Arc<AdvisorConfig>,
    snapshot: Arc<Mutex<Option<Snapshot>>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadSnapshotRequest {
    #[schemars(description = "Path to a hand-off snapshot JSON file")]
    pub path: Option<String>,
    #[schemars(description = "The hand-off snapshot JSON itself, instead of a path")]
    pub json: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AllyHealth {
    #[schemars(description = "Team slot (1-6)")]
    pub slot: u8,
    #[schemars(description = "Remaining health in percent (0-100)")]
    pub hp: f32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecommendRequest {
    #[schemars(description = "Your active team slot (1-6); defaults to the first of your pool")]
    pub own_slot: Option<u8>,
    #[schemars(description = "The opponent's active team slot (1-6); defaults to the first of their pool")]
    pub opponent_slot: Option<u8>,
    #[schemars(description = "Your active mon's health in percent")]
    pub own_hp: Option<f32>,
    #[schemars(description = "The opponent's health in percent")]
    pub opponent_hp: Option<f32>,
    #[schemars(description = "Health of your brought team members")]
    pub ally_hp: Option<Vec<AllyHealth>>,
    #[schemars(description = "Ranking policy: 'aggressive' (A) or 'safety-first' (B, default)")]
    pub scenario: Option<String>,
    #[schemars(description = "Account for the opponent setting up (default true)")]
    pub consider_setup: Option<bool>,
    #[schemars(description = "Account for running out of safe switch-ins (default true)")]
    pub consider_no_switch: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TypeMatchupRequest {
    #[schemars(description = "Attacking type, e.g. 'ice'. Omit to get a species' defensive profile")]
    pub attack: Option<String>,
    #[schemars(description = "Defending species id or name")]
    pub species: Option<String>,
    #[schemars(description = "Defending types, used when no species is given")]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupMoveRequest {
    #[schemars(description = "Name or id of the move to look up")]
    pub move_name: String,
}

fn tool_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

fn slot_index(slot: u8) -> Result<usize, McpError> {
    match slot {
        1..=6 => Ok(slot as usize - 1),
        _ => Err(tool_error(format!("Slot must be 1-6, got {}", slot))),
    }
}

#[tool_router]
impl AdvisorService {
    pub fn new(dex: Dex, config: AdvisorConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            dex: Arc::new(dex),
            config: Arc::new(config),
            snapshot: Arc::new(Mutex::new(None)),
        }
    }

    #[tool(description = "Load a team hand-off snapshot from a file or inline JSON")]
    async fn load_snapshot(
        &self,
        Parameters(request): Parameters<LoadSnapshotRequest>,
    ) -> Result<CallToolResult, McpError> {
        let loaded = match (request.path, request.json) {
            (_, Some(json)) => Snapshot::from_json(&json),
            (Some(path), None) => Snapshot::load(Path::new(&path)),
            (None, None) => return Err(tool_error("Give either 'path' or 'json'".to_string())),
        };
        let snapshot = loaded.map_err(|e| tool_error(format!("Error loading snapshot: {}", e)))?;

        let text = format!(
            "Snapshot loaded.\n\n{}\n{}",
            display_summary(&self.dex, &snapshot),
            display_pool(&self.dex, &snapshot, Side::Own, false)
        );
        *self.snapshot.lock().await = Some(snapshot);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Summarize the loaded snapshot and show both sides' pools")]
    async fn show_pool(&self) -> Result<CallToolResult, McpError> {
        let text = match self.snapshot.lock().await.as_ref() {
            Some(snapshot) => format!(
                "{}\n{}\n{}",
                display_summary(&self.dex, snapshot),
                display_pool(&self.dex, snapshot, Side::Own, false),
                display_pool(
                    &self.dex,
                    snapshot,
                    Side::Opponent,
                    snapshot.app.ui.hide_right_picks
                )
            ),
            None => NO_SNAPSHOT.to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Rank this turn's actions (stay, moves, switches) by risk and threat")]
    async fn recommend(
        &self,
        Parameters(request): Parameters<RecommendRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut ally_health = BTreeMap::new();
        for ally in request.ally_hp.unwrap_or_default() {
            ally_health.insert(slot_index(ally.slot)?, ally.hp);
        }

        let selection = Selection {
            own_active: request.own_slot.map(slot_index).transpose()?,
            opponent_active: request.opponent_slot.map(slot_index).transpose()?,
            own_health: request.own_hp,
            opponent_health: request.opponent_hp,
            ally_health,
            flags: PolicyFlags {
                consider_setup: request.consider_setup.unwrap_or(true),
                consider_no_switch: request.consider_no_switch.unwrap_or(true),
                scenario: request
                    .scenario
                    .as_deref()
                    .map(Scenario::parse_or_default)
                    .unwrap_or_default(),
            },
        };

        let text = match self.snapshot.lock().await.as_ref() {
            Some(snapshot) => {
                let ctx = snapshot
                    .context(&self.dex, &selection)
                    .map_err(|e| tool_error(format!("Error building battle context: {}", e)))?;
                let advice = Advisor::new(&self.dex, &self.config).advise(&ctx);
                format!(
                    "{}{}",
                    display_matchup_header(&self.dex, &ctx),
                    display_advice(&advice)
                )
            }
            None => NO_SNAPSHOT.to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Type effectiveness of an attacking type against a species or types")]
    async fn type_matchup(
        &self,
        Parameters(request): Parameters<TypeMatchupRequest>,
    ) -> Result<CallToolResult, McpError> {
        let defender: Vec<PokemonType> = match (&request.species, &request.types) {
            (Some(species), _) => self.dex.species_types(species),
            (None, Some(types)) => types
                .iter()
                .map(|name| parse_type(name))
                .collect::<Result<_, _>>()
                .map_err(|e| tool_error(e.to_string()))?,
            (None, None) => Vec::new(),
        };

        let text = match (request.attack.as_deref(), request.species.as_deref()) {
            (Some(attack), _) => {
                let attack = parse_type(attack).map_err(|e| tool_error(e.to_string()))?;
                display_type_matchup(attack, &defender)
            }
            (None, Some(species)) => display_defensive_profile(&self.dex, species),
            (None, None) => "Give an attacking type, a species, or both.".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up a move's type, category and base power")]
    async fn lookup_move(
        &self,
        Parameters(request): Parameters<LookupMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = display_move(&self.dex, &request.move_name);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for AdvisorService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let data_path = std::env::var(DATA_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    tracing::info!("Pick Lab Advisor MCP Server starting (data: {})", data_path.display());

    let dex = Dex::load(&data_path)?;
    let config = AdvisorConfig::load_from_dir(&data_path)?;

    let service = AdvisorService::new(dex, config);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    tracing::info!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    tracing::info!("Pick Lab Advisor MCP Server exiting: {:?}", quit_reason);
    Ok(())
}
