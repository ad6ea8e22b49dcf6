//! Agent card advertising the tool set to agent-protocol peers.

use codegen_tools::ToolSchema;
use serde::{Deserialize, Serialize};

/// A capability the agent offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub examples: Vec<String>,
}

/// Authentication schemes accepted by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAuthentication {
    pub schemes: Vec<String>,
}

/// Optional protocol features.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub streaming: bool,
    pub push_notifications: bool,
}

/// Identity, endpoint and skills of the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
    pub authentication: AgentAuthentication,
}

impl AgentCard {
    /// Card for an agent serving `tools` at `http://{host}:{port}/`.
    pub fn for_tools(host: &str, port: u16, tools: &[ToolSchema]) -> Self {
        let skills = tools
            .iter()
            .map(|schema| AgentSkill {
                id: schema.name.clone(),
                name: schema.name.clone(),
                description: schema.description.clone(),
                tags: vec!["files".to_string()],
                examples: Vec::new(),
            })
            .collect();

        Self {
            name: "CodeGen File Tools Agent".to_string(),
            description: "Reads and writes project files inside a sandboxed project root".to_string(),
            url: format!("http://{}:{}/", host, port),
            version: "1.0.0".to_string(),
            default_input_modes: vec!["text".to_string()],
            default_output_modes: vec!["text".to_string()],
            capabilities: AgentCapabilities::default(),
            skills,
            authentication: AgentAuthentication {
                schemes: vec!["public".to_string()],
            },
        }
    }
}
