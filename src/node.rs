use crate::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Opaque node identifier, e.g. `node-3`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad role of a node in a workflow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// Entry point of a workflow
    Trigger,
    Action,
    Utility,
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeCategory::Trigger => "trigger",
            NodeCategory::Action => "action",
            NodeCategory::Utility => "utility",
        };
        f.write_str(name)
    }
}

/// Every block the palette offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    // Triggers
    Schedule,
    Webhook,
    Manual,

    // Actions
    Slack,
    Email,
    Http,
    PiAuth,
    Code,
    Set,
    Date,
    If,
    Switch,
    Wait,
    Csv,
    Json,

    // Utilities
    Noop,
    Rename,
    PiPayment,
    PiData,
}

impl NodeKind {
    /// All kinds in palette order
    pub fn catalog() -> &'static [NodeKind] {
        use NodeKind::*;
        &[
            Schedule, Webhook, Manual, Slack, Email, Http, PiAuth, Code, Set, Date, If, Switch,
            Wait, Csv, Json, Noop, Rename, PiPayment, PiData,
        ]
    }

    /// Wire name used in documents and on the command line
    pub fn wire_name(&self) -> &'static str {
        match self {
            NodeKind::Schedule => "schedule",
            NodeKind::Webhook => "webhook",
            NodeKind::Manual => "manual",
            NodeKind::Slack => "slack",
            NodeKind::Email => "email",
            NodeKind::Http => "http",
            NodeKind::PiAuth => "pi-auth",
            NodeKind::Code => "code",
            NodeKind::Set => "set",
            NodeKind::Date => "date",
            NodeKind::If => "if",
            NodeKind::Switch => "switch",
            NodeKind::Wait => "wait",
            NodeKind::Csv => "csv",
            NodeKind::Json => "json",
            NodeKind::Noop => "noop",
            NodeKind::Rename => "rename",
            NodeKind::PiPayment => "pi-payment",
            NodeKind::PiData => "pi-data",
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Schedule | NodeKind::Webhook | NodeKind::Manual => NodeCategory::Trigger,
            NodeKind::Noop | NodeKind::Rename | NodeKind::PiPayment | NodeKind::PiData => {
                NodeCategory::Utility
            }
            _ => NodeCategory::Action,
        }
    }

    /// Default title shown in the node header
    pub fn title(&self) -> &'static str {
        match self {
            NodeKind::Schedule => "Schedule Trigger",
            NodeKind::Webhook => "Webhook Trigger",
            NodeKind::Manual => "Manual Trigger",
            NodeKind::Slack => "Slack",
            NodeKind::Email => "Email",
            NodeKind::Http => "HTTP Request",
            NodeKind::PiAuth => "Pi Authentication",
            NodeKind::Code => "Code",
            NodeKind::Set => "Set",
            NodeKind::Date => "Date & Time",
            NodeKind::If => "IF",
            NodeKind::Switch => "Switch",
            NodeKind::Wait => "Wait",
            NodeKind::Csv => "CSV",
            NodeKind::Json => "JSON",
            NodeKind::Noop => "No Operation",
            NodeKind::Rename => "Rename",
            NodeKind::PiPayment => "Pi Payment",
            NodeKind::PiData => "Pi Blockchain Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NodeKind::Schedule => "Activates the workflow at a specific time interval",
            NodeKind::Webhook => "Listens for incoming HTTP requests to trigger workflows",
            NodeKind::Manual => "Allows manual execution of the workflow",
            NodeKind::Slack => "Integration with Slack",
            NodeKind::Email => "Integration with Email",
            NodeKind::Http => "Integration with HTTP Request",
            NodeKind::PiAuth => "Integration with Pi Authentication",
            NodeKind::Code => "Execute custom JavaScript or Python code",
            NodeKind::Set => "Set values in JSON data",
            NodeKind::Date => "Format and manipulate dates",
            NodeKind::If => "Conditional branching based on data",
            NodeKind::Switch => "Multiple conditional branching",
            NodeKind::Wait => "Pause workflow execution",
            NodeKind::Csv => "Parse and generate CSV data",
            NodeKind::Json => "Parse and generate JSON data",
            NodeKind::Noop => "Placeholder node that does nothing",
            NodeKind::Rename => "Rename fields in data",
            NodeKind::PiPayment => "Create Pi Network payments",
            NodeKind::PiData => "Read/write to Pi Blockchain",
        }
    }

    /// Settings a freshly dropped node starts with: every key its activation reads
    pub fn default_config(&self) -> Map<String, Value> {
        let settings: Vec<(&str, Value)> = match self {
            NodeKind::Schedule => vec![("frequency", "minutes".into()), ("interval", 1.into())],
            NodeKind::Webhook => vec![("method", "GET".into()), ("path", "".into())],
            NodeKind::Manual | NodeKind::Noop => vec![],
            NodeKind::Slack => vec![
                ("channel", "#general".into()),
                ("message", "Default message from Pi No-Code Builder".into()),
            ],
            NodeKind::Email => vec![
                ("to", "recipient@example.com".into()),
                ("subject", "Message from Pi No-Code Builder".into()),
            ],
            NodeKind::Http => vec![
                ("url", "https://api.example.com/data".into()),
                ("method", "GET".into()),
            ],
            NodeKind::PiAuth => vec![("scopes", "username".into())],
            NodeKind::Code => vec![("language", "javascript".into())],
            NodeKind::Set => vec![
                ("property_name", "new_field".into()),
                ("value", "default_value".into()),
            ],
            NodeKind::Date => vec![("format", "YYYY-MM-DD HH:mm:ss".into())],
            NodeKind::If => vec![("condition", "true".into())],
            NodeKind::Switch => vec![("value", "default".into())],
            NodeKind::Wait => vec![("duration", 1.into()), ("unit", "seconds".into())],
            NodeKind::Csv => vec![("operation", "toJson".into())],
            NodeKind::Json => vec![("operation", "parse".into())],
            NodeKind::Rename => vec![
                ("from_field", "old_field".into()),
                ("to_field", "new_field".into()),
            ],
            NodeKind::PiPayment => vec![
                ("amount", 1.into()),
                ("memo", "Payment from Pi No-Code Builder".into()),
            ],
            NodeKind::PiData => vec![("operation", "read".into()), ("key", "data_key".into())],
        };

        settings
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when a wire name matches no [`NodeKind`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type: {0}")]
pub struct UnknownNodeKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::catalog()
            .iter()
            .copied()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}

/// A single workflow step placed on the canvas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    pub category: NodeCategory,

    pub title: String,

    /// Top-left corner in canvas space
    pub position: Point,

    #[serde(default)]
    pub config: Map<String, Value>,
}

impl Node {
    /// Create a node with the kind's default category and title
    pub fn new(id: NodeId, kind: NodeKind, position: Point) -> Self {
        Self::with_details(id, kind, kind.category(), kind.title(), position)
    }

    pub fn with_details(
        id: NodeId,
        kind: NodeKind,
        category: NodeCategory,
        title: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            id,
            kind,
            category,
            title: title.into(),
            position,
            config: kind.default_config(),
        }
    }

    pub fn is_trigger(&self) -> bool {
        self.category == NodeCategory::Trigger
    }

    /// String setting, falling back to `default` when unset or not a string
    pub fn setting_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.config
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Numeric setting; numeric strings are accepted as well
    pub fn setting_f64(&self, key: &str, default: f64) -> Option<f64> {
        match self.config.get(key) {
            None | Some(Value::Null) => Some(default),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        }
    }
}
