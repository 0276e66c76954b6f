use crate::{Node, NodeKind};

/// Result of activating one node during a simulated run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Succeeded(String),
    Failed(String),
}

impl Activation {
    pub fn is_success(&self) -> bool {
        matches!(self, Activation::Succeeded(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Activation::Succeeded(m) | Activation::Failed(m) => m,
        }
    }
}

/// Decides what "running" a node means
pub trait NodeActivator {
    fn activate(&mut self, node: &Node) -> Activation;
}

/// Produces the canned messages of the hosted builder; nothing external is touched
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedActivator;

impl NodeActivator for SimulatedActivator {
    fn activate(&mut self, node: &Node) -> Activation {
        match node.kind {
            NodeKind::Schedule | NodeKind::Webhook | NodeKind::Manual => {
                Activation::Succeeded(format!("{} triggered", node.title))
            }
            NodeKind::Slack => {
                let channel = node.setting_str("channel", "#general");
                let message =
                    node.setting_str("message", "Default message from Pi No-Code Builder");
                Activation::Succeeded(format!("Sent to Slack channel {}: {}", channel, message))
            }
            NodeKind::Email => {
                let to = node.setting_str("to", "recipient@example.com");
                let subject = node.setting_str("subject", "Message from Pi No-Code Builder");
                Activation::Succeeded(format!("Email sent to {} with subject: {}", to, subject))
            }
            NodeKind::Http => {
                let url = node.setting_str("url", "https://api.example.com/data");
                let method = node.setting_str("method", "GET");
                Activation::Succeeded(format!("HTTP {} request to {}", method, url))
            }
            NodeKind::PiAuth => {
                let scopes = node.setting_str("scopes", "username");
                Activation::Succeeded(format!("Pi authentication with scopes: {}", scopes))
            }
            NodeKind::Code => {
                let language = node.setting_str("language", "javascript");
                Activation::Succeeded(format!("Executed {} code", language))
            }
            NodeKind::Set => {
                let property = node.setting_str("property_name", "new_field");
                let value = node.setting_str("value", "default_value");
                Activation::Succeeded(format!("Set {} = {}", property, value))
            }
            NodeKind::Date => {
                let format = node.setting_str("format", "YYYY-MM-DD HH:mm:ss");
                Activation::Succeeded(format!(
                    "Formatted {} as {}",
                    chrono::Utc::now().to_rfc3339(),
                    format
                ))
            }
            NodeKind::If => {
                let condition = node.setting_str("condition", "true").to_lowercase();
                let met = condition.contains("true") || condition.contains("yes");
                Activation::Succeeded(format!("Condition met: {}", met))
            }
            NodeKind::Switch => {
                let value = node.setting_str("value", "default");
                Activation::Succeeded(format!("Selected case: {}", value))
            }
            NodeKind::Wait => {
                let unit = node.setting_str("unit", "seconds");
                match node.setting_f64("duration", 1.0) {
                    Some(duration) if duration >= 0.0 => {
                        Activation::Succeeded(format!("Waited for {} {}", duration, unit))
                    }
                    _ => Activation::Failed("Wait duration must be a non-negative number".into()),
                }
            }
            NodeKind::Csv => {
                let operation = node.setting_str("operation", "toJson");
                Activation::Succeeded(format!("CSV {} operation", operation))
            }
            NodeKind::Json => {
                let operation = node.setting_str("operation", "parse");
                Activation::Succeeded(format!("JSON {} operation", operation))
            }
            NodeKind::Noop => Activation::Succeeded("No operation".to_string()),
            NodeKind::Rename => {
                let from = node.setting_str("from_field", "old_field");
                let to = node.setting_str("to_field", "new_field");
                Activation::Succeeded(format!("Renamed {} to {}", from, to))
            }
            NodeKind::PiPayment => {
                let memo = node.setting_str("memo", "Payment from Pi No-Code Builder");
                match node.setting_f64("amount", 1.0) {
                    Some(amount) if amount > 0.0 => Activation::Succeeded(format!(
                        "Pi payment of {} π with memo: {}",
                        amount, memo
                    )),
                    _ => Activation::Failed("Pi payment amount must be positive".into()),
                }
            }
            NodeKind::PiData => {
                let operation = node.setting_str("operation", "read");
                let key = node.setting_str("key", "data_key");
                Activation::Succeeded(format!(
                    "Pi blockchain {} operation for key: {}",
                    operation, key
                ))
            }
        }
    }
}
