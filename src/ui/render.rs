use chrono::Local;
use serde_json::Value;

use crate::models::{HealthStatus, HistoryItem, Message, ProfileData, Role, ToolCall};
use crate::ui::tool_calls::presentation;

pub const SUGGESTED_PROMPTS: &[&str] = &[
    "Should I pay off debt or save more right now?",
    "How does current inflation affect my savings?",
    "Is now a good time to buy a house?",
    "What do today's interest rates mean for me?",
];

pub const LOADING_INDICATOR: &str = "Advisor is thinking...";

pub fn render_message(message: &Message) -> String {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => "Advisor",
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M");

    format!("[{}] {}: {}", time, who, message.content)
}

/// The transparency list for the latest reply, or `None` when no data
/// sources were consulted.
pub fn render_tool_calls(tool_calls: &[ToolCall]) -> Option<String> {
    if tool_calls.is_empty() {
        return None;
    }

    let mut out = String::from("Data sources used:");
    for call in tool_calls {
        let shown = presentation(&call.name);
        out.push_str(&format!("\n  {} {}", shown.icon, shown.label));
        if let Some(args) = render_arguments(&call.arguments) {
            out.push_str(&format!(" {}", args));
        }
    }
    Some(out)
}

/// Arguments are display-only: strings are shown as sent, empty values are skipped.
fn render_arguments(arguments: &Value) -> Option<String> {
    match arguments {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn render_suggested_prompts() -> String {
    let mut out = String::from("Try one of these (type its number):");
    for (idx, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", idx + 1, prompt));
    }
    out
}

/// Resolve a typed number to a suggested prompt.
pub fn pick_suggested_prompt(input: &str) -> Option<&'static str> {
    let idx: usize = input.trim().parse().ok()?;
    idx.checked_sub(1).and_then(|i| SUGGESTED_PROMPTS.get(i).copied())
}

pub fn render_history(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return "No earlier conversation stored for you yet.".to_string();
    }

    items
        .iter()
        .map(|item| match &item.timestamp {
            Some(ts) => format!("[{}] {}: {}", ts, item.role, item.content),
            None => format!("{}: {}", item.role, item.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_profile(profile: &ProfileData) -> String {
    fn or_blank(value: &str) -> &str {
        if value.is_empty() {
            "(not set)"
        } else {
            value
        }
    }

    let mut out = format!(
        "Income range:    {}\nDebt level:      {}\nSavings runway:  {}\nRisk tolerance:  {}\nFinancial goals: {}",
        or_blank(&profile.income_range),
        or_blank(&profile.debt_level),
        or_blank(&profile.savings),
        profile.risk_tolerance,
        or_blank(&profile.financial_goals),
    );
    if let Some(preferences) = &profile.preferences {
        out.push_str(&format!("\nPreferences:     {}", preferences));
    }
    out
}

pub fn render_health(health: &HealthStatus) -> String {
    format!("{} v{}: {}", health.service, health.version, health.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageIdGenerator;
    use serde_json::json;

    #[test]
    fn test_render_message_labels_roles() {
        let ids = MessageIdGenerator::new();
        let user = render_message(&ids.message(Role::User, "hi"));
        let advisor = render_message(&ids.message(Role::Assistant, "hello"));

        assert!(user.ends_with("You: hi"));
        assert!(advisor.ends_with("Advisor: hello"));
    }

    #[test]
    fn test_tool_calls_render_known_and_unknown() {
        let mut exchange = ToolCall::new("get_exchange_rate");
        exchange.arguments = json!({"to_currency": "EUR"});
        let calls = vec![exchange, ToolCall::new("mystery_tool")];

        let out = render_tool_calls(&calls).unwrap();
        assert!(out.contains("💱 Exchange rates {\"to_currency\":\"EUR\"}"));
        assert!(out.contains("🔧 mystery_tool"));
    }

    #[test]
    fn test_tool_call_arguments_of_any_shape() {
        let mut encoded = ToolCall::new("get_inflation_rate");
        encoded.arguments = json!("{\"months\": 12}");
        let mut null = ToolCall::new("get_financial_news");
        null.arguments = Value::Null;

        let out = render_tool_calls(&[encoded, null, ToolCall::new("get_fred_data")]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "  📈 Inflation rate {\"months\": 12}");
        assert_eq!(lines[2], "  📰 Financial news");
        assert_eq!(lines[3], "  📊 Federal Reserve economic data");
    }

    #[test]
    fn test_no_tool_calls_renders_nothing() {
        assert!(render_tool_calls(&[]).is_none());
    }

    #[test]
    fn test_pick_suggested_prompt_bounds() {
        assert_eq!(pick_suggested_prompt("1"), Some(SUGGESTED_PROMPTS[0]));
        assert_eq!(pick_suggested_prompt(" 4 "), Some(SUGGESTED_PROMPTS[3]));
        assert_eq!(pick_suggested_prompt("0"), None);
        assert_eq!(pick_suggested_prompt("5"), None);
        assert_eq!(pick_suggested_prompt("one"), None);
    }

    #[test]
    fn test_render_profile_marks_unset_fields() {
        let out = render_profile(&ProfileData::default());
        assert!(out.contains("Income range:    (not set)"));
        assert!(out.contains("Risk tolerance:  Moderate"));
        assert!(!out.contains("Preferences"));
    }

    #[test]
    fn test_render_history_empty_and_with_items() {
        assert!(render_history(&[]).contains("No earlier conversation"));

        let items = vec![HistoryItem {
            role: "assistant".to_string(),
            content: "Rates are up.".to_string(),
            timestamp: Some("2024-05-01T10:00:00".to_string()),
        }];
        assert_eq!(render_history(&items), "[2024-05-01T10:00:00] assistant: Rates are up.");
    }
}
