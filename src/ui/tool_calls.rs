use std::borrow::Cow;

pub const DEFAULT_TOOL_ICON: &str = "🔧";

/// How one tool call is labelled in the transparency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPresentation<'a> {
    pub label: Cow<'a, str>,
    pub icon: &'static str,
}

/// Map a backend tool name to its display label and icon.
///
/// Names outside the known vocabulary are shown as-is with the generic icon.
pub fn presentation(name: &str) -> ToolPresentation<'_> {
    let known = match name {
        "get_fred_data" => Some(("Federal Reserve economic data", "📊")),
        "get_inflation_rate" => Some(("Inflation rate", "📈")),
        "get_interest_rate" => Some(("Interest rates", "🏦")),
        "get_unemployment_rate" => Some(("Unemployment rate", "👥")),
        "get_financial_news" => Some(("Financial news", "📰")),
        "get_exchange_rate" => Some(("Exchange rates", "💱")),
        "get_purchasing_power" => Some(("Purchasing power", "💰")),
        _ => None,
    };

    match known {
        Some((label, icon)) => ToolPresentation {
            label: Cow::Borrowed(label),
            icon,
        },
        None => ToolPresentation {
            label: Cow::Borrowed(name),
            icon: DEFAULT_TOOL_ICON,
        },
    }
}
