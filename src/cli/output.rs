use anyhow::Result;
use fltr::tui::FilterOutcome;
use serde_json::json;

/// Print a plain-text representation of the chosen filters.
pub(crate) fn print_plain(outcome: &FilterOutcome) {
    print!("{}", format_plain(outcome));
}

fn format_plain(outcome: &FilterOutcome) -> String {
    if !outcome.accepted {
        return "Selection cancelled\n".to_string();
    }

    let mut out = String::new();
    if outcome.selections.is_empty() {
        out.push_str("No filters selected\n");
    }
    for (category, value) in &outcome.selections {
        out.push_str(&format!("{category}: {value}\n"));
    }
    out
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &FilterOutcome) -> Result<String> {
    let selections: Vec<_> = outcome
        .selections
        .iter()
        .map(|(category, value)| json!({ "category": category, "value": value }))
        .collect();

    let payload = json!({
        "accepted": outcome.accepted,
        "filters": outcome.filters,
        "parameters": outcome.parameters,
        "selections": selections,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &FilterOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
