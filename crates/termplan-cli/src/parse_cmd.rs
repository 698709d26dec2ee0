//! `termplan parse` command: show how a requisite string is understood.

use anyhow::Result;

use termplan_core::requisite::ParseResult;
use termplan_core::parse_requisites;

/// Run the parse command.
pub fn run_parse(text: &str, json: bool) -> Result<()> {
    let result = parse_requisites(Some(text));
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_parse(&result));
    }
    Ok(())
}

fn render_parse(result: &ParseResult) -> String {
    if result.predicates.is_empty() {
        return "No requirements found.\n".to_string();
    }

    let mut out = format!(
        "{:<6} {:<14} {}\n{}\n",
        "GROUP",
        "KIND",
        "REQUIREMENT",
        "-".repeat(60)
    );
    for predicate in &result.predicates {
        out.push_str(&format!(
            "{:<6} {:<14} {}\n",
            predicate.group_id(),
            predicate.kind(),
            predicate.describe()
        ));
    }
    out
}
