//! `civiclens ask` — run one query through the full pipeline and print the
//! structured sections.

use civiclens_config::AppConfig;
use civiclens_core::{DetailLevel, Query};
use civiclens_gateway::build_state;

pub async fn run(
    question: String,
    detail_level: DetailLevel,
    topic: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    if !config.has_api_key() {
        eprintln!("No API key configured. Run `civiclens onboard` and set CIVICLENS_API_KEY.");
        std::process::exit(1);
    }

    let state = build_state(&config);
    let query = Query {
        text: question,
        detail_level,
        topic_category: topic,
    };

    let answer = state.orchestrator.handle(&query).await?;

    print_section("Summary", &answer.summary);
    print_section("Impact", &answer.impact);
    print_section("Historical context", &answer.historical_context);
    print_section("Constitutional references", &answer.constitutional_references);

    Ok(())
}

fn print_section(title: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    println!("== {title} ==");
    println!("{body}");
    println!();
}
