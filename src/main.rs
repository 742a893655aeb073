use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use carewise::engine::{quick_questions, ChatEngine};
use carewise::locator::FacilityLocator;
use carewise::matcher::SymptomMatcher;
use carewise::models::{AnalysisResult, ConversationMessage, Medicine};
use carewise::services::{NominatimClient, OpenFdaClient, TranslateClient};
use carewise::{config, KnowledgeBase};

#[tokio::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let matcher = SymptomMatcher::new(KnowledgeBase::builtin(), OpenFdaClient::public());
    let locator = FacilityLocator::new(NominatimClient::public());
    let mut engine =
        ChatEngine::new(matcher, locator).with_translator(TranslateClient::public());

    if let Some(greeting) = engine.messages().first() {
        println!("{}\n", greeting.text);
    }
    println!("Try one of:");
    for question in quick_questions() {
        println!("  - {}", question.text);
    }
    println!("Type 'reset' to start over, 'quit' to exit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            "quit" | "exit" => break,
            "reset" | "clear" => {
                engine.reset();
                if let Some(greeting) = engine.messages().first() {
                    println!("{}\n", greeting.text);
                }
                continue;
            }
            _ => {}
        }

        let reply = engine.submit(input).await;
        render(reply);
    }

    Ok(())
}

fn render(message: &ConversationMessage) {
    println!("{}", message.text);
    if let Some(result) = &message.result {
        render_result(result);
    }
    println!();
}

fn render_result(result: &AnalysisResult) {
    println!("\nSymptom: {} (confidence {}%)", result.symptom, result.confidence);
    println!("Severity: {}", result.severity);
    println!("Possible causes:");
    for cause in &result.causes {
        println!("  - {cause}");
    }
    println!("Remedies:");
    for remedy in &result.remedies {
        println!("  - {remedy}");
    }
    println!("Suggested medicines:");
    for medicine in &result.medicines {
        match medicine {
            Medicine::Plain(text) => println!("  - {text}"),
            Medicine::Detailed { name, dosage, .. } => match dosage {
                Some(dosage) => println!("  - {name}: {dosage}"),
                None => println!("  - {name}"),
            },
        }
    }
    println!("When to see a doctor: {}", result.when_to_see_doctor);
    if let Some(label) = &result.drug_label {
        if let Some(purpose) = label.purpose.first() {
            println!("Label info ({}): {}", label.openfda.brand_name.join(", "), purpose);
        }
    }
}
