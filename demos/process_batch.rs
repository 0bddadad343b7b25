//! Process a batch of extracted documents for one client
//!
//! Usage: `cargo run --example process_batch [extracted.json] [config.json]`
//!
//! Without arguments a small built-in batch is processed.

use conta_core::export::export_declarations;
use conta_core::utils::MemoryStorage;
use conta_core::{
    logging, ClientProfile, Engine, EngineConfig, ExtractedDocument, ExtractionFailure,
    ExtractionOutcome, SnapshotStorage,
};
use chrono::NaiveDate;

fn sample_batch() -> Vec<ExtractionOutcome> {
    vec![
        ExtractedDocument::purchase(35302.48, 7413.52, 0.0, 42716.0)
            .date("14/02/2025")
            .document_type("FACTURA A")
            .issuer("30712345671")
            .into(),
        ExtractedDocument::purchase(8264.46, 1735.54, 0.0, 10000.0)
            .date("20/02/2025")
            .document_type("FACTURA A")
            .issuer("30712345671")
            .text("Compra de vehículo utilitario, activo de la empresa")
            .into(),
        ExtractedDocument::sale(120000.0, 25200.0, 0.0, 145200.0)
            .date("25/02/2025")
            .document_type("FACTURA B")
            .receiver("20123456786")
            .into(),
        ExtractionFailure {
            path: "uploads/ticket_0042.jpg".to_string(),
            document_type: "ticket".to_string(),
            error: "OCR produced no text".to_string(),
        }
        .into(),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let outcomes: Vec<ExtractionOutcome> = match args.next() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => sample_batch(),
    };
    let config = match args.next() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let client = ClientProfile::new("Taller Norte SRL", "30-71234567-1", "Responsable Inscripto")?;
    let processing_date = NaiveDate::from_ymd_opt(2025, 2, 28).ok_or("invalid date")?;

    let engine = Engine::new(config)?;
    let bundle = engine.process(&outcomes, &client.context(processing_date));

    println!("📒 Postings for {} ({})", client.name, client.tax_id);
    for posting in &bundle.postings {
        println!(
            "  {}  {:<26} {:>12} {:>12}  {}",
            posting.date.format("%d/%m/%Y"),
            posting.account,
            posting.debit,
            posting.credit,
            posting.reference
        );
    }
    println!();

    println!("⚖️  Trial balance:");
    for line in &bundle.trial_balance {
        println!(
            "  {:<26} {:>12} {:>12} {:>12}",
            line.account, line.debit, line.credit, line.balance
        );
    }
    println!(
        "  debits equal credits: {}\n",
        bundle.validations.debits_equal_credits
    );

    println!("🧾 Declaration files:");
    for file in export_declarations(&bundle, processing_date) {
        print!("  {}: {}", file.file_name, file.content);
    }

    if !bundle.extraction_errors.is_empty() {
        println!("\n⚠️  Documents not processed:");
        for failure in &bundle.extraction_errors {
            println!("  {} ({}): {}", failure.path, failure.document_type, failure.error);
        }
    }

    let mut storage = MemoryStorage::new();
    let created_at = processing_date
        .and_hms_opt(18, 0, 0)
        .ok_or("invalid time")?;
    storage
        .save_snapshot(&bundle.to_snapshot(&client.tax_id, created_at)?)
        .await?;
    let saved = storage.list_snapshots(&client.tax_id).await?;
    println!("\n💾 Snapshots stored for client: {}", saved.len());

    Ok(())
}
