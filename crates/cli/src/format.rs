//! Human-readable and JSON rendering of command results.

use serde_json::json;
use torreblanca_core::events::Event;
use torreblanca_core::record::Record;

pub fn print_records(records: &[Record], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    for record in records {
        println!("{}", record_line(record));
    }
    Ok(())
}

pub fn print_record(record: Option<&Record>, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }
    match record {
        Some(record) => print!("{}", record_detail(record)),
        None => println!("No record."),
    }
    Ok(())
}

pub fn print_events(upcoming: &[Event], past: &[Event], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let body = json!({ "upcoming": upcoming, "past": past });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }
    if upcoming.is_empty() && past.is_empty() {
        println!("No events scheduled.");
        return Ok(());
    }
    if !upcoming.is_empty() {
        println!("Upcoming:");
        for event in upcoming {
            println!("  {}", event_line(event));
        }
    }
    if !past.is_empty() {
        println!("Past:");
        for event in past {
            println!("  {}", event_line(event));
        }
    }
    Ok(())
}

fn record_line(record: &Record) -> String {
    let region = record.region.as_deref().unwrap_or("-");
    format!(
        "{:>4}  {}  <{}>  {}  {}/{}",
        record.id, record.name, record.email, record.phone, record.country, region
    )
}

fn record_detail(record: &Record) -> String {
    let mut out = String::new();
    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            out.push_str(&format!("{label:<9}{value}\n"));
        }
    };
    field("id", &record.id.to_string());
    field("name", &record.name);
    field("email", &record.email);
    field("phone", &record.phone);
    field("address", &record.address);
    field("country", &record.country);
    field("region", record.region.as_deref().unwrap_or_default());
    field("schedule", record.schedule.as_deref().unwrap_or_default());
    field("logo", &record.logo_url);
    out
}

fn event_line(event: &Event) -> String {
    let date = event
        .starts_at()
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| event.date.clone());
    format!("{date}  {}", event.title)
}
