//! `recall memory`: Memory management commands.

use crate::commands::{load_config, open_store};
use recall_core::memory::MemoryValue;

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = open_store(&config, false)?;

    println!("🧠 Memory ({})", config.memory.path.display());
    println!("====================");
    if store.memory().is_empty() {
        println!("  (empty)");
        return Ok(());
    }

    for (key, value) in store.memory().iter() {
        match value {
            MemoryValue::Text(text) => println!("  {key}: {text}"),
            MemoryValue::List(items) => {
                println!("  {key}:");
                for item in items {
                    println!("    - {item}");
                }
            }
            MemoryValue::Analysis(record) => {
                println!("  {key} (at interaction {}):", record.timestamp);
                println!("    analysis:     {}", record.last_analysis);
                println!("    action items: {}", record.action_items);
            }
        }
    }

    Ok(())
}

pub fn export(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = open_store(&config, false)?;
    let json = store.export_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("📤 Exported {} entries to {path}", store.memory().len());
        }
        None => println!("{json}"),
    }

    Ok(())
}

pub fn import(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let mut store = open_store(&config, false)?;

    let json = std::fs::read_to_string(file)?;
    store.import(&json)?;
    println!(
        "📥 Imported {} entries into {}",
        store.memory().len(),
        config.memory.path.display()
    );

    Ok(())
}

pub fn improvements() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = open_store(&config, false)?;

    let improvements = store.memory().improvements();
    if improvements.is_empty() {
        println!("No improvements recorded yet.");
    }
    for (i, improvement) in improvements.iter().enumerate() {
        println!("  {:>2}. {improvement}", i + 1);
    }

    Ok(())
}
