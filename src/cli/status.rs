use crate::categorize::CategoryRules;
use crate::error::Result;
use crate::settings::{categories_path, config_dir, load_settings, log_path};

pub fn run() -> Result<()> {
    let settings = load_settings();

    println!("Config dir:   {}", config_dir().display());
    println!("Export dir:   {}", settings.export_dir);
    println!("Log file:     {}", log_path().display());
    println!();
    println!("Merchant col: {}", settings.merchant_column);
    println!("Amount col:   {}", settings.amount_column);
    println!("Date markers: {}", settings.date_markers.join(", "));
    println!("Skip values:  {}", settings.skip_merchants.join(", "));

    let rules = CategoryRules::load(&categories_path())?;
    let labels: Vec<&str> = rules.rules().iter().map(|r| r.label.as_str()).collect();
    println!();
    println!("Categories:   {} ({})", labels.len(), labels.join(", "));

    let stored = crate::recent::load();
    let usable = crate::recent::usable();
    println!("Recent files: {} stored, {} usable", stored.len(), usable.len());

    Ok(())
}
