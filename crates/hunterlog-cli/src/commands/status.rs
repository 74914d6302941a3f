use hunterlog_core::GrowthEngine;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let engine = GrowthEngine::open()?;
    let report = engine.profile_report();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
