pub mod config;
pub mod habit;
pub mod stats;
pub mod status;

use hunterlog_core::GrowthEngine;
use uuid::Uuid;

/// Resolve a habit by id or (unambiguous) name.
pub fn resolve_habit(
    engine: &GrowthEngine,
    needle: &str,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    if let Ok(id) = Uuid::parse_str(needle) {
        if engine.habit(id).is_some() {
            return Ok(id);
        }
    }

    let matches: Vec<Uuid> = engine
        .habits()
        .into_iter()
        .filter(|h| h.name.eq_ignore_ascii_case(needle))
        .map(|h| h.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("no habit matches '{needle}'").into()),
        _ => Err(format!("'{needle}' matches more than one habit; use the id").into()),
    }
}
