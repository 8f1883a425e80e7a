//! Command-line adapter for the `import-osm-node` binary.
//!
//! Argument parsing and rendering live here so they can be tested against a
//! mocked [`PosService`]; the binary only wires adapters together.

use crate::domain::ports::PosService;
use crate::domain::{Error, OsmNodeId};

/// Failures surfaced by the command-line adapter.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The import itself failed.
    #[error("import failed: {0}")]
    Import(#[from] Error),
    /// The imported POS could not be serialised.
    #[error("failed to render POS as JSON: {0}")]
    Render(#[from] serde_json::Error),
}

/// Parse a positive OSM node identifier.
///
/// Usable as a clap `value_parser`.
///
/// # Errors
///
/// Returns a message when `raw` is not a positive integer.
///
/// # Examples
/// ```
/// use campus_coffee::inbound::cli::parse_node_id;
///
/// assert_eq!(parse_node_id(" 5589879349 ").map(|id| id.get()), Ok(5_589_879_349));
/// assert!(parse_node_id("-1").is_err());
/// ```
pub fn parse_node_id(raw: &str) -> Result<OsmNodeId, String> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|error| format!("node id must be an integer: {error}"))?;
    if value <= 0 {
        return Err(format!("node id must be positive, got {value}"));
    }
    Ok(OsmNodeId::new(value))
}

/// Import `node_id` through `service` and render the stored POS as pretty
/// JSON.
///
/// # Errors
///
/// Returns [`CliError::Import`] when the service rejects the import and
/// [`CliError::Render`] when serialisation fails.
pub async fn import_and_render<S>(service: &S, node_id: OsmNodeId) -> Result<String, CliError>
where
    S: PosService + ?Sized,
{
    let pos = service.import_from_osm_node(node_id).await?;
    Ok(serde_json::to_string_pretty(&pos)?)
}
