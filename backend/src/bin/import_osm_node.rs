//! Import one OpenStreetMap node as a campus point of sale.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use campus_coffee::config::ImportSettings;
use campus_coffee::domain::ports::PosRepository;
use campus_coffee::domain::{OsmNodeId, PosCommandService};
use campus_coffee::inbound::cli::{import_and_render, parse_node_id};
use campus_coffee::outbound::memory::InMemoryPosRepository;
use campus_coffee::outbound::osm_api::OsmApiHttpSource;
use campus_coffee::outbound::persistence::{DbPool, DieselPosRepository, PoolConfig};
use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `import-osm-node` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-osm-node",
    about = "Fetch an OSM node, convert it into a campus POS, and store it",
    version
)]
struct CliArgs {
    /// OpenStreetMap node identifier.
    #[arg(value_name = "NODE_ID", value_parser = parse_node_id)]
    node_id: OsmNodeId,
    /// Database connection URL. Falls back to configuration, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", conflicts_with = "in_memory")]
    database_url: Option<String>,
    /// Store into a throwaway in-memory repository instead of PostgreSQL.
    #[arg(long = "in-memory")]
    in_memory: bool,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ImportSettings::load_from_iter([OsString::from("import-osm-node")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;

    let base_url = settings
        .osm_api_base_url()
        .map_err(|error| io::Error::other(format!("invalid OSM API base URL: {error}")))?;
    let source = OsmApiHttpSource::with_user_agent(
        base_url,
        settings.request_timeout(),
        settings.user_agent(),
    )
    .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;

    let rendered = if args.in_memory {
        info!("using in-memory POS storage");
        let repository = InMemoryPosRepository::new(Arc::new(DefaultClock));
        import_with(source, repository, args.node_id).await?
    } else {
        let database_url = resolve_database_url(
            args.database_url,
            settings.database_url(),
            env::var("DATABASE_URL").ok(),
        )?;
        let pool = DbPool::new(
            PoolConfig::new(database_url)
                .with_max_size(settings.pool_max_size())
                .with_connection_timeout(settings.pool_connection_timeout()),
        )
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
        let repository = DieselPosRepository::new(pool, Arc::new(DefaultClock));
        import_with(source, repository, args.node_id).await?
    };

    println!("{rendered}");
    Ok(())
}

async fn import_with<R>(
    source: OsmApiHttpSource,
    repository: R,
    node_id: OsmNodeId,
) -> io::Result<String>
where
    R: PosRepository,
{
    let service = PosCommandService::new(Arc::new(source), Arc::new(repository));
    import_and_render(&service, node_id)
        .await
        .map_err(io::Error::other)
}

/// Pick the database URL: explicit flag, then settings, then `DATABASE_URL`.
fn resolve_database_url(
    explicit: Option<String>,
    configured: Option<&str>,
    from_env: Option<String>,
) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    if let Some(value) = configured {
        return Ok(value.to_owned());
    }

    match from_env {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        )),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url, CAMPUS_COFFEE_DATABASE_URL, or DATABASE_URL",
        )),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use clap::Parser;
    use rstest::rstest;

    use super::{CliArgs, resolve_database_url};

    #[rstest]
    fn parses_node_id_and_flags() {
        let args = CliArgs::try_parse_from(["import-osm-node", "5589879349", "--in-memory"])
            .expect("arguments should parse");
        assert_eq!(args.node_id.get(), 5_589_879_349);
        assert!(args.in_memory);
        assert!(args.database_url.is_none());
    }

    #[rstest]
    fn rejects_database_url_with_in_memory() {
        let result = CliArgs::try_parse_from([
            "import-osm-node",
            "1",
            "--in-memory",
            "--database-url",
            "postgres://localhost/campus_coffee",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn rejects_non_positive_node_id() {
        assert!(CliArgs::try_parse_from(["import-osm-node", "0"]).is_err());
    }

    #[rstest]
    #[case::explicit_wins(Some("postgres://flag"), Some("postgres://settings"), Some("postgres://env"), "postgres://flag")]
    #[case::settings_before_env(None, Some("postgres://settings"), Some("postgres://env"), "postgres://settings")]
    #[case::env_last(None, None, Some("postgres://env"), "postgres://env")]
    fn resolve_database_url_follows_precedence(
        #[case] explicit: Option<&str>,
        #[case] configured: Option<&str>,
        #[case] from_env: Option<&str>,
        #[case] expected: &str,
    ) {
        let resolved = resolve_database_url(
            explicit.map(str::to_owned),
            configured,
            from_env.map(str::to_owned),
        )
        .expect("a URL is available");
        assert_eq!(resolved, expected);
    }

    #[rstest]
    #[case::empty_explicit(Some("   "), None)]
    #[case::empty_env(None, Some(""))]
    #[case::nothing(None, None)]
    fn resolve_database_url_rejects_missing_values(
        #[case] explicit: Option<&str>,
        #[case] from_env: Option<&str>,
    ) {
        let error = resolve_database_url(explicit.map(str::to_owned), None, from_env.map(str::to_owned))
            .expect_err("no usable URL");
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidInput);
    }
}
