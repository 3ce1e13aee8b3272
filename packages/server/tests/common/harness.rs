//! Test harness with testcontainers for PostgreSQL store tests.
//!
//! Uses one shared container across all tests. The container and migrations
//! are initialized on first use, then reused.

use anyhow::{Context, Result};
use mindful_core::kernel::PostgresStore;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --ignored --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;
        PostgresStore::from_pool(pool).migrate().await?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context holding a store on the shared database.
///
/// Tests share one database, so each test should use its own session ids and
/// channel names.
///
/// ```ignore
/// #[test_context(PgHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &PgHarness) {
///     ctx.store.ping().await.unwrap();
/// }
/// ```
pub struct PgHarness {
    pub store: PostgresStore,
}

impl AsyncTestContext for PgHarness {
    async fn setup() -> Self {
        let infra = SharedTestInfra::get().await;
        let store = PostgresStore::connect(&infra.db_url, None, 5)
            .await
            .expect("Failed to connect test store");
        Self { store }
    }

    async fn teardown(self) {
        self.store.close().await;
    }
}

/// A name unique to this test run, for sessions and channels.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::now_v7().simple())
}
