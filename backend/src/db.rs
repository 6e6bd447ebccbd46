use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use shared::{LmpRecord, Trace};
use std::collections::{BTreeSet, HashMap};
use std::env;

use crate::models::{Invocation, LmpUse, StoredLmp};
use crate::schema::{invocations, lmp_uses, lmps};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Embedded database migrations - compiled into the binary
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors from the program store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("Failed to create connection pool: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Failed to run migrations: {0}")]
    Migration(String),
}

pub fn create_pool() -> Result<DbPool, StoreError> {
    let database_url = env::var("DATABASE_URL").map_err(|_| StoreError::MissingDatabaseUrl)?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().build(manager)?;

    Ok(pool)
}

/// Run pending database migrations
/// Returns the list of migrations that were applied
pub fn run_migrations(pool: &DbPool) -> Result<Vec<String>, StoreError> {
    let mut conn = pool.get()?;

    let applied: Vec<String> = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?
        .iter()
        .map(|m| m.to_string())
        .collect();

    Ok(applied)
}

/// Load stored versions as API records, optionally restricted to one program name.
pub fn load_lmp_records(
    conn: &mut PgConnection,
    name: Option<&str>,
) -> Result<Vec<LmpRecord>, StoreError> {
    let mut query = lmps::table
        .select(StoredLmp::as_select())
        .order(lmps::created_at.desc())
        .into_boxed();
    if let Some(name) = name {
        query = query.filter(lmps::name.eq(name.to_string()));
    }

    let stored: Vec<StoredLmp> = query.load(conn)?;

    if stored.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = stored.iter().map(|l| l.lmp_id.clone()).collect();

    let uses: Vec<LmpUse> = lmp_uses::table
        .filter(lmp_uses::lmp_using_id.eq_any(ids.clone()))
        .select(LmpUse::as_select())
        .load(conn)?;

    let counts: Vec<(String, i64)> = invocations::table
        .filter(invocations::lmp_id.eq_any(ids))
        .group_by(invocations::lmp_id)
        .select((invocations::lmp_id, diesel::dsl::count_star()))
        .load(conn)?;

    Ok(build_records(stored, uses, counts.into_iter().collect()))
}

/// Load distinct consumer/consumed pairs derived from invocation links.
pub fn load_traces(conn: &mut PgConnection) -> Result<Vec<Trace>, StoreError> {
    let children: Vec<Invocation> = invocations::table
        .filter(invocations::used_by_id.is_not_null())
        .select(Invocation::as_select())
        .load(conn)?;

    let parent_ids: Vec<String> = children
        .iter()
        .filter_map(|inv| inv.used_by_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }

    let parents: Vec<(String, String)> = invocations::table
        .filter(invocations::id.eq_any(parent_ids))
        .select((invocations::id, invocations::lmp_id))
        .load(conn)?;

    Ok(derive_traces(&children, &parents.into_iter().collect()))
}

/// Join stored versions with their dependencies and invocation counts.
pub fn build_records(
    stored: Vec<StoredLmp>,
    uses: Vec<LmpUse>,
    counts: HashMap<String, i64>,
) -> Vec<LmpRecord> {
    let mut uses_by_lmp: HashMap<String, Vec<String>> = HashMap::new();
    for lmp_use in uses {
        uses_by_lmp
            .entry(lmp_use.lmp_using_id)
            .or_default()
            .push(lmp_use.lmp_used_id);
    }

    stored
        .into_iter()
        .map(|lmp| {
            let mut uses = uses_by_lmp.remove(&lmp.lmp_id).unwrap_or_default();
            uses.sort();
            LmpRecord {
                invocations: counts.get(&lmp.lmp_id).copied().unwrap_or(0),
                created_at: lmp.created_at.and_utc().timestamp(),
                lmp_id: lmp.lmp_id,
                name: lmp.name,
                source: lmp.source,
                uses,
            }
        })
        .collect()
}

/// Turn "invocation X was used by invocation Y" links into version-level traces.
///
/// `parents` maps invocation id to its lmp_id. Links whose parent is unknown
/// are skipped. Output is deduplicated and sorted.
pub fn derive_traces(children: &[Invocation], parents: &HashMap<String, String>) -> Vec<Trace> {
    children
        .iter()
        .filter_map(|child| {
            let parent = child.used_by_id.as_ref()?;
            let consumer = parents.get(parent)?;
            Some((consumer.clone(), child.lmp_id.clone()))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|(consumer, consumed)| Trace { consumer, consumed })
        .collect()
}
