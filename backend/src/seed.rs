//! Demo programs inserted into an empty store when running with `--dev-mode`.

use chrono::{Duration, NaiveDateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::info;

use crate::db::StoreError;
use crate::models::{LmpUse, NewInvocation, NewLmp};
use crate::schema::{invocations, lmp_uses, lmps};

/// (lmp_id, name, minutes before now, source)
const DEMO_LMPS: &[(&str, &str, i64, &str)] = &[
    (
        "4f1c2a9be07d4c3e",
        "extract_keywords",
        3 * 24 * 60,
        "@ell.simple(model=\"gpt-4o-mini\")\ndef extract_keywords(text: str):\n    \"\"\"You pull the five most important keywords out of a passage.\"\"\"\n    return f\"Keywords for: {text}\"",
    ),
    (
        "9a7e51d03c6b28f4",
        "summarize_article",
        2 * 24 * 60,
        "@ell.simple(model=\"gpt-4o-mini\")\ndef summarize_article(article: str):\n    \"\"\"You summarize articles.\"\"\"\n    return f\"Summarize: {article}\"",
    ),
    (
        "b3d0e6f7a1c94e52",
        "summarize_article",
        90,
        "@ell.simple(model=\"gpt-4o\", temperature=0.2)\ndef summarize_article(article: str):\n    \"\"\"You summarize articles in three sentences, neutral tone.\"\"\"\n    return f\"Summarize in three sentences: {article}\"",
    ),
    (
        "e85b2c7d9f0a13b6",
        "write_headline",
        45,
        "@ell.simple(model=\"gpt-4o\")\ndef write_headline(article: str):\n    \"\"\"You write punchy headlines.\"\"\"\n    summary = summarize_article(article)\n    keywords = extract_keywords(article)\n    return f\"Headline from {summary} using {keywords}\"",
    ),
];

/// (using lmp_id, used lmp_id)
const DEMO_USES: &[(&str, &str)] = &[
    ("e85b2c7d9f0a13b6", "b3d0e6f7a1c94e52"),
    ("e85b2c7d9f0a13b6", "4f1c2a9be07d4c3e"),
];

/// (invocation id, lmp_id, used_by invocation id)
const DEMO_INVOCATIONS: &[(&str, &str, Option<&str>)] = &[
    ("inv-0001", "9a7e51d03c6b28f4", None),
    ("inv-0002", "9a7e51d03c6b28f4", None),
    ("inv-0003", "9a7e51d03c6b28f4", None),
    ("inv-0010", "e85b2c7d9f0a13b6", None),
    ("inv-0011", "b3d0e6f7a1c94e52", Some("inv-0010")),
    ("inv-0012", "4f1c2a9be07d4c3e", Some("inv-0010")),
    ("inv-0020", "e85b2c7d9f0a13b6", None),
    ("inv-0021", "b3d0e6f7a1c94e52", Some("inv-0020")),
    ("inv-0022", "4f1c2a9be07d4c3e", Some("inv-0020")),
    ("inv-0030", "b3d0e6f7a1c94e52", None),
];

fn minutes_ago(now: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    now - Duration::minutes(minutes)
}

/// Insert the demo programs if the store has none. Returns whether anything was inserted.
pub fn seed_demo_data(conn: &mut PgConnection) -> Result<bool, StoreError> {
    let existing: i64 = lmps::table.count().get_result(conn)?;
    if existing > 0 {
        info!("Store already has {} LMP versions, skipping demo seed", existing);
        return Ok(false);
    }

    let now = Utc::now().naive_utc();

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        let new_lmps: Vec<NewLmp> = DEMO_LMPS
            .iter()
            .map(|(lmp_id, name, minutes, source)| NewLmp {
                lmp_id: lmp_id.to_string(),
                name: name.to_string(),
                source: source.to_string(),
                created_at: minutes_ago(now, *minutes),
            })
            .collect();
        diesel::insert_into(lmps::table)
            .values(&new_lmps)
            .execute(conn)?;

        let new_uses: Vec<LmpUse> = DEMO_USES
            .iter()
            .map(|(using, used)| LmpUse {
                lmp_using_id: using.to_string(),
                lmp_used_id: used.to_string(),
            })
            .collect();
        diesel::insert_into(lmp_uses::table)
            .values(&new_uses)
            .execute(conn)?;

        // Parents must exist before children reference them
        for (offset, (id, lmp_id, used_by)) in DEMO_INVOCATIONS.iter().enumerate() {
            diesel::insert_into(invocations::table)
                .values(NewInvocation {
                    id: id.to_string(),
                    lmp_id: lmp_id.to_string(),
                    latency_ms: 120.0 + offset as f64 * 15.0,
                    created_at: minutes_ago(now, 30 - offset as i64),
                    used_by_id: used_by.map(|s| s.to_string()),
                })
                .execute(conn)?;
        }

        Ok(())
    })?;

    info!(
        "✓ Seeded {} demo LMP versions and {} invocations",
        DEMO_LMPS.len(),
        DEMO_INVOCATIONS.len()
    );
    Ok(true)
}
