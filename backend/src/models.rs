use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize, Clone)]
#[diesel(table_name = crate::schema::lmps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoredLmp {
    pub lmp_id: String,
    pub name: String,
    pub source: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::lmps)]
pub struct NewLmp {
    pub lmp_id: String,
    pub name: String,
    pub source: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::lmp_uses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LmpUse {
    pub lmp_using_id: String,
    pub lmp_used_id: String,
}

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize, Clone)]
#[diesel(table_name = crate::schema::invocations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Invocation {
    pub id: String,
    pub lmp_id: String,
    pub latency_ms: f64,
    pub created_at: NaiveDateTime,
    pub used_by_id: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::invocations)]
pub struct NewInvocation {
    pub id: String,
    pub lmp_id: String,
    pub latency_ms: f64,
    pub created_at: NaiveDateTime,
    pub used_by_id: Option<String>,
}
