//! A throwaway SQLite database carrying the minimal CRM schema.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

const SCHEMA: [&str; 4] = [
    "CREATE TABLE crm_stage (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
    "CREATE TABLE res_users (id INTEGER PRIMARY KEY, login TEXT NOT NULL)",
    "CREATE TABLE crm_lead (
        id INTEGER PRIMARY KEY,
        name TEXT,
        user_id INTEGER REFERENCES res_users (id),
        stage_id INTEGER REFERENCES crm_stage (id)
    )",
    "CREATE TABLE sale_order (
        id INTEGER PRIMARY KEY,
        opportunity_id INTEGER REFERENCES crm_lead (id),
        state TEXT NOT NULL,
        amount_total REAL NOT NULL DEFAULT 0,
        date_order TEXT
    )",
];

/// A seeded CRM database.
///
/// In-memory fixtures use a shared-cache URL and stay alive as long as the
/// fixture does, since the fixture holds its own connection open.
pub struct CrmFixture {
    url: String,
    conn: SqliteConnection,
}

impl CrmFixture {
    /// A fresh shared-cache in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let url = format!(
            "file:crm_fixture_{}_{id}?mode=memory&cache=shared",
            std::process::id()
        );
        Self::open(url)
    }

    /// A database file at `path`, created with the schema.
    #[must_use]
    pub fn file(path: &Path) -> Self {
        Self::open(path.display().to_string())
    }

    fn open(url: String) -> Self {
        let mut conn =
            SqliteConnection::establish(&url).expect("fixture database should open");
        for statement in SCHEMA {
            diesel::sql_query(statement)
                .execute(&mut conn)
                .expect("fixture schema should apply");
        }
        Self { url, conn }
    }

    /// URL that reaches this database from a new connection.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn stage(&mut self, id: i64, name: &str) -> &mut Self {
        diesel::sql_query("INSERT INTO crm_stage (id, name) VALUES (?, ?)")
            .bind::<BigInt, _>(id)
            .bind::<Text, _>(name)
            .execute(&mut self.conn)
            .expect("stage insert");
        self
    }

    pub fn user(&mut self, id: i64, login: &str) -> &mut Self {
        diesel::sql_query("INSERT INTO res_users (id, login) VALUES (?, ?)")
            .bind::<BigInt, _>(id)
            .bind::<Text, _>(login)
            .execute(&mut self.conn)
            .expect("user insert");
        self
    }

    pub fn lead(
        &mut self,
        id: i64,
        name: Option<&str>,
        user_id: Option<i64>,
        stage_id: Option<i64>,
    ) -> &mut Self {
        diesel::sql_query("INSERT INTO crm_lead (id, name, user_id, stage_id) VALUES (?, ?, ?, ?)")
            .bind::<BigInt, _>(id)
            .bind::<Nullable<Text>, _>(name)
            .bind::<Nullable<BigInt>, _>(user_id)
            .bind::<Nullable<BigInt>, _>(stage_id)
            .execute(&mut self.conn)
            .expect("lead insert");
        self
    }

    /// Insert a sale order. `date_order` is `YYYY-MM-DD HH:MM:SS`.
    pub fn order(
        &mut self,
        id: i64,
        opportunity_id: Option<i64>,
        state: &str,
        amount_total: f64,
        date_order: Option<&str>,
    ) -> &mut Self {
        diesel::sql_query(
            "INSERT INTO sale_order (id, opportunity_id, state, amount_total, date_order) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind::<BigInt, _>(id)
        .bind::<Nullable<BigInt>, _>(opportunity_id)
        .bind::<Text, _>(state)
        .bind::<Double, _>(amount_total)
        .bind::<Nullable<Text>, _>(date_order)
        .execute(&mut self.conn)
        .expect("order insert");
        self
    }

    /// A small pipeline: five leads, two won, three confirmed orders on two
    /// leads plus one draft order and one order with no lead.
    pub fn seed_sample(&mut self) -> &mut Self {
        self.stage(1, "New")
            .stage(2, "Qualified")
            .stage(3, "Won")
            .user(1, "alice")
            .user(2, "bob")
            .lead(1, Some("Acme"), Some(1), Some(3))
            .lead(2, Some("Globex"), Some(2), Some(3))
            .lead(3, Some("Initech"), Some(1), Some(2))
            .lead(4, Some("Umbrella"), None, Some(1))
            .lead(5, None, Some(2), None)
            .order(1, Some(1), "sale", 100.0, Some("2024-01-15 09:30:00"))
            .order(2, Some(1), "sale", 50.0, Some("2024-02-03 14:00:00"))
            .order(3, Some(2), "sale", 200.0, Some("2024-02-20 11:15:00"))
            .order(4, Some(3), "draft", 75.0, Some("2024-03-01 08:00:00"))
            .order(5, None, "sale", 30.0, Some("2024-03-05 16:45:00"))
    }
}
