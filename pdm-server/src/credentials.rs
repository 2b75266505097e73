//! The static table of users allowed to log in.
//!
//! Loaded once at start and never modified. Passwords are compared as plain
//! strings; this gate is a convenience, not an access-control boundary.

use anyhow::Context;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

#[derive(Debug, Deserialize)]
struct CredentialRow {
    username: String,
    password: String,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    table: HashMap<String, String>,
}

impl Credentials {
    /// Parse a CSV string with a `username,password` header.
    pub fn parse_csv(csv_object: &str) -> anyhow::Result<Credentials> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let mut table = HashMap::new();
        for row in rdr.deserialize() {
            let row: CredentialRow = row.context("malformed credential row")?;
            if row.username.is_empty() {
                continue;
            }
            table.insert(row.username, row.password);
        }
        Ok(Credentials { table })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Credentials> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read credentials from {}", path.display()))?;
        Credentials::parse_csv(&text)
    }

    /// True when the username exists and the password matches.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.table.get(username).is_some_and(|p| p == password)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.table.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
