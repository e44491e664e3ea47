//! Source entities of the library-checkout domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::columns::{book, checkout, customer, library};

/// A raw extract processed by the ingestion and transformation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Book,
    Customer,
    Checkout,
    Library,
}

impl Entity {
    /// All entities in processing order.
    pub const ALL: [Entity; 4] = [
        Entity::Book,
        Entity::Customer,
        Entity::Checkout,
        Entity::Library,
    ];

    /// Returns the configuration key (`ingestion.<key>`, `transformation.<key>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Book => "book",
            Entity::Customer => "customer",
            Entity::Checkout => "checkout",
            Entity::Library => "library",
        }
    }

    /// Columns that identify a record after ingestion.
    ///
    /// Checkouts are keyed by the (book, patron, library) triple; every other
    /// entity by its `id`.
    pub fn primary_key(&self) -> &'static [&'static str] {
        match self {
            Entity::Book => &[book::ID],
            Entity::Customer => &[customer::ID],
            Entity::Checkout => &[checkout::ID, checkout::PATRON_ID, checkout::LIBRARY_ID],
            Entity::Library => &[library::ID],
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "book" | "books" => Ok(Entity::Book),
            "customer" | "customers" => Ok(Entity::Customer),
            "checkout" | "checkouts" => Ok(Entity::Checkout),
            "library" | "libraries" => Ok(Entity::Library),
            _ => Err(format!("Unknown entity: {s}")),
        }
    }
}
