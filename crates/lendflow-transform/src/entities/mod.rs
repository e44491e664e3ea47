//! Per-entity transformers.
//!
//! Every entity runs the same sequence: dedup by primary key, drop the
//! ingestion stamp, apply its cleaning rules, then cast to its schema. The
//! entities differ only in [`EntityTransformer::clean`].

mod book;
mod checkout;
mod customer;
mod library;

pub use book::BookTransformer;
pub use checkout::CheckoutTransformer;
pub use customer::CustomerTransformer;
pub use library::LibraryTransformer;

use polars::prelude::DataFrame;
use tracing::debug;

use lendflow_model::columns::INGESTION_DATE;
use lendflow_model::{Entity, TableSchema};

use crate::dedupe::dedupe_last_by_keys;
use crate::error::Result;
use crate::schema::enforce_schema;

/// Turns a bronze table of one entity into its silver table.
pub trait EntityTransformer {
    fn entity(&self) -> Entity;

    /// Cleans and derives columns in place.
    fn clean(&self, df: &mut DataFrame) -> Result<()>;

    fn schema(&self) -> TableSchema {
        TableSchema::for_entity(self.entity())
    }

    /// Dedups, cleans and casts `df` to [`EntityTransformer::schema`].
    fn transform(&self, df: DataFrame) -> Result<DataFrame> {
        let entity = self.entity();
        let rows_in = df.height();
        let mut df = dedupe_last_by_keys(&df, entity.primary_key())?;
        if df.column(INGESTION_DATE).is_ok() {
            df = df.drop(INGESTION_DATE)?;
        }
        self.clean(&mut df)?;
        let df = enforce_schema(&df, &self.schema())?;
        debug!(%entity, rows_in, rows_out = df.height(), "entity transformed");
        Ok(df)
    }
}

/// Transformer for `entity`.
pub fn transformer_for(entity: Entity) -> Box<dyn EntityTransformer> {
    match entity {
        Entity::Book => Box::new(BookTransformer),
        Entity::Customer => Box::new(CustomerTransformer),
        Entity::Checkout => Box::new(CheckoutTransformer),
        Entity::Library => Box::new(LibraryTransformer),
    }
}
