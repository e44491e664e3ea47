use polars::prelude::DataFrame;

use lendflow_model::Entity;
use lendflow_model::columns::checkout;

use super::EntityTransformer;
use crate::cleaning::parse_lenient_date;
use crate::columns::map_date;
use crate::error::Result;

/// Checkouts are keyed by (book, patron, library); only the dates need
/// cleaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutTransformer;

impl EntityTransformer for CheckoutTransformer {
    fn entity(&self) -> Entity {
        Entity::Checkout
    }

    fn clean(&self, df: &mut DataFrame) -> Result<()> {
        map_date(df, checkout::DATE_CHECKOUT, parse_lenient_date)?;
        map_date(df, checkout::DATE_RETURNED, parse_lenient_date)?;
        Ok(())
    }
}
