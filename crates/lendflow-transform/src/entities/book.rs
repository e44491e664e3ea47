use polars::prelude::DataFrame;

use lendflow_model::Entity;
use lendflow_model::columns::book;

use super::EntityTransformer;
use crate::cleaning::{
    first_quoted_token, parse_price, parse_whole_number, parse_year, title_case_words,
};
use crate::columns::{map_float, map_int, map_singleton_list, map_text};
use crate::error::Result;

/// Books: title-cased text, first author and category, numeric price and
/// pages, publication year.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookTransformer;

impl EntityTransformer for BookTransformer {
    fn entity(&self) -> Entity {
        Entity::Book
    }

    fn clean(&self, df: &mut DataFrame) -> Result<()> {
        map_text(df, book::TITLE, |value| Some(title_case_words(value)))?;
        map_text(df, book::PUBLISHER, |value| Some(title_case_words(value)))?;
        map_singleton_list(df, book::AUTHORS, first_quoted_token)?;
        map_singleton_list(df, book::CATEGORIES, first_quoted_token)?;
        map_int(df, book::PUBLISHED_DATE, book::PUBLISHED_YEAR, parse_year)?;
        map_float(df, book::PRICE, parse_price)?;
        map_int(df, book::PAGES, book::PAGES, parse_whole_number)?;
        Ok(())
    }
}
