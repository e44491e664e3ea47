use polars::prelude::DataFrame;

use lendflow_model::Entity;
use lendflow_model::columns::library;

use super::EntityTransformer;
use crate::cleaning::{clean_postal_code, title_case, title_case_words, upper_case};
use crate::columns::map_text;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryTransformer;

impl EntityTransformer for LibraryTransformer {
    fn entity(&self) -> Entity {
        Entity::Library
    }

    fn clean(&self, df: &mut DataFrame) -> Result<()> {
        map_text(df, library::NAME, |value| Some(title_case_words(value)))?;
        map_text(df, library::STREET_ADDRESS, |value| Some(title_case_words(value)))?;
        map_text(df, library::CITY, |value| Some(title_case(value)))?;
        map_text(df, library::REGION, |value| Some(upper_case(value)))?;
        map_text(df, library::POSTAL_CODE, |value| Some(clean_postal_code(value)))?;
        Ok(())
    }
}
