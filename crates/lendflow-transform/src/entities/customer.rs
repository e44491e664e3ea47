use polars::prelude::DataFrame;

use lendflow_model::Entity;
use lendflow_model::columns::customer;

use super::EntityTransformer;
use crate::cleaning::{
    lower_case, parse_lenient_date, parse_zipcode, title_case, title_case_words, upper_case,
};
use crate::columns::{map_date, map_int, map_text};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerTransformer;

impl EntityTransformer for CustomerTransformer {
    fn entity(&self) -> Entity {
        Entity::Customer
    }

    fn clean(&self, df: &mut DataFrame) -> Result<()> {
        for column in [
            customer::NAME,
            customer::STREET_ADDRESS,
            customer::EDUCATION,
            customer::OCCUPATION,
        ] {
            map_text(df, column, |value| Some(title_case_words(value)))?;
        }
        map_text(df, customer::CITY, |value| Some(title_case(value)))?;
        map_text(df, customer::STATE, |value| Some(upper_case(value)))?;
        map_text(df, customer::GENDER, |value| Some(lower_case(value)))?;
        map_int(df, customer::ZIPCODE, customer::ZIPCODE, parse_zipcode)?;
        map_date(df, customer::BIRTH_DATE, parse_lenient_date)?;
        Ok(())
    }
}
