pub mod availability;
pub mod composer;
pub mod engine;
pub mod pipeline;
pub mod recipes;

pub use crate::domain::model::{
    Availability, Cell, Cocktail, CocktailIngredient, MenuDocument, MenuSource, Section, Table,
};
pub use crate::domain::ports::{ConfigProvider, DocumentRenderer, Pipeline, Storage, WorkbookSource};
pub use crate::utils::error::Result;
