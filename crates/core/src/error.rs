use thiserror::Error;

use crate::model::CardError;
use crate::model::CatalogError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
