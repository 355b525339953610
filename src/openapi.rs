//! Generated OpenAPI document, used when no static `openapi.json` is deployed.

use crate::model::{Category, CategoryInput, Product, ProductInput};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "POS API",
        description = "CRUD endpoints for point-of-sale products and categories"
    ),
    components(schemas(Product, ProductInput, Category, CategoryInput))
)]
pub struct ApiDoc;

pub fn generated_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_json()
}
