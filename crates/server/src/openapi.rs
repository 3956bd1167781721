use utoipa::openapi::server::Server;
use utoipa::OpenApi;
use utoipa::ToSchema;
use utoipa_swagger_ui::SwaggerUi;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub products: usize }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: u64,
    #[schema(example = "Smartphone X")]
    pub name: String,
    #[schema(example = "Phones")]
    pub category: String,
    pub description: String,
    #[schema(example = 50000.0)]
    pub price: f64,
    #[schema(example = 10)]
    pub stock: i64,
    #[schema(example = "/images/phone.jpg")]
    pub image: String,
}

/// All fields optional; missing ones default to empty / zero. `id` is ignored.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub image: Option<String>,
}

/// Only the supplied fields are changed. `id` is ignored.
#[derive(ToSchema)]
pub struct ProductPatchDoc {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub image: Option<String>,
}

#[derive(ToSchema)]
pub struct MessageDoc {
    #[schema(example = "product deleted")]
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Product Catalog API", description = "CRUD operations over the in-memory product catalog"),
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            ProductPatchDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;

/// Path the machine-readable document is served from.
pub const OPENAPI_JSON: &str = "/openapi.json";

/// OpenAPI document, advertising `server_url` when known.
pub fn document(server_url: Option<&str>) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if let Some(url) = server_url {
        doc.servers = Some(vec![Server::new(url)]);
    }
    doc
}

/// Swagger UI mounted at `ui_path`, reading the document from [`OPENAPI_JSON`].
pub fn swagger_ui(ui_path: &str, server_url: Option<&str>) -> SwaggerUi {
    SwaggerUi::new(ui_path.to_string()).url(OPENAPI_JSON, document(server_url))
}
