use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "user")]
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct ColorVariant {
    pub color: String,
    pub images: Vec<String>,
    pub quantity: u64,
}

#[derive(ToSchema)]
pub struct ProductInput {
    pub title: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub rating_count: Option<u64>,
    pub avg_rate: Option<f64>,
    pub main_img_src: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    pub is_featured: Option<bool>,
    pub is_flash: Option<bool>,
    pub colors: Vec<ColorVariant>,
}

/// Same shape as [`ProductInput`] with every field optional; unknown keys are
/// dropped by the typed patch.
#[derive(ToSchema)]
pub struct ProductPatchInput {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub discount_price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub colors: Option<Vec<ColorVariant>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::auth::register,
        crate::routes::auth::login,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            ColorVariant,
            ProductInput,
            ProductPatchInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
