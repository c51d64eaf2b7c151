use utoipa::OpenApi;

use super::api::{ErrorResponse, PassesResponse};

#[derive(OpenApi)]
#[openapi(
    paths(super::api::list_passes),
    components(
        schemas(
            PassesResponse,
            ErrorResponse,
            crate::visibility::VisibilityWindow,
        )
    ),
    info(
        title = "Passwatch API",
        description = "Satellite visibility pass predictions",
        version = "0.1.0"
    ),
    tags(
        (name = "passes", description = "Visibility pass prediction")
    )
)]
pub struct ApiDoc;
