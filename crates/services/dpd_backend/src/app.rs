// File: services/dpd_backend/src/app.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use dpd_auth::SessionProvider;
use dpd_parcel_status::routes as parcel_status_routes;
use dpd_shipment::routes as shipment_routes;

/// All API routes below `/api`, plus Swagger UI when built with `openapi`.
pub fn build_router(session: Arc<SessionProvider>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the DPD API!" }))
        .merge(parcel_status_routes(session.clone()))
        .merge(shipment_routes(session));

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use dpd_parcel_status::doc::ParcelStatusApiDoc;
        use dpd_shipment::doc::ShipmentApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "DPD API",
                version = "0.1.0",
                description = "DPD parcel status and shipment endpoints",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(ParcelStatusApiDoc::openapi());
        openapi_doc.merge(ShipmentApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    app.layer(TraceLayer::new_for_http())
}
