use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use fixpay_adapters::http::{
    routes::{
        confirm_email, delete_account, forgot_password, get_account, list_accounts, login, logout,
        register, resend_confirmation, reset_password, restore_account, update_profile,
        upload_avatar,
    },
    ApiEnvelope, AppState,
};
use fixpay_application::MAX_UPLOAD_BYTES;
use fixpay_core::{AccountStore, RevokedTokenStore};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The FixPay account service: every user route nested under `/api/user`,
/// plus the static `/uploads` tree the avatars are served from.
pub struct AccountService {
    router: Router,
}

impl AccountService {
    pub fn new<A, R>(state: AppState<A, R>, uploads_dir: String) -> Self
    where
        A: AccountStore + Clone + 'static,
        R: RevokedTokenStore + Clone + 'static,
    {
        let user_routes = Router::new()
            .route("/register", post(register::<A, R>))
            .route("/login", post(login::<A, R>))
            .route("/logout", post(logout::<A, R>))
            .route("/confirmEmail", post(confirm_email::<A, R>))
            .route("/resend-confirmation-otp", post(resend_confirmation::<A, R>))
            .route("/forgotPassword", post(forgot_password::<A, R>))
            // Reissue goes through the same use case as the initial request.
            .route("/resend-resetpassword-otp", post(forgot_password::<A, R>))
            .route("/resetPassword", post(reset_password::<A, R>))
            .route("/restoreAccount", post(restore_account::<A, R>))
            .route(
                "/upload",
                post(upload_avatar::<A, R>)
                    // The use case enforces the 10 MiB cap; the body limit only
                    // needs headroom for the multipart framing.
                    .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
            )
            .route(
                "/",
                get(list_accounts::<A, R>).delete(delete_account::<A, R>),
            )
            .route(
                "/{id}",
                get(get_account::<A, R>).patch(update_profile::<A, R>),
            )
            .with_state(state);

        let router = Router::new()
            .nest("/api/user", user_routes)
            .nest_service("/uploads", ServeDir::new(uploads_dir))
            .fallback(not_found);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finished router, ready to serve or to nest into a larger app.
    pub fn into_router(self) -> Router {
        let cors = CorsLayer::permissive();
        let mut service = self.with_trace_layer();
        service.router = service.router.layer(cors);
        service.router
    }

    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        ::tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiEnvelope::fail("this resource is not available", None)),
    )
}
