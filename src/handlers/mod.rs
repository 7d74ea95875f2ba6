//! HTTP handlers

pub mod health;
pub mod scan;
pub mod reports;

use axum::extract::FromRequest;

use crate::AppError;

/// `Json` extractor whose rejections use the app's error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Unknown routes
pub async fn fallback() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
