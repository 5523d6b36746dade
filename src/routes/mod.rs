pub mod entries;

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejections surface as validation errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
