//! Request Extractors

use axum::extract::FromRequest;
use kernel::error::app_error::AppError;

/// `Json` body whose rejections render as problem details
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
