//! Request extractors whose rejections render as [`AppError`] bodies.
//!
//! Drop-in replacements for axum's `Json`, `Path` and `Query` extractors, so
//! malformed input gets `400 {Message, Error: "BAD_REQUEST"}` instead of
//! axum's plain-text rejection.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
