//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness and database ping
//! - [`auth`] - staff login
//! - [`stores`], [`tables`], [`categories`], [`menu_items`] - setup and menu
//! - [`sessions`], [`orders`], [`order_items`], [`staff_calls`], [`payments`] - dining flow
//! - [`users`] - staff accounts
//! - [`telegram`] - bot webhook
//! - [`miniapp`] - diner-facing page
//!
//! Diner-facing creation endpoints are public; status changes and
//! dashboards sit behind [`require_staff`](crate::auth::require_staff).

pub mod auth;
pub mod categories;
pub mod health;
pub mod menu_items;
pub mod miniapp;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod sessions;
pub mod staff_calls;
pub mod stores;
pub mod tables;
pub mod telegram;
pub mod users;

use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};

/// 201 with the created entity as body
pub(crate) fn created<T: serde::Serialize>(body: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(body))
}
