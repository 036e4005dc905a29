//! # Catalog Browser
//!
//! Client side of the catalog: list and detail views over the API.
//!
//! ## Payloads
//!
//! Responses/requests between the browser and the API, all JSON.
//!
//! ### List
//! To backend
//! - `GET /api/items?page=&limit=&q=`
//!
//! From backend
//! - `{ total, page, limit, data }`, `data` holding at most `limit` items
//! - A page past the end comes back empty with the real `total`
//!
//! ### Detail
//! - `GET /api/items/{id}`, `404 { error }` when missing
//!
//! ### Create
//! - `POST /api/items` with `{ name, category, price, img? }`, `201` with the stored item
//!
//!
//!
//! ## Views
//!
//! - Each view owns a [`fetch::Mount`] for as long as it is shown
//! - Leaving the view drops the mount, which aborts the request
//! - State is written through a [`fetch::StateSetter`] that checks the mount first, so a late response is discarded
//! - Cancellation is expected and never shows up as an error
//! - Errors stay inside the view that hit them and come with a route back
//!
//!
//!
//! ## Pagination
//!
//! - Window of 3, 5 or 7 page buttons depending on width
//! - First and last page always shown, `…` for the gaps
//! - Few enough pages and every one is shown
//!
//!
//!
//! ## Notes
//!
//! - No global item list. The source is passed into every view that needs it.
//! - The API origin is fixed, see [`client::API_ORIGIN`].
pub mod client;
pub mod fetch;
pub mod pagination;
pub mod render;
pub mod views;
