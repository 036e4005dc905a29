use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue, routing::get};
use catalog::{
    client::{CatalogClient, ClientError, ItemSource},
    pagination::{PageMarker, Pagination},
    views::{ItemDetailView, ItemListView, Route, ViewState},
};
use server::{app, config::Config, state::State};
use store::models::{Item, ListQuery, NewItem};
use tempfile::TempDir;
use tokio::{net::TcpListener, time::timeout};

fn items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item {
            id: 1_000 + i as i64,
            name: if i % 2 == 0 {
                format!("Lamp {i}")
            } else {
                format!("Chair {i}")
            },
            category: "Home".to_string(),
            price: 10.0 + i as f64,
            img: None,
        })
        .collect()
}

async fn start_api(seed: &[Item]) -> (CatalogClient, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir should be created");
    let state = State::new(Config {
        port: 0,
        items_path: temp_dir.path().join("items.json"),
        frontend_origin: HeaderValue::from_static("http://localhost:3000"),
    });
    state.store.write_all(seed).await.expect("seed items");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("serve");
    });

    (CatalogClient::with_origin(format!("http://{address}")), temp_dir)
}

#[tokio::test]
async fn list_view_renders_page_from_api() {
    let (client, _temp_dir) = start_api(&items(45)).await;
    let query = ListQuery {
        page: 3,
        limit: 5,
        q: "lamp".to_string(),
    };

    let mut view = ItemListView::mount(Arc::new(client), query);
    let state = timeout(Duration::from_secs(5), view.settled())
        .await
        .expect("settles");

    let page = match state {
        ViewState::Ready(page) => page,
        other => panic!("expected a loaded page, got {other:?}"),
    };

    assert_eq!(page.total, 23);
    assert_eq!(page.data.len(), 5);
    assert!(page.data.iter().all(|item| item.name.starts_with("Lamp")));

    let pagination = Pagination::new(&page, 1024);
    assert_eq!(pagination.total_pages, 5);
    assert!(!pagination.markers.contains(&PageMarker::Ellipsis));
}

#[tokio::test]
async fn detail_view_surfaces_not_found() {
    let (client, _temp_dir) = start_api(&items(3)).await;
    let back = Route::List(ListQuery::default());

    let mut view = ItemDetailView::mount(Arc::new(client), 9_999, back.clone());
    let state = timeout(Duration::from_secs(5), view.settled())
        .await
        .expect("settles");

    assert_eq!(
        state,
        ViewState::Failed("Item not found (404 Not Found)".to_string())
    );
    assert_eq!(view.recovery(), back);
}

#[tokio::test]
async fn created_item_is_listed_and_fetchable() {
    let (client, _temp_dir) = start_api(&items(2)).await;

    let created = client
        .create(&NewItem {
            name: "Standing Desk".to_string(),
            category: "Furniture".to_string(),
            price: 450.0,
            img: None,
        })
        .await
        .expect("create");

    assert_eq!(client.get(created.id).await.expect("get"), created);
    assert!(client.get(1).await.unwrap_err().is_not_found());

    let page = client
        .list(&ListQuery {
            q: "desk".to_string(),
            ..ListQuery::default()
        })
        .await
        .expect("list");
    assert_eq!(page.data, vec![created]);
}

#[tokio::test]
async fn invalid_query_is_a_status_error() {
    let (client, _temp_dir) = start_api(&items(2)).await;

    let err = client
        .list(&ListQuery {
            limit: 0,
            ..ListQuery::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Status { status, .. } if status == 400));
}

#[tokio::test]
async fn undecodable_body_fails_the_list_view() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    let broken = Router::new().route("/api/items", get(|| async { "not json" }));
    tokio::spawn(async move {
        axum::serve(listener, broken).await.expect("serve");
    });

    let client = CatalogClient::with_origin(format!("http://{address}"));
    let mut view = ItemListView::mount(Arc::new(client), ListQuery::default());
    let state = timeout(Duration::from_secs(5), view.settled())
        .await
        .expect("settles");

    match state {
        ViewState::Failed(message) => assert!(message.starts_with("Malformed response"), "{message}"),
        other => panic!("expected a failed view, got {other:?}"),
    }
    assert_eq!(view.recovery(), Route::List(ListQuery::default()));
}
