//! End-to-end walkthroughs of a small API: a documented menu listing built
//! from three middleware, and an upload endpoint that moved.

use routebook::{BoxError, Method, Middleware, Next, RouteTable, chain};
use serde_json::json;

mod common;
use common::{AppContext, Fallback, Respond};

struct Search;

impl Middleware<AppContext> for Search {
    async fn handle(
        &self,
        ctx: &mut AppContext,
        next: Next<'_, AppContext>,
    ) -> Result<(), BoxError> {
        ctx.log.push("search".to_owned());
        next.run(ctx).await
    }
}

struct GetData;

impl Middleware<AppContext> for GetData {
    async fn handle(
        &self,
        ctx: &mut AppContext,
        next: Next<'_, AppContext>,
    ) -> Result<(), BoxError> {
        ctx.log.push("get_data".to_owned());
        ctx.body = Some("[1, 2, 3, 4]".to_owned());
        next.run(ctx).await
    }
}

struct Paging;

impl Middleware<AppContext> for Paging {
    async fn handle(
        &self,
        ctx: &mut AppContext,
        _next: Next<'_, AppContext>,
    ) -> Result<(), BoxError> {
        ctx.log.push("paging".to_owned());
        ctx.status = 200;
        Ok(())
    }
}

fn menu_table() -> RouteTable<AppContext> {
    let table = RouteTable::new();
    let api = table.router("/api");
    let mut v2 = table.router("/v2");
    v2.mount(&api);

    v2.get("/menu/list", chain![Search, GetData, Paging])
        .unwrap()
        .state(json!({ "name": "menu list", "group": "menu" }))
        .exec()
        .unwrap();
    table
}

#[tokio::test]
async fn test_menu_listing_runs_all_three_middleware() {
    let table = menu_table();
    let mut ctx = AppContext::new("GET", "/api/v2/menu/list");

    table.routes().dispatch_to(&mut ctx, &Fallback).await.unwrap();

    assert_eq!(ctx.log, ["search", "get_data", "paging"]);
    assert_eq!(ctx.status, 200);
    assert_eq!(ctx.body.as_deref(), Some("[1, 2, 3, 4]"));
}

#[test]
fn test_menu_listing_is_documented_once() {
    let table = menu_table();

    let docs = serde_json::to_value(table.route_list()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(
        docs,
        json!([{
            "method": "GET",
            "path": "/api/v2/menu/list",
            "state": { "name": "menu list", "group": "menu" }
        }])
    );
}

#[tokio::test]
async fn test_upload_moved_before_commit() {
    let table = RouteTable::<AppContext>::new();
    let mut v1 = table.router("/api/v1");
    v1.post("/file/upload", chain![Respond("stored")])
        .unwrap()
        .state(json!({ "name": "upload file" }))
        .redirect("/file/upload2")
        .unwrap()
        .exec()
        .unwrap();

    let docs = serde_json::to_value(table.route_list()).unwrap();
    assert_eq!(
        docs,
        json!([
            {
                "method": "POST",
                "path": "/api/v1/file/upload2",
                "state": { "name": "upload file" },
                "originPath": "/api/v1/file/upload"
            },
            {
                "method": "POST",
                "path": "/api/v1/file/upload",
                "redirectTarget": "/api/v1/file/upload2"
            }
        ])
    );

    let mut ctx = AppContext::new("POST", "/api/v1/file/upload");
    table.routes().dispatch_to(&mut ctx, &Fallback).await.unwrap();
    assert_eq!(ctx.status, 302);
    assert_eq!(ctx.location.as_deref(), Some("/api/v1/file/upload2"));
    assert!(ctx.log.is_empty());
}

#[tokio::test]
async fn test_upload_moved_after_commit() {
    let table = RouteTable::<AppContext>::new();
    let mut v1 = table.router("/api/v1");
    v1.route(Method::Post, "/file/upload", chain![Respond("stored")])
        .unwrap();

    v1.redirect(Method::Post, "/file/upload", "/file/upload2")
        .unwrap();

    let paths: Vec<_> = table
        .route_list()
        .into_iter()
        .map(|entry| (entry.path, entry.redirect_target))
        .collect();
    assert_eq!(
        paths,
        [
            ("/api/v1/file/upload2".to_owned(), None),
            (
                "/api/v1/file/upload".to_owned(),
                Some("/api/v1/file/upload2".to_owned())
            ),
        ]
    );

    let mut ctx = AppContext::new("POST", "/api/v1/file/upload2");
    table.routes().dispatch_to(&mut ctx, &Fallback).await.unwrap();
    assert_eq!(ctx.body.as_deref(), Some("stored"));
}
