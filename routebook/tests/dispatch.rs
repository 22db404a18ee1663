use futures::future::join_all;
use routebook::{
    BoxError, Method, Next, RouteTable, chain, compose, from_fn,
    testing::{CountingMiddleware, FailingMiddleware},
};

mod common;
use common::{AppContext, Fallback, Onion, Respond};

#[tokio::test]
async fn test_onion_order_around_terminal() {
    let table = RouteTable::<AppContext>::new();
    table
        .router("")
        .route(Method::Get, "/x", chain![Onion("A"), Onion("B"), Onion("C")])
        .unwrap();
    let mut ctx = AppContext::new("GET", "/x");

    table.routes().dispatch_to(&mut ctx, &Fallback).await.unwrap();

    assert_eq!(ctx.log, ["A>", "B>", "C>", "fallback", "<C", "<B", "<A"]);
}

#[tokio::test]
async fn test_all_entries_match_every_method_in_insertion_order() {
    let table = RouteTable::<AppContext>::new();
    let mut router = table.router("");
    router.route(Method::All, "/x", chain![Onion("any")]).unwrap();
    router.route(Method::Get, "/x", chain![Respond("get")]).unwrap();
    let routes = table.routes();

    let mut get = AppContext::new("GET", "/x");
    routes.dispatch_to(&mut get, &Fallback).await.unwrap();
    assert_eq!(get.log, ["any>", "respond get", "<any"]);

    let mut post = AppContext::new("POST", "/x");
    routes.dispatch_to(&mut post, &Fallback).await.unwrap();
    assert_eq!(post.log, ["any>", "fallback", "<any"]);
}

#[tokio::test]
async fn test_method_match_is_exact() {
    let table = RouteTable::<AppContext>::new();
    table
        .router("")
        .route(Method::Get, "/x", chain![Respond("get")])
        .unwrap();
    let mut ctx = AppContext::new("get", "/x");

    table.routes().dispatch_to(&mut ctx, &Fallback).await.unwrap();

    assert_eq!(ctx.log, ["fallback"]);
}

#[tokio::test]
async fn test_short_circuit_skips_downstream_and_terminal() {
    let table = RouteTable::<AppContext>::new();
    table
        .router("")
        .route(Method::Get, "/x", chain![Onion("A"), Respond("B"), Onion("C")])
        .unwrap();
    let mut ctx = AppContext::new("GET", "/x");

    table.routes().dispatch_to(&mut ctx, &Fallback).await.unwrap();

    assert_eq!(ctx.log, ["A>", "respond B", "<A"]);
    assert_eq!(ctx.status, 200);
}

#[tokio::test]
async fn test_error_unwinds_without_post_processing() {
    let table = RouteTable::<AppContext>::new();
    table
        .router("")
        .route(
            Method::Get,
            "/x",
            chain![Onion("A"), FailingMiddleware::new("boom"), Onion("C")],
        )
        .unwrap();
    let mut ctx = AppContext::new("GET", "/x");

    let err = table.routes().dispatch(&mut ctx, Next::end()).await.unwrap_err();

    assert_eq!(err.to_string(), "boom");
    assert_eq!(ctx.log, ["A>"]);
}

#[tokio::test]
async fn test_middleware_can_recover_from_downstream_error() {
    let recover = from_fn::<AppContext, _>(|ctx, next| {
        Box::pin(async move {
            if next.run(ctx).await.is_err() {
                ctx.status = 500;
            }
            Ok::<(), BoxError>(())
        })
    });
    let table = RouteTable::<AppContext>::new();
    table
        .router("")
        .route(Method::Get, "/x", chain![recover, FailingMiddleware::new("boom")])
        .unwrap();
    let mut ctx = AppContext::new("GET", "/x");

    table.routes().dispatch(&mut ctx, Next::end()).await.unwrap();

    assert_eq!(ctx.status, 500);
}

#[tokio::test]
async fn test_routes_inside_host_pipeline() {
    let table = RouteTable::<AppContext>::new();
    table
        .router("/api")
        .route(Method::Get, "/x", chain![Onion("route")])
        .unwrap();
    let host = compose(chain![Onion("cors"), table.routes(), Fallback]);

    let mut matched = AppContext::new("GET", "/api/x");
    host.run(&mut matched, Next::end()).await.unwrap();
    assert_eq!(matched.log, ["cors>", "route>", "fallback", "<route", "<cors"]);

    let mut unmatched = AppContext::new("GET", "/api/y");
    host.run(&mut unmatched, Next::end()).await.unwrap();
    assert_eq!(unmatched.log, ["cors>", "fallback", "<cors"]);
}

#[tokio::test]
async fn test_routes_registered_after_dispatcher_creation_are_served() {
    let table = RouteTable::<AppContext>::new();
    let routes = table.routes();

    table
        .router("")
        .route(Method::Get, "/late", chain![Respond("late")])
        .unwrap();
    let mut ctx = AppContext::new("GET", "/late");
    routes.dispatch(&mut ctx, Next::end()).await.unwrap();

    assert_eq!(ctx.body.as_deref(), Some("late"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_the_table() {
    let counter = CountingMiddleware::new();
    let table = RouteTable::<AppContext>::new();
    table
        .router("")
        .route(Method::Get, "/x", chain![counter.clone(), Respond("x")])
        .unwrap();

    let handles = (0..16).map(|_| {
        let routes = table.routes();
        tokio::spawn(async move {
            let mut ctx = AppContext::new("GET", "/x");
            routes.dispatch(&mut ctx, Next::end()).await.map(|()| ctx.body)
        })
    });
    let bodies = join_all(handles).await;

    assert!(bodies.into_iter().all(|body| {
        matches!(body, Ok(Ok(Some(ref text))) if text == "x")
    }));
    assert_eq!(counter.count(), 16);
}
