//! Documentation-friendly projection of the route table.

use crate::table::{RouteTable, State};
use routebook_core::Method;
use serde::Serialize;
use std::collections::HashSet;

/// One documented route.
///
/// Middleware is never part of the projection; everything here serializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    /// The method tag; never [`Method::All`].
    pub method: Method,
    /// The fully prefixed path.
    pub path: String,
    /// The documentation payload of the first entry at this address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    /// The declared path of a registration redirected before commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_path: Option<String>,
    /// Where a forwarding route sends its requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_target: Option<String>,
}

impl<C> RouteTable<C> {
    /// List the documented routes.
    ///
    /// Walks the table in insertion order, skips `All` entries and entries
    /// hidden with `no_back`, and keeps the first entry of every
    /// `(method, path)` pair.
    pub fn route_list(&self) -> Vec<RouteEntry> {
        let entries = self.read();
        let mut seen = HashSet::new();

        entries
            .iter()
            .filter(|entry| !entry.method.is_all() && !entry.excluded)
            .filter(|entry| seen.insert((entry.method, entry.path.as_str())))
            .map(|entry| RouteEntry {
                method: entry.method,
                path: entry.path.clone(),
                state: entry.state.clone(),
                origin_path: entry.origin_path.clone(),
                redirect_target: entry.redirect_target.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{MockContext, RecordingMiddleware};
    use crate::table::RouteTable;
    use routebook_core::{Method, chain};
    use serde_json::json;

    #[test]
    fn test_multi_middleware_route_listed_once() {
        let table = RouteTable::<MockContext>::new();
        let mut router = table.router("/api/v2");
        router
            .get(
                "/menu/list",
                chain![
                    RecordingMiddleware::new("search"),
                    RecordingMiddleware::new("get_data"),
                    RecordingMiddleware::new("paging")
                ],
            )
            .unwrap()
            .exec()
            .unwrap();

        let list = table.route_list();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].method, Method::Get);
        assert_eq!(list[0].path, "/api/v2/menu/list");
    }

    #[test]
    fn test_all_and_hidden_routes_are_skipped() {
        let table = RouteTable::<MockContext>::new();
        let mut router = table.router("");
        router
            .route(Method::All, "/any", chain![RecordingMiddleware::new("any")])
            .unwrap();
        router
            .get("/internal", chain![RecordingMiddleware::new("internal")])
            .unwrap()
            .no_back()
            .exec()
            .unwrap();
        router.no_back();
        router
            .route(Method::Post, "/hidden", chain![RecordingMiddleware::new("hidden")])
            .unwrap();
        router
            .route(Method::Get, "/public", chain![RecordingMiddleware::new("public")])
            .unwrap();

        let paths: Vec<_> = table.route_list().into_iter().map(|e| e.path).collect();

        assert_eq!(paths, ["/public"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_entry_serializes_without_empty_fields() {
        let table = RouteTable::<MockContext>::new();
        let mut router = table.router("/api");
        router
            .delete("/item", chain![RecordingMiddleware::new("delete")])
            .unwrap()
            .state(json!({ "name": "remove item" }))
            .exec()
            .unwrap();

        let json = serde_json::to_value(table.route_list()).unwrap();

        assert_eq!(
            json,
            json!([{ "method": "DELETE", "path": "/api/item", "state": { "name": "remove item" } }])
        );
    }

    #[test]
    fn test_listing_reflects_redirect_metadata() {
        let table = RouteTable::<MockContext>::new();
        let mut router = table.router("");
        router
            .post("/a", chain![RecordingMiddleware::new("a")])
            .unwrap()
            .redirect("/b")
            .unwrap()
            .exec()
            .unwrap();

        let list = table.route_list();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].path, "/b");
        assert_eq!(list[0].origin_path.as_deref(), Some("/a"));
        assert_eq!(list[1].path, "/a");
        assert_eq!(list[1].redirect_target.as_deref(), Some("/b"));
    }
}
