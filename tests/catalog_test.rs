//! Integration tests for catalog building against mock HTTP sources.

#![cfg(feature = "remote")]

use actioncode_catalog::{
    build_catalog, build_catalog_report, try_build_catalog, ActionType, CatalogConfig,
    CatalogError, FetchError, Fetcher, ParameterDescriptor,
};
use mockito::{Mock, Server, ServerGuard};
use serde_json::json;
use url::Url;

const CREATE_DEMAND_CODE: &str = r##"{
    "openapi": "3.0.1",
    "paths": {
        "/demand-codes/{tenant}": {
            "post": {
                "tags": ["DemandCode", "Admin"],
                "parameters": [
                    { "name": "tenant", "in": "path", "required": true, "description": "string" },
                    { "name": "dryRun", "in": "query", "description": "boolean" },
                    { "name": "X-Request-Id", "in": "header", "required": true }
                ],
                "requestBody": {
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/ApiSingleRequestDemandCode" }
                        }
                    }
                },
                "responses": {
                    "201": {
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "data": { "$ref": "#/components/schemas/DemandCodeResult" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    },
    "components": {
        "schemas": {
            "ApiSingleRequestDemandCode": {
                "type": "object",
                "properties": {
                    "request": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/DemandCode" }
                    }
                }
            },
            "DemandCode": {
                "type": "object",
                "required": ["code", "validity"],
                "properties": {
                    "code": { "type": "string" },
                    "description": { "type": "string" },
                    "validity": {
                        "type": "object",
                        "required": ["from"],
                        "properties": {
                            "from": { "type": "string", "format": "date" },
                            "to": { "type": "string", "format": "date" }
                        }
                    }
                }
            },
            "DemandCodeResult": {
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": { "type": "integer" },
                    "status": { "type": "string" }
                }
            }
        }
    }
}"##;

const GET_DEMAND_CODE: &str = r#"{
    "paths": {
        "/demand-codes/{id}": {
            "get": {
                "parameters": [{ "name": "id", "in": "path", "required": true }],
                "responses": {
                    "200": {
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": { "code": { "type": "string" }, "active": { "type": "boolean" } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}"#;

const TWO_PATHS: &str = r#"{
    "paths": { "/a": { "get": {} }, "/b": { "post": {} } }
}"#;

fn serve(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

fn config(server: &ServerGuard) -> CatalogConfig {
    CatalogConfig::new(format!("{}/", server.url()), "apiList.json")
}

// === Full Builds ===

mod builds {
    use super::*;

    #[test]
    fn builds_descriptors_in_manifest_order() {
        let mut server = Server::new();
        let manifest = serve(
            &mut server,
            "/apiList.json",
            200,
            &json!({
                "components": {
                    "Demand": {
                        "apiSchemas": {
                            "CreateDemandCode": "docs/create-demandCode.json",
                            "GetDemandCode": "docs/get-demandCode.json"
                        }
                    }
                }
            })
            .to_string(),
        );
        let create = serve(&mut server, "/docs/create-demandCode.json", 200, CREATE_DEMAND_CODE);
        let get = serve(&mut server, "/docs/get-demandCode.json", 200, GET_DEMAND_CODE);

        let catalog = build_catalog(&config(&server));
        manifest.assert();
        create.assert();
        get.assert();

        assert_eq!(catalog.len(), 2);

        let create = &catalog[0];
        assert_eq!(create.component_name, "Demand");
        assert_eq!(create.action_code, "CreateDemandCode");
        assert_eq!(create.action_code_group_name, "DemandCode");
        assert_eq!(create.endpoint, "/demand-codes/{tenant}");
        assert_eq!(create.action_type, ActionType::PostAndVerify);
        assert_eq!(
            create.path_property_list_map.path_params,
            vec![ParameterDescriptor {
                technical_column_name: "tenant".into(),
                is_mandatory: true,
                derived_data_type: Some("string".into()),
            }]
        );
        assert_eq!(create.path_property_list_map.query_params.len(), 1);

        let request: Vec<(&str, bool, &str)> = create
            .request_body_column_list
            .iter()
            .map(|c| {
                (
                    c.technical_column_name.as_str(),
                    c.is_mandatory,
                    c.derived_data_type.as_str(),
                )
            })
            .collect();
        assert_eq!(
            request,
            [
                ("code", true, ":request"),
                ("description", false, ":request"),
                ("from", true, ":request:validity"),
                ("to", false, ":request:validity"),
            ]
        );

        let response: Vec<(&str, bool)> = create
            .response_body_column_list
            .iter()
            .map(|c| (c.technical_column_name.as_str(), c.is_mandatory))
            .collect();
        assert_eq!(response, [("id", true), ("status", false)]);

        let get = &catalog[1];
        assert_eq!(get.action_code, "GetDemandCode");
        assert_eq!(get.action_type, ActionType::FetchAndVerify);
        assert_eq!(get.action_code_group_name, "DefaultGroup");
        assert!(get.request_body_column_list.is_empty());
        assert_eq!(get.response_body_column_list.len(), 2);
    }

    #[test]
    fn catalog_wire_format() {
        let mut server = Server::new();
        let _manifest = serve(
            &mut server,
            "/apiList.json",
            200,
            r#"{"components":{"Demand":{"apiSchemas":{"GetDemandCode":"docs/get.json"}}}}"#,
        );
        let _doc = serve(&mut server, "/docs/get.json", 200, GET_DEMAND_CODE);

        let catalog = build_catalog(&config(&server));
        let value = serde_json::to_value(&catalog).unwrap();

        assert_eq!(
            value,
            json!([{
                "componentName": "Demand",
                "actionCodeGroupName": "DefaultGroup",
                "actionCode": "GetDemandCode",
                "endPoint": "/demand-codes/{id}",
                "type": "FetchAndVerify",
                "pathPropertyListMap": {
                    "PathParamList": [
                        { "technicalColumnName": "id", "isMandatory": true, "derivedDataType": null }
                    ],
                    "QueryParamList": []
                },
                "requestBodyColumnList": [],
                "responseBodyColumnList": [
                    { "technicalColumnName": "code", "isMandatory": false, "derivedDataType": ":response" },
                    { "technicalColumnName": "active", "isMandatory": false, "derivedDataType": ":response" }
                ]
            }])
        );
    }

    #[test]
    fn repeated_builds_are_identical() {
        let mut server = Server::new();
        let _manifest = serve(
            &mut server,
            "/apiList.json",
            200,
            r#"{"components":{"Demand":{"apiSchemas":{"Create":"docs/create.json","Get":"docs/get.json"}}}}"#,
        );
        let _doc = serve(&mut server, "/docs/create.json", 200, CREATE_DEMAND_CODE);
        let _doc = serve(&mut server, "/docs/get.json", 200, GET_DEMAND_CODE);

        let first = serde_json::to_string(&build_catalog(&config(&server))).unwrap();
        let second = serde_json::to_string(&build_catalog(&config(&server))).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn absolute_schema_urls_in_manifest() {
        let mut server = Server::new();
        let absolute = format!("{}/elsewhere/get.json", server.url());
        let _manifest = serve(
            &mut server,
            "/apiList.json",
            200,
            &json!({ "components": { "Demand": { "apiSchemas": { "Get": absolute } } } }).to_string(),
        );
        let doc = serve(&mut server, "/elsewhere/get.json", 200, GET_DEMAND_CODE);

        let catalog = build_catalog(&CatalogConfig::new(
            format!("{}/base/", server.url()),
            "/apiList.json",
        ));
        assert_eq!(catalog.len(), 1);
        doc.assert();
    }
}

// === Failure Isolation ===

mod failures {
    use super::*;

    #[test]
    fn manifest_server_error_yields_empty_catalog() {
        let mut server = Server::new();
        let manifest = serve(&mut server, "/apiList.json", 500, "");

        assert!(build_catalog(&config(&server)).is_empty());
        manifest.assert();

        let result = try_build_catalog(&config(&server));
        assert!(matches!(
            result,
            Err(CatalogError::Fetch(FetchError::Network { .. }))
        ));
    }

    #[test]
    fn manifest_invalid_json_yields_empty_catalog() {
        let mut server = Server::new();
        let _manifest = serve(&mut server, "/apiList.json", 200, "{ components: ");

        assert!(build_catalog(&config(&server)).is_empty());
        assert!(matches!(
            try_build_catalog(&config(&server)),
            Err(CatalogError::InvalidJson { .. })
        ));
    }

    #[test]
    fn malformed_base_url_yields_empty_catalog() {
        let config = CatalogConfig::new("not a url", "apiList.json");
        assert!(build_catalog(&config).is_empty());
        assert!(matches!(
            try_build_catalog(&config),
            Err(CatalogError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn only_schema_missing_yields_empty_catalog() {
        let mut server = Server::new();
        let _manifest = serve(
            &mut server,
            "/apiList.json",
            200,
            r#"{"components":{"Demand":{"apiSchemas":{"Create":"docs/create.json"}}}}"#,
        );
        let schema = serve(&mut server, "/docs/create.json", 404, "");

        let report = try_build_catalog(&config(&server)).unwrap();
        schema.assert();
        assert!(report.actions.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].action_code, "Create");
    }

    #[test]
    fn bad_documents_skip_only_themselves() {
        let mut server = Server::new();
        let _manifest = serve(
            &mut server,
            "/apiList.json",
            200,
            r#"{"components":{
                "Broken":{"apiSchemas":{
                    "TwoPaths":"docs/two.json",
                    "NoPaths":"docs/none.json",
                    "NotJson":"docs/html.json",
                    "PutOnly":"docs/put.json"
                }},
                "Demand":{"apiSchemas":{"Get":"docs/get.json"}}
            }}"#,
        );
        let _doc = serve(&mut server, "/docs/two.json", 200, TWO_PATHS);
        let _doc = serve(&mut server, "/docs/none.json", 200, r#"{"openapi":"3.0.1","paths":{}}"#);
        let _doc = serve(&mut server, "/docs/html.json", 200, "<html></html>");
        let _doc = serve(&mut server, "/docs/put.json", 200, r#"{"paths":{"/x":{"put":{}}}}"#);
        let _doc = serve(&mut server, "/docs/get.json", 200, GET_DEMAND_CODE);

        let report = try_build_catalog(&config(&server)).unwrap();

        assert_eq!(report.actions.len(), 1);
        assert_eq!(report.actions[0].action_code, "Get");

        let skipped: Vec<&str> = report
            .skipped
            .iter()
            .map(|s| s.action_code.as_str())
            .collect();
        assert_eq!(skipped, ["TwoPaths", "NoPaths", "NotJson", "PutOnly"]);
        assert!(report.skipped[0].reason.contains("found 2"));
    }
}

// === Custom Fetchers ===

/// Serves fixed bodies keyed by URL path, without any network.
struct StaticFetcher(Vec<(&'static str, &'static str)>);

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.0
            .iter()
            .find(|(path, _)| *path == url.path())
            .map(|(_, body)| body.to_string())
            .ok_or_else(|| FetchError::UnsupportedScheme {
                url: url.to_string(),
                scheme: url.scheme().to_string(),
            })
    }
}

#[test]
fn custom_fetcher_is_used() {
    let fetcher = StaticFetcher(vec![
        (
            "/apiList.json",
            r#"{"components":{"Demand":{"apiSchemas":{"Create":"docs/create.json","Get":"docs/get.json"}}}}"#,
        ),
        ("/docs/create.json", CREATE_DEMAND_CODE),
        ("/docs/get.json", GET_DEMAND_CODE),
    ]);

    let report = build_catalog_report(&fetcher, "memory://catalog/", "apiList.json").unwrap();
    let codes: Vec<&str> = report.actions.iter().map(|a| a.action_code.as_str()).collect();
    assert_eq!(codes, ["Create", "Get"]);
    assert!(report.skipped.is_empty());
}

#[test]
fn component_without_api_schemas_contributes_nothing() {
    let fetcher = StaticFetcher(vec![
        (
            "/apiList.json",
            r#"{"components":{"Empty":{},"Demand":{"apiSchemas":{"Get":"docs/get.json"}}}}"#,
        ),
        ("/docs/get.json", GET_DEMAND_CODE),
    ]);

    let report = build_catalog_report(&fetcher, "memory://catalog/", "apiList.json").unwrap();
    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].component_name, "Demand");
    assert!(report.skipped.is_empty());
}
