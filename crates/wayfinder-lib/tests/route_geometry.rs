mod common;

use wayfinder_lib::{plan_route, LineStringFeature, RouteEndpoint, RouteRequest, DEFAULT_CRS};

use common::load_fixture_dataset;

#[test]
fn planned_route_serializes_to_a_georeferenced_linestring() {
    let dataset = load_fixture_dataset();
    let request = RouteRequest::between(
        RouteEndpoint::Label("geolab".to_string()),
        RouteEndpoint::Label("main_entrance".to_string()),
    );

    let plan = plan_route(&dataset, &request).expect("route planned");
    let graph = dataset.graph().expect("graph available");
    let feature = LineStringFeature::from_plan(graph, &plan, DEFAULT_CRS).expect("feature built");

    assert_eq!(
        feature.coordinates(),
        &[[10.0, 10.0], [10.0, 0.0], [0.0, 0.0]]
    );

    let value: serde_json::Value =
        serde_json::from_str(&feature.to_json_string().expect("serializes")).expect("valid json");
    assert_eq!(value["type"], "Feature");
    assert_eq!(value["geometry"]["type"], "LineString");
    assert_eq!(value["crs"]["properties"]["name"], DEFAULT_CRS);
}

#[test]
fn custom_crs_identifier_is_recorded_verbatim() {
    let dataset = load_fixture_dataset();
    let request = RouteRequest::between(
        RouteEndpoint::Label("storage".to_string()),
        RouteEndpoint::Label("east_exit".to_string()),
    );

    let plan = plan_route(&dataset, &request).expect("route planned");
    let graph = dataset.graph().expect("graph available");
    let feature = LineStringFeature::from_plan(graph, &plan, "urn:ogc:def:crs:EPSG::4326")
        .expect("feature built");

    let value: serde_json::Value =
        serde_json::from_str(&feature.to_json_string().expect("serializes")).expect("valid json");
    assert_eq!(
        value["crs"]["properties"]["name"],
        "urn:ogc:def:crs:EPSG::4326"
    );
}
