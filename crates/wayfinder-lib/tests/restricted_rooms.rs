mod common;

use wayfinder_lib::{plan_route, Error, RouteEndpoint, RouteRequest};

use common::load_fixture_dataset;

fn label(name: &str) -> RouteEndpoint {
    RouteEndpoint::Label(name.to_string())
}

#[test]
fn restricting_the_only_corridor_severs_the_route() {
    let dataset = load_fixture_dataset();
    // hall_b (node 3) is the only link between the west and east wings.
    let request = RouteRequest::between(label("geolab"), label("storage"))
        .avoiding(["hall_b".to_string()]);

    let err = plan_route(&dataset, &request).expect_err("route severed");
    assert!(matches!(err, Error::NoPathFound { .. }));
    assert_eq!(format!("{err}"), "no path found between geolab and storage");
}

#[test]
fn restricting_the_destination_room_makes_it_unreachable() {
    let dataset = load_fixture_dataset();
    let request = RouteRequest::between(label("geolab"), label("library"))
        .avoiding(["library".to_string()]);

    let err = plan_route(&dataset, &request).expect_err("destination unreachable");
    assert!(matches!(err, Error::NoPathFound { .. }));
}

#[test]
fn routes_clear_of_the_restricted_room_are_unaffected() {
    let dataset = load_fixture_dataset();
    let request = RouteRequest::between(label("storage"), label("east_exit"))
        .avoiding(["hall_b".to_string()]);

    let plan = plan_route(&dataset, &request).expect("route planned");
    assert_eq!(plan.steps, vec![8, 4, 5]);
    assert!(!plan.steps.contains(&3));
}

#[test]
fn empty_restriction_list_matches_the_unrestricted_plan() {
    let dataset = load_fixture_dataset();
    let unrestricted = RouteRequest::between(label("geolab"), label("storage"));
    let restricted = RouteRequest::between(label("geolab"), label("storage"))
        .avoiding(Vec::<String>::new());

    let a = plan_route(&dataset, &unrestricted).expect("route planned");
    let b = plan_route(&dataset, &restricted).expect("route planned");

    assert_eq!(a.steps, b.steps);
    assert!((a.total_cost - b.total_cost).abs() < 1e-12);
}

#[test]
fn irrelevant_restrictions_do_not_change_the_route() {
    let dataset = load_fixture_dataset();
    let request = RouteRequest::between(label("geolab"), label("main_entrance"))
        .avoiding(["storage".to_string()]);

    let plan = plan_route(&dataset, &request).expect("route planned");
    assert_eq!(plan.steps, vec![6, 2, 1]);
    assert!((plan.total_cost - 20.0).abs() < 1e-9);
}
