use yit::config::OutputFormat;
use yit::document::parser::parse_yaml;
use yit::iter::Iter;
use yit::output::render;
use yit::predicate::{all, with_value};

const APP: &str = "\
defaults: &defaults
  replicas: 2
  debug: false
app:
  <<: *defaults
  name: api
  ports: [80, 443]
";

#[test]
fn test_json_output_applies_merges() {
    let trees = parse_yaml(APP).unwrap();
    let app = Iter::from_node(trees[0].root().unwrap())
        .values_for_map(with_value("app"), all())
        .next()
        .unwrap()
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&render(app, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "replicas": 2,
            "debug": false,
            "name": "api",
            "ports": [80, 443]
        })
    );
}

#[test]
fn test_value_output_for_collections_is_yaml() {
    let trees = parse_yaml(APP).unwrap();
    let ports = Iter::from_node(trees[0].root().unwrap())
        .recurse_nodes()
        .values_for_map(with_value("ports"), all())
        .next()
        .unwrap()
        .unwrap();

    assert_eq!(render(ports, OutputFormat::Value).unwrap(), "- 80\n- 443");
}

#[test]
fn test_yaml_output_for_scalars_is_typed() {
    let trees = parse_yaml("a: 'quoted'\nb: 12\n").unwrap();
    let root = trees[0].root().unwrap();

    assert_eq!(render(root.child(1).unwrap(), OutputFormat::Yaml).unwrap(), "quoted");
    assert_eq!(render(root.child(3).unwrap(), OutputFormat::Yaml).unwrap(), "12");
}
