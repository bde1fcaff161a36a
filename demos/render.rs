use ruletree::wire::decode_rules;
use ruletree::{NodeId, TreeView};
use tracing_subscriber::EnvFilter;

const RULES: &str = r#"{ "rules": [
    {
        "id": 1,
        "rule_string": "((age > 30 AND department = 'Sales') OR experience > 5)",
        "ast": {
            "type": "operator", "value": "OR",
            "left": {
                "type": "operator", "value": "AND",
                "left": { "type": "operand", "attribute": "age", "operator": ">", "constant": 30 },
                "right": { "type": "operand", "attribute": "department", "operator": "=", "constant": "Sales" }
            },
            "right": { "type": "operand", "attribute": "experience", "operator": ">", "constant": 5 }
        }
    },
    {
        "id": 2,
        "rule_string": "(salary >= 50000 XOR region = 'us-east')",
        "is_combined": true,
        "ast": {
            "type": "operator", "value": "XOR",
            "left": { "type": "operand", "attribute": "salary", "operator": ">=", "constant": 50000 },
            "right": { "type": "operand", "attribute": "region", "operator": "~", "constant": "us-east" }
        }
    }
] }"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rules = decode_rules(RULES).expect("sample rules are valid JSON");
    let mut view = TreeView::new();

    for rule in &rules.rules {
        println!("{}", rule.option_label());

        let ast = rule.ast();
        view.load(ast.as_ref()).expect("sample rules are shallow");
        println!("{}", view.render());

        // Collapse the first child of the root, if it can be collapsed.
        match view.toggle(NodeId(1)) {
            Ok(state) => println!("node #1 is now {state:?}:\n{}", view.render()),
            Err(err) => println!("{err}\n"),
        }

        for node in view.render().nodes() {
            println!(
                "  {} {:<24} {:<7} {} ({}x{} at {},{})",
                node.id,
                node.label.joined(),
                node.node_type.to_string(),
                node.style.background_class,
                node.bounds.width,
                node.bounds.height,
                node.bounds.x,
                node.bounds.y,
            );
        }
        println!();
    }

    view.load(None).expect("clearing never fails");
    println!("{}", view.render());
}
