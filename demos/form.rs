use ruletree::wire::decode_ast;
use ruletree::EvaluationForm;
use tracing_subscriber::EnvFilter;

const AST: &str = r#"{
    "type": "operator", "value": "AND",
    "left": { "type": "operand", "attribute": "age", "operator": ">", "constant": 30 },
    "right": {
        "type": "operator", "value": "OR",
        "left": { "type": "operand", "attribute": "department", "operator": "=", "constant": "Sales" },
        "right": { "type": "operand", "attribute": "salary", "operator": ">", "constant": 50000 }
    }
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ast = decode_ast(AST).expect("sample AST is valid JSON");
    let mut form = EvaluationForm::from_ast(ast.as_ref());
    println!("Fields: {}", form.fields().join(", "));

    form.set("age", "35").expect("age is a rule field");
    form.set("department", "Sales").expect("department is a rule field");

    match form.to_request(7) {
        Ok(request) => println!("{request:?}"),
        Err(err) => println!("{err}"),
    }

    form.set("salary", " 62000.5 ").expect("salary is a rule field");
    let request = form.to_request(7).expect("every field is filled");
    println!(
        "{}",
        serde_json::to_string_pretty(&request).expect("request serializes")
    );
}
