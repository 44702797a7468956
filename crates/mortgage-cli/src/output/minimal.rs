use serde_json::Value;

/// Headline fields, most important first.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "total",
    "effort_percent",
    "remaining_balance",
    "total_interest",
];

/// Print just the headline value of the output.
///
/// For record lists the last record is used, so a schedule reports its
/// terminal state.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let target = match result {
        Value::Array(rows) => rows.last().unwrap_or(result),
        _ => result,
    };

    if let Value::Object(map) = target {
        if let Some(val) = PRIORITY_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            println!("{}", format_minimal(val));
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(target));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
