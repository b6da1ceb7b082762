use schemars::schema_for;

fn main() {
    let schema = schema_for!(dshbd_common::DashboardConfigStore);
    #[allow(clippy::unwrap_used)]
    let rendered = serde_json::to_string_pretty(&schema).unwrap();
    println!("{rendered}");
}
