use schemars::schema_for;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `vgl schema`, in display order.
const TYPE_NAMES: [&str; 12] = [
    "query-filter",
    "filter-update",
    "geo-point",
    "crime-category",
    "time-window",
    "user-profile",
    "credentials",
    "auth-session",
    "new-user",
    "crime-statistics",
    "trend-point",
    "category-count",
];

/// Handle `vgl schema [type]`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    match args.type_name.as_deref() {
        Some(name) => {
            let schema = schema_for_name(name).ok_or_else(|| {
                anyhow::anyhow!("unknown schema type '{name}' (run 'vgl schema' for the list)")
            })?;
            output(&schema, flags.format)
        }
        None => output(&TYPE_NAMES, flags.format),
    }
}

fn schema_for_name(name: &str) -> Option<Value> {
    let schema = match name {
        "query-filter" => schema_for!(vigil_core::filter::QueryFilter),
        "filter-update" => schema_for!(vigil_core::filter::FilterUpdate),
        "geo-point" => schema_for!(vigil_core::filter::GeoPoint),
        "crime-category" => schema_for!(vigil_core::enums::CrimeCategory),
        "time-window" => schema_for!(vigil_core::enums::TimeWindow),
        "user-profile" => schema_for!(vigil_core::identity::UserProfile),
        "credentials" => schema_for!(vigil_core::identity::Credentials),
        "auth-session" => schema_for!(vigil_core::identity::AuthSession),
        "new-user" => schema_for!(vigil_core::identity::NewUser),
        "crime-statistics" => schema_for!(vigil_core::responses::CrimeStatistics),
        "trend-point" => schema_for!(vigil_core::responses::TrendPoint),
        "category-count" => schema_for!(vigil_core::responses::CategoryCount),
        _ => return None,
    };
    serde_json::to_value(schema).ok()
}
