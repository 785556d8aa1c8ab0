// Shared fixtures for the metroholidays behavior tests
use httpmock::MockServer;
use metroholidays::{ClientConfig, HolidaysClient};
use serde_json::{json, Value};

pub const USER: &str = "user";
pub const PASSWORD: &str = "pwd";

/// `Basic base64("user:pwd")`
pub const BASIC_HEADER: &str = "Basic dXNlcjpwd2Q=";

pub fn base_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/", server.port())
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&base_url(server), USER, PASSWORD).expect("mock server url is valid")
}

pub fn client(server: &MockServer) -> HolidaysClient {
    HolidaysClient::with_config(config(server))
}

/// One service record in the shape the Holidays API returns.
pub fn record(country: &str, name: &str, day_off: bool, dates: &[&str]) -> Value {
    json!({
        "country_code": country,
        "en_name": name,
        "day_off": day_off,
        "observed": false,
        "created_at": "2019-12-01T00:00:00Z",
        "updated_at": "2019-12-01T00:00:00Z",
        "dates": dates,
    })
}

pub fn body(records: &[Value]) -> String {
    Value::Array(records.to_vec()).to_string()
}
