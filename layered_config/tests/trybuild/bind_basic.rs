use std::time::Duration;

use layered_config::{Bind, Config, Value, path::expand_dot_keys};

#[derive(Bind, Default)]
struct Server {
    host: String,
    #[layered_config(default = "8080")]
    port: u16,
    #[layered_config(key = "idle_timeout", default = "90s")]
    idle: Duration,
    #[layered_config(skip)]
    _runtime: Vec<u8>,
    #[layered_config(separator = ";")]
    aliases: Vec<String>,
    tls: Option<Tls>,
}

#[derive(Bind, Default)]
struct Tls {
    cert: String,
    #[layered_config(layout = "%Y-%m-%d")]
    expires: chrono::DateTime<chrono::Utc>,
}

fn main() {
    let config = Config::from_mapping(expand_dot_keys([("server.host", Value::from("x"))]));
    let server: layered_config::ConfigResult<Server> = config.bind("server");
    let _ = server.map(|s| (s.host, s.port, s.idle, s.aliases, s.tls.map(|t| (t.cert, t.expires))));
}
