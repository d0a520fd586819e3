//! `#[layered_config(crate = "...")]` routes generated paths through an alias.

use layered_config as cfg;
use cfg::{Bind, Config};

#[derive(Bind, Default)]
#[layered_config(crate = "cfg")]
struct Aliased {
    value: String,
    count: u32,
}

fn main() {
    let parsed: cfg::ConfigResult<Aliased> = Config::empty().bind("");
    let _ = parsed.map(|a| (a.value, a.count));
}
