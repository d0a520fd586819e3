use layered_config::bind::BindField;
use layered_config::{Bind, Config};

#[derive(Bind, Default)]
struct Pair<A, B> {
    left: A,
    right: Option<B>,
}

fn load<A, B>(config: &Config) -> layered_config::ConfigResult<Pair<A, B>>
where
    A: BindField + Default,
    B: BindField + Default,
{
    config.bind("pair")
}

fn main() {
    let _ = load::<String, Vec<u64>>(&Config::empty());
}
