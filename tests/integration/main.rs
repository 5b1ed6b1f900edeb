use std::io::Write;

use qsearch::EnvConfig;

mod test_permissions;
mod test_query;

fn config() -> EnvConfig {
    EnvConfig::default()
}

/// Run `f` with an in-memory output buffer, returning what was written.
#[track_caller]
fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
    let mut out = vec![];
    f(&mut out).unwrap();
    out.flush().unwrap();
    String::from_utf8(out).unwrap()
}

fn main() {}
