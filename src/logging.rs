use tracing_subscriber::EnvFilter;

/// Targets of the binary and the classifier crates it drives.
const CRATE_TARGETS: &[&str] = &["pokeclass", "pokeclass_helpers", "k_nn", "holdout"];

/// Level applied to every crate target for a given `-v` count.
///
/// Silent runs only surface warnings; `-v` adds the evaluation summary,
/// `-vv` each holdout iteration and file load, `-vvv` every prediction.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the stderr subscriber. Reports go to stdout, so log lines never
/// mix into them. A set `RUST_LOG` takes precedence over `-v`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            default_directives(2),
            "pokeclass=debug,pokeclass_helpers=debug,k_nn=debug,holdout=debug"
        );
    }
}
