use anyhow::Context;
use clap::Parser;
use core::net::SocketAddr;
use jsonspout::Seed;

/// Runtime configuration for the `jsonspout-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first). The defaults reproduce the reference
/// fixture: `127.0.0.1:8001`, seed `0`.
///
/// Depth, branching and chunk-size policies are fixed and deliberately not
/// exposed here.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jsonspout-server",
    version,
    about = "Streams endless, undelimited, arbitrarily chunked JSON over HTTP"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Example: "127.0.0.1:8001" or "0.0.0.0:8080"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("127.0.0.1:8001"))]
    pub server_addr: String,

    /// Seed every stream starts from.
    ///
    /// Either a `u64`, or `random` to draw one seed at startup. Every
    /// connection replays the same bytes for a given seed; with `random` the
    /// drawn value is logged so the run can be replayed.
    ///
    /// Environment variable: `SEED`
    #[arg(long, env = "SEED", default_value_t = Seed::default())]
    pub seed: Seed,

    /// Drop zero-length chunks instead of handing them to the transport.
    ///
    /// Empty chunks carry no bytes and would either be swallowed by the HTTP
    /// stack or, in chunked encoding, be mistaken for the terminating chunk.
    /// Dropping them does not change the byte sequence.
    ///
    /// Environment variable: `SKIP_EMPTY_CHUNKS`
    #[arg(long, env = "SKIP_EMPTY_CHUNKS", default_value_t = true, action = clap::ArgAction::Set)]
    pub skip_empty_chunks: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
    /// The requested seed, kept for logging.
    pub seed_source: Seed,
    /// The concrete seed every stream is started from.
    pub seed: u64,
    pub skip_empty_chunks: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let server_addr = args.server_addr.parse::<SocketAddr>().with_context(|| {
            format!("SERVER_ADDR ({}) is not a socket address", args.server_addr)
        })?;

        let seed = args.seed.resolve().context("SEED could not be resolved")?;

        Ok(Self {
            server_addr,
            seed_source: args.seed,
            seed,
            skip_empty_chunks: args.skip_empty_chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ServerConfig> {
        let argv = core::iter::once("jsonspout-server").chain(args.iter().copied());
        let args = CliArgs::try_parse_from(argv)?;
        ServerConfig::try_from(args)
    }

    #[test]
    fn defaults_reproduce_the_reference_setup() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:8001".parse().unwrap());
        assert_eq!(config.seed, 0);
        assert_eq!(config.seed_source, Seed::Fixed(0));
        assert!(config.skip_empty_chunks);
    }

    #[test]
    fn explicit_values_are_honored() {
        let config = parse(&[
            "--server-addr",
            "0.0.0.0:9000",
            "--seed",
            "42",
            "--skip-empty-chunks",
            "false",
        ])
        .unwrap();
        assert_eq!(config.server_addr.port(), 9000);
        assert_eq!(config.seed, 42);
        assert!(!config.skip_empty_chunks);
    }

    #[test]
    fn random_seed_resolves_to_a_replayable_value() {
        let config = parse(&["--seed", "random"]).unwrap();
        assert_eq!(config.seed_source, Seed::Random);

        // Every response replays the seed drawn here, not a fresh one.
        let replay = parse(&["--seed", &config.seed.to_string()]).unwrap();
        assert_eq!(replay.seed, config.seed);
        assert_eq!(replay.seed_source, Seed::Fixed(config.seed));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(&["--seed", "-1"]).is_err());
        assert!(parse(&["--seed", "sometimes"]).is_err());
        assert!(parse(&["--server-addr", "localhost"]).is_err());
    }
}
