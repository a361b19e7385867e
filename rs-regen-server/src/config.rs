use std::path::PathBuf;

use clap::Parser;

/// Server settings, from the command line or the environment.
///
/// | flag         | variable         | default     |
/// |--------------|------------------|-------------|
/// | `--host`     | `REGEN_BIND`     | `127.0.0.1` |
/// | `--port`     | `REGEN_PORT`     | `5000`      |
/// | `--data-dir` | `REGEN_DATA_DIR` | `./data`    |
///
/// A flag takes precedence over its variable.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rs-regen-server", about = "Serves strings generated from persisted automata")]
pub struct ServerConfig {
	/// Address to bind
	#[arg(long, env = "REGEN_BIND", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to listen on
	#[arg(long, env = "REGEN_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Directory holding the `.bin` automata
	#[arg(long, env = "REGEN_DATA_DIR", default_value = "./data")]
	pub data_dir: PathBuf,
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use clap::error::ErrorKind;

	#[test]
	fn command_is_well_formed() {
		ServerConfig::command().debug_assert();
	}

	#[test]
	fn defaults() -> Result<(), clap::Error> {
		let config = ServerConfig::try_parse_from(["rs-regen-server"])?;
		assert_eq!(config, ServerConfig {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			data_dir: PathBuf::from("./data"),
		});
		Ok(())
	}

	#[test]
	fn overrides() -> Result<(), clap::Error> {
		let config = ServerConfig::try_parse_from([
			"rs-regen-server",
			"--host", "0.0.0.0",
			"--port", "8080",
			"--data-dir", "/srv/automata",
		])?;
		assert_eq!(config.host, "0.0.0.0");
		assert_eq!(config.port, 8080);
		assert_eq!(config.data_dir, PathBuf::from("/srv/automata"));
		Ok(())
	}

	#[test]
	fn invalid_port() {
		for port in ["http", "70000"] {
			let result = ServerConfig::try_parse_from(["rs-regen-server", "--port", port]);
			assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::ValueValidation), "port {port}");
		}
	}
}
