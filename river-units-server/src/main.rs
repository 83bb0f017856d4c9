//! River Units Server
//!
//! Newline-delimited JSON-RPC 2.0 over stdin/stdout. Plot viewers use it to
//! validate unit annotations and to fetch scale factors between units.
//!
//! Methods:
//! - initialize: server info and method list
//! - ping
//! - units/list: families, symbols and factors
//! - units/check: is a string a valid compound unit
//! - units/compare: are two units in the same family
//! - units/convert: scale factor, optionally applied to a value or a column

mod config;
mod handlers;
mod protocol;

use std::io::{self, BufRead, Write};

use config::ServerConfig;
use handlers::{handle_request, SERVER_NAME, SERVER_VERSION};
use protocol::{read_frame, Frame, RpcError, RpcRequest, RpcResponse};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn write_response(response: &RpcResponse) -> io::Result<()> {
    let text = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    stdout.flush()
}

fn main() {
    let (config, rejected) = ServerConfig::from_env();
    init_logging(&config);

    for (key, raw) in rejected {
        tracing::warn!(variable = key, value = %raw, "ignoring unusable setting, using default");
    }

    tracing::info!(
        name = SERVER_NAME,
        version = SERVER_VERSION,
        max_batch = config.max_batch,
        max_line_bytes = config.max_line_bytes,
        "server ready, waiting for requests"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());
    let mut buf = Vec::new();

    loop {
        let response = match read_frame(&mut reader, config.max_line_bytes, &mut buf) {
            Ok(Frame::Eof) => {
                tracing::info!("client disconnected (EOF)");
                break;
            }
            Ok(Frame::TooLong(len)) => {
                tracing::warn!(bytes = len, max = config.max_line_bytes, "oversized request discarded");
                RpcResponse::new(None, Err(RpcError::request_too_large(len, config.max_line_bytes)))
            }
            Ok(Frame::Line) => {
                let line = buf.trim_ascii();
                if line.is_empty() {
                    continue;
                }

                match serde_json::from_slice::<RpcRequest>(line) {
                    Err(e) => {
                        tracing::warn!(error = %e, "unparseable request");
                        RpcResponse::new(None, Err(RpcError::parse_error(e)))
                    }
                    Ok(request) => {
                        tracing::debug!(method = %request.method, "processing");
                        let response = handle_request(&config, &request);

                        // Notifications get no response
                        if request.id.is_none() {
                            continue;
                        }
                        response
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        };

        if let Err(e) = write_response(&response) {
            tracing::error!(error = %e, "failed to write response");
            break;
        }
    }

    tracing::info!("server shutting down");
}
