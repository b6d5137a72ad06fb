use std::path::PathBuf;

use crate::config::Config;
use crate::error::HttpError;
use crate::files::listing;
use crate::files::transfer::transfer;
use crate::files::{Resolution, ResolvedTarget, Resolver};
use crate::gateway::Interpreter;
use crate::http::mime;
use crate::http::parser::parse_request_line;
use crate::http::request::RawRequest;
use crate::http::response::Response;

/// Turns a framed request into a response.
///
/// Runs the whole per-request pipeline: request-line parsing, percent
/// decoding, resolution under the root, then static transfer or interpreter
/// delegation depending on the content type.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    resolver: Resolver,
    interpreter: Interpreter,
}

impl Dispatcher {
    pub fn new(resolver: Resolver, interpreter: Interpreter) -> Self {
        Self {
            resolver,
            interpreter,
        }
    }

    /// `root` must already be canonical (see [`Config::resolve_root`]).
    pub fn from_config(config: &Config, root: PathBuf) -> Self {
        Self::new(
            Resolver::new(root, config.listing),
            Interpreter::from_config(&config.interpreter),
        )
    }

    /// Always produces a response; failures become error pages.
    pub async fn dispatch(&self, raw: &RawRequest) -> Response {
        match self.try_dispatch(raw).await {
            Ok(response) => response,
            Err(e) => {
                let status = e.status();
                if status.as_u16() >= 500 {
                    tracing::error!(status = status.as_u16(), error = %e, "Request failed");
                } else {
                    tracing::warn!(status = status.as_u16(), error = %e, "Request rejected");
                }
                Response::error(status)
            }
        }
    }

    async fn try_dispatch(&self, raw: &RawRequest) -> Result<Response, HttpError> {
        let request = parse_request_line(raw.request_line())?;
        tracing::info!(
            method = %request.method,
            target = %request.target,
            query = %request.query,
            "Request"
        );

        let decoded = request.decoded_path();
        match self.resolver.resolve(&request.target, &decoded).await? {
            Resolution::Redirect { location } => Ok(Response::redirect(&location)),
            Resolution::Listing { dir, title } => listing::list(&dir, &title).await,
            Resolution::File(target) => self.serve(&target, &request.query).await,
        }
    }

    async fn serve(&self, target: &ResolvedTarget, query: &str) -> Result<Response, HttpError> {
        if target.content_type == mime::PHP {
            self.interpreter.respond(&target.path, query).await
        } else {
            transfer(&target.path, target.content_type).await
        }
    }
}
