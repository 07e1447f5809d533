// Generation boundary: the `{action, payload}` request builder, the pluggable backends,
// design-response recovery and the proxy endpoint.
// All model calls go through llm_client; no direct Anthropic calls here.

pub mod design_parser;
pub mod handlers;
pub mod prompts;
pub mod request;
pub mod service;
