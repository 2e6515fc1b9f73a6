pub mod config;         // loads gateway.toml
pub mod crypto;         // bech32 account addresses, canonical sign bytes
pub mod coins;          // integer / decimal coins for fees and gas prices
pub mod base_req;       // tx metadata every request carries
pub mod msgs;           // create/read/update/delete messages and their checks
pub mod tx;             // unsigned StdTx assembly, gas estimation
pub mod error;          // request errors -> HTTP 400
pub mod handlers;       // handlers for Axum API
pub mod server;         // router wiring, HTTP/HTTPS listener

#[cfg(feature = "tls")]
pub mod utils;          // PEM loading, rustls server config
