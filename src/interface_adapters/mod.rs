// Interface adapters: HTTP handlers, wire protocol and outbound clients.

pub mod clients;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod view;
