pub mod config;
pub mod errors;
pub mod llm_client;
pub mod mail;
pub mod routes;
pub mod state;
pub mod workflow;

#[cfg(test)]
mod testing;
