//! HTTP backend answering questions about uploaded PDF documents and
//! sending notification emails through an SMTP relay.
//!
//! The chat pipeline (extract, chunk, embed, retrieve, generate) runs once
//! per request with no cross-request state; the external services sit
//! behind the [`llm::Embedder`], [`llm::Generator`], and [`mail::Mailer`]
//! traits so the pipeline can be tested with deterministic fakes.

pub mod core;
pub mod llm;
pub mod logging;
pub mod mail;
pub mod pdf;
pub mod rag;
pub mod server;
pub mod state;
