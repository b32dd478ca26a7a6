//! Gemini provider integration.
//!
//! In-house reqwest client for the Generative Language API: DTOs,
//! conversions to and from the unified request/response types, and the
//! [`GeminiClient`] driver implementation.

mod client;
pub mod conversions;
pub mod dto;

pub use client::{DEFAULT_MODEL, DEFAULT_TTS_MODEL, GEMINI_API_BASE, GeminiClient};
