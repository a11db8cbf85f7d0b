//! PEARLS Debrief - Conversational simulation debriefing backend
//!
//! Guides a learner through the six PEARLS phases (Preparation, Engagement,
//! Analysis, Reflection, Learning, Summary), generating each reply with an
//! OpenAI-compatible completion API and advancing the phase once enough
//! messages have accumulated.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
