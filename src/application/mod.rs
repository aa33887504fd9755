//! Application layer containing the payment lifecycle orchestration.
//!
//! `PaymentOrchestrator` owns the creation and status-update flows;
//! `WebhookHandler` is the entry point for provider notifications and drives
//! the best-effort order confirmation that follows an approval.

pub mod orchestrator;
pub mod webhook;
