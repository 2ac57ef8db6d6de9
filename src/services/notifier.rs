// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound delivery of daily reports.
//!
//! Delivery is a single best-effort attempt with a hard time limit. Failures
//! are reported back as a [`DeliveryOutcome`]; nothing past [`deliver`]
//! returns an error.

use crate::error::AppError;
use crate::services::report::ReportMessage;
use futures_util::future::BoxFuture;
use serde::Serialize;
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Something that can post a report to the team channel.
pub trait Notifier: Send + Sync {
    /// Attempt delivery once. `Ok` carries a human-readable status.
    fn send<'a>(&'a self, message: &'a ReportMessage) -> BoxFuture<'a, Result<String, AppError>>;
}

/// Result of a delivery attempt as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeliveryOutcome {
    pub delivered: bool,
    pub detail: String,
}

/// Run one delivery attempt, bounded by `timeout`.
pub async fn deliver(
    notifier: &dyn Notifier,
    message: &ReportMessage,
    timeout: Duration,
) -> DeliveryOutcome {
    let result = match tokio::time::timeout(timeout, notifier.send(message)).await {
        Ok(result) => result,
        Err(_) => Err(AppError::NotificationDeliveryFailed(format!(
            "timed out after {}s",
            timeout.as_secs_f64()
        ))),
    };

    match result {
        Ok(detail) => {
            tracing::info!(subject = %message.subject, "Report delivered");
            DeliveryOutcome {
                delivered: true,
                detail,
            }
        }
        Err(e) => {
            tracing::warn!(subject = %message.subject, error = %e, "Report not delivered");
            DeliveryOutcome {
                delivered: false,
                detail: e.to_string(),
            }
        }
    }
}

/// Posts reports to a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackNotifier {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl SlackNotifier {
    /// Create a notifier. With no webhook URL every send reports
    /// [`AppError::NotificationUnavailable`].
    pub fn new(webhook_url: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;
        Ok(Self { http, webhook_url })
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn post(&self, message: &ReportMessage) -> Result<String, AppError> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or(AppError::NotificationUnavailable)?;

        let response = self
            .http
            .post(url)
            .json(&message.to_slack_payload())
            .send()
            .await
            .map_err(|e| {
                AppError::NotificationDeliveryFailed(format!("Error sending to Slack: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            Ok("Successfully sent to Slack".to_string())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::NotificationDeliveryFailed(format!(
                "Slack API error: {} {}",
                status.as_u16(),
                body.trim()
            )))
        }
    }
}

impl Notifier for SlackNotifier {
    fn send<'a>(&'a self, message: &'a ReportMessage) -> BoxFuture<'a, Result<String, AppError>> {
        Box::pin(self.post(message))
    }
}
