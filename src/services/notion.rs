// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion client for the daily tracking database.
//!
//! One page per calendar date, with the date as the natural key. The page
//! properties carry a readable title ("Mar 02"), the ISO date, and the three
//! numeric metrics.

use crate::error::AppError;
use crate::models::DailyEntry;
use chrono::NaiveDate;
use serde_json::json;

const NOTION_VERSION: &str = "2022-06-28";

/// Notion API client scoped to one tracking database.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
}

impl NotionClient {
    /// Create a new Notion client for the given tracking database.
    pub fn new(token: String, database_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.notion.com".to_string(),
            token,
            database_id,
        }
    }

    /// Create a client pointed at a custom endpoint (used by tests to target
    /// a local mock server).
    pub fn with_base_url(token: String, database_id: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
            database_id,
        }
    }

    /// Find the page id of the tracking entry for a date, if one exists.
    ///
    /// Returns the first match; under the intended contract there is at most
    /// one page per date.
    pub async fn find_entry(&self, date: &str) -> Result<Option<String>, AppError> {
        let url = format!("{}/v1/databases/{}/query", self.base_url, self.database_id);
        let body = json!({
            "filter": {"property": "Date", "date": {"equals": date}}
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Notion(e.to_string()))?;

        let result: serde_json::Value = self.check_response_json(response).await?;

        let page_id = result["results"]
            .as_array()
            .and_then(|results| results.first())
            .and_then(|page| page["id"].as_str())
            .map(str::to_string);

        Ok(page_id)
    }

    /// Create a new tracking page for an entry.
    pub async fn create_entry(&self, entry: &DailyEntry) -> Result<(), AppError> {
        let url = format!("{}/v1/pages", self.base_url);
        let payload = page_payload(&self.database_id, entry)?;

        tracing::debug!(date = %entry.date, "Creating daily entry");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Notion(e.to_string()))?;

        self.check_response(response).await
    }

    /// Overwrite an existing tracking page with an entry's current values.
    pub async fn update_entry(&self, page_id: &str, entry: &DailyEntry) -> Result<(), AppError> {
        let url = format!("{}/v1/pages/{}", self.base_url, page_id);
        let payload = page_payload(&self.database_id, entry)?;

        tracing::debug!(page_id, date = %entry.date, "Updating daily entry");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Notion(e.to_string()))?;

        self.check_response(response).await
    }

    /// Check response status and return an error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Notion(format!("HTTP {}: {}", status, body)))
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Notion(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Notion(format!("JSON parse error: {}", e)))
    }
}

/// Build the page payload for a daily entry.
fn page_payload(database_id: &str, entry: &DailyEntry) -> Result<serde_json::Value, AppError> {
    let title = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid entry date '{}': {}", entry.date, e)))?
        .format("%b %d")
        .to_string();

    Ok(json!({
        "parent": {"database_id": database_id},
        "properties": {
            "Title": {"title": [{"text": {"content": title}}]},
            "Date": {"date": {"start": entry.date}},
            "Recovery": {"number": entry.recovery_pct},
            "Sleep Performance": {"number": entry.sleep_performance_pct},
            "Sleep Milliseconds": {"number": entry.sleep_ms},
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DailyEntry {
        DailyEntry {
            date: "2024-03-02".to_string(),
            recovery_pct: 0.65,
            sleep_performance_pct: 0.80,
            sleep_ms: 28_000_000,
        }
    }

    #[test]
    fn test_page_payload_properties() {
        let payload = page_payload("db-1", &entry()).unwrap();

        assert_eq!(payload["parent"]["database_id"], "db-1");
        let props = &payload["properties"];
        assert_eq!(props["Title"]["title"][0]["text"]["content"], "Mar 02");
        assert_eq!(props["Date"]["date"]["start"], "2024-03-02");
        assert_eq!(props["Recovery"]["number"], 0.65);
        assert_eq!(props["Sleep Performance"]["number"], 0.80);
        assert_eq!(props["Sleep Milliseconds"]["number"], 28_000_000);
    }

    #[test]
    fn test_page_payload_rejects_bad_date() {
        let mut bad = entry();
        bad.date = "03/02/2024".to_string();

        let err = page_payload("db-1", &bad).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
