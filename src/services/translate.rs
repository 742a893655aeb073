use crate::config;

/// Best-effort translation side-channel. Any failure degrades silently
/// to the untranslated text; callers never see an error.
pub struct TranslateClient {
    base_url: String,
    client: reqwest::Client,
}

impl TranslateClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn public() -> Self {
        Self::new(config::TRANSLATE_BASE_URL)
    }

    /// Translate English text to `target`. English input passes through.
    pub async fn translate(&self, text: &str, target: &str) -> String {
        if target == "en" || text.trim().is_empty() {
            return text.to_string();
        }
        match self.try_translate(text, target).await {
            Some(translated) => translated,
            None => {
                tracing::debug!(lang = target, "translation unavailable, keeping English text");
                text.to_string()
            }
        }
    }

    /// Translate each item, falling back per item.
    pub async fn translate_all(&self, items: &[String], target: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.translate(item, target).await);
        }
        out
    }

    async fn try_translate(&self, text: &str, target: &str) -> Option<String> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        // Response shape: [[[translated, original, ...], ...], ...]
        let value: serde_json::Value = response.json().await.ok()?;
        let segments = value.get(0)?.as_array()?;
        let translated: Vec<&str> = segments
            .iter()
            .filter_map(|seg| seg.get(0)?.as_str())
            .collect();
        if translated.is_empty() {
            return None;
        }
        Some(translated.join(" "))
    }
}
