//! Shapes raw search results into [`NormalizedArticle`] records.

use anyhow::anyhow;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{Field, NormalizedArticle, RawArticle, CONTENT_PREVIEW_CHARS};
use crate::{Error, Result};

/// Builds the publish-ready record for one raw article.
pub fn normalize(raw: &RawArticle) -> NormalizedArticle {
    // an empty bodyText stays an empty preview; only null maps to null
    let content_preview = match &raw.fields {
        Some(fields) => fields.body_text.as_ref().map(|text| preview(text)),
        None => Field::Missing,
    };

    NormalizedArticle {
        web_publication_date: raw.web_publication_date.clone(),
        web_title: raw.web_title.clone(),
        web_url: raw.web_url.clone(),
        content_preview,
    }
}

pub fn normalize_all(raws: &[RawArticle]) -> Vec<NormalizedArticle> {
    raws.iter().map(normalize).collect()
}

/// Reads `response.results` from a search response.
///
/// Missing keys yield an empty list. Anything present but shaped wrong fails
/// the whole batch.
pub fn extract_results(response: &Value) -> Result<Vec<RawArticle>> {
    let body = match response.get("response") {
        None => return Ok(Vec::new()),
        Some(body) if body.is_object() => body,
        Some(other) => {
            return Err(Error::ArticleProcessing(anyhow!(
                "expected `response` to be an object, got {}",
                json_kind(other)
            )))
        }
    };

    let results = match body.get("results") {
        None => return Ok(Vec::new()),
        Some(Value::Array(results)) => results,
        Some(other) => {
            return Err(Error::ArticleProcessing(anyhow!(
                "expected `response.results` to be an array, got {}",
                json_kind(other)
            )))
        }
    };

    results
        .iter()
        .enumerate()
        .map(|(index, record)| {
            RawArticle::deserialize(record).map_err(|e| {
                Error::ArticleProcessing(anyhow::Error::new(e).context(format!("result #{index}")))
            })
        })
        .collect()
}

/// Extracts and normalizes every article in a search response.
pub fn process_articles(response: &Value) -> Result<Vec<NormalizedArticle>> {
    match extract_results(response) {
        Ok(raws) => Ok(normalize_all(&raws)),
        Err(e) => {
            tracing::error!("Error processing articles: {}", e);
            Err(e)
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(CONTENT_PREVIEW_CHARS).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawFields;
    use serde_json::json;
    use std::error::Error as _;

    fn sample_response() -> Value {
        json!({
            "response": {
                "status": "ok",
                "total": 2,
                "results": [
                    {
                        "id": "technology/2023/11/21/article1",
                        "webPublicationDate": "2023-11-21T12:00:00Z",
                        "webTitle": "Test Article 1",
                        "webUrl": "https://www.theguardian.com/test-article-1",
                        "fields": { "bodyText": "This is the body text of test article 1. ".repeat(100) }
                    },
                    {
                        "id": "technology/2023/11/20/article2",
                        "webPublicationDate": "2023-11-20T12:00:00Z",
                        "webTitle": "Test Article 2",
                        "webUrl": "https://www.theguardian.com/test-article-2",
                        "fields": { "bodyText": "short body" }
                    }
                ]
            }
        })
    }

    fn with_body(body: Field<String>) -> RawArticle {
        RawArticle {
            web_title: Some("Title".to_string()),
            fields: Some(RawFields { body_text: body }),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_top_level_fields_become_null() {
        let article = normalize(&RawArticle::default());
        assert_eq!(article.web_publication_date, None);
        assert_eq!(article.web_title, None);
        assert_eq!(article.web_url, None);
        assert!(article.content_preview.is_missing());
    }

    #[test]
    fn test_long_body_is_truncated_to_1000_chars() {
        let article = normalize(&with_body(Field::Value("x".repeat(2500))));
        match article.content_preview {
            Field::Value(preview) => assert_eq!(preview.chars().count(), 1000),
            other => panic!("unexpected preview: {:?}", other),
        }
    }

    #[test]
    fn test_short_body_is_kept_exactly() {
        let article = normalize(&with_body(Field::Value("short body".to_string())));
        assert_eq!(article.content_preview, Field::Value("short body".to_string()));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let body = "é".repeat(1200);
        let article = normalize(&with_body(Field::Value(body)));
        let preview = article.content_preview.into_option().unwrap();
        assert_eq!(preview.chars().count(), 1000);
        assert_eq!(preview.len(), 2000);
    }

    #[test]
    fn test_empty_body_gives_empty_preview_not_null() {
        let article = normalize(&with_body(Field::Value(String::new())));
        assert_eq!(article.content_preview, Field::Value(String::new()));
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["contentPreview"], "");
    }

    #[test]
    fn test_null_body_gives_null_preview() {
        let article = normalize(&with_body(Field::Null));
        assert_eq!(article.content_preview, Field::Null);
        let value = serde_json::to_value(&article).unwrap();
        assert!(value.as_object().unwrap().contains_key("contentPreview"));
        assert!(value["contentPreview"].is_null());
    }

    #[test]
    fn test_fields_without_body_omit_preview() {
        let article = normalize(&with_body(Field::Missing));
        let value = serde_json::to_value(&article).unwrap();
        assert!(!value.as_object().unwrap().contains_key("contentPreview"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = with_body(Field::Value("body".to_string()));
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_process_articles_preserves_order() {
        let articles = process_articles(&sample_response()).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].web_title.as_deref(), Some("Test Article 1"));
        assert_eq!(articles[1].web_title.as_deref(), Some("Test Article 2"));
        assert_eq!(articles[1].content_preview, Field::Value("short body".to_string()));
    }

    #[test]
    fn test_missing_results_path_is_empty() {
        assert!(process_articles(&json!({})).unwrap().is_empty());
        assert!(process_articles(&json!({ "response": {} })).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_record_aborts_batch() {
        let response = json!({
            "response": {
                "results": [
                    { "webTitle": "fine" },
                    { "webTitle": 42 }
                ]
            }
        });
        let err = process_articles(&response).unwrap_err();
        assert!(matches!(err, Error::ArticleProcessing(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_non_array_results_is_an_error() {
        let err = process_articles(&json!({ "response": { "results": "nope" } })).unwrap_err();
        assert!(matches!(err, Error::ArticleProcessing(_)));
    }
}
