use super::*;

#[test]
fn test_part_text() {
    let part = Part::Text {
        text: "Hello".to_string(),
    };
    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(json["text"], "Hello");
}

#[test]
fn test_part_inline_data() {
    let part = Part::InlineData {
        inline_data: InlineData {
            mime_type: "image/png".to_string(),
            data: "base64data".to_string(),
        },
    };
    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(json["inline_data"]["mime_type"], "image/png");
    assert_eq!(json["inline_data"]["data"], "base64data");
}

#[test]
fn test_content_text_constructor() {
    let content = Content::text("user", "Hello");
    assert_eq!(content.role, "user");
    assert_eq!(content.first_text(), Some("Hello"));
}

#[test]
fn test_first_text_skips_inline_data() {
    let content = Content {
        role: "model".to_string(),
        parts: vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: "image/png".to_string(),
                    data: "xx".to_string(),
                },
            },
            Part::Text {
                text: "after image".to_string(),
            },
        ],
    };
    assert_eq!(content.first_text(), Some("after image"));
}

#[test]
fn test_first_text_empty_parts() {
    let content = Content {
        role: "model".to_string(),
        parts: vec![],
    };
    assert_eq!(content.first_text(), None);
}

#[test]
fn test_generation_config_default() {
    let config = GenerationConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, "{}");
}

#[test]
fn test_generation_config_camel_case() {
    let config = GenerationConfig {
        temperature: Some(0.5),
        max_output_tokens: Some(1024),
    };
    let json = serde_json::to_value(&config).unwrap();
    assert!(json["temperature"].as_f64().unwrap() > 0.4);
    assert_eq!(json["maxOutputTokens"], 1024);
}

#[test]
fn test_generate_content_request() {
    let request = GenerateContentRequest {
        contents: vec![Content::text("user", "Hello")],
        generation_config: None,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert!(json["contents"].is_array());
    assert_eq!(json["contents"][0]["role"], "user");
    assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
    assert!(json.get("generationConfig").is_none());
}

#[test]
fn test_generate_content_response_deserialization() {
    let json = serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": "Hello!"}]
            },
            "finishReason": "STOP"
        }]
    });

    let response: GenerateContentResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.candidates[0].finish_reason, Some("STOP".to_string()));
    assert_eq!(response.candidates[0].content.first_text(), Some("Hello!"));
}

#[test]
fn test_generate_content_response_without_candidates() {
    let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(response.candidates.is_empty());
}

#[test]
fn test_model_info_supports_generation() {
    let model: ModelInfo = serde_json::from_value(serde_json::json!({
        "name": "models/gemini-2.0-flash",
        "supportedGenerationMethods": ["generateContent", "countTokens"]
    }))
    .unwrap();
    assert!(model.supports_generation());
    assert_eq!(model.short_name(), "gemini-2.0-flash");
}

#[test]
fn test_model_info_embedding_only() {
    let model: ModelInfo = serde_json::from_value(serde_json::json!({
        "name": "models/text-embedding-004",
        "supportedGenerationMethods": ["embedContent"]
    }))
    .unwrap();
    assert!(!model.supports_generation());
}

#[test]
fn test_model_info_without_methods() {
    let model: ModelInfo =
        serde_json::from_value(serde_json::json!({ "name": "models/odd" })).unwrap();
    assert!(!model.supports_generation());
}

#[test]
fn test_short_name_without_prefix() {
    let model: ModelInfo =
        serde_json::from_value(serde_json::json!({ "name": "gemini-pro" })).unwrap();
    assert_eq!(model.short_name(), "gemini-pro");
}

#[test]
fn test_gemini_error_deserialization() {
    let json = serde_json::json!({
        "error": {
            "code": 429,
            "message": "Rate limit exceeded",
            "status": "RESOURCE_EXHAUSTED"
        }
    });

    let error: GeminiError = serde_json::from_value(json).unwrap();
    assert_eq!(error.error.code, 429);
    assert_eq!(error.error.message, "Rate limit exceeded");
    assert_eq!(error.error.status, "RESOURCE_EXHAUSTED");
}
