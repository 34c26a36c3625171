use super::*;

#[test]
fn test_get_selection_wire_shape() {
    let json = serde_json::to_value(&AgentRequest::GetSelection).unwrap();
    assert_eq!(json["action"], "getSelection");
}

#[test]
fn test_paste_text_wire_shape() {
    let request = AgentRequest::PasteText {
        text: "hello".to_string(),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["action"], "pasteText");
    assert_eq!(json["text"], "hello");
}

#[test]
fn test_paste_image_uses_camel_case_data_url() {
    let request = AgentRequest::PasteImage {
        data_url: "data:image/png;base64,AAAA".to_string(),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["action"], "pasteImage");
    assert_eq!(json["dataUrl"], "data:image/png;base64,AAAA");
    assert!(json.get("data_url").is_none());
}

#[test]
fn test_agent_request_roundtrip() {
    let original = AgentRequest::StartCapture;
    let json = serde_json::to_string(&original).unwrap();
    let parsed: AgentRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_selection_response_wire_shape() {
    let response = AgentResponse::Selection {
        text: "picked".to_string(),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "text": "picked" }));
}

#[test]
fn test_paste_response_wire_shape() {
    let response = AgentResponse::Paste { success: true };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true }));
}

#[test]
fn test_capture_response_wire_shape() {
    let response = AgentResponse::Capture {
        status: CaptureStatus::Started,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "status": "started" }));
}

#[test]
fn test_agent_response_accessors() {
    let selection = AgentResponse::Selection {
        text: "abc".to_string(),
    };
    assert_eq!(selection.selection_text(), Some("abc"));
    assert_eq!(selection.paste_success(), None);

    let paste = AgentResponse::Paste { success: false };
    assert_eq!(paste.paste_success(), Some(false));
    assert_eq!(paste.selection_text(), None);
}

#[test]
fn test_agent_response_untagged_roundtrip() {
    let original = AgentResponse::Paste { success: true };
    let json = serde_json::to_string(&original).unwrap();
    let parsed: AgentResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_get_last_tab_id_omits_absent_exclusion() {
    let request = HostRequest::GetLastTabId {
        exclude_tab_id: None,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "action": "getLastTabId" }));
}

#[test]
fn test_get_last_tab_id_with_exclusion() {
    let request = HostRequest::GetLastTabId {
        exclude_tab_id: Some(7),
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["action"], "getLastTabId");
    assert_eq!(json["excludeTabId"], 7);
}

#[test]
fn test_host_response_wire_shape() {
    let response = HostResponse::LastTabId { tab_id: Some(42) };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "tabId": 42 }));

    let empty = HostResponse::LastTabId { tab_id: None };
    let json = serde_json::to_value(&empty).unwrap();
    assert_eq!(json, serde_json::json!({ "tabId": null }));
}

#[test]
fn test_capture_selected_notification_wire_shape() {
    let notification = Notification::CaptureSelected {
        area: CaptureArea {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
            device_pixel_ratio: 2.0,
        },
    };
    let json = serde_json::to_value(&notification).unwrap();
    assert_eq!(json["action"], "captureSelected");
    assert_eq!(json["area"]["x"], 10.0);
    assert_eq!(json["area"]["devicePixelRatio"], 2.0);
}

#[test]
fn test_notification_roundtrip() {
    let original = Notification::CaptureSelected {
        area: CaptureArea {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 50.0,
            device_pixel_ratio: 1.0,
        },
    };
    let json = serde_json::to_string(&original).unwrap();
    let parsed: Notification = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}
