//! Conversions between Crammer core types and the Gemini wire format.

use crate::gemini::dto::*;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use crammer_audio::decode_data_uri_payload;
use crammer_core::{
    GenerateRequest, GenerateResponse, Input, Message, Modality, Output, Role, ToolCall,
};
use crammer_error::{GenerationError, GenerationErrorKind};
use serde_json::{Value, json};

/// Build the wire request from a core request.
pub fn to_gemini_request(request: &GenerateRequest) -> GeminiRequest {
    let mut contents = Vec::new();
    let mut system_texts = Vec::new();

    for message in &request.messages {
        match message.role() {
            Role::System => {
                for input in message.content() {
                    if let Input::Text(text) = input {
                        system_texts.push(text.clone());
                    }
                }
            }
            role => contents.push(to_content(*role, message)),
        }
    }

    let system_instruction = if system_texts.is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(system_texts.join("\n")),
                ..GeminiPart::default()
            }],
        })
    };

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(vec![GeminiTool {
            function_declarations: request
                .tools
                .iter()
                .map(|tool| GeminiFunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.input_schema.to_response_schema(),
                })
                .collect(),
        }])
    };

    GeminiRequest {
        contents,
        system_instruction,
        tools,
        generation_config: to_generation_config(request),
    }
}

fn to_content(role: Role, message: &Message) -> GeminiContent {
    let parts = message
        .content()
        .iter()
        .map(|input| match input {
            Input::Text(text) => GeminiPart {
                text: Some(text.clone()),
                ..GeminiPart::default()
            },
            Input::ToolCall(call) => GeminiPart {
                function_call: Some(GeminiFunctionCall {
                    name: call.name.clone(),
                    args: call.arguments.clone(),
                }),
                ..GeminiPart::default()
            },
            Input::ToolResult { name, content } => GeminiPart {
                function_response: Some(GeminiFunctionResponse {
                    name: name.clone(),
                    response: ensure_object(content.clone()),
                }),
                ..GeminiPart::default()
            },
        })
        .collect();

    GeminiContent {
        role: Some(
            match role {
                Role::Assistant => "model",
                _ => "user",
            }
            .to_string(),
        ),
        parts,
    }
}

/// The wire format requires function responses to be objects.
fn ensure_object(value: Value) -> Value {
    if value.is_object() {
        value
    } else {
        json!({ "result": value })
    }
}

fn to_generation_config(request: &GenerateRequest) -> Option<GeminiGenerationConfig> {
    let audio_config = request
        .config
        .as_ref()
        .filter(|config| config.response_modalities.contains(&Modality::Audio));

    let mut out = GeminiGenerationConfig {
        temperature: request.temperature,
        max_output_tokens: request.max_tokens,
        ..GeminiGenerationConfig::default()
    };

    // Structured output and audio modality are mutually exclusive on
    // the wire; an audio request carries voice configuration instead.
    if let Some(config) = audio_config {
        out.response_modalities = Some(
            config
                .response_modalities
                .iter()
                .map(|modality| match modality {
                    Modality::Text => "TEXT".to_string(),
                    Modality::Audio => "AUDIO".to_string(),
                })
                .collect(),
        );
        if let Some(voice) = &config.voice {
            out.speech_config = Some(GeminiSpeechConfig {
                voice_config: GeminiVoiceConfig {
                    prebuilt_voice_config: GeminiPrebuiltVoice {
                        voice_name: voice.clone(),
                    },
                },
            });
        }
    } else if let Some(schema) = &request.output_schema {
        out.response_mime_type = Some("application/json".to_string());
        out.response_schema = Some(schema.to_response_schema());
    }

    if out == GeminiGenerationConfig::default() {
        None
    } else {
        Some(out)
    }
}

/// Translate a wire response into the unified response object.
///
/// Mechanical translation only: an empty candidate list becomes an
/// empty output list, and the retry loop decides what that means.
pub fn from_gemini_response(response: GeminiResponse) -> Result<GenerateResponse, GenerationError> {
    let mut outputs = Vec::new();

    if let Some(candidate) = response.candidates.into_iter().next()
        && let Some(content) = candidate.content
    {
        let mut texts = Vec::new();
        let mut calls = Vec::new();

        for part in content.parts {
            if let Some(text) = part.text {
                texts.push(text);
            }
            if let Some(call) = part.function_call {
                calls.push(ToolCall {
                    id: None,
                    name: call.name,
                    arguments: call.args,
                });
            }
            if let Some(inline) = part.inline_data {
                outputs.push(Output::Audio {
                    mime: Some(inline.mime_type),
                    data: decode_inline_data(&inline.data)?,
                });
            }
        }

        if !calls.is_empty() {
            outputs.push(Output::ToolCalls(calls));
        }
        if !texts.is_empty() {
            outputs.push(Output::Text(texts.join("\n")));
        }
    }

    Ok(GenerateResponse { outputs })
}

/// Inline payloads are plain base64, but some delivery paths hand back
/// a full data URI; accept both.
fn decode_inline_data(data: &str) -> Result<Vec<u8>, GenerationError> {
    if data.starts_with("data:") {
        return decode_data_uri_payload(data).map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidResponse(e.to_string()))
        });
    }
    STANDARD.decode(data).map_err(|e| {
        GenerationError::new(GenerationErrorKind::InvalidResponse(format!(
            "inline data was not valid base64: {e}"
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crammer_core::GenerationConfig;
    use crammer_schema::{Field, Schema};

    #[test]
    fn system_messages_become_system_instruction() {
        let request = GenerateRequest {
            messages: vec![
                Message::system("You are a revision tutor."),
                Message::user("Explain mitosis."),
            ],
            ..GenerateRequest::default()
        };
        let wire = to_gemini_request(&request);
        assert_eq!(wire.contents.len(), 1);
        assert_eq!(wire.contents[0].role.as_deref(), Some("user"));
        let system = wire.system_instruction.unwrap();
        assert_eq!(
            system.parts[0].text.as_deref(),
            Some("You are a revision tutor.")
        );
    }

    #[test]
    fn structured_requests_carry_response_schema() {
        let schema = Schema::object([Field::required("summary", Schema::string())]);
        let request = GenerateRequest::prompt("Summarise photosynthesis.", schema);
        let wire = to_gemini_request(&request);
        let config = wire.generation_config.unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
        assert!(config.response_schema.is_some());
        assert!(config.speech_config.is_none());
    }

    #[test]
    fn audio_requests_carry_voice_not_schema() {
        let request = GenerateRequest {
            messages: vec![Message::user("Read this aloud.")],
            output_schema: Some(Schema::string()),
            config: Some(GenerationConfig::speech("Algenib")),
            ..GenerateRequest::default()
        };
        let wire = to_gemini_request(&request);
        let config = wire.generation_config.unwrap();
        assert_eq!(config.response_modalities, Some(vec!["AUDIO".to_string()]));
        assert!(config.response_schema.is_none());
        let voice = config.speech_config.unwrap();
        assert_eq!(voice.voice_config.prebuilt_voice_config.voice_name, "Algenib");
    }

    #[test]
    fn tool_transcript_round_trips_to_parts() {
        let call = ToolCall {
            id: None,
            name: "search_videos".to_string(),
            arguments: json!({ "query": "cold war" }),
        };
        let request = GenerateRequest {
            messages: vec![
                Message::user("Plan a lesson."),
                Message::new(Role::Assistant, vec![Input::ToolCall(call)]),
                Message::new(Role::User, vec![Input::ToolResult {
                    name: "search_videos".to_string(),
                    content: json!({ "url": "https://example.com/v" }),
                }]),
            ],
            ..GenerateRequest::default()
        };
        let wire = to_gemini_request(&request);
        assert_eq!(wire.contents.len(), 3);
        assert_eq!(wire.contents[1].role.as_deref(), Some("model"));
        assert!(wire.contents[1].parts[0].function_call.is_some());
        let response = wire.contents[2].parts[0].function_response.as_ref().unwrap();
        assert_eq!(response.response["url"], "https://example.com/v");
    }

    #[test]
    fn function_call_parts_become_tool_calls() {
        let response = GeminiResponse {
            candidates: vec![GeminiCandidate {
                content: Some(GeminiContent {
                    role: Some("model".to_string()),
                    parts: vec![GeminiPart {
                        function_call: Some(GeminiFunctionCall {
                            name: "search_videos".to_string(),
                            args: json!({ "query": "mitosis" }),
                        }),
                        ..GeminiPart::default()
                    }],
                }),
                finish_reason: None,
            }],
        };
        let unified = from_gemini_response(response).unwrap();
        assert!(matches!(
            &unified.outputs[0],
            Output::ToolCalls(calls) if calls[0].name == "search_videos"
        ));
    }

    #[test]
    fn inline_audio_is_decoded() {
        let response = GeminiResponse {
            candidates: vec![GeminiCandidate {
                content: Some(GeminiContent {
                    role: Some("model".to_string()),
                    parts: vec![GeminiPart {
                        inline_data: Some(GeminiInlineData {
                            mime_type: "audio/L16;codec=pcm;rate=24000".to_string(),
                            data: STANDARD.encode(b"pcm-bytes"),
                        }),
                        ..GeminiPart::default()
                    }],
                }),
                finish_reason: None,
            }],
        };
        let unified = from_gemini_response(response).unwrap();
        assert!(matches!(
            &unified.outputs[0],
            Output::Audio { data, .. } if data == b"pcm-bytes"
        ));
    }

    #[test]
    fn empty_candidates_become_empty_outputs() {
        let unified = from_gemini_response(GeminiResponse { candidates: vec![] }).unwrap();
        assert!(unified.outputs.is_empty());
    }
}
