use serde::{Deserialize, Serialize};

use crate::DEFAULT_MODEL;

const AGENT_NAME: &str = "file-search-agent";
const AGENT_DESCRIPTION: &str =
    "Answers questions using documents indexed in Azure AI Search.";
const AGENT_INSTRUCTIONS: &str = "You are a helpful assistant. Search the \
     knowledge base through the file_search tool before answering so \
     responses stay grounded in indexed content.";

// ------------------------------
// Types received from the server
// ------------------------------

/// A conversation session created for an agent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Session {
    pub id: String,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Tool {
    r#type: &'static str,
}

/// Overrides for indexes whose schemas use custom field names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldsMapping {
    pub content_field: String,
    pub title_field: String,
    pub url_field: String,
    pub vector_fields: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FileSearchResource {
    connection_id: String,
    index_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields_mapping: Option<FieldsMapping>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct ToolResources {
    file_search: Vec<FileSearchResource>,
}

/// The payload for creating an agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentDefinition {
    name: &'static str,
    description: &'static str,
    instructions: &'static str,
    model: String,
    tools: Vec<Tool>,
    tool_resources: ToolResources,
}

impl AgentDefinition {
    /// Creates a definition for an agent that answers from documents in the
    /// given Azure AI Search index, reached through the given connection.
    pub fn file_search<S: Into<String>>(connection_id: S, index_name: S) -> Self {
        Self {
            name: AGENT_NAME,
            description: AGENT_DESCRIPTION,
            instructions: AGENT_INSTRUCTIONS,
            model: DEFAULT_MODEL.to_string(),
            tools: vec![Tool {
                r#type: "file_search",
            }],
            tool_resources: ToolResources {
                file_search: vec![FileSearchResource {
                    connection_id: connection_id.into(),
                    index_name: index_name.into(),
                    fields_mapping: None,
                }],
            },
        }
    }

    /// Overrides the model deployment the agent is bound to.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Sets a field-name mapping for the search resource. Only needed for
    /// indexes with non-default schemas.
    #[inline]
    pub fn with_fields_mapping(mut self, mapping: FieldsMapping) -> Self {
        // The definition always carries exactly one file_search resource.
        self.tool_resources.file_search[0].fields_mapping = Some(mapping);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum InputMessage {
    User { content: Vec<ContentBlock> },
}

/// The payload for requesting a response within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResponseRequest {
    input: Vec<InputMessage>,
}

/// Builds the request payload for a single user turn.
pub fn user_message(text: &str) -> ResponseRequest {
    ResponseRequest {
        input: vec![InputMessage::User {
            content: vec![ContentBlock::Text {
                text: text.to_owned(),
            }],
        }],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_message_payload() {
        let payload = serde_json::to_value(user_message("hello")).unwrap();
        assert_eq!(
            payload,
            json!({
                "input": [
                    {
                        "role": "user",
                        "content": [
                            {"type": "text", "text": "hello"}
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_agent_definition_payload() {
        let definition = AgentDefinition::file_search("conn-1", "docs-index");
        let payload = serde_json::to_value(&definition).unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "file-search-agent",
                "description":
                    "Answers questions using documents indexed in Azure AI Search.",
                "instructions": AGENT_INSTRUCTIONS,
                "model": "gpt-4o-mini",
                "tools": [
                    {"type": "file_search"}
                ],
                "tool_resources": {
                    "file_search": [
                        {
                            "connection_id": "conn-1",
                            "index_name": "docs-index"
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_model_override() {
        let definition = AgentDefinition::file_search("conn-1", "docs-index")
            .with_model("gpt-4o");
        let payload = serde_json::to_value(&definition).unwrap();
        assert_eq!(payload["model"], "gpt-4o");
    }

    #[test]
    fn test_fields_mapping_serialized_only_when_set() {
        let definition = AgentDefinition::file_search("conn-1", "docs-index");
        let payload = serde_json::to_value(&definition).unwrap();
        let resource = &payload["tool_resources"]["file_search"][0];
        assert!(resource.get("fields_mapping").is_none());

        let definition = AgentDefinition::file_search("conn-1", "docs-index")
            .with_fields_mapping(FieldsMapping {
                content_field: "content".to_owned(),
                title_field: "title".to_owned(),
                url_field: "sourceurl".to_owned(),
                vector_fields: vec!["content_vector".to_owned()],
            });
        let payload = serde_json::to_value(&definition).unwrap();
        let mapping = &payload["tool_resources"]["file_search"][0]["fields_mapping"];
        assert_eq!(mapping["url_field"], "sourceurl");
    }
}
