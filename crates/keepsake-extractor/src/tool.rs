//! The `store_memories` tool contract
//!
//! A single fixed capability the model may invoke at most once per request.
//! The declaration is passed verbatim with every request; the description
//! tells the model that declining to call is the expected, common outcome.

use keepsake_llm::{FunctionDeclaration, Tool};
use serde_json::json;

/// Name of the extraction tool; the validator matches on this exactly
pub const TOOL_NAME: &str = "store_memories";

/// Build the `store_memories` function declaration
///
/// Accepts one `memories` parameter: an array of objects each requiring
/// `content` (string), `category` (five-value enum), and `importance`
/// (integer).
pub fn store_memories_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: TOOL_NAME.to_string(),
        description: "Store memorable facts about the user. \
                      Only call this if there are facts worth remembering. \
                      Most conversations have nothing memorable \u{2014} that's fine, \
                      just don't call this tool."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "memories": {
                    "type": "array",
                    "description": "List of memorable facts to store",
                    "items": {
                        "type": "object",
                        "properties": {
                            "content": {
                                "type": "string",
                                "description": "The fact in third person, e.g. \
                                                'User's brother Mike works at Google'"
                            },
                            "category": {
                                "type": "string",
                                "enum": [
                                    "identity",
                                    "preference",
                                    "context",
                                    "relationship",
                                    "surprise"
                                ],
                                "description": "identity=core facts, preference=likes/dislikes, \
                                                context=current projects/problems, \
                                                relationship=emotional moments, \
                                                surprise=unusual/noteworthy"
                            },
                            "importance": {
                                "type": "integer",
                                "description": "1-5 scale: 5=core identity, 1=minor detail"
                            }
                        },
                        "required": ["content", "category", "importance"]
                    }
                }
            },
            "required": ["memories"]
        }),
    }
}

/// The declaration wrapped for the request's `tools` section
pub(crate) fn extraction_tool() -> Tool {
    Tool {
        function_declarations: vec![store_memories_declaration()],
    }
}
