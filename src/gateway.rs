//! Two-phase tool round trip between the chat history and the theory tools.

use tracing::debug;

use crate::rchain::ai::AIMessage;
use crate::rchain::chat_models::{ChatMessage, ChatModel};
use crate::rchain::provider::ProviderError;
use crate::rchain::tools::ToolCall;
use crate::registry::{self, TheoryTool};

/// Answers the conversation so far.
///
/// The first request offers the theory tools. When the model asks for tools,
/// their results are recorded in `history` and a second request without tools
/// produces the answer. Provider failures propagate; tool failures do not.
pub fn respond<M: ChatModel>(
    model: &M,
    history: &mut Vec<ChatMessage>,
) -> Result<String, ProviderError> {
    let reply = model
        .bind_tools(TheoryTool::definitions())
        .invoke_messages(history)?;
    if reply.tool_calls.is_empty() {
        return Ok(reply.content);
    }

    record_tool_round(history, &reply.tool_calls);
    debug!(messages = history.len(), "requesting answer from tool results");
    let follow_up = model.invoke_messages(history)?;
    Ok(follow_up.content)
}

/// Executes every call in order, then appends the assistant echo followed by
/// one tool message per call.
pub fn record_tool_round(history: &mut Vec<ChatMessage>, calls: &[ToolCall]) {
    let results = calls
        .iter()
        .map(|call| (call, registry::dispatch(call)))
        .collect::<Vec<_>>();

    history.push(ChatMessage::assistant_from_ai(&AIMessage::requesting_tools(
        calls.to_vec(),
    )));
    for (call, result) in results {
        history.push(ChatMessage::tool_result(
            &call.id,
            &call.name,
            result.to_string(),
        ));
    }
}
