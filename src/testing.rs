//! Scripted chat model shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::rchain::ai::AIMessage;
use crate::rchain::chat_models::{ChatMessage, ChatModel};
use crate::rchain::provider::ProviderError;
use crate::rchain::tools::ToolDefinition;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub with_tools: bool,
}

/// Replays canned replies in order; runs out with `EmptyResponse`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    with_tools: bool,
    replies: Rc<RefCell<VecDeque<AIMessage>>>,
    requests: Rc<RefCell<Vec<RecordedRequest>>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<AIMessage>) -> Self {
        Self {
            with_tools: false,
            replies: Rc::new(RefCell::new(replies.into())),
            requests: Rc::default(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

impl ChatModel for ScriptedModel {
    fn bind_tools(&self, tools: Vec<ToolDefinition>) -> Self {
        let mut bound = self.clone();
        bound.with_tools = !tools.is_empty();
        bound
    }

    fn invoke_messages(&self, messages: &[ChatMessage]) -> Result<AIMessage, ProviderError> {
        self.requests.borrow_mut().push(RecordedRequest {
            messages: messages.to_vec(),
            with_tools: self.with_tools,
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or(ProviderError::EmptyResponse)
    }
}
