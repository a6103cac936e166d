use pixshare_shared::protocol::{
    DeleteMessageRequest, EditMessageRequest, ListMessagesRequest, SendMessageRequest,
};
use pixshare_shared::{Ack, ChatMessage};

use super::non_blank;
use crate::api::ApiClient;
use crate::error::ApiResponse;
use crate::request::HttpClient;
use crate::storage::Storage;

/// 聊天室消息
///
/// 列表接口每次返回全部消息，轮询时整体替换。
pub struct ChatService<'a, C, S> {
    api: &'a ApiClient<C, S>,
}

impl<'a, C: HttpClient, S: Storage> ChatService<'a, C, S> {
    pub(super) fn new(api: &'a ApiClient<C, S>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResponse<Vec<ChatMessage>> {
        self.api
            .send(&ListMessagesRequest)
            .await
            .map_err(|e| e.in_op("chat.list"))
    }

    pub async fn send(&self, text: &str) -> ApiResponse<Ack> {
        let text = non_blank(text, "message")?;
        let username = self
            .api
            .require_username()
            .map_err(|e| e.in_op("chat.send"))?;

        self.api
            .send(&SendMessageRequest {
                username: username.clone(),
                text,
            })
            .await
            .map_err(|e| e.in_op_with("chat.send", username))
    }

    pub async fn edit(&self, message_id: &str, text: &str) -> ApiResponse<Ack> {
        let updated_text = non_blank(text, "message")?;
        self.api
            .send(&EditMessageRequest {
                message_id: message_id.to_string(),
                updated_text,
            })
            .await
            .map_err(|e| e.in_op_with("chat.edit", message_id))
    }

    pub async fn delete(&self, message_id: &str) -> ApiResponse<Ack> {
        self.api
            .send(&DeleteMessageRequest {
                message_id: message_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("chat.delete", message_id))
    }
}
