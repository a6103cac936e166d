use pixshare_shared::protocol::{MarkNotificationReadRequest, UserNotificationsRequest};
use pixshare_shared::{Ack, Notification};

use crate::api::ApiClient;
use crate::error::ApiResponse;
use crate::request::HttpClient;
use crate::storage::Storage;

pub struct NotificationService<'a, C, S> {
    api: &'a ApiClient<C, S>,
}

impl<'a, C: HttpClient, S: Storage> NotificationService<'a, C, S> {
    pub(super) fn new(api: &'a ApiClient<C, S>) -> Self {
        Self { api }
    }

    /// 当前用户的通知
    pub async fn mine(&self) -> ApiResponse<Vec<Notification>> {
        let username = self
            .api
            .require_username()
            .map_err(|e| e.in_op("notifications.mine"))?;
        self.for_user(&username).await
    }

    pub async fn for_user(&self, username: &str) -> ApiResponse<Vec<Notification>> {
        self.api
            .send(&UserNotificationsRequest {
                username: username.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("notifications.for_user", username))
    }

    pub async fn mark_read(&self, notification_id: &str) -> ApiResponse<Ack> {
        self.api
            .send(&MarkNotificationReadRequest {
                notification_id: notification_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("notifications.mark_read", notification_id))
    }
}
