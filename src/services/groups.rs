use pixshare_shared::protocol::{
    AddMemberRequest, CreateGroupRequest, DeleteGroupRequest, GetGroupRequest,
    GroupMembersRequest, ListGroupsRequest, MembershipRequest, RemoveMemberRequest,
    UpdateGroupRequest,
};
use pixshare_shared::{Ack, CreateGroupData, Created, Group, UpdateGroupData, User, UsernameBody};

use super::non_blank;
use crate::api::ApiClient;
use crate::error::ApiResponse;
use crate::request::HttpClient;
use crate::storage::Storage;

pub struct GroupService<'a, C, S> {
    api: &'a ApiClient<C, S>,
}

impl<'a, C: HttpClient, S: Storage> GroupService<'a, C, S> {
    pub(super) fn new(api: &'a ApiClient<C, S>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResponse<Vec<Group>> {
        self.api
            .send(&ListGroupsRequest)
            .await
            .map_err(|e| e.in_op("groups.list"))
    }

    pub async fn get(&self, group_id: &str) -> ApiResponse<Group> {
        self.api
            .send(&GetGroupRequest {
                group_id: group_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("groups.get", group_id))
    }

    /// 创建群组，创建者为当前用户
    pub async fn create(&self, name: &str, description: &str) -> ApiResponse<Created> {
        let name = non_blank(name, "group name")?;
        let created_by = self
            .api
            .require_username()
            .map_err(|e| e.in_op_with("groups.create", name.clone()))?;

        self.api
            .send(&CreateGroupRequest {
                data: CreateGroupData {
                    name: name.clone(),
                    description: description.trim().to_string(),
                    created_by,
                },
            })
            .await
            .map_err(|e| e.in_op_with("groups.create", name))
    }

    pub async fn update(&self, group_id: &str, name: &str, description: &str) -> ApiResponse<Ack> {
        let data = UpdateGroupData {
            name: non_blank(name, "group name")?,
            description: description.trim().to_string(),
        };
        self.api
            .send(&UpdateGroupRequest {
                group_id: group_id.to_string(),
                data,
            })
            .await
            .map_err(|e| e.in_op_with("groups.update", group_id))
    }

    pub async fn delete(&self, group_id: &str) -> ApiResponse<Ack> {
        self.api
            .send(&DeleteGroupRequest {
                group_id: group_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("groups.delete", group_id))
    }

    pub async fn join(&self, group_id: &str) -> ApiResponse<Ack> {
        self.membership(group_id, true).await
    }

    pub async fn leave(&self, group_id: &str) -> ApiResponse<Ack> {
        self.membership(group_id, false).await
    }

    async fn membership(&self, group_id: &str, join: bool) -> ApiResponse<Ack> {
        let op = if join { "groups.join" } else { "groups.leave" };
        let username = self
            .api
            .require_username()
            .map_err(|e| e.in_op_with(op, group_id))?;

        self.api
            .send(&MembershipRequest {
                group_id: group_id.to_string(),
                username,
                join,
            })
            .await
            .map_err(|e| e.in_op_with(op, group_id))
    }

    pub async fn add_member(&self, group_id: &str, username: &str) -> ApiResponse<Ack> {
        let username = non_blank(username, "username")?;
        self.api
            .send(&AddMemberRequest {
                group_id: group_id.to_string(),
                member: UsernameBody { username },
            })
            .await
            .map_err(|e| e.in_op_with("groups.add_member", group_id))
    }

    pub async fn members(&self, group_id: &str) -> ApiResponse<Vec<User>> {
        self.api
            .send(&GroupMembersRequest {
                group_id: group_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("groups.members", group_id))
    }

    pub async fn remove_member(&self, group_id: &str, username: &str) -> ApiResponse<Ack> {
        self.api
            .send(&RemoveMemberRequest {
                group_id: group_id.to_string(),
                username: username.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("groups.remove_member", format!("{}/{}", group_id, username)))
    }
}
