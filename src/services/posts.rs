use pixshare_shared::protocol::{
    AddCommentRequest, CreatePostRequest, DeletePostRequest, GetPostRequest, GroupPostsRequest,
    LikePostRequest, ListPostsRequest, UpdatePostRequest,
};
use pixshare_shared::{Ack, CommentBody, CreatePostData, Post, UpdatePostData};

use super::non_blank;
use crate::api::ApiClient;
use crate::error::ApiResponse;
use crate::request::HttpClient;
use crate::storage::Storage;

pub struct PostService<'a, C, S> {
    api: &'a ApiClient<C, S>,
}

impl<'a, C: HttpClient, S: Storage> PostService<'a, C, S> {
    pub(super) fn new(api: &'a ApiClient<C, S>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ApiResponse<Vec<Post>> {
        self.api
            .send(&ListPostsRequest)
            .await
            .map_err(|e| e.in_op("posts.list"))
    }

    pub async fn get(&self, post_id: &str) -> ApiResponse<Post> {
        self.api
            .send(&GetPostRequest {
                post_id: post_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("posts.get", post_id))
    }

    pub async fn by_group(&self, group_id: &str) -> ApiResponse<Vec<Post>> {
        self.api
            .send(&GroupPostsRequest {
                group_id: group_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("posts.by_group", group_id))
    }

    /// 某个作者的帖子
    ///
    /// 服务端没有按作者过滤的接口，取全部列表后在本地筛选。
    pub async fn by_author(&self, username: &str) -> ApiResponse<Vec<Post>> {
        let posts = self
            .list()
            .await
            .map_err(|e| e.in_op_with("posts.by_author", username))?;
        Ok(posts.into_iter().filter(|p| p.author == username).collect())
    }

    /// 发帖，`author` 为空时使用当前用户
    pub async fn create(&self, mut data: CreatePostData) -> ApiResponse<Post> {
        data.title = non_blank(&data.title, "title")?;
        if data.author.is_empty() {
            data.author = self
                .api
                .require_username()
                .map_err(|e| e.in_op("posts.create"))?;
        }

        self.api
            .send(&CreatePostRequest { data })
            .await
            .map_err(|e| e.in_op("posts.create"))
    }

    pub async fn update(&self, post_id: &str, mut data: UpdatePostData) -> ApiResponse<Ack> {
        data.title = non_blank(&data.title, "title")?;
        self.api
            .send(&UpdatePostRequest {
                post_id: post_id.to_string(),
                data,
            })
            .await
            .map_err(|e| e.in_op_with("posts.update", post_id))
    }

    pub async fn delete(&self, post_id: &str) -> ApiResponse<Ack> {
        self.api
            .send(&DeletePostRequest {
                post_id: post_id.to_string(),
            })
            .await
            .map_err(|e| e.in_op_with("posts.delete", post_id))
    }

    pub async fn like(&self, post_id: &str) -> ApiResponse<Ack> {
        self.set_like(post_id, true).await
    }

    pub async fn unlike(&self, post_id: &str) -> ApiResponse<Ack> {
        self.set_like(post_id, false).await
    }

    async fn set_like(&self, post_id: &str, like: bool) -> ApiResponse<Ack> {
        let op = if like { "posts.like" } else { "posts.unlike" };
        let username = self
            .api
            .require_username()
            .map_err(|e| e.in_op_with(op, post_id))?;

        self.api
            .send(&LikePostRequest {
                post_id: post_id.to_string(),
                username,
                like,
            })
            .await
            .map_err(|e| e.in_op_with(op, post_id))
    }

    /// 以当前用户身份评论
    pub async fn comment(&self, post_id: &str, text: &str) -> ApiResponse<Ack> {
        let text = non_blank(text, "comment")?;
        let username = self
            .api
            .require_username()
            .map_err(|e| e.in_op_with("posts.comment", post_id))?;

        self.api
            .send(&AddCommentRequest {
                post_id: post_id.to_string(),
                comment: CommentBody { username, text },
            })
            .await
            .map_err(|e| e.in_op_with("posts.comment", post_id))
    }
}
