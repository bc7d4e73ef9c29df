use std::sync::Arc;

use chrono::Utc;
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::RecordError,
    models::discussion::{seed_posts, Author, NewPost, NewReply, Post, Reply},
    storage::{read_json, write_json, DocumentStore, StorageError},
};

const DISCUSSION_COLLECTION: &str = "discussion";
const DISCUSSION_KEY: &str = "posts";

/// Community discussion board shared by every user, newest thread first.
pub struct DiscussionBoard {
    store: Arc<dyn DocumentStore>,
    posts: RwLock<Vec<Post>>,
}

impl DiscussionBoard {
    /// Reads the stored threads, falling back to the welcome threads.
    pub async fn open(store: Arc<dyn DocumentStore>) -> Result<Self, StorageError> {
        let posts = match read_json(store.as_ref(), DISCUSSION_COLLECTION, DISCUSSION_KEY).await? {
            Some(posts) => posts,
            None => {
                info!("no stored discussion threads, using the welcome threads");
                seed_posts(Utc::now())
            }
        };
        Ok(Self {
            store,
            posts: RwLock::new(posts),
        })
    }

    pub async fn list(&self) -> Vec<Post> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts
    }

    pub async fn get(&self, id: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn create(&self, author: Author, new_post: NewPost) -> Result<Post, RecordError> {
        let post = new_post.validate(Uuid::new_v4().to_string(), author)?;
        let mut posts = self.posts.write().await;
        let mut next = posts.clone();
        next.insert(0, post.clone());
        write_json(self.store.as_ref(), DISCUSSION_COLLECTION, DISCUSSION_KEY, &next).await?;
        *posts = next;
        info!("'{}' started thread '{}'", post.author.username, post.title);
        Ok(post)
    }

    /// Appends a reply to the thread and returns the whole thread.
    pub async fn reply(
        &self,
        post_id: &str,
        author: Author,
        new_reply: NewReply,
    ) -> Result<Post, RecordError> {
        let reply: Reply = new_reply.validate(Uuid::new_v4().to_string(), author)?;
        let mut posts = self.posts.write().await;
        let mut next = posts.clone();
        let post = next
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| RecordError::NotFound {
                kind: "post",
                id: post_id.to_string(),
            })?;
        post.replies.push(reply);
        let updated = post.clone();
        write_json(self.store.as_ref(), DISCUSSION_COLLECTION, DISCUSSION_KEY, &next).await?;
        *posts = next;
        Ok(updated)
    }
}
