use std::{fmt, slice::Iter};

use chrono::NaiveDateTime;
use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::{Name, Property, SocialError, User, UserID, WorkoutLogID};

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostID,
    pub user_id: UserID,
    pub user_name: Name,
    pub kind: PostKind,
    pub content: String,
    pub tags: Vec<String>,
    pub workout_id: Option<WorkoutLogID>,
    likes: u32,
    comments: Vec<Comment>,
    created_at: NaiveDateTime,
}

impl Post {
    #[must_use]
    pub fn likes(&self) -> u32 {
        self.likes
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Content of a post to be published.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub kind: PostKind,
    pub content: String,
    pub tags: Vec<String>,
    pub workout_id: Option<WorkoutLogID>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostID(Uuid);

impl PostID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PostID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PostID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PostKind {
    Workout,
    Meal,
    Progress,
    PersonalRecord,
}

impl Property for PostKind {
    fn iter() -> Iter<'static, PostKind> {
        static KINDS: [PostKind; 4] = [
            PostKind::Workout,
            PostKind::Meal,
            PostKind::Progress,
            PostKind::PersonalRecord,
        ];
        KINDS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            PostKind::Workout => "Workout",
            PostKind::Meal => "Meal",
            PostKind::Progress => "Progress",
            PostKind::PersonalRecord => "PR",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: UserID,
    pub user_name: Name,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Posts of the community, most recently created first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SocialFeed {
    posts: Vec<Post>,
}

impl SocialFeed {
    pub const DEFAULT_FEED_LIMIT: usize = 20;

    pub fn create_post(
        &mut self,
        author: &User,
        draft: PostDraft,
        timestamp: NaiveDateTime,
    ) -> Result<&Post, SocialError> {
        let content = non_empty(&draft.content)?;
        let post = Post {
            id: Uuid::new_v4().into(),
            user_id: author.id,
            user_name: author.name.clone(),
            kind: draft.kind,
            content,
            tags: draft.tags,
            workout_id: draft.workout_id,
            likes: 0,
            comments: vec![],
            created_at: timestamp,
        };
        debug!("created post {:?} by {}", post.id, post.user_name);
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Returns the new number of likes.
    pub fn like(&mut self, post_id: PostID) -> Result<u32, SocialError> {
        let post = self.get_mut(post_id)?;
        post.likes = post.likes.saturating_add(1);
        Ok(post.likes)
    }

    /// Returns the new number of likes, which never drops below zero.
    pub fn unlike(&mut self, post_id: PostID) -> Result<u32, SocialError> {
        let post = self.get_mut(post_id)?;
        post.likes = post.likes.saturating_sub(1);
        Ok(post.likes)
    }

    pub fn add_comment(
        &mut self,
        post_id: PostID,
        author: &User,
        content: &str,
        timestamp: NaiveDateTime,
    ) -> Result<&Comment, SocialError> {
        let content = non_empty(content)?;
        let post = self.get_mut(post_id)?;
        post.comments.push(Comment {
            id: Uuid::new_v4(),
            user_id: author.id,
            user_name: author.name.clone(),
            content,
            created_at: timestamp,
        });
        Ok(&post.comments[post.comments.len() - 1])
    }

    pub fn delete_post(&mut self, post_id: PostID) -> Result<Post, SocialError> {
        let idx = self
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or(SocialError::NotFound(post_id))?;
        debug!("deleted post {post_id:?}");
        Ok(self.posts.remove(idx))
    }

    #[must_use]
    pub fn get(&self, post_id: PostID) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Post> {
        self.posts.iter().filter(move |p| p.has_tag(tag))
    }

    pub fn by_user(&self, user_id: UserID) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(move |p| p.user_id == user_id)
    }

    /// Newest posts first by creation time.
    #[must_use]
    pub fn feed(&self, limit: usize) -> Vec<&Post> {
        let mut posts = self.posts.iter().collect::<Vec<_>>();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        posts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn get_mut(&mut self, post_id: PostID) -> Result<&mut Post, SocialError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(SocialError::NotFound(post_id))
    }
}

fn non_empty(content: &str) -> Result<String, SocialError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(SocialError::EmptyContent);
    }
    Ok(content.to_string())
}
