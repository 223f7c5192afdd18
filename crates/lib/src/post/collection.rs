use std::{
    collections::HashMap,
    sync::{Arc, LockResult, Mutex, MutexGuard},
};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, error, info, warn};

use crate::fs;

use super::{slug_for_path, Post, ReadFromPathError};

// The only distinctions the reload logic cares about
#[derive(Debug, PartialEq)]
enum FsEvent {
    Rename,
    Edit,
    Create,
    Delete,
    Ignored,
    Unhandled(notify::EventKind),
}

impl From<notify::EventKind> for FsEvent {
    fn from(event_kind: notify::EventKind) -> Self {
        use notify::event::{
            AccessKind, AccessMode, CreateKind, DataChange, EventKind, ModifyKind, RemoveKind,
            RenameMode,
        };
        match event_kind {
            EventKind::Modify(ModifyKind::Name(
                RenameMode::Any | RenameMode::From | RenameMode::To,
            )) => Self::Rename,
            EventKind::Modify(ModifyKind::Data(DataChange::Content | DataChange::Any)) => {
                Self::Edit
            }
            EventKind::Remove(RemoveKind::File) => Self::Delete,
            EventKind::Create(CreateKind::File) => Self::Create,
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => Self::Ignored,
            unhandled => Self::Unhandled(unhandled),
        }
    }
}

/// Every post in a content directory, newest first.
#[derive(Debug)]
pub struct Collection {
    dir: Utf8PathBuf,
    include_drafts: bool,
    posts: Vec<Post>,
    /// Slug to the file it was read from.
    sources: HashMap<String, Utf8PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load post ({path}): {source}")]
    Post {
        path: Utf8PathBuf,
        source: ReadFromPathError,
    },
    #[error("Posts ({first}) and ({second}) share the slug {slug:?}")]
    DuplicateSlug {
        slug: String,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    },
}

/// Newest first; slug breaks ties so the order never depends on the
/// directory listing.
fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

impl Collection {
    pub fn load(dir: &Utf8Path, include_drafts: bool) -> Result<Self, Error> {
        let mut sources = HashMap::new();
        let mut posts = Vec::new();

        for path in fs::post_paths(dir)? {
            let post = match Post::read_from_path(&path) {
                Ok(post) => post,
                Err(source) => return Err(Error::Post { path, source }),
            };
            if let Some(first) = sources.get(&post.slug) {
                return Err(Error::DuplicateSlug {
                    slug: post.slug,
                    first: Utf8PathBuf::clone(first),
                    second: path,
                });
            }
            if post.draft && !include_drafts {
                debug!("Skipping draft ({path})");
                continue;
            }
            sources.insert(post.slug.clone(), path);
            posts.push(post);
        }

        sort_posts(&mut posts);

        info!("Loaded {} posts from {dir}", posts.len());

        Ok(Collection {
            dir: dir.to_owned(),
            include_drafts,
            posts,
            sources,
        })
    }

    #[must_use]
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        sort_posts(&mut posts);
        Collection {
            dir: Utf8PathBuf::new(),
            include_drafts: true,
            posts,
            sources: HashMap::new(),
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Drops the post read from `path`, if that file is where its slug
    /// currently comes from.
    fn remove_path(&mut self, path: &Utf8Path) -> bool {
        let Some(slug) = slug_for_path(path) else {
            return false;
        };
        if self.sources.get(&slug).map(Utf8PathBuf::as_path) != Some(path) {
            return false;
        }
        self.sources.remove(&slug);
        self.posts.retain(|post| post.slug != slug);
        true
    }

    fn upsert(&mut self, path: &Utf8Path, post: Post) {
        if let Some(first) = self.sources.get(&post.slug) {
            if first != path {
                warn!(
                    "Ignoring ({path}): its slug {:?} is already taken by ({first})",
                    post.slug
                );
                return;
            }
        }
        self.remove_path(path);
        if post.draft && !self.include_drafts {
            debug!("Skipping draft ({path})");
            return;
        }
        self.sources.insert(post.slug.clone(), path.to_owned());
        self.posts.push(post);
        sort_posts(&mut self.posts);
    }

    fn reload_path(&mut self, path: &Utf8Path) {
        match Post::read_from_path(path) {
            Ok(post) => {
                debug!("Reloaded post ({path})");
                self.upsert(path, post);
            }
            Err(err) => warn!("Couldn't load post ({path}), keeping previous version: {err}"),
        }
    }
}

impl Collection {
    fn process_rename_event(&mut self, path: &Utf8Path) {
        if path.exists() {
            self.reload_path(path);
        } else {
            self.remove_path(path);
        }
    }

    fn process_edit_event(&mut self, path: &Utf8Path) {
        self.reload_path(path);
    }

    fn process_removal_event(&mut self, path: &Utf8Path) {
        if !self.remove_path(path) {
            warn!("Couldn't find ({path}) in Remove event");
        }
    }

    fn process_create_event(&mut self, path: &Utf8Path) {
        self.reload_path(path);
    }
}

#[derive(Clone)]
pub struct ArcMutex(pub Arc<Mutex<Collection>>);

impl ArcMutex {
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self(Arc::new(Mutex::new(collection)))
    }

    pub fn lock(&self) -> LockResult<MutexGuard<'_, Collection>> {
        self.0.as_ref().lock()
    }
}

impl notify::EventHandler for ArcMutex {
    fn handle_event(&mut self, event: notify::Result<notify::Event>) {
        match event {
            Ok(notify::Event {
                kind,
                paths,
                attrs: _,
            }) => {
                let Some(path) = paths.last() else {
                    return;
                };
                let path = match Utf8PathBuf::try_from(path.clone()) {
                    Ok(path) => path,
                    Err(err) => {
                        warn!("Event path ({path:?}) was not UTF-8, ignoring it: {err}");
                        return;
                    }
                };
                if !fs::is_post_path(&path) {
                    return;
                }
                let mut collection = match self.lock() {
                    Ok(collection) => collection,
                    Err(err) => {
                        error!("Failed to lock posts during notify event: {err}");
                        return;
                    }
                };
                match FsEvent::from(kind) {
                    FsEvent::Rename => collection.process_rename_event(&path),
                    FsEvent::Edit => collection.process_edit_event(&path),
                    FsEvent::Delete => collection.process_removal_event(&path),
                    FsEvent::Create => collection.process_create_event(&path),
                    FsEvent::Ignored => (),
                    FsEvent::Unhandled(event) => debug!("unhandled watch event: {event:?}"),
                }
            }
            Err(err) => error!("watch error: {err:?}"),
        }
    }
}
