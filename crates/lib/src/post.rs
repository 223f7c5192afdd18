pub mod collection;

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use collection::Collection;

use crate::{date, slug};

/// A single blog entry: front matter metadata plus the markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub tags: Option<Vec<String>>,
    pub slug: String,
    #[serde(skip)]
    pub draft: bool,
    #[serde(skip)]
    pub body: String,
}

/// What listings send over the wire: everything but the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub formatted_date: String,
    pub tags: Vec<String>,
    pub slug: String,
}

impl From<&Post> for Summary {
    fn from(post: &Post) -> Self {
        Summary {
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date,
            formatted_date: date::format(&post.date),
            tags: post.tags().to_vec(),
            slug: post.slug.clone(),
        }
    }
}

#[derive(Deserialize)]
struct Frontmatter {
    title: String,
    description: String,
    date: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    draft: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Post has no front matter block")]
    MissingFrontmatter,
    #[error("Failed to parse front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Post title is empty")]
    EmptyTitle,
    #[error(transparent)]
    Date(#[from] date::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReadFromPathError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path has no file stem that makes a usable slug")]
    NoSlug,
    #[error(transparent)]
    Post(#[from] Error),
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}

/// Splits `---` fenced front matter from the body. Fences must be whole
/// lines; `\n` and `\r\n` endings are both accepted.
fn split_frontmatter(string: &str) -> Option<(&str, &str)> {
    let mut lines = string.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_fence(opening) || !opening.ends_with('\n') {
        return None;
    }

    let rest = &string[opening.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_fence(line) {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// The slug a post file is published under, derived from its file stem.
#[must_use]
pub fn slug_for_path(path: &Utf8Path) -> Option<String> {
    let slug = slug::slugify(path.file_stem()?);
    (!slug.is_empty()).then_some(slug)
}

impl Post {
    pub fn from_string(slug: String, string: &str) -> Result<Self, Error> {
        let Some((frontmatter, body)) = split_frontmatter(string) else {
            return Err(Error::MissingFrontmatter);
        };

        let frontmatter: Frontmatter = serde_yaml::from_str(frontmatter)?;

        if frontmatter.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        Ok(Post {
            title: frontmatter.title,
            description: frontmatter.description,
            date: date::parse(&frontmatter.date)?,
            tags: frontmatter.tags,
            slug,
            draft: frontmatter.draft,
            body: body.to_owned(),
        })
    }

    pub fn read_from_path(path: &Utf8Path) -> Result<Self, ReadFromPathError> {
        let slug = slug_for_path(path).ok_or(ReadFromPathError::NoSlug)?;
        let string = std::fs::read_to_string(path)?;
        let post = Post::from_string(slug, &string)?;
        Ok(post)
    }

    /// Tags of this post; empty when the front matter has none.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use camino::Utf8Path;

    use super::{slug_for_path, Error, Post, ReadFromPathError};

    macro_rules! s {
        ($v:literal) => {
            $v.to_string()
        };
    }

    #[test]
    fn from_string() {
        let post = Post::from_string(
            s!("hello-world"),
            "---\ntitle: Hello, world\ndescription: First post\ndate: 2024-03-07\ntags:\n  - meta\n  - rust\n---\nBody text\n",
        )
        .unwrap();

        assert_eq!("Hello, world", post.title);
        assert_eq!("First post", post.description);
        assert_eq!(
            chrono::Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap(),
            post.date
        );
        assert_eq!(Some(vec![s!("meta"), s!("rust")]), post.tags);
        assert_eq!("hello-world", post.slug);
        assert!(!post.draft);
        assert_eq!("Body text\n", post.body);
    }

    #[test]
    fn from_string_without_tags() {
        let post = Post::from_string(
            s!("b"),
            "---\ntitle: B\ndescription: ''\ndate: 2024-03-08\n---\n",
        )
        .unwrap();

        assert_eq!(None, post.tags);
        assert!(post.tags().is_empty());
        assert!(!post.has_tag("x"));
        assert_eq!("", post.body);
    }

    #[test]
    fn from_string_closing_fence_at_eof() {
        let post = Post::from_string(
            s!("c"),
            "---\ntitle: C\ndescription: d\ndate: 2024-03-08\ndraft: true\n---",
        )
        .unwrap();

        assert!(post.draft);
        assert_eq!("", post.body);
    }

    #[test]
    fn missing_frontmatter() {
        assert!(matches!(
            Post::from_string(s!("a"), "# Just markdown\n"),
            Err(Error::MissingFrontmatter)
        ));
        assert!(matches!(
            Post::from_string(s!("a"), "---\ntitle: never closed\n"),
            Err(Error::MissingFrontmatter)
        ));
    }

    #[test]
    fn empty_title() {
        assert!(matches!(
            Post::from_string(
                s!("a"),
                "---\ntitle: '  '\ndescription: d\ndate: 2024-03-08\n---\n"
            ),
            Err(Error::EmptyTitle)
        ));
    }

    #[test]
    fn invalid_date() {
        assert!(matches!(
            Post::from_string(
                s!("a"),
                "---\ntitle: A\ndescription: d\ndate: someday\n---\n"
            ),
            Err(Error::Date(_))
        ));
    }

    #[test]
    fn missing_required_field() {
        assert!(matches!(
            Post::from_string(s!("a"), "---\ntitle: A\ndate: 2024-03-08\n---\n"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn tags_are_case_sensitive() {
        let post = Post::from_string(
            s!("a"),
            "---\ntitle: A\ndescription: d\ndate: 2024-03-08\ntags: [Rust]\n---\n",
        )
        .unwrap();

        assert!(post.has_tag("Rust"));
        assert!(!post.has_tag("rust"));
        assert!(!post.has_tag(" Rust"));
    }

    #[test]
    fn fence_must_be_whole_line() {
        let post = Post::from_string(
            s!("a"),
            "---\ntitle: a---\ndescription: ends with ---\ndate: 2024-03-08\n---\nbody --- text\n---\nmore\n",
        )
        .unwrap();

        assert_eq!("a---", post.title);
        assert_eq!("ends with ---", post.description);
        assert_eq!("body --- text\n---\nmore\n", post.body);

        assert!(matches!(
            Post::from_string(s!("a"), "--- \ntitle: A\n---\n"),
            Err(Error::MissingFrontmatter)
        ));
    }

    #[test]
    fn from_string_crlf() {
        let post = Post::from_string(
            s!("a"),
            "---\r\ntitle: A\r\ndescription: d\r\ndate: 2024-03-08\r\ntags: [x]\r\n---\r\nBody\r\n",
        )
        .unwrap();

        assert_eq!("A", post.title);
        assert_eq!("d", post.description);
        assert_eq!(Some(vec![s!("x")]), post.tags);
        assert_eq!("Body\r\n", post.body);
    }

    #[test]
    fn slugs_are_url_safe() {
        assert_eq!(
            Some(s!("my-first-post")),
            slug_for_path(Utf8Path::new("/posts/My First Post.md"))
        );
        assert_eq!(
            Some(s!("hello-world")),
            slug_for_path(Utf8Path::new("hello-world.mdx"))
        );
        assert_eq!(None, slug_for_path(Utf8Path::new("/posts/?!.md")));
    }

    #[test]
    fn read_from_path_slugifies() {
        let dir = camino::Utf8PathBuf::try_from(std::env::temp_dir())
            .unwrap()
            .join(format!("jotter-post-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("My First Post.md");
        std::fs::write(&path, "---\ntitle: A\ndescription: d\ndate: 2024-03-08\n---\n").unwrap();
        let unusable = dir.join("!!.md");
        std::fs::write(&unusable, "---\ntitle: A\ndescription: d\ndate: 2024-03-08\n---\n").unwrap();

        let post = Post::read_from_path(&path);
        let err = Post::read_from_path(&unusable);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!("my-first-post", post.unwrap().slug);
        assert!(matches!(err, Err(ReadFromPathError::NoSlug)));
    }
}
